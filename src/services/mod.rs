pub mod auth;
pub mod authorizer;
pub mod cookies;
