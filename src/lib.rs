//! API Gateway request authorizer backed by Cognito-issued cookie tokens.
//!
//! - [`services::cookies`]: `Cookie` header parsing
//! - [`services::auth`]: JWKS fetch + RS256 verification
//! - [`services::authorizer`]: policy documents and the authorizer entry point
pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod services;
pub mod state;

#[cfg(test)]
mod testing;
