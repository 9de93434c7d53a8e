pub mod factory;
pub mod jwks;
pub mod token_verifier;

pub use factory::build_token_verifier;
pub use jwks::{HttpKeySetSource, KeySetSource};
pub use token_verifier::{DecodedClaims, TokenVerifier};
