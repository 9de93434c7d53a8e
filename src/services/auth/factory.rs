/// Factory: build `TokenVerifier` from application `Config`.
use std::sync::Arc;

use crate::config::Config;
use crate::services::auth::{HttpKeySetSource, TokenVerifier};

pub fn build_token_verifier(config: &Config) -> TokenVerifier {
    let source = match &config.cognito_idp_endpoint {
        Some(endpoint) => HttpKeySetSource::with_endpoint(endpoint.as_str()),
        None => HttpKeySetSource::new(),
    };

    TokenVerifier::new(Arc::new(source))
}
