use std::sync::Arc;

use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use thiserror::Error;

use crate::services::auth::jwks::{JwksError, KeySetSource};

/// Claims handed back to the authorizer once a token verifies.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DecodedClaims {
    pub sub: String,
    // Cognito access tokens carry no email; ID tokens do.
    #[serde(default)]
    pub email: Option<String>,
}

/// Why a token was rejected. Only ever logged; callers see `None`.
#[derive(Debug, Error)]
pub enum VerifyError {
    #[error("token header could not be decoded: {0}")]
    MalformedHeader(#[source] jsonwebtoken::errors::Error),
    #[error("token header has no kid")]
    MissingKid,
    #[error("no user pool id configured")]
    MissingUserPool,
    #[error(transparent)]
    KeySet(#[from] JwksError),
    #[error("no matching key found for kid {0}")]
    UnknownKid(String),
    #[error("matched key is not a usable RSA key (kty {0})")]
    UnsupportedKeyType(String),
    #[error("jwt verification failed: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
}

/// RS256 verifier for Cognito-issued tokens.
#[derive(Clone)]
pub struct TokenVerifier {
    keys: Arc<dyn KeySetSource>,
    validation: Validation,
}

impl std::fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenVerifier")
            .field("validation", &self.validation)
            .finish()
    }
}

impl TokenVerifier {
    pub fn new(keys: Arc<dyn KeySetSource>) -> Self {
        let mut validation = Validation::new(Algorithm::RS256);
        // exp/nbf are enforced only when present, without leeway; aud is not checked.
        validation.required_spec_claims.clear();
        validation.validate_nbf = true;
        validation.validate_aud = false;
        validation.leeway = 0;

        Self { keys, validation }
    }

    /// Verify `token` against the pool's current key set.
    ///
    /// Every failure (bad header, unreachable JWKS, unknown kid, bad signature,
    /// expiry) is logged and collapsed to `None`.
    pub async fn verify(
        &self,
        token: &str,
        user_pool_id: Option<&str>,
        region: &str,
    ) -> Option<DecodedClaims> {
        match self.try_verify(token, user_pool_id, region).await {
            Ok(claims) => Some(claims),
            Err(err) => {
                tracing::warn!(error = %err, "token verification failed");
                None
            }
        }
    }

    /// Same as [`verify`](Self::verify) but keeps the failure cause.
    pub async fn try_verify(
        &self,
        token: &str,
        user_pool_id: Option<&str>,
        region: &str,
    ) -> Result<DecodedClaims, VerifyError> {
        let header = jsonwebtoken::decode_header(token).map_err(VerifyError::MalformedHeader)?;
        let kid = header.kid.ok_or(VerifyError::MissingKid)?;
        let user_pool_id = user_pool_id.ok_or(VerifyError::MissingUserPool)?;

        let key_set = self.keys.fetch(region, user_pool_id).await?;
        let jwk = key_set
            .find(&kid)
            .ok_or_else(|| VerifyError::UnknownKid(kid.clone()))?;

        if !jwk.is_usable_rsa() {
            return Err(VerifyError::UnsupportedKeyType(jwk.kty.clone()));
        }

        let key = DecodingKey::from_rsa_components(&jwk.n, &jwk.e)?;
        let data = jsonwebtoken::decode::<DecodedClaims>(token, &key, &self.validation)?;

        tracing::debug!(kid = %kid, sub = %data.claims.sub, "token verified");
        Ok(data.claims)
    }
}
