//! Cognito JWKS fetching.
//!
//! The key set is fetched on every call; nothing is cached between verifications.
use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

/// One public signing key from a Cognito user pool.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Jwk {
    #[serde(default)]
    pub alg: Option<String>,
    // `e`/`n` are RSA-only; other key types in the set leave them empty.
    #[serde(default)]
    pub e: String,
    pub kid: String,
    pub kty: String,
    #[serde(default)]
    pub n: String,
    #[serde(default, rename = "use")]
    pub key_use: Option<String>,
}

/// `/.well-known/jwks.json` body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct KeySet {
    pub keys: Vec<Jwk>,
}

impl Jwk {
    /// RSA key with both public components present.
    pub fn is_usable_rsa(&self) -> bool {
        self.kty == "RSA" && !self.n.is_empty() && !self.e.is_empty()
    }
}

impl KeySet {
    /// First key whose `kid` matches.
    pub fn find(&self, kid: &str) -> Option<&Jwk> {
        self.keys.iter().find(|k| k.kid == kid)
    }
}

#[derive(Debug, Error)]
pub enum JwksError {
    #[error("jwks request failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("jwks endpoint returned {0}")]
    Status(reqwest::StatusCode),
    #[error("jwks body could not be decoded: {0}")]
    Decode(#[source] reqwest::Error),
}

/// Well-known key-set URL of a Cognito user pool.
pub fn jwks_url(region: &str, user_pool_id: &str) -> String {
    format!(
        "{}/{}/.well-known/jwks.json",
        cognito_origin(region),
        user_pool_id
    )
}

fn cognito_origin(region: &str) -> String {
    format!("https://cognito-idp.{}.amazonaws.com", region)
}

/// Where key sets come from.
///
/// Implementations must not cache: every call is expected to reflect the
/// provider's current keys.
#[async_trait]
pub trait KeySetSource: Send + Sync + 'static {
    async fn fetch(&self, region: &str, user_pool_id: &str) -> Result<KeySet, JwksError>;
}

/// Fetches key sets over HTTPS with reqwest.
///
/// No timeout or retry is configured on the client.
#[derive(Debug, Clone)]
pub struct HttpKeySetSource {
    client: reqwest::Client,
    // Replaces `https://cognito-idp.<region>.amazonaws.com` when set (local IdP emulators, tests).
    endpoint: Option<String>,
}

impl HttpKeySetSource {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: None,
        }
    }

    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        let endpoint: String = endpoint.into();
        Self {
            client: reqwest::Client::new(),
            endpoint: Some(endpoint.trim_end_matches('/').to_string()),
        }
    }

    pub fn url_for(&self, region: &str, user_pool_id: &str) -> String {
        match &self.endpoint {
            Some(base) => format!("{}/{}/.well-known/jwks.json", base, user_pool_id),
            None => jwks_url(region, user_pool_id),
        }
    }
}

impl Default for HttpKeySetSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl KeySetSource for HttpKeySetSource {
    async fn fetch(&self, region: &str, user_pool_id: &str) -> Result<KeySet, JwksError> {
        let url = self.url_for(region, user_pool_id);
        tracing::debug!(url = %url, "fetching jwks");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(JwksError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(JwksError::Status(status));
        }

        let keys: KeySet = response.json().await.map_err(JwksError::Decode)?;
        tracing::debug!(key_count = keys.keys.len(), "jwks fetched");

        Ok(keys)
    }
}
