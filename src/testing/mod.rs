//! Test fixtures: RSA signing keys, token minting and log capture.
use std::io;
use std::sync::{Arc, Mutex};

use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde::Serialize;
use tracing_subscriber::fmt::MakeWriter;

use crate::services::auth::jwks::{Jwk, KeySet};

pub const SIGNING_KEY_PEM: &str = include_str!("fixtures/rsa_signing_private.pem");
pub const SIGNING_KEY_N: &str = include_str!("fixtures/rsa_signing_n.txt");
pub const OTHER_KEY_PEM: &str = include_str!("fixtures/rsa_other_private.pem");
pub const OTHER_KEY_N: &str = include_str!("fixtures/rsa_other_n.txt");
pub const RSA_E: &str = "AQAB";

pub const KID: &str = "test-key-01";

#[derive(Debug, Serialize)]
pub struct TestClaims {
    pub sub: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nbf: Option<i64>,
    pub aud: String,
    pub token_use: String,
}

impl TestClaims {
    pub fn new(sub: &str, email: &str) -> Self {
        Self {
            sub: sub.to_string(),
            email: Some(email.to_string()),
            exp: Some(chrono::Utc::now().timestamp() + 3600),
            nbf: None,
            aud: "client-app".to_string(),
            token_use: "id".to_string(),
        }
    }
}

pub fn rsa_jwk(kid: &str, n: &str) -> Jwk {
    Jwk {
        alg: Some("RS256".to_string()),
        e: RSA_E.to_string(),
        kid: kid.to_string(),
        kty: "RSA".to_string(),
        n: n.trim().to_string(),
        key_use: Some("sig".to_string()),
    }
}

pub fn signing_key_set() -> KeySet {
    KeySet {
        keys: vec![rsa_jwk("unrelated-key", OTHER_KEY_N), rsa_jwk(KID, SIGNING_KEY_N)],
    }
}

pub fn key_set_json(set: &KeySet) -> serde_json::Value {
    let keys: Vec<_> = set
        .keys
        .iter()
        .map(|k| {
            serde_json::json!({
                "alg": k.alg,
                "e": k.e,
                "kid": k.kid,
                "kty": k.kty,
                "n": k.n,
                "use": k.key_use,
            })
        })
        .collect();
    serde_json::json!({ "keys": keys })
}

pub fn sign_rs256(private_pem: &str, kid: Option<&str>, claims: &TestClaims) -> String {
    let key = EncodingKey::from_rsa_pem(private_pem.as_bytes()).expect("rsa pem");
    let mut header = Header::new(Algorithm::RS256);
    header.typ = Some("JWT".to_string());
    header.kid = kid.map(str::to_string);
    jsonwebtoken::encode(&header, claims, &key).expect("sign")
}

pub fn sign_hs256(secret: &[u8], kid: &str, claims: &TestClaims) -> String {
    let mut header = Header::new(Algorithm::HS256);
    header.kid = Some(kid.to_string());
    jsonwebtoken::encode(&header, claims, &EncodingKey::from_secret(secret)).expect("sign")
}

/// Token signed with the fixture key under `KID`.
pub fn valid_token(sub: &str, email: &str) -> String {
    sign_rs256(SIGNING_KEY_PEM, Some(KID), &TestClaims::new(sub, email))
}

/// An http origin nothing listens on.
pub fn unreachable_endpoint() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);
    format!("http://{}", addr)
}

/// Collects formatted log output from a scoped subscriber.
#[derive(Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    /// Install as the thread-local default until the guard drops.
    pub fn install(&self) -> tracing::subscriber::DefaultGuard {
        let subscriber = tracing_subscriber::fmt()
            .with_writer(self.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::DEBUG)
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    pub fn contents(&self) -> String {
        let buf = self.0.lock().expect("log buffer");
        String::from_utf8_lossy(&buf).into_owned()
    }
}

pub struct CapturedWriter(Arc<Mutex<Vec<u8>>>);

impl io::Write for CapturedWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0
            .lock()
            .map_err(|_| io::Error::other("log buffer poisoned"))?
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedWriter;

    fn make_writer(&'a self) -> Self::Writer {
        CapturedWriter(self.0.clone())
    }
}
