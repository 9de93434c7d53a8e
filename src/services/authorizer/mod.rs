//! Cookie token → Allow/Deny policy.
//!
//! Composes cookie parsing, token verification and policy construction the way
//! an API Gateway request authorizer entry point would.
pub mod event;
pub mod policy;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::services::auth::TokenVerifier;
use crate::services::cookies::parse_cookies;

pub use event::AuthorizerEvent;
pub use policy::{Effect, PolicyDocument, create_policy};

/// Principal reported for denied requests.
pub const ANONYMOUS_PRINCIPAL: &str = "anonymous";

/// Authorizer output as API Gateway expects it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizerResponse {
    pub principal_id: String,
    pub policy_document: PolicyDocument,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<BTreeMap<String, String>>,
}

#[derive(Debug, Clone)]
pub struct Authorizer {
    verifier: TokenVerifier,
    region: String,
    user_pool_id: Option<String>,
    cookie_name: String,
}

impl Authorizer {
    pub fn new(
        verifier: TokenVerifier,
        region: impl Into<String>,
        user_pool_id: Option<String>,
        cookie_name: impl Into<String>,
    ) -> Self {
        Self {
            verifier,
            region: region.into(),
            user_pool_id,
            cookie_name: cookie_name.into(),
        }
    }

    pub async fn authorize(&self, event: &AuthorizerEvent) -> AuthorizerResponse {
        let token = parse_cookies(event.headers.as_ref())
            .and_then(|cookies| cookies.get(&self.cookie_name).map(str::to_string));

        let Some(token) = token else {
            tracing::info!(cookie = %self.cookie_name, "no token cookie on request");
            return deny(event);
        };

        let claims = self
            .verifier
            .verify(&token, self.user_pool_id.as_deref(), &self.region)
            .await;

        match claims {
            Some(claims) => {
                tracing::info!(sub = %claims.sub, "request allowed");

                let mut context = BTreeMap::new();
                context.insert("sub".to_string(), claims.sub.clone());
                if let Some(email) = claims.email {
                    context.insert("email".to_string(), email);
                }

                AuthorizerResponse {
                    principal_id: claims.sub,
                    policy_document: create_policy(event, Effect::Allow),
                    context: Some(context),
                }
            }
            None => deny(event),
        }
    }
}

fn deny(event: &AuthorizerEvent) -> AuthorizerResponse {
    AuthorizerResponse {
        principal_id: ANONYMOUS_PRINCIPAL.to_string(),
        policy_document: create_policy(event, Effect::Deny),
        context: None,
    }
}
