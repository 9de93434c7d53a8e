use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// API Gateway request-authorizer event.
///
/// Only the fields the authorizer reads are modeled; anything else in the
/// payload is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizerEvent {
    // "REQUEST" for request authorizers.
    #[serde(default, rename = "type")]
    pub event_type: Option<String>,
    pub method_arn: String,
    #[serde(default)]
    pub headers: Option<HashMap<String, String>>,
}

impl AuthorizerEvent {
    pub fn new(method_arn: impl Into<String>) -> Self {
        Self {
            event_type: Some("REQUEST".to_string()),
            method_arn: method_arn.into(),
            headers: None,
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .get_or_insert_with(HashMap::new)
            .insert(name.into(), value.into());
        self
    }
}
