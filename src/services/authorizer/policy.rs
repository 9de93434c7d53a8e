/*
 * Responsibility
 * - API Gateway に返す IAM 形式の policy document を組み立てる
 * - 純粋関数 (失敗しない)
 */
use serde::{Deserialize, Serialize};

use crate::services::authorizer::event::AuthorizerEvent;

pub const POLICY_VERSION: &str = "2012-10-17";
pub const INVOKE_ACTION: &str = "execute-api:Invoke";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum Effect {
    Allow,
    Deny,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PolicyDocument {
    pub version: String,
    pub statement: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Statement {
    pub effect: Effect,
    pub action: String,
    pub resource: Vec<String>,
}

/// One statement applying `effect` to invoking exactly `event.method_arn`.
pub fn create_policy(event: &AuthorizerEvent, effect: Effect) -> PolicyDocument {
    PolicyDocument {
        version: POLICY_VERSION.to_string(),
        statement: vec![Statement {
            effect,
            action: INVOKE_ACTION.to_string(),
            resource: vec![event.method_arn.clone()],
        }],
    }
}
