/*
 * Responsibility
 * - POST /authorize
 * - API Gateway の authorizer event を受け取り、Allow/Deny の policy を返す
 * - 検証失敗は 200 + Deny (エラーにはしない)
 */
use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;

use crate::error::AppError;
use crate::services::authorizer::{AuthorizerEvent, AuthorizerResponse};
use crate::state::AppState;

pub async fn authorize(
    State(state): State<AppState>,
    payload: Result<Json<AuthorizerEvent>, JsonRejection>,
) -> Result<Json<AuthorizerResponse>, AppError> {
    let Json(event) = payload?;

    Ok(Json(state.authorizer.authorize(&event).await))
}
