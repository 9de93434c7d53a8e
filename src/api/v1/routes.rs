/*
 * Responsibility
 * - v1 の URL 構造を定義
 * - /authorize (/health は root に置く)
 */
use axum::{Router, routing::post};

use crate::api::v1::handlers::authorize::authorize;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/authorize", post(authorize))
}
