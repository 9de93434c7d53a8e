//! HTTP-level middleware for the authorizer surface.
//!
//! - `x-request-id` generated when missing and echoed back
//! - TraceLayer access logs
//! - body limit sized for authorizer events
//! - request timeout: the only bound on a hung JWKS fetch, since the key-set
//!   client itself has none

use std::time::Duration;

use axum::Router;
use axum::error_handling::HandleErrorLayer;
use axum::http::{StatusCode, header::HeaderName};
use tower::timeout::TimeoutLayer;
use tower::{BoxError, ServiceBuilder};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpLimits {
    pub body_limit_bytes: usize,
    pub request_timeout: Duration,
}

impl HttpLimits {
    pub fn from_config(config: &Config) -> Self {
        Self {
            body_limit_bytes: config.request_body_limit_bytes,
            request_timeout: config.request_timeout,
        }
    }
}

/// A request that outlives the timeout is answered with 504: the usual cause
/// is the key-set endpoint not answering.
async fn handle_layer_error(err: BoxError) -> StatusCode {
    if err.is::<tower::timeout::error::Elapsed>() {
        tracing::warn!("authorize request timed out");
        StatusCode::GATEWAY_TIMEOUT
    } else {
        tracing::error!(error = %err, "unhandled middleware error");
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

pub fn apply(router: Router, limits: HttpLimits) -> Router {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    router.layer(
        ServiceBuilder::new()
            .layer(SetRequestIdLayer::new(request_id.clone(), MakeRequestUuid))
            .layer(PropagateRequestIdLayer::new(request_id))
            .layer(TraceLayer::new_for_http())
            .layer(HandleErrorLayer::new(handle_layer_error))
            .layer(TimeoutLayer::new(limits.request_timeout))
            .layer(RequestBodyLimitLayer::new(limits.body_limit_bytes)),
    )
}
