//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`reports`] - 销售报表接口

pub mod health;
pub mod reports;

use std::time::Duration;

use axum::Router;
use axum::error_handling::HandleErrorLayer;
use http::{HeaderName, HeaderValue};
use tower::timeout::TimeoutLayer;
use tower::timeout::error::Elapsed;
use tower::{BoxError, ServiceBuilder};
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::core::ServerState;
use crate::utils::AppError;

// Re-export common types for handlers
pub use crate::utils::AppResult;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Custom request ID generator
#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

/// Build a router with all routes registered (no middleware, no state)
pub fn build_router() -> Router<ServerState> {
    Router::new()
        // Health API
        .merge(health::router())
        // Reports API
        .merge(reports::router())
        .fallback(route_not_found)
}

/// Build a fully configured application with all middleware
///
/// Used by the HTTP server and by oneshot calls in tests
pub fn build_app(state: &ServerState) -> Router<ServerState> {
    let timeout_ms = state.config.request_timeout_ms;

    build_router()
        // Timeout - whole request, including the store query; errors become ApiResponse
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(move |err: BoxError| async move {
                    middleware_error(err, timeout_ms)
                }))
                .layer(TimeoutLayer::new(Duration::from_millis(timeout_ms))),
        )
        // CORS - Handle cross-origin requests
        .layer(CorsLayer::permissive())
        // Trace - Request tracing (logs at INFO level)
        .layer(TraceLayer::new_for_http())
        // Propagate request ID to response
        .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
            REQUEST_ID_HEADER,
        )))
        // Request ID - outermost layer
        .layer(SetRequestIdLayer::new(
            HeaderName::from_static(REQUEST_ID_HEADER),
            XRequestId,
        ))
}

async fn route_not_found() -> AppError {
    AppError::not_found("Route")
}

/// Errors raised by tower middleware (not by handlers)
fn middleware_error(err: BoxError, timeout_ms: u64) -> AppError {
    if err.is::<Elapsed>() {
        tracing::warn!(timeout_ms, "Request timed out");
        AppError::request_timeout(timeout_ms)
    } else {
        AppError::internal(format!("Unhandled middleware error: {err}"))
    }
}
