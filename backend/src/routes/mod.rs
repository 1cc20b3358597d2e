//! Route definitions for the gym groups API
//!
//! This module organizes all API routes and applies middleware. Every
//! response outside `/health` carries a JSON body, including the 404, 405 and
//! 408 answers produced by the router itself.

use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    error_handling::HandleErrorLayer,
    http::{header, Method},
    routing::get,
    BoxError, Router,
};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::error;

mod extract;
mod groups;
mod health;

pub use health::HEALTH_MESSAGE;

/// Create the main application router with all middleware
pub fn create_router(state: AppState) -> Router {
    let request_timeout = Duration::from_secs(state.config().server.request_timeout_secs);

    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .nest("/groups", groups::group_routes())
        // Must follow every route so nested method routers pick it up
        .method_not_allowed_fallback(method_not_allowed)
        .fallback(not_found)
        // Apply middleware layers
        .layer(CompressionLayer::new())
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(handle_middleware_error))
                .timeout(request_timeout),
        )
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST, Method::PUT])
                .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]),
        )
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn not_found() -> ApiError {
    ApiError::NotFound("Route not found".to_string())
}

async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

async fn handle_middleware_error(err: BoxError) -> ApiError {
    if err.is::<tower::timeout::error::Elapsed>() {
        ApiError::Timeout
    } else {
        error!(error = %err, "Unhandled middleware error");
        ApiError::Internal
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    #[tokio::test]
    async fn test_elapsed_maps_to_timeout() {
        let err: BoxError = Box::new(tower::timeout::error::Elapsed::new());

        let response = handle_middleware_error(err).await.into_response();

        assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
    }

    #[tokio::test]
    async fn test_other_middleware_errors_are_internal() {
        let err: BoxError = "boom".into();

        let response = handle_middleware_error(err).await.into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
