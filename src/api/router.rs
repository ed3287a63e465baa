use axum::{
    http::header::{AUTHORIZATION, COOKIE},
    middleware as axum_middleware,
    routing::get,
    Router,
};
use tower_http::sensitive_headers::SetSensitiveRequestHeadersLayer;

use crate::api::handlers::{health_handler, not_found_handler};
use crate::api::middleware::{trace, ErrorResponder};
use crate::api::openapi::openapi_handler;

/// Create router with the boundary's own routes and middleware
pub fn create_router(responder: ErrorResponder) -> Router {
    build_router(Router::new(), responder)
}

/// Mount `routes` behind the error boundary.
///
/// Handlers in `routes` can extract `State<ErrorResponder>` and
/// `RequestContext` to report failures.
pub fn build_router(routes: Router<ErrorResponder>, responder: ErrorResponder) -> Router {
    routes
        .route("/health", get(health_handler))
        .route("/openapi.json", get(openapi_handler))
        .fallback(not_found_handler)
        .with_state(responder)
        // Sensitive headers are never printed by any tracing layer
        .layer(SetSensitiveRequestHeadersLayer::new([AUTHORIZATION, COOKIE]))
        .layer(axum_middleware::from_fn(trace::trace_middleware))
}
