use axum::response::Json;
use utoipa::OpenApi;

use crate::api::errors::ErrorBody;
use crate::api::handlers::health::HealthResponse;

/// OpenAPI document for the error boundary
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Error Boundary API",
        version = "1.0.0",
        description = "Every failed request is answered with the ErrorBody schema and an x-trace-id header"
    ),
    paths(
        crate::api::handlers::health::health_handler,
        crate::api::handlers::not_found::not_found_handler,
    ),
    components(schemas(ErrorBody, HealthResponse)),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "errors", description = "Error response shape")
    )
)]
pub struct ApiDoc;

/// GET /openapi.json
pub async fn openapi_handler() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
