use axum::extract::State;

use crate::api::errors::{ApiError, ErrorBody};
use crate::api::middleware::{ErrorResponder, RequestContext, ResponseOptions};
use crate::domain::Sentinel;

/// Fallback for unknown routes; goes through the error boundary like any
/// other failure.
#[utoipa::path(
    get,
    path = "/{unknown}",
    tag = "errors",
    params(("unknown" = String, Path, description = "Any unrouted path")),
    responses(
        (status = 404, description = "No such route", body = ErrorBody)
    )
)]
pub async fn not_found_handler(
    State(responder): State<ErrorResponder>,
    ctx: RequestContext,
) -> ApiError {
    responder.handle_api_error(&ctx, &Sentinel::NotFound.into(), "", ResponseOptions::new())
}
