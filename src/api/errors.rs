use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;

use crate::api::middleware::trace::TraceId;

/// Error response body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    /// Client-safe message
    #[schema(example = "Card not found")]
    pub error: String,
    /// Correlation id, also sent as the `x-trace-id` header
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "4bf92f3577b34da6a3ce929d0e0e4736")]
    pub trace_id: Option<String>,
}

/// API error response
///
/// Built by the error responder; the message is already safe to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    status: StatusCode,
    message: String,
    trace_id: Option<String>,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            trace_id: None,
        }
    }

    pub fn with_trace_id(mut self, trace_id: Option<&TraceId>) -> Self {
        self.trace_id = trace_id.map(ToString::to_string);
        self
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }

    pub fn body(&self) -> ErrorBody {
        ErrorBody {
            error: self.message.clone(),
            trace_id: self.trace_id.clone(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status == StatusCode::NO_CONTENT {
            return self.status.into_response();
        }

        json_response(self.status, &self.body())
    }
}

/// Serialize `body` as the JSON response.
///
/// An encoding failure is logged and answered with the same status and
/// headers but an empty body.
pub fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Response {
    let content_type = [(header::CONTENT_TYPE, "application/json")];

    match serde_json::to_vec(body) {
        Ok(bytes) => (status, content_type, bytes).into_response(),
        Err(err) => {
            error!(
                status_code = status.as_u16(),
                error = %err,
                "failed to encode JSON error response"
            );
            (status, content_type).into_response()
        }
    }
}
