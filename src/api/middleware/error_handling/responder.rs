use std::sync::Arc;

use axum::http::StatusCode;
use tracing::{debug, error, warn, Level};

use crate::api::errors::ApiError;
use crate::api::middleware::trace::RequestContext;
use crate::application::{sanitize_validation_error, ErrorClassifier, Redactor};
use crate::domain::AppError;

/// Per-call emitter options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResponseOptions {
    /// Log ordinary 4xx responses at WARN instead of DEBUG
    pub elevate_log_level: bool,
}

impl ResponseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_elevated_log_level(mut self) -> Self {
        self.elevate_log_level = true;
        self
    }
}

/// Severity for an error response; `None` means the response is not logged.
pub fn log_level_for(status: StatusCode, options: ResponseOptions) -> Option<Level> {
    if status == StatusCode::NO_CONTENT {
        None
    } else if status.is_server_error() {
        Some(Level::ERROR)
    } else if status == StatusCode::TOO_MANY_REQUESTS {
        Some(Level::WARN)
    } else if status.is_client_error() && options.elevate_log_level {
        Some(Level::WARN)
    } else {
        Some(Level::DEBUG)
    }
}

/// Turns a failed request into a safe response plus one redacted log record.
#[derive(Debug, Clone)]
pub struct ErrorResponder {
    redactor: Arc<Redactor>,
    classifier: Arc<ErrorClassifier>,
}

impl Default for ErrorResponder {
    fn default() -> Self {
        Self::new(Redactor::standard(), ErrorClassifier::default())
    }
}

impl ErrorResponder {
    pub fn new(redactor: Redactor, classifier: ErrorClassifier) -> Self {
        Self {
            redactor: Arc::new(redactor),
            classifier: Arc::new(classifier),
        }
    }

    pub fn redactor(&self) -> &Redactor {
        &self.redactor
    }

    pub fn classifier(&self) -> &ErrorClassifier {
        &self.classifier
    }

    /// Classify `err` and emit it.
    ///
    /// A non-empty `fallback_message` replaces the message of any 500
    /// response.
    pub fn handle_api_error(
        &self,
        ctx: &RequestContext,
        err: &AppError,
        fallback_message: &str,
        options: ResponseOptions,
    ) -> ApiError {
        let mut classification = self.classifier.classify(Some(err));
        if classification.status == StatusCode::INTERNAL_SERVER_ERROR
            && !fallback_message.is_empty()
        {
            classification.message = fallback_message.to_string();
        }

        self.emit(ctx, err, classification.status, classification.message, options)
    }

    /// Emit a request-validation failure; always 400.
    pub fn handle_validation_error(
        &self,
        ctx: &RequestContext,
        err: &AppError,
        options: ResponseOptions,
    ) -> ApiError {
        let message = sanitize_validation_error(err);
        self.emit(ctx, err, StatusCode::BAD_REQUEST, message, options)
    }

    fn emit(
        &self,
        ctx: &RequestContext,
        err: &AppError,
        status: StatusCode,
        message: String,
        options: ResponseOptions,
    ) -> ApiError {
        if let Some(level) = log_level_for(status, options) {
            self.log(level, ctx, err, status, &message);
        }

        ApiError::new(status, message).with_trace_id(ctx.trace_id.as_ref())
    }

    fn log(
        &self,
        level: Level,
        ctx: &RequestContext,
        err: &AppError,
        status: StatusCode,
        user_message: &str,
    ) {
        let redacted = self.redactor.redact_error(err);
        let error_type = err.type_name();
        let trace_id = ctx.trace_id.as_ref().map(|t| t.as_str()).unwrap_or_default();
        let status_code = status.as_u16();

        if level == Level::ERROR {
            error!(
                status_code,
                error = %redacted,
                error_type,
                trace_id,
                user_message,
                path = %ctx.path,
                method = %ctx.method,
                "API error response"
            );
        } else if level == Level::WARN {
            warn!(
                status_code,
                error = %redacted,
                error_type,
                trace_id,
                user_message,
                path = %ctx.path,
                method = %ctx.method,
                "API error response"
            );
        } else {
            debug!(
                status_code,
                error = %redacted,
                error_type,
                trace_id,
                user_message,
                path = %ctx.path,
                method = %ctx.method,
                "API error response"
            );
        }
    }
}
