//! Error taxonomy resolver
//!
//! Maps an [`AppError`] to the `(status, safe message)` pair a client sees.
//! Resolution is total: anything it does not recognize degrades to the
//! generic 500 pair.

use axum::http::StatusCode;

use crate::domain::{AppError, Sentinel, ServiceError, StoreError};

pub const UNEXPECTED_ERROR_MESSAGE: &str = "An unexpected error occurred";

/// Client-facing outcome of classifying an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub status: StatusCode,
    pub message: String,
}

impl Classification {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// The generic 500 pair.
    pub fn unexpected() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, UNEXPECTED_ERROR_MESSAGE)
    }

    pub fn is_unexpected(&self) -> bool {
        self.status == StatusCode::INTERNAL_SERVER_ERROR && self.message == UNEXPECTED_ERROR_MESSAGE
    }
}

/// One table row: a sentinel and what a client is told about it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassificationRule {
    pub sentinel: Sentinel,
    pub status: StatusCode,
    pub safe_message: &'static str,
}

impl ClassificationRule {
    pub const fn new(sentinel: Sentinel, status: StatusCode, safe_message: &'static str) -> Self {
        Self {
            sentinel,
            status,
            safe_message,
        }
    }
}

/// Ordered sentinel table. The first row whose sentinel appears in the
/// chain wins.
#[derive(Debug, Clone)]
pub struct ClassificationTable {
    rules: Vec<ClassificationRule>,
}

impl ClassificationTable {
    pub fn new(rules: Vec<ClassificationRule>) -> Self {
        Self { rules }
    }

    pub fn standard() -> Self {
        use Sentinel::*;

        let unauthorized = StatusCode::UNAUTHORIZED;
        let forbidden = StatusCode::FORBIDDEN;
        let not_found = StatusCode::NOT_FOUND;
        let conflict = StatusCode::CONFLICT;
        let bad_request = StatusCode::BAD_REQUEST;

        Self::new(vec![
            // Authentication
            ClassificationRule::new(InvalidToken, unauthorized, "Invalid token"),
            ClassificationRule::new(ExpiredToken, unauthorized, "Invalid token"),
            ClassificationRule::new(TokenNotYetValid, unauthorized, "Invalid token"),
            ClassificationRule::new(MissingToken, unauthorized, "Authentication required"),
            ClassificationRule::new(InvalidRefreshToken, unauthorized, "Invalid refresh token"),
            ClassificationRule::new(ExpiredRefreshToken, unauthorized, "Invalid refresh token"),
            ClassificationRule::new(WrongTokenType, unauthorized, "Invalid refresh token"),
            ClassificationRule::new(Unauthorized, unauthorized, "Unauthorized operation"),
            // Ownership
            ClassificationRule::new(CardNotOwned, forbidden, "You do not own this card"),
            ClassificationRule::new(NotOwned, forbidden, "You do not own this resource"),
            // Lookups; specific entities before the generic one
            ClassificationRule::new(UserNotFound, not_found, "User not found"),
            ClassificationRule::new(CardNotFound, not_found, "Card not found"),
            ClassificationRule::new(MemoNotFound, not_found, "Memo not found"),
            ClassificationRule::new(CardStatsNotFound, not_found, "Card statistics not found"),
            ClassificationRule::new(NotFound, not_found, "Resource not found"),
            // Conflicts
            ClassificationRule::new(EmailExists, conflict, "Email already exists"),
            ClassificationRule::new(Duplicate, conflict, "Resource already exists"),
            // Input
            ClassificationRule::new(Validation, bad_request, "Validation failed"),
            ClassificationRule::new(InvalidFormat, bad_request, "Invalid format"),
            ClassificationRule::new(InvalidId, bad_request, "Invalid ID"),
            ClassificationRule::new(InvalidEmail, bad_request, "Invalid email format"),
            ClassificationRule::new(InvalidPassword, bad_request, "Invalid password"),
            ClassificationRule::new(EmptyContent, bad_request, "Content cannot be empty"),
            ClassificationRule::new(InvalidReviewOutcome, bad_request, "Invalid review outcome"),
            ClassificationRule::new(InvalidCardContent, bad_request, "Invalid card content"),
            ClassificationRule::new(InvalidMemoStatus, bad_request, "Invalid memo status"),
            ClassificationRule::new(InvalidEntity, bad_request, "Invalid entity data"),
            ClassificationRule::new(InvalidAnswer, bad_request, "Invalid answer"),
            ClassificationRule::new(
                RateLimitExceeded,
                StatusCode::TOO_MANY_REQUESTS,
                "Too many requests",
            ),
            ClassificationRule::new(
                NoCardsDue,
                StatusCode::NO_CONTENT,
                "No cards due for review",
            ),
        ])
    }

    pub fn rules(&self) -> &[ClassificationRule] {
        &self.rules
    }

    /// First row whose sentinel is anywhere in the chain.
    pub fn lookup(&self, err: &AppError) -> Option<&ClassificationRule> {
        self.rules.iter().find(|rule| err.is(rule.sentinel))
    }
}

impl Default for ClassificationTable {
    fn default() -> Self {
        Self::standard()
    }
}

/// Resolves errors against a [`ClassificationTable`].
#[derive(Debug, Clone, Default)]
pub struct ErrorClassifier {
    table: ClassificationTable,
}

/// The outermost store or service error in a chain.
enum OperationError<'a> {
    Store(&'a StoreError),
    Service(&'a ServiceError),
}

impl ErrorClassifier {
    pub fn new(table: ClassificationTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &ClassificationTable {
        &self.table
    }

    pub fn classify(&self, err: Option<&AppError>) -> Classification {
        let Some(err) = err else {
            return Classification::unexpected();
        };

        if let Some(validation) = err.chain().find_map(|link| match link {
            AppError::Validation(validation) => Some(validation),
            _ => None,
        }) {
            let message = if validation.field.is_empty() {
                validation.message.clone()
            } else {
                format!("Invalid {}: {}", validation.field, validation.message)
            };
            return Classification::new(StatusCode::BAD_REQUEST, message);
        }

        if let Some(operation) = err.chain().find_map(|link| match link {
            AppError::Store(store) => Some(OperationError::Store(store)),
            AppError::Service(service) => Some(OperationError::Service(service)),
            _ => None,
        }) {
            return self.classify_operation(operation);
        }

        match self.table.lookup(err) {
            Some(rule) => Classification::new(rule.status, rule.safe_message),
            None => Classification::unexpected(),
        }
    }

    /// A recognized cause wins; otherwise the family's own fallback.
    fn classify_operation(&self, operation: OperationError<'_>) -> Classification {
        let (cause, fallback) = match operation {
            OperationError::Store(store) => (
                store.cause(),
                format!("Operation failed: {}", store.message),
            ),
            OperationError::Service(service) => (
                service.cause(),
                format!("{} operation failed", service.service),
            ),
        };

        if let Some(cause) = cause {
            let inner = self.classify(Some(cause));
            if !inner.is_unexpected() {
                return inner;
            }
        }

        Classification::new(StatusCode::INTERNAL_SERVER_ERROR, fallback)
    }
}
