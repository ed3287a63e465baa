use thiserror::Error;

/// Process-wide sentinel errors.
///
/// Each variant names exactly one failure category. Sentinels are compared by
/// value, so a sentinel buried anywhere in a wrap chain can be recognized
/// without looking at message text.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sentinel {
    // Authentication (token issuance/verification)
    #[error("invalid authentication token")]
    InvalidToken,

    #[error("authentication token has expired")]
    ExpiredToken,

    #[error("authentication token not yet valid")]
    TokenNotYetValid,

    #[error("authentication token is missing")]
    MissingToken,

    #[error("invalid refresh token")]
    InvalidRefreshToken,

    #[error("refresh token has expired")]
    ExpiredRefreshToken,

    #[error("wrong token type")]
    WrongTokenType,

    #[error("unauthorized operation")]
    Unauthorized,

    // Ownership
    #[error("unauthorized access: card not owned by user")]
    CardNotOwned,

    #[error("resource is owned by another user")]
    NotOwned,

    // Lookups
    #[error("user not found")]
    UserNotFound,

    #[error("card not found")]
    CardNotFound,

    #[error("memo not found")]
    MemoNotFound,

    #[error("card stats not found")]
    CardStatsNotFound,

    #[error("entity not found")]
    NotFound,

    // Uniqueness
    #[error("email already exists")]
    EmailExists,

    #[error("entity already exists")]
    Duplicate,

    // Input
    #[error("validation failed")]
    Validation,

    #[error("invalid format")]
    InvalidFormat,

    #[error("invalid ID")]
    InvalidId,

    #[error("invalid email format")]
    InvalidEmail,

    #[error("invalid password")]
    InvalidPassword,

    #[error("content cannot be empty")]
    EmptyContent,

    #[error("invalid review outcome")]
    InvalidReviewOutcome,

    #[error("invalid card content")]
    InvalidCardContent,

    #[error("invalid memo status")]
    InvalidMemoStatus,

    #[error("invalid entity")]
    InvalidEntity,

    #[error("invalid answer")]
    InvalidAnswer,

    #[error("rate limit exceeded")]
    RateLimitExceeded,

    /// Empty result rather than a fault.
    #[error("no cards due for review")]
    NoCardsDue,

    // Store failures with no client-facing category
    #[error("method not implemented")]
    NotImplemented,

    #[error("update failed")]
    UpdateFailed,

    #[error("delete failed")]
    DeleteFailed,

    #[error("transaction failed")]
    TransactionFailed,
}
