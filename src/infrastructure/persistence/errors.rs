//! Persistence error adapter
//!
//! Recognized database failures become sentinels; the driver error itself is
//! kept so its (redacted) text still reaches the log.

use sqlx::error::ErrorKind;

use crate::domain::{AppError, Sentinel};

/// Sentinel a driver error stands for, if any.
pub fn sentinel_for(error: &sqlx::Error) -> Option<Sentinel> {
    match error {
        sqlx::Error::RowNotFound => Some(Sentinel::NotFound),
        sqlx::Error::Database(db_err) => match db_err.kind() {
            ErrorKind::UniqueViolation => Some(Sentinel::Duplicate),
            ErrorKind::ForeignKeyViolation
            | ErrorKind::NotNullViolation
            | ErrorKind::CheckViolation => Some(Sentinel::InvalidEntity),
            _ => None,
        },
        _ => None,
    }
}

impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> Self {
        match sentinel_for(&error) {
            Some(sentinel) => AppError::tagged(error, sentinel),
            None => AppError::unknown(error),
        }
    }
}
