//! Token verification error adapter

use jsonwebtoken::errors::{Error as JwtError, ErrorKind};

use crate::domain::{AppError, Sentinel};

impl From<JwtError> for AppError {
    fn from(error: JwtError) -> Self {
        let sentinel = match error.kind() {
            ErrorKind::ExpiredSignature => Sentinel::ExpiredToken,
            ErrorKind::ImmatureSignature => Sentinel::TokenNotYetValid,
            _ => Sentinel::InvalidToken,
        };
        AppError::tagged(error, sentinel)
    }
}
