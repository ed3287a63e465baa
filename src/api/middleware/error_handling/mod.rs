//! Error boundary for HTTP handlers
//!
//! - config.rs: builder that compiles redaction patterns and the sentinel table
//! - responder.rs: classifies, redacts, logs and shapes the error response

pub mod config;
pub mod responder;

pub use config::ErrorHandlingConfig;
pub use responder::{log_level_for, ErrorResponder, ResponseOptions};
