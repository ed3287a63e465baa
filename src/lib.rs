//! # Error Boundary
//!
//! Trust boundary for error information in an HTTP service. Internal
//! failures go in; a safe, minimal response and a redacted, still useful log
//! record come out.
//!
//! ## Architecture Layers
//!
//! - **Domain**: sentinel errors and the closed [`AppError`] type
//! - **Application**: redaction engine, taxonomy resolver, validation sanitizer
//! - **Infrastructure**: adapters from database and token errors to sentinels
//! - **API**: trace middleware, error responder and the axum router
//!
//! ## Example Usage
//!
//! ```no_run
//! use error_boundary::{
//!     api::middleware::{ErrorHandlingConfig, RequestContext, ResponseOptions},
//!     domain::{AppError, Sentinel},
//! };
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let responder = ErrorHandlingConfig::new().build()?;
//! let err = AppError::from(Sentinel::CardNotFound).wrap("loading card");
//! let response = responder.handle_api_error(
//!     &RequestContext::default(),
//!     &err,
//!     "",
//!     ResponseOptions::new(),
//! );
//! assert_eq!(response.message(), "Card not found");
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use api::errors::{ApiError, ErrorBody};
pub use application::{ErrorClassifier, Redactor};
pub use config::{Config, ConfigError};
pub use domain::{AppError, Sentinel};
