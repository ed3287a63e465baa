pub mod error_types;
pub mod errors;

pub use error_types::{AppError, ResultExt, ServiceError, StoreError, ValidationError};
pub use errors::Sentinel;
