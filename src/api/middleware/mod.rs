pub mod error_handling;
pub mod trace;

pub use error_handling::{ErrorHandlingConfig, ErrorResponder, ResponseOptions};
pub use trace::{trace_middleware, RequestContext, TraceId, TRACE_ID_HEADER};
