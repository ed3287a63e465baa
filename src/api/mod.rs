pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod router;

pub use router::{build_router, create_router};
