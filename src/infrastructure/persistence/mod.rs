mod errors;

pub use errors::sentinel_for;
