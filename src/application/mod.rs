pub mod classification;
pub mod redaction;
pub mod validation;

pub use classification::{
    Classification, ClassificationRule, ClassificationTable, ErrorClassifier,
    UNEXPECTED_ERROR_MESSAGE,
};
pub use redaction::{RedactionError, RedactionRule, Redactor, Replacement};
pub use validation::{sanitize_validation_error, tag_message};
