//! Validation error sanitization
//!
//! Turns request-validation failures into a single client-safe sentence.
//! Validator output is never echoed; only the field name and a fixed phrase
//! for the failed rule are kept.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::{AppError, ValidationError};

pub const GENERIC_VALIDATION_MESSAGE: &str = "Validation error";

/// Text shape produced by struct validators that report
/// `Field validation for '<Field>' failed on the '<tag>' tag`.
static VALIDATOR_FIELD_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"Field validation for '([^']+)' failed on the '([^']*)' tag")
        .expect("Invalid validator field regex")
});

/// Fixed phrase for a failed validation rule.
pub fn tag_message(tag: &str) -> &'static str {
    match tag {
        "required" => "required field",
        "email" => "invalid email format",
        "min" => "too short",
        "max" => "too long",
        "oneof" => "invalid value",
        _ => "validation failed",
    }
}

/// Client message for a request that failed validation.
///
/// A structured [`ValidationError`] in the chain wins; then the validator
/// text shape; otherwise a constant.
pub fn sanitize_validation_error(err: &AppError) -> String {
    if let Some(validation) = err.chain().find_map(|link| match link {
        AppError::Validation(validation) => Some(validation),
        _ => None,
    }) {
        return if validation.field.is_empty() {
            validation.message.clone()
        } else {
            format!("Invalid {}: {}", validation.field, validation.message)
        };
    }

    let detail = err.detailed_message();
    if let Some(caps) = VALIDATOR_FIELD_REGEX.captures(&detail) {
        let field = &caps[1];
        let tag = &caps[2];

        return if tag.is_empty() {
            format!("Invalid {}", field)
        } else {
            format!("Invalid {}: {}", field, tag_message(tag))
        };
    }

    GENERIC_VALIDATION_MESSAGE.to_string()
}

/// Map a `validator` failure onto the tag vocabulary above.
///
/// `length` and `range` carry their bounds in `params`; whichever bound the
/// value violates decides between "min" and "max".
fn validator_tag(error: &validator::ValidationError) -> &str {
    let code = error.code.as_ref();
    if code != "length" && code != "range" {
        return code;
    }

    let min = error.params.get("min").and_then(|v| v.as_f64());
    let max = error.params.get("max").and_then(|v| v.as_f64());
    let value = error.params.get("value").and_then(|v| match v {
        serde_json::Value::String(s) => Some(s.chars().count() as f64),
        serde_json::Value::Array(items) => Some(items.len() as f64),
        other => other.as_f64(),
    });

    match (min, max, value) {
        (Some(min), _, Some(value)) if value < min => "min",
        (_, Some(max), Some(value)) if value > max => "max",
        (Some(_), None, None) => "min",
        (None, Some(_), None) => "max",
        _ => code,
    }
}

impl From<validator::ValidationErrors> for AppError {
    /// Keeps the first failing field, by name, so the message is stable
    /// across runs.
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        fields.sort_by(|a, b| a.0.cmp(&b.0));

        let first = fields
            .into_iter()
            .find_map(|(field, errs)| errs.first().map(|err| (field.to_string(), err)));

        match first {
            Some((field, err)) => {
                let message = match &err.message {
                    Some(message) => message.to_string(),
                    None => tag_message(validator_tag(err)).to_string(),
                };
                ValidationError::new(field, message).into()
            }
            None => ValidationError::new("", "Validation failed").into(),
        }
    }
}
