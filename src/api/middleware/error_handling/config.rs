use crate::application::{ClassificationTable, ErrorClassifier, RedactionError, Redactor};
use crate::config::Config;

use super::responder::ErrorResponder;

/// Error handling configuration
#[derive(Debug, Clone, Default)]
pub struct ErrorHandlingConfig {
    /// Extra redaction regexes, applied after the built-in rules
    pub sensitive_patterns: Vec<String>,
    /// Sentinel table; the standard one unless overridden
    pub classification_table: ClassificationTable,
}

impl ErrorHandlingConfig {
    /// Create a new config with the built-in rules only
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the operator patterns from the service configuration
    pub fn from_config(config: &Config) -> Self {
        Self {
            sensitive_patterns: config.redaction_patterns.clone(),
            ..Self::default()
        }
    }

    /// Add a sensitive pattern
    pub fn with_sensitive_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.sensitive_patterns.push(pattern.into());
        self
    }

    /// Replace the sentinel table
    pub fn with_classification_table(mut self, table: ClassificationTable) -> Self {
        self.classification_table = table;
        self
    }

    /// Compile the patterns and build the shared responder.
    pub fn build(&self) -> Result<ErrorResponder, RedactionError> {
        let redactor = Redactor::standard().with_patterns(&self.sensitive_patterns)?;
        let classifier = ErrorClassifier::new(self.classification_table.clone());

        Ok(ErrorResponder::new(redactor, classifier))
    }
}
