use std::net::SocketAddr;

use thiserror::Error;

/// Configuration errors, reported at startup
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key} is invalid: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl LogFormat {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" => Some(LogFormat::Pretty),
            "json" => Some(LogFormat::Json),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub listen_addr: String,
    /// `tracing_subscriber::EnvFilter` directive, e.g. `info` or
    /// `error_boundary=debug,tower_http=info`
    pub log_level: String,
    /// `pretty` or `json`
    pub log_format: String,
    /// Extra regexes whose matches are replaced with `[REDACTED]`
    pub redaction_patterns: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8080".to_string(),
            log_level: "info".to_string(),
            log_format: "pretty".to_string(),
            redaction_patterns: Vec::new(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; `from_env` passes the process
    /// environment.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Self {
            listen_addr: lookup("LISTEN_ADDR").unwrap_or(defaults.listen_addr),
            log_level: lookup("LOG_LEVEL").unwrap_or(defaults.log_level),
            log_format: lookup("LOG_FORMAT").unwrap_or(defaults.log_format),
            redaction_patterns: lookup("REDACTION_PATTERNS")
                .map(|s| parse_patterns(&s))
                .unwrap_or_default(),
        }
    }

    pub fn log_format(&self) -> Result<LogFormat, ConfigError> {
        LogFormat::parse(&self.log_format).ok_or_else(|| ConfigError::Invalid {
            key: "LOG_FORMAT",
            reason: format!("'{}' must be 'pretty' or 'json'", self.log_format),
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.listen_addr.is_empty() {
            return Err(ConfigError::Invalid {
                key: "LISTEN_ADDR",
                reason: "cannot be empty".to_string(),
            });
        }

        if self.listen_addr.parse::<SocketAddr>().is_err() {
            return Err(ConfigError::Invalid {
                key: "LISTEN_ADDR",
                reason: format!("'{}' is not a socket address", self.listen_addr),
            });
        }

        if self.log_level.trim().is_empty() {
            return Err(ConfigError::Invalid {
                key: "LOG_LEVEL",
                reason: "cannot be empty".to_string(),
            });
        }

        self.log_format()?;

        Ok(())
    }
}

/// Comma-separated list; blank entries are dropped.
fn parse_patterns(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
