//! Structured error families and the closed application error type
//!
//! Every failure that can reach the HTTP boundary is an [`AppError`]. The set
//! of variants is closed: sentinels, the three structured families, context
//! wrapping, and an opaque `Unknown` carrier for foreign errors. Each layer's
//! `Display` describes only that layer; causes are reachable through
//! [`AppError::cause`] and `source()`.

use std::any::type_name;
use std::error::Error as StdError;
use std::fmt;

use thiserror::Error;

use super::errors::Sentinel;

/// Field-level validation failure.
///
/// `message` is shown to clients verbatim, so callers must only put
/// user-safe text in it.
#[derive(Debug, Error)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
    #[source]
    pub cause: Option<Box<AppError>>,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            cause: None,
        }
    }

    pub fn with_cause(mut self, cause: impl Into<AppError>) -> Self {
        self.cause = Some(Box::new(cause.into()));
        self
    }

    pub fn cause(&self) -> Option<&AppError> {
        self.cause.as_deref()
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.field.is_empty() {
            write!(f, "validation failed: {}", self.message)
        } else {
            write!(f, "validation failed for {}: {}", self.field, self.message)
        }
    }
}

/// Failure of a persistence operation on an entity.
#[derive(Debug, Error)]
#[error("store {operation} on {entity} failed: {message}")]
pub struct StoreError {
    pub entity: String,
    pub operation: String,
    pub message: String,
    #[source]
    pub cause: Option<Box<AppError>>,
}

impl StoreError {
    pub fn new(
        entity: impl Into<String>,
        operation: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            entity: entity.into(),
            operation: operation.into(),
            message: message.into(),
            cause: None,
        }
    }

    pub fn with_cause(mut self, cause: impl Into<AppError>) -> Self {
        self.cause = Some(Box::new(cause.into()));
        self
    }

    pub fn cause(&self) -> Option<&AppError> {
        self.cause.as_deref()
    }
}

/// Failure of a business service operation.
///
/// `service` is the human-readable service name ("Card review"); it is used
/// to build the generic client message when the cause is not recognized.
#[derive(Debug, Error)]
#[error("{service} {operation} failed: {message}")]
pub struct ServiceError {
    pub service: String,
    pub operation: String,
    pub message: String,
    #[source]
    pub cause: Option<Box<AppError>>,
}

impl ServiceError {
    pub fn new(
        service: impl Into<String>,
        operation: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            service: service.into(),
            operation: operation.into(),
            message: message.into(),
            cause: None,
        }
    }

    pub fn with_cause(mut self, cause: impl Into<AppError>) -> Self {
        self.cause = Some(Box::new(cause.into()));
        self
    }

    pub fn cause(&self) -> Option<&AppError> {
        self.cause.as_deref()
    }
}

/// Main application error type
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Sentinel(#[from] Sentinel),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Service(#[from] ServiceError),

    /// Context added on the way up, like `fmt.Errorf("...: %w")` or
    /// `anyhow::Context`.
    #[error("{context}")]
    Wrapped {
        context: String,
        #[source]
        source: Box<AppError>,
    },

    /// Any error this crate has no structure for. `type_name` records the
    /// concrete type at the conversion point.
    #[error("{error:#}")]
    Unknown {
        type_name: &'static str,
        error: anyhow::Error,
    },
}

impl AppError {
    /// Carry a foreign error as `Unknown`, remembering its concrete type.
    pub fn unknown<E>(error: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        AppError::Unknown {
            type_name: type_name::<E>(),
            error: anyhow::Error::new(error),
        }
    }

    /// Carry a foreign error that is known to mean `sentinel`.
    ///
    /// The original error keeps its type name and text for logging; the
    /// sentinel is attached as `anyhow` context so [`AppError::is`] sees it.
    pub fn tagged<E>(error: E, sentinel: Sentinel) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        AppError::Unknown {
            type_name: type_name::<E>(),
            error: anyhow::Error::new(error).context(sentinel),
        }
    }

    /// Add a layer of context on top of this error.
    pub fn wrap(self, context: impl Into<String>) -> Self {
        AppError::Wrapped {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// The next link in the wrap chain, if any.
    pub fn cause(&self) -> Option<&AppError> {
        match self {
            AppError::Validation(err) => err.cause(),
            AppError::Store(err) => err.cause(),
            AppError::Service(err) => err.cause(),
            AppError::Wrapped { source, .. } => Some(source),
            AppError::Sentinel(_) | AppError::Unknown { .. } => None,
        }
    }

    /// Iterate the wrap chain, starting with `self`.
    pub fn chain(&self) -> impl Iterator<Item = &AppError> {
        std::iter::successors(Some(self), |err| AppError::cause(err))
    }

    /// Chain-aware sentinel test.
    ///
    /// Also looks inside `Unknown` carriers, so a sentinel wrapped by
    /// `anyhow` context is still recognized.
    pub fn is(&self, sentinel: Sentinel) -> bool {
        self.chain().any(|link| match link {
            AppError::Sentinel(found) => *found == sentinel,
            AppError::Unknown { error, .. } => {
                error.downcast_ref::<Sentinel>() == Some(&sentinel)
                    || error.chain().any(|cause| carries(cause, sentinel))
            }
            _ => false,
        })
    }

    /// Concrete type name of the outermost non-context layer.
    pub fn type_name(&self) -> &'static str {
        match self {
            AppError::Sentinel(_) => type_name::<Sentinel>(),
            AppError::Validation(_) => type_name::<ValidationError>(),
            AppError::Store(_) => type_name::<StoreError>(),
            AppError::Service(_) => type_name::<ServiceError>(),
            AppError::Wrapped { source, .. } => source.type_name(),
            AppError::Unknown { type_name, .. } => type_name,
        }
    }

    /// Full chain rendered as `outer: middle: inner`.
    ///
    /// This is raw internal text and must only be logged after redaction.
    pub fn detailed_message(&self) -> String {
        self.chain()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(": ")
    }
}

impl From<anyhow::Error> for AppError {
    /// Recovers an `AppError` or structured error carried by `anyhow`; context
    /// added above it comes back as `Wrapped` layers. Anything else is
    /// `Unknown`.
    fn from(error: anyhow::Error) -> Self {
        let layers: Vec<String> = error.chain().map(ToString::to_string).collect();

        match recover(error) {
            Ok(recovered) => {
                let own = recovered.to_string();
                let depth = layers.iter().position(|layer| *layer == own).unwrap_or(0);

                layers[..depth]
                    .iter()
                    .rev()
                    .fold(recovered, |err, context| err.wrap(context.as_str()))
            }
            Err(error) => AppError::Unknown {
                type_name: type_name::<anyhow::Error>(),
                error,
            },
        }
    }
}

/// Take ownership of a structured error that `anyhow` can downcast to,
/// either the wrapped error itself or one under its context.
fn recover(error: anyhow::Error) -> Result<AppError, anyhow::Error> {
    let error = match error.downcast::<AppError>() {
        Ok(found) => return Ok(found),
        Err(error) => error,
    };
    let error = match error.downcast::<ValidationError>() {
        Ok(found) => return Ok(found.into()),
        Err(error) => error,
    };
    let error = match error.downcast::<StoreError>() {
        Ok(found) => return Ok(found.into()),
        Err(error) => error,
    };
    error.downcast::<ServiceError>().map(AppError::from)
}

/// Sentinel test for one link of a foreign error chain. Structured errors
/// found there are searched through their own causes.
fn carries(cause: &(dyn StdError + 'static), sentinel: Sentinel) -> bool {
    if let Some(found) = cause.downcast_ref::<Sentinel>() {
        return *found == sentinel;
    }
    if let Some(app) = cause.downcast_ref::<AppError>() {
        return app.is(sentinel);
    }
    if let Some(app) = cause.downcast_ref::<Box<AppError>>() {
        return app.is(sentinel);
    }

    cause
        .downcast_ref::<ValidationError>()
        .and_then(ValidationError::cause)
        .or_else(|| cause.downcast_ref::<StoreError>().and_then(StoreError::cause))
        .or_else(|| cause.downcast_ref::<ServiceError>().and_then(ServiceError::cause))
        .is_some_and(|nested| nested.is(sentinel))
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        AppError::unknown(error)
    }
}

/// Context wrapping for results whose error converts into [`AppError`].
pub trait ResultExt<T> {
    fn wrap_err(self, context: impl Into<String>) -> Result<T, AppError>;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: Into<AppError>,
{
    fn wrap_err(self, context: impl Into<String>) -> Result<T, AppError> {
        self.map_err(|err| err.into().wrap(context))
    }
}
