//! Failure types surfaced to the user.

use std::error::Error as StdError;

use thiserror::Error;

use super::category;

/// A failure tagged with a category and a client-exception flag.
///
/// Built where the failure is detected (transport, validation) and
/// consumed once by [`format_error`](super::format_error).
///
/// # Example
///
/// ```
/// use confsync::classify::ClassifiedError;
///
/// let err = ClassifiedError::new("request failed")
///     .with_category("timeout")
///     .into_exception();
///
/// assert_eq!(err.category(), Some("timeout"));
/// assert!(err.is_exception());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ClassifiedError {
    message: String,
    category: Option<String>,
    exception: bool,
}

impl ClassifiedError {
    /// Creates an error with no category that did not originate client-side.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            category: None,
            exception: false,
        }
    }

    /// Creates a client-side input validation failure.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(message).with_category(category::VALIDATION)
    }

    /// Sets the category.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Marks the failure as a client exception (timeout, abort, unreachable host).
    #[must_use]
    pub fn into_exception(mut self) -> Self {
        self.exception = true;
        self
    }

    /// Returns the human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the category, if any.
    #[must_use]
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    /// Returns `true` if the failure originated from client-side execution.
    #[must_use]
    pub const fn is_exception(&self) -> bool {
        self.exception
    }
}

/// Everything a caller can catch, discriminated once at the catch site.
#[derive(Debug)]
pub enum CaughtError {
    /// A failure carrying category and exception information.
    Classified(ClassifiedError),

    /// Any other error value.
    Generic(Box<dyn StdError + Send + Sync>),

    /// A failure that is not an error value, with whatever message it had.
    Unknown(Option<String>),
}

impl CaughtError {
    /// Wraps an arbitrary error value.
    #[must_use]
    pub fn generic(err: impl StdError + Send + Sync + 'static) -> Self {
        Self::Generic(Box::new(err))
    }

    /// Returns the classified error, if this is one.
    #[must_use]
    pub const fn as_classified(&self) -> Option<&ClassifiedError> {
        match self {
            Self::Classified(err) => Some(err),
            Self::Generic(_) | Self::Unknown(_) => None,
        }
    }
}

impl From<ClassifiedError> for CaughtError {
    fn from(err: ClassifiedError) -> Self {
        Self::Classified(err)
    }
}

impl From<Box<dyn StdError + Send + Sync>> for CaughtError {
    fn from(err: Box<dyn StdError + Send + Sync>) -> Self {
        Self::Generic(err)
    }
}
