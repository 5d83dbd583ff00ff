//! Turning caught failures into one display line.

use super::report::{ActionCategory, ActionRecord, ActionReporter, ActionResult, Location};
use super::{CaughtError, UNKNOWN_ERROR_MESSAGE};

/// Formats a caught failure for display.
///
/// Classified errors get their category appended in upper case. When the
/// error is a client exception, one [`ActionRecord`] is sent to `reporter`
/// before returning.
///
/// # Example
///
/// ```
/// use confsync::classify::{CaughtError, ClassifiedError, Location, NoopReporter, format_error};
///
/// let err = CaughtError::from(ClassifiedError::new("request failed").with_category("timeout"));
/// let text = format_error(&err, &NoopReporter, &Location::default());
///
/// assert_eq!(text, "request failed [TIMEOUT]");
/// ```
pub fn format_error<R: ActionReporter + ?Sized>(
    err: &CaughtError,
    reporter: &R,
    location: &Location,
) -> String {
    match err {
        CaughtError::Classified(err) => {
            let mut message = err.message().to_string();
            if let Some(category) = err.category().filter(|c| !c.is_empty()) {
                message.push_str(" [");
                message.push_str(&category.to_uppercase());
                message.push(']');
            }

            if err.is_exception() {
                reporter.report(ActionRecord {
                    category: ActionCategory::Error,
                    route: location.route.clone(),
                    path: location.path.clone(),
                    result: ActionResult::Fail,
                    message: message.clone(),
                });
            }

            message
        }
        CaughtError::Generic(err) => err.to_string(),
        CaughtError::Unknown(message) => message
            .as_deref()
            .unwrap_or(UNKNOWN_ERROR_MESSAGE)
            .to_string(),
    }
}

/// Returns `true` if `err` is classified with exactly `category`.
///
/// The comparison is case-sensitive. Unclassified errors never match.
#[must_use]
pub fn is_error_of_category(err: &CaughtError, category: &str) -> bool {
    err.as_classified()
        .and_then(|err| err.category())
        .is_some_and(|c| c == category)
}

/// A reporter bound to the location failures are shown at.
///
/// Convenience wrapper so call sites only pass the error.
#[derive(Debug, Clone, Default)]
pub struct ErrorFormatter<R> {
    reporter: R,
    location: Location,
}

impl<R: ActionReporter> ErrorFormatter<R> {
    /// Creates a formatter that reports client exceptions at `location`.
    #[must_use]
    pub const fn new(reporter: R, location: Location) -> Self {
        Self { reporter, location }
    }

    /// Replaces the location attached to reported records.
    #[must_use]
    pub fn with_location(mut self, location: Location) -> Self {
        self.location = location;
        self
    }

    /// Formats `err`; see [`format_error`].
    #[must_use]
    pub fn format(&self, err: &CaughtError) -> String {
        format_error(err, &self.reporter, &self.location)
    }

    /// Returns the location attached to reported records.
    #[must_use]
    pub const fn location(&self) -> &Location {
        &self.location
    }

    /// Returns the underlying reporter.
    #[must_use]
    pub const fn reporter(&self) -> &R {
        &self.reporter
    }
}
