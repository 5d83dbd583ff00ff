//! Fire-and-forget reporting of client exceptions.

use std::fmt;

/// Kind of user action being recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionCategory {
    /// A failure shown to the user.
    Error,
}

impl fmt::Display for ActionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => f.write_str("error"),
        }
    }
}

/// Outcome of the recorded action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionResult {
    /// The action failed.
    Fail,
}

impl fmt::Display for ActionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fail => f.write_str("fail"),
        }
    }
}

/// Where in the client the failure was shown.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Location {
    /// Logical route name, e.g. `config`.
    pub route: String,
    /// Path of the route, e.g. `/config`.
    pub path: String,
}

impl Location {
    /// Creates a location.
    #[must_use]
    pub fn new(route: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            route: route.into(),
            path: path.into(),
        }
    }
}

/// One telemetry record for a client-originated failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionRecord {
    /// Always [`ActionCategory::Error`] for formatted failures.
    pub category: ActionCategory,
    /// Route the failure was shown on.
    pub route: String,
    /// Path the failure was shown on.
    pub path: String,
    /// Always [`ActionResult::Fail`] for formatted failures.
    pub result: ActionResult,
    /// The formatted message.
    pub message: String,
}

/// Sink for client-exception telemetry.
///
/// `report` returns nothing: implementations must not block and must
/// absorb their own failures.
pub trait ActionReporter: Send + Sync {
    /// Records one action.
    fn report(&self, record: ActionRecord);
}

impl<R: ActionReporter + ?Sized> ActionReporter for &R {
    fn report(&self, record: ActionRecord) {
        (**self).report(record);
    }
}

/// Emits each record as a structured `tracing` warning.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl ActionReporter for TracingReporter {
    fn report(&self, record: ActionRecord) {
        tracing::warn!(
            category = %record.category,
            route = %record.route,
            path = %record.path,
            result = %record.result,
            "Client exception: {}",
            record.message
        );
    }
}

/// Discards every record.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopReporter;

impl ActionReporter for NoopReporter {
    fn report(&self, _record: ActionRecord) {}
}
