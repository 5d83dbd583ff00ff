//! Error classification and user-facing message formatting.
//!
//! This module provides:
//! - The category-tagged failure type ([`ClassifiedError`])
//! - The catch-site union of everything that can fail ([`CaughtError`])
//! - Message formatting ([`format_error`], [`ErrorFormatter`])
//! - Category checks ([`is_error_of_category`])
//! - Client-exception telemetry ([`ActionReporter`], [`TracingReporter`])
//!
//! # Formatting Contract
//!
//! | Input                          | Output                         |
//! |--------------------------------|--------------------------------|
//! | Classified, with category      | `message [CATEGORY]`           |
//! | Classified, without category   | `message`                      |
//! | Generic error                  | its `Display` text             |
//! | Unknown, with message          | that message                   |
//! | Unknown, without message       | [`UNKNOWN_ERROR_MESSAGE`]      |
//!
//! Classified errors flagged as client exceptions are also reported once
//! to the [`ActionReporter`].

mod error;
mod format;
mod report;


pub use error::{CaughtError, ClassifiedError};
pub use format::{ErrorFormatter, format_error, is_error_of_category};
pub use report::{
    ActionCategory, ActionRecord, ActionReporter, ActionResult, Location, NoopReporter,
    TracingReporter,
};

/// Message used when a failure carries no usable text.
pub const UNKNOWN_ERROR_MESSAGE: &str = "unknown error";

/// Well-known failure categories.
///
/// Servers may send any category string; these are the ones produced
/// locally.
pub mod category {
    /// The request did not complete in time.
    pub const TIMEOUT: &str = "timeout";
    /// The server could not be reached.
    pub const CONNECTION: &str = "connection";
    /// The request could not be built.
    pub const REQUEST: &str = "request";
    /// Input was rejected before it was sent.
    pub const VALIDATION: &str = "validation";
    /// A success response could not be decoded.
    pub const DECODE: &str = "decode";
    /// The server answered with a non-success status and no category.
    pub const HTTP: &str = "http";
}
