//! Value-shape validators for configuration form fields.
//!
//! This module provides:
//! - Anchored patterns for counts, byte sizes and durations ([`ValidatorPattern`])
//! - Pass/fail helpers carrying the offending value ([`FormatError`])
//! - Typed parsers for values that passed validation ([`parse_count`],
//!   [`parse_byte_size`], [`parse_duration`])
//! - Form cleanup before submission ([`omit_empty_arrays`])
//!
//! # Empty Values
//!
//! The empty string means "unset" and is accepted by every validator.
//! The typed parsers return `Ok(None)` for it.

mod form;
mod parse;
mod pattern;

#[cfg(test)]
mod pattern_tests;

use thiserror::Error;

pub use form::omit_empty_arrays;
pub use parse::{GIB, KIB, MIB, parse_byte_size, parse_count, parse_duration};
pub use pattern::{ValidatorKind, ValidatorPattern};

/// A value that does not have the expected shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid {kind} value '{value}'")]
pub struct FormatError {
    /// The shape the value was checked against.
    pub kind: ValidatorKind,
    /// The rejected value, verbatim.
    pub value: String,
}

impl FormatError {
    /// Creates an error for the given kind and value.
    #[must_use]
    pub fn new(kind: ValidatorKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }
}

/// Checks that `value` is empty or a plain decimal count.
///
/// # Errors
///
/// Returns [`FormatError`] if the value contains anything but ASCII digits.
pub fn validate_count(value: &str) -> Result<(), FormatError> {
    ValidatorPattern::get(ValidatorKind::Count).validate(value)
}

/// Checks that `value` is empty or a byte size such as `512kb` or `1.5 GB`.
///
/// # Errors
///
/// Returns [`FormatError`] if the number or unit is malformed.
pub fn validate_byte_size(value: &str) -> Result<(), FormatError> {
    ValidatorPattern::get(ValidatorKind::ByteSize).validate(value)
}

/// Checks that `value` is empty or a duration such as `30s` or `2H`.
///
/// # Errors
///
/// Returns [`FormatError`] if the number or unit is malformed.
pub fn validate_duration(value: &str) -> Result<(), FormatError> {
    ValidatorPattern::get(ValidatorKind::Duration).validate(value)
}
