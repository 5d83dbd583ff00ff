//! Compiled, anchored patterns for each value shape.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use super::FormatError;

/// The value shapes a configuration field can be checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidatorKind {
    /// One or more decimal digits, no sign or separators.
    Count,
    /// An integer or decimal number, an optional space and `kb`, `mb` or `gb`.
    ByteSize,
    /// Digits immediately followed by one of `s`, `m`, `h`, `d`.
    Duration,
}

impl ValidatorKind {
    /// Every kind, in declaration order.
    pub const ALL: [Self; 3] = [Self::Count, Self::ByteSize, Self::Duration];

    /// Regex source for this kind. Both ends are anchored.
    const fn source(self) -> &'static str {
        match self {
            Self::Count => r"^[0-9]+$",
            Self::ByteSize => r"(?i)^[0-9]+(\.[0-9]+)? ?(kb|mb|gb)$",
            Self::Duration => r"(?i)^[0-9]+[smhd]$",
        }
    }

    /// Human-readable name used in error messages.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Count => "count",
            Self::ByteSize => "byte size",
            Self::Duration => "duration",
        }
    }
}

impl fmt::Display for ValidatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A compiled pattern bound to one [`ValidatorKind`].
///
/// Patterns are compiled once per process and shared; obtain them with
/// [`ValidatorPattern::get`]. Two patterns are equal when their kinds are.
///
/// # Examples
///
/// ```
/// use confsync::validate::{ValidatorKind, ValidatorPattern};
///
/// let bytes = ValidatorPattern::get(ValidatorKind::ByteSize);
/// assert!(bytes.is_valid("1.5 MB"));
/// assert!(bytes.is_valid(""));
/// assert!(!bytes.is_valid("5 tb"));
/// ```
#[derive(Debug)]
pub struct ValidatorPattern {
    kind: ValidatorKind,
    regex: Regex,
}

static COUNT: LazyLock<ValidatorPattern> =
    LazyLock::new(|| ValidatorPattern::compile(ValidatorKind::Count));
static BYTE_SIZE: LazyLock<ValidatorPattern> =
    LazyLock::new(|| ValidatorPattern::compile(ValidatorKind::ByteSize));
static DURATION: LazyLock<ValidatorPattern> =
    LazyLock::new(|| ValidatorPattern::compile(ValidatorKind::Duration));

impl ValidatorPattern {
    fn compile(kind: ValidatorKind) -> Self {
        Self {
            kind,
            regex: Regex::new(kind.source()).expect("built-in validator pattern must compile"),
        }
    }

    /// Returns the shared pattern for `kind`.
    #[must_use]
    pub fn get(kind: ValidatorKind) -> &'static Self {
        match kind {
            ValidatorKind::Count => &COUNT,
            ValidatorKind::ByteSize => &BYTE_SIZE,
            ValidatorKind::Duration => &DURATION,
        }
    }

    /// Returns the kind this pattern checks.
    #[must_use]
    pub const fn kind(&self) -> ValidatorKind {
        self.kind
    }

    /// Returns `true` if `value` is empty or matches the whole pattern.
    #[must_use]
    pub fn is_valid(&self, value: &str) -> bool {
        value.is_empty() || self.regex.is_match(value)
    }

    /// Like [`is_valid`](Self::is_valid), but reports the offending value.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError`] when the value is rejected.
    pub fn validate(&self, value: &str) -> Result<(), FormatError> {
        if self.is_valid(value) {
            Ok(())
        } else {
            Err(self.error(value))
        }
    }

    pub(super) fn error(&self, value: &str) -> FormatError {
        FormatError::new(self.kind, value)
    }
}

impl PartialEq for ValidatorPattern {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
    }
}

impl Eq for ValidatorPattern {}
