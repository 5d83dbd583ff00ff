//! Typed parsing for values that passed shape validation.

use std::time::Duration;

use super::{FormatError, ValidatorKind, ValidatorPattern};

/// Bytes in one `kb`.
pub const KIB: u64 = 1024;
/// Bytes in one `mb`.
pub const MIB: u64 = KIB * 1024;
/// Bytes in one `gb`.
pub const GIB: u64 = MIB * 1024;

/// Fraction digits beyond this cannot change a whole-byte result.
const MAX_FRACTION_DIGITS: usize = 9;

/// Parses a count such as `42`.
///
/// # Errors
///
/// Returns [`FormatError`] if the value is malformed or does not fit in a `u64`.
pub fn parse_count(value: &str) -> Result<Option<u64>, FormatError> {
    let pattern = ValidatorPattern::get(ValidatorKind::Count);
    pattern.validate(value)?;
    if value.is_empty() {
        return Ok(None);
    }
    value.parse::<u64>().map(Some).map_err(|_| pattern.error(value))
}

/// Parses a byte size such as `512kb` or `1.5 GB` into bytes.
///
/// Units are powers of 1024. Fractional results are truncated to whole bytes.
///
/// # Errors
///
/// Returns [`FormatError`] if the value is malformed or overflows a `u64`.
pub fn parse_byte_size(value: &str) -> Result<Option<u64>, FormatError> {
    let pattern = ValidatorPattern::get(ValidatorKind::ByteSize);
    pattern.validate(value)?;
    if value.is_empty() {
        return Ok(None);
    }

    // Validated input is ASCII and ends with a two-letter unit.
    let lower = value.to_ascii_lowercase();
    let (number, unit) = lower.split_at(lower.len() - 2);
    let multiplier = match unit {
        "kb" => KIB,
        "mb" => MIB,
        "gb" => GIB,
        _ => return Err(pattern.error(value)),
    };

    let (whole, fraction) = number
        .trim_end()
        .split_once('.')
        .unwrap_or((number.trim_end(), ""));

    let whole_bytes = whole
        .parse::<u64>()
        .ok()
        .and_then(|n| n.checked_mul(multiplier))
        .ok_or_else(|| pattern.error(value))?;

    whole_bytes
        .checked_add(fraction_bytes(fraction, multiplier))
        .map(Some)
        .ok_or_else(|| pattern.error(value))
}

/// Bytes contributed by the digits after the decimal point.
fn fraction_bytes(fraction: &str, multiplier: u64) -> u64 {
    let digits = &fraction[..fraction.len().min(MAX_FRACTION_DIGITS)];
    if digits.is_empty() {
        return 0;
    }
    let Ok(numerator) = digits.parse::<u64>() else {
        return 0;
    };
    // At most 9 digits, so the scale fits in u32 and the product cannot overflow.
    #[allow(clippy::cast_possible_truncation)]
    let scale = 10_u64.pow(digits.len() as u32);
    numerator * multiplier / scale
}

/// Parses a duration such as `30s`, `5m`, `2h` or `1d`.
///
/// # Errors
///
/// Returns [`FormatError`] if the value is malformed or overflows.
pub fn parse_duration(value: &str) -> Result<Option<Duration>, FormatError> {
    let pattern = ValidatorPattern::get(ValidatorKind::Duration);
    pattern.validate(value)?;
    if value.is_empty() {
        return Ok(None);
    }

    let (number, unit) = value.split_at(value.len() - 1);
    let unit_secs = match unit.to_ascii_lowercase().as_str() {
        "s" => 1,
        "m" => 60,
        "h" => 60 * 60,
        "d" => 24 * 60 * 60,
        _ => return Err(pattern.error(value)),
    };

    number
        .parse::<u64>()
        .ok()
        .and_then(|n| n.checked_mul(unit_secs))
        .map(|secs| Some(Duration::from_secs(secs)))
        .ok_or_else(|| pattern.error(value))
}
