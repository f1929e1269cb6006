//! Strict parsing of raw form text into validated numbers.

use crate::{ScreenerError, ScreenerResult};

/// Strict decimal parse. Rejects anything that does not parse to a finite
/// number. Validation is all-or-nothing across a form, so every failure maps
/// to the single generic error rather than per-field detail.
pub(crate) fn parse_decimal(raw: &str) -> ScreenerResult<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or(ScreenerError::InvalidNumericInput)
}

/// Strict integer parse for whole-number fields (years to maturity, coupon
/// frequency).
pub(crate) fn parse_integer(raw: &str) -> ScreenerResult<i64> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| ScreenerError::InvalidNumericInput)
}
