use thiserror::Error;

/// Validation failures surfaced to the user verbatim.
///
/// Both variants are terminal for the calculation attempt: no partial result
/// is ever produced, and the caller's previous output is left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ScreenerError {
    /// One or more fields failed to parse to a finite number. The whole
    /// input set is rejected as a batch with no per-field detail.
    #[error("Please enter valid numeric values")]
    InvalidNumericInput,

    /// Coupon frequency outside the supported payment schedules.
    #[error("Coupon payment frequency must be 1, 2, or 4 times per year")]
    InvalidCouponFrequency,
}
