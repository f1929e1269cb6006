pub mod error;
pub mod types;

#[cfg(any(feature = "equity", feature = "bond"))]
mod form;

#[cfg(any(feature = "equity", feature = "bond"))]
mod rules;

#[cfg(feature = "equity")]
pub mod equity;

#[cfg(feature = "bond")]
pub mod bond;

pub use error::ScreenerError;
pub use types::*;

/// Standard result type for all screener operations
pub type ScreenerResult<T> = Result<T, ScreenerError>;
