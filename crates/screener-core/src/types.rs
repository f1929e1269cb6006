use serde::{Deserialize, Serialize};

/// Monetary and per-share amounts. Plain IEEE-754 doubles: a zero denominator
/// produces an infinity or NaN that must propagate through rule evaluation
/// and display unchanged, which a checked decimal type cannot express.
pub type Money = f64;

/// Ratio multiples (e.g., 2.5x debt/equity)
pub type Multiple = f64;

/// Percentages expressed on a 0-100 scale (5.0 = 5%)
pub type Percent = f64;

/// Year counts
pub type Years = f64;

/// The screening verdict. Starts at `Buy`; any tripped downgrade rule moves
/// it to `DoNotBuy` and no later rule moves it back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    Buy,
    DoNotBuy,
}

impl std::fmt::Display for Recommendation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Buy => "Buy",
            Self::DoNotBuy => "Do not buy",
        };
        write!(f, "{}", s)
    }
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    /// Computational caveats (e.g., a zero denominator yielded a non-finite
    /// ratio). Threshold-rule warnings live inside the result record.
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "ieee754_f64".to_string(),
        },
    }
}

/// Render a ratio for display: two decimal places.
pub fn display_ratio(value: f64) -> String {
    format!("{value:.2}")
}

/// Render a percentage for display: two decimal places, `%` suffix.
pub fn display_percent(value: f64) -> String {
    format!("{value:.2}%")
}
