use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::form::parse_decimal;
use crate::rules::{evaluate, Rule, Severity, Trigger};
use crate::types::*;
use crate::ScreenerResult;

/// P/E above this level is treated as overvalued.
const MAX_PE: f64 = 25.0;
/// P/B above this level is treated as overvalued.
const MAX_PB: f64 = 4.0;
/// P/S above this level is treated as overvalued.
const MAX_PS: f64 = 5.0;
/// D/E above this level is treated as over-levered.
const MAX_DEBT_TO_EQUITY: f64 = 2.0;
/// ROE below this percentage is treated as weak profitability.
const MIN_ROE_PCT: f64 = 10.0;
/// Dividend yield below this percentage is noted but never downgrades.
const MIN_DIVIDEND_YIELD_PCT: f64 = 2.0;

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

/// Raw form fields as captured from the user, before validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EquityForm {
    pub market_price: String,
    pub earnings_per_share: String,
    pub book_value_per_share: String,
    pub revenue_per_share: String,
    pub annual_dividend: String,
    pub total_debt: String,
    pub equity: String,
    pub net_income: String,
}

impl EquityForm {
    /// Validate every field as a batch. Any field that fails a strict parse
    /// to a finite number rejects the whole form; no partial input record is
    /// ever produced.
    pub fn parse(&self) -> ScreenerResult<EquityInput> {
        Ok(EquityInput {
            market_price: parse_decimal(&self.market_price)?,
            earnings_per_share: parse_decimal(&self.earnings_per_share)?,
            book_value_per_share: parse_decimal(&self.book_value_per_share)?,
            revenue_per_share: parse_decimal(&self.revenue_per_share)?,
            annual_dividend: parse_decimal(&self.annual_dividend)?,
            total_debt: parse_decimal(&self.total_debt)?,
            equity: parse_decimal(&self.equity)?,
            net_income: parse_decimal(&self.net_income)?,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EquityInput {
    pub market_price: Money,
    pub earnings_per_share: Money,
    pub book_value_per_share: Money,
    pub revenue_per_share: Money,
    pub annual_dividend: Money,
    pub total_debt: Money,
    pub equity: Money,
    pub net_income: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EquityOutput {
    pub pe_ratio: Multiple,
    pub pb_ratio: Multiple,
    pub ps_ratio: Multiple,
    pub dividend_yield: Percent,
    pub de_ratio: Multiple,
    pub roe: Percent,
    pub recommendation: Recommendation,
    /// Threshold-rule warnings in fixed evaluation order: P/E, P/B, P/S,
    /// D/E, ROE, then the dividend-yield note.
    pub warnings: Vec<String>,
}

// ---------------------------------------------------------------------------
// Rule table
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
enum EquityMetric {
    Pe,
    Pb,
    Ps,
    DebtToEquity,
    Roe,
    DividendYield,
}

const RULES: [Rule<EquityMetric>; 6] = [
    Rule {
        metric: EquityMetric::Pe,
        trigger: Trigger::Above(MAX_PE),
        severity: Severity::Downgrade,
    },
    Rule {
        metric: EquityMetric::Pb,
        trigger: Trigger::Above(MAX_PB),
        severity: Severity::Downgrade,
    },
    Rule {
        metric: EquityMetric::Ps,
        trigger: Trigger::Above(MAX_PS),
        severity: Severity::Downgrade,
    },
    Rule {
        metric: EquityMetric::DebtToEquity,
        trigger: Trigger::Above(MAX_DEBT_TO_EQUITY),
        severity: Severity::Downgrade,
    },
    Rule {
        metric: EquityMetric::Roe,
        trigger: Trigger::Below(MIN_ROE_PCT),
        severity: Severity::Downgrade,
    },
    Rule {
        metric: EquityMetric::DividendYield,
        trigger: Trigger::Below(MIN_DIVIDEND_YIELD_PCT),
        severity: Severity::Advisory,
    },
];

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Derive the six standard valuation and leverage ratios for a stock and
/// screen them against the static threshold rules.
pub fn calculate_equity(
    input: &EquityInput,
) -> ScreenerResult<ComputationOutput<EquityOutput>> {
    let start = Instant::now();
    let mut caveats: Vec<String> = Vec::new();

    let pe_ratio = input.market_price / input.earnings_per_share;
    let pb_ratio = input.market_price / input.book_value_per_share;
    let ps_ratio = input.market_price / input.revenue_per_share;
    let dividend_yield = input.annual_dividend / input.market_price * 100.0;
    let de_ratio = input.total_debt / input.equity;
    let roe = input.net_income / input.equity * 100.0;

    let ratios = [pe_ratio, pb_ratio, ps_ratio, dividend_yield, de_ratio, roe];
    if ratios.iter().any(|r| !r.is_finite()) {
        caveats.push(
            "A zero denominator produced a non-finite ratio; it is reported as-is and \
             compared by IEEE rules."
                .into(),
        );
    }

    let (recommendation, warnings) = evaluate(
        &RULES,
        |metric| match metric {
            EquityMetric::Pe => pe_ratio,
            EquityMetric::Pb => pb_ratio,
            EquityMetric::Ps => ps_ratio,
            EquityMetric::DebtToEquity => de_ratio,
            EquityMetric::Roe => roe,
            EquityMetric::DividendYield => dividend_yield,
        },
        warning_for,
    );

    let output = EquityOutput {
        pe_ratio,
        pb_ratio,
        ps_ratio,
        dividend_yield,
        de_ratio,
        roe,
        recommendation,
        warnings,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "max_pe": MAX_PE,
        "max_pb": MAX_PB,
        "max_ps": MAX_PS,
        "max_debt_to_equity": MAX_DEBT_TO_EQUITY,
        "min_roe_pct": MIN_ROE_PCT,
        "advisory_min_dividend_yield_pct": MIN_DIVIDEND_YIELD_PCT,
        "comparisons": "strict",
    });

    Ok(with_metadata(
        "Equity Ratio Screen (static threshold rules)",
        &assumptions,
        caveats,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn warning_for(metric: EquityMetric, value: f64) -> String {
    match metric {
        EquityMetric::Pe => {
            format!("High P/E ratio ({value:.2}); the market average is around 15-20")
        }
        EquityMetric::Pb => {
            format!("High P/B ratio ({value:.2}); the market average is around 1-3")
        }
        EquityMetric::Ps => {
            format!("High P/S ratio ({value:.2}); the market average is around 1-2")
        }
        EquityMetric::DebtToEquity => {
            format!("High debt-to-equity (D/E) ratio: {value:.2}")
        }
        EquityMetric::Roe => {
            format!("Low return on equity (ROE): {value:.2}%; above 10-15% is preferred")
        }
        EquityMetric::DividendYield => format!("Low dividend yield: {value:.2}%"),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
