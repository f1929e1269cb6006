use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::form::{parse_decimal, parse_integer};
use crate::rules::{evaluate, Rule, Severity, Trigger};
use crate::types::*;
use crate::{ScreenerError, ScreenerResult};

/// Supported coupon payment schedules: annual, semiannual, quarterly.
pub const PAYMENT_SCHEDULES: [u32; 3] = [1, 2, 4];

/// Interest coverage below this multiple signals strained debt service.
const MIN_INTEREST_COVERAGE: f64 = 2.0;
/// D/E above this level is treated as over-levered.
const MAX_DEBT_TO_EQUITY: f64 = 2.0;
/// Total debt above this multiple of EBITDA signals excessive leverage.
const MAX_DEBT_TO_EBITDA: f64 = 5.0;
/// Current ratio below this level signals short-term liquidity risk.
const MIN_CURRENT_RATIO: f64 = 1.1;
/// Quick ratio below this level signals liquidity risk net of inventory.
const MIN_QUICK_RATIO: f64 = 0.7;
/// Approximate YTM below this percentage makes the bond unattractive.
const MIN_YTM_PCT: f64 = 5.0;

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

/// Raw form fields as captured from the user, before validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BondForm {
    pub nominal: String,
    pub market_price: String,
    pub annual_coupon: String,
    pub years_to_maturity: String,
    pub coupon_frequency: String,
    pub ebit: String,
    pub interest_expense: String,
    pub total_debt: String,
    pub equity: String,
    pub ebitda: String,
    pub current_assets: String,
    pub current_liabilities: String,
    pub inventory: String,
}

impl BondForm {
    /// Validate the form. The coupon frequency is vetted first: a parseable
    /// integer outside the supported schedules is its own error, reported
    /// before the remaining fields are even looked at. An unparseable
    /// frequency falls under the generic batch error like any other field.
    pub fn parse(&self) -> ScreenerResult<BondInput> {
        let coupon_frequency = match self.coupon_frequency.trim().parse::<u32>() {
            Ok(n) if PAYMENT_SCHEDULES.contains(&n) => n,
            Ok(_) => return Err(ScreenerError::InvalidCouponFrequency),
            Err(_) => return Err(ScreenerError::InvalidNumericInput),
        };

        Ok(BondInput {
            nominal: parse_decimal(&self.nominal)?,
            market_price: parse_decimal(&self.market_price)?,
            annual_coupon: parse_decimal(&self.annual_coupon)?,
            years_to_maturity: parse_integer(&self.years_to_maturity)? as f64,
            coupon_frequency,
            ebit: parse_decimal(&self.ebit)?,
            interest_expense: parse_decimal(&self.interest_expense)?,
            total_debt: parse_decimal(&self.total_debt)?,
            equity: parse_decimal(&self.equity)?,
            ebitda: parse_decimal(&self.ebitda)?,
            current_assets: parse_decimal(&self.current_assets)?,
            current_liabilities: parse_decimal(&self.current_liabilities)?,
            inventory: parse_decimal(&self.inventory)?,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BondInput {
    pub nominal: Money,
    pub market_price: Money,
    pub annual_coupon: Money,
    pub years_to_maturity: Years,
    /// Payments per year; must be 1, 2, or 4.
    pub coupon_frequency: u32,
    pub ebit: Money,
    pub interest_expense: Money,
    pub total_debt: Money,
    pub equity: Money,
    pub ebitda: Money,
    pub current_assets: Money,
    pub current_liabilities: Money,
    pub inventory: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BondOutput {
    pub coupon_per_payment: Money,
    pub current_yield: Percent,
    pub simple_ytm: Percent,
    pub icr: Multiple,
    pub de_ratio: Multiple,
    pub total_debt_to_ebitda: Multiple,
    pub current_ratio: Multiple,
    pub quick_ratio: Multiple,
    pub recommendation: Recommendation,
    /// Threshold-rule warnings in fixed evaluation order: ICR, D/E,
    /// debt/EBITDA, current ratio, quick ratio, then YTM.
    pub warnings: Vec<String>,
}

// ---------------------------------------------------------------------------
// Rule table
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
enum BondMetric {
    InterestCoverage,
    DebtToEquity,
    DebtToEbitda,
    CurrentRatio,
    QuickRatio,
    YieldToMaturity,
}

const RULES: [Rule<BondMetric>; 6] = [
    Rule {
        metric: BondMetric::InterestCoverage,
        trigger: Trigger::Below(MIN_INTEREST_COVERAGE),
        severity: Severity::Downgrade,
    },
    Rule {
        metric: BondMetric::DebtToEquity,
        trigger: Trigger::Above(MAX_DEBT_TO_EQUITY),
        severity: Severity::Downgrade,
    },
    Rule {
        metric: BondMetric::DebtToEbitda,
        trigger: Trigger::Above(MAX_DEBT_TO_EBITDA),
        severity: Severity::Downgrade,
    },
    Rule {
        metric: BondMetric::CurrentRatio,
        trigger: Trigger::Below(MIN_CURRENT_RATIO),
        severity: Severity::Downgrade,
    },
    Rule {
        metric: BondMetric::QuickRatio,
        trigger: Trigger::Below(MIN_QUICK_RATIO),
        severity: Severity::Downgrade,
    },
    Rule {
        metric: BondMetric::YieldToMaturity,
        trigger: Trigger::Below(MIN_YTM_PCT),
        severity: Severity::Downgrade,
    },
];

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Derive the eight bond and issuer-credit ratios and screen them against
/// the static threshold rules. The coupon frequency is validated before any
/// ratio is computed.
pub fn calculate_bond(input: &BondInput) -> ScreenerResult<ComputationOutput<BondOutput>> {
    let start = Instant::now();
    let mut caveats: Vec<String> = Vec::new();

    if !PAYMENT_SCHEDULES.contains(&input.coupon_frequency) {
        return Err(ScreenerError::InvalidCouponFrequency);
    }

    let n = f64::from(input.coupon_frequency);
    let coupon_per_payment = input.annual_coupon / n;
    let current_yield = input.annual_coupon / input.market_price * 100.0;
    // Averaged-price YTM approximation, kept deliberately: the coupon term
    // collapses back to the annual coupon regardless of payment frequency.
    let simple_ytm = ((coupon_per_payment * n)
        + (input.nominal - input.market_price) / input.years_to_maturity)
        / ((input.nominal + input.market_price) / 2.0)
        * 100.0;
    let icr = input.ebit / input.interest_expense;
    let de_ratio = input.total_debt / input.equity;
    let total_debt_to_ebitda = input.total_debt / input.ebitda;
    let current_ratio = input.current_assets / input.current_liabilities;
    let quick_ratio = (input.current_assets - input.inventory) / input.current_liabilities;

    let ratios = [
        coupon_per_payment,
        current_yield,
        simple_ytm,
        icr,
        de_ratio,
        total_debt_to_ebitda,
        current_ratio,
        quick_ratio,
    ];
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
            BondMetric::InterestCoverage => icr,
            BondMetric::DebtToEquity => de_ratio,
            BondMetric::DebtToEbitda => total_debt_to_ebitda,
            BondMetric::CurrentRatio => current_ratio,
            BondMetric::QuickRatio => quick_ratio,
            BondMetric::YieldToMaturity => simple_ytm,
        },
        |metric, _| warning_for(metric),
    );

    let output = BondOutput {
        coupon_per_payment,
        current_yield,
        simple_ytm,
        icr,
        de_ratio,
        total_debt_to_ebitda,
        current_ratio,
        quick_ratio,
        recommendation,
        warnings,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "ytm": "averaged-price approximation, not an IRR solve",
        "payment_schedules": PAYMENT_SCHEDULES,
        "min_interest_coverage": MIN_INTEREST_COVERAGE,
        "max_debt_to_equity": MAX_DEBT_TO_EQUITY,
        "max_debt_to_ebitda": MAX_DEBT_TO_EBITDA,
        "min_current_ratio": MIN_CURRENT_RATIO,
        "min_quick_ratio": MIN_QUICK_RATIO,
        "min_ytm_pct": MIN_YTM_PCT,
        "comparisons": "strict",
    });

    Ok(with_metadata(
        "Bond Ratio Screen (static threshold rules)",
        &assumptions,
        caveats,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn warning_for(metric: BondMetric) -> String {
    let text = match metric {
        BondMetric::InterestCoverage => "Low interest coverage ratio",
        BondMetric::DebtToEquity => "High debt-to-equity ratio",
        BondMetric::DebtToEbitda => "High total-debt-to-EBITDA ratio",
        BondMetric::CurrentRatio => "Low current ratio",
        BondMetric::QuickRatio => "Low quick ratio",
        BondMetric::YieldToMaturity => "Low yield to maturity",
    };
    text.to_string()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    /// A solid issuer with a semiannual coupon: every rule passes.
    fn good_input() -> BondInput {
        BondInput {
            nominal: 1000.0,
            market_price: 950.0,
            annual_coupon: 80.0,
            years_to_maturity: 5.0,
            coupon_frequency: 2,
            ebit: 1000.0,
            interest_expense: 200.0,
            total_debt: 2000.0,
            equity: 4000.0,
            ebitda: 1200.0,
            current_assets: 1500.0,
            current_liabilities: 1000.0,
            inventory: 300.0,
        }
    }

    #[test]
    fn test_good_bond_ratios_and_buy() {
        let result = calculate_bond(&good_input()).unwrap();
        let out = &result.result;

        assert_close(out.coupon_per_payment, 40.0);
        assert_close(out.current_yield, 80.0 / 950.0 * 100.0);
        assert_close(out.icr, 5.0);
        assert_close(out.de_ratio, 0.5);
        assert_close(out.total_debt_to_ebitda, 2000.0 / 1200.0);
        assert_close(out.current_ratio, 1.5);
        assert_close(out.quick_ratio, 1.2);
        // ((40 * 2) + (1000 - 950) / 5) / ((1000 + 950) / 2) * 100
        assert_close(out.simple_ytm, 90.0 / 975.0 * 100.0);
        assert_eq!(out.recommendation, Recommendation::Buy);
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn test_frequency_collapses_out_of_ytm() {
        // coupon_per_payment * n is the annual coupon again, so the
        // approximation yields the same YTM for every valid schedule.
        let mut annual = good_input();
        annual.coupon_frequency = 1;
        let mut quarterly = good_input();
        quarterly.coupon_frequency = 4;

        let a = calculate_bond(&annual).unwrap().result;
        let q = calculate_bond(&quarterly).unwrap().result;
        assert_close(a.simple_ytm, q.simple_ytm);
        assert_close(a.coupon_per_payment, 80.0);
        assert_close(q.coupon_per_payment, 20.0);
    }

    #[test]
    fn test_valid_frequencies_accepted() {
        for n in PAYMENT_SCHEDULES {
            let mut input = good_input();
            input.coupon_frequency = n;
            assert!(calculate_bond(&input).is_ok(), "frequency {n} rejected");
        }
    }

    #[test]
    fn test_invalid_frequency_rejected_before_ratios() {
        for n in [0, 3, 5, 6, 12] {
            let mut input = good_input();
            input.coupon_frequency = n;
            let err = calculate_bond(&input).unwrap_err();
            assert_eq!(err, ScreenerError::InvalidCouponFrequency, "frequency {n}");
        }
    }

    #[test]
    fn test_weak_issuer_downgraded_with_ordered_warnings() {
        // Trip every credit-health rule plus the yield rule.
        let input = BondInput {
            nominal: 1000.0,
            market_price: 1100.0,
            annual_coupon: 20.0,
            years_to_maturity: 10.0,
            coupon_frequency: 1,
            ebit: 100.0,
            interest_expense: 100.0, // icr 1.0 < 2
            total_debt: 9000.0,
            equity: 3000.0,   // d/e 3.0 > 2
            ebitda: 1500.0,   // debt/ebitda 6.0 > 5
            current_assets: 1000.0,
            current_liabilities: 1000.0, // current 1.0 < 1.1
            inventory: 400.0,            // quick 0.6 < 0.7
        };
        let result = calculate_bond(&input).unwrap();
        let out = &result.result;
        assert_eq!(out.recommendation, Recommendation::DoNotBuy);
        assert_eq!(
            out.warnings,
            vec![
                "Low interest coverage ratio",
                "High debt-to-equity ratio",
                "High total-debt-to-EBITDA ratio",
                "Low current ratio",
                "Low quick ratio",
                "Low yield to maturity",
            ]
        );
    }

    #[test]
    fn test_low_ytm_alone_downgrades() {
        // Healthy issuer, expensive bond: only the yield rule fires.
        let mut input = good_input();
        input.market_price = 1600.0;
        input.annual_coupon = 30.0;
        let result = calculate_bond(&input).unwrap();
        let out = &result.result;
        // (30 - 600/5) / 1300 * 100 ≈ -6.9% < 5
        assert!(out.simple_ytm < 5.0);
        assert_eq!(out.recommendation, Recommendation::DoNotBuy);
        assert_eq!(out.warnings, vec!["Low yield to maturity"]);
    }

    #[test]
    fn test_boundary_values_never_trip() {
        let input = BondInput {
            nominal: 1000.0,
            market_price: 1000.0,
            annual_coupon: 50.0, // ytm exactly 5.0
            years_to_maturity: 5.0,
            coupon_frequency: 1,
            ebit: 200.0,
            interest_expense: 100.0, // icr exactly 2.0
            total_debt: 4000.0,
            equity: 2000.0,  // d/e exactly 2.0
            ebitda: 800.0,   // debt/ebitda exactly 5.0
            current_assets: 1100.0,
            current_liabilities: 1000.0, // current exactly 1.1
            inventory: 400.0,            // quick exactly 0.7
        };
        let result = calculate_bond(&input).unwrap();
        let out = &result.result;
        assert_close(out.simple_ytm, 5.0);
        assert_eq!(out.recommendation, Recommendation::Buy);
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn test_idempotent() {
        let input = good_input();
        let a = calculate_bond(&input).unwrap();
        let b = calculate_bond(&input).unwrap();
        assert_eq!(a.result.recommendation, b.result.recommendation);
        assert_eq!(a.result.warnings, b.result.warnings);
        assert_eq!(a.result.simple_ytm, b.result.simple_ytm);
    }

    #[test]
    fn test_zero_interest_expense_passes_infinity_through() {
        let mut input = good_input();
        input.interest_expense = 0.0;
        let result = calculate_bond(&input).unwrap();
        let out = &result.result;
        assert!(out.icr.is_infinite());
        // +inf < 2 is false, so the coverage rule does not fire.
        assert_eq!(out.recommendation, Recommendation::Buy);
        assert!(result.warnings.iter().any(|w| w.contains("non-finite")));
    }

    fn valid_form() -> BondForm {
        BondForm {
            nominal: "1000".into(),
            market_price: "950".into(),
            annual_coupon: "80".into(),
            years_to_maturity: "5".into(),
            coupon_frequency: " 2 ".into(),
            ebit: "1000".into(),
            interest_expense: "200".into(),
            total_debt: "2000".into(),
            equity: "4000".into(),
            ebitda: "1200".into(),
            current_assets: "1500".into(),
            current_liabilities: "1000".into(),
            inventory: "300".into(),
        }
    }

    #[test]
    fn test_form_parse_round_trip() {
        let input = valid_form().parse().unwrap();
        assert_eq!(input.coupon_frequency, 2);
        let result = calculate_bond(&input).unwrap();
        assert_eq!(result.result.recommendation, Recommendation::Buy);
    }

    #[test]
    fn test_form_out_of_set_frequency_reported_first() {
        // Other fields are blank, but the frequency error still wins.
        let form = BondForm {
            coupon_frequency: "3".into(),
            ..BondForm::default()
        };
        assert_eq!(
            form.parse().unwrap_err(),
            ScreenerError::InvalidCouponFrequency
        );
    }

    #[test]
    fn test_form_unparseable_frequency_is_generic_error() {
        let form = BondForm {
            coupon_frequency: "often".into(),
            ..BondForm::default()
        };
        assert_eq!(form.parse().unwrap_err(), ScreenerError::InvalidNumericInput);
    }

    #[test]
    fn test_blank_form_rejected_as_batch() {
        let form = BondForm {
            coupon_frequency: "2".into(),
            ..BondForm::default()
        };
        assert_eq!(form.parse().unwrap_err(), ScreenerError::InvalidNumericInput);
    }

    #[test]
    fn test_fractional_years_rejected() {
        // Every other field parses; only the whole-years rule fails.
        let mut form = valid_form();
        form.years_to_maturity = "5.5".into();
        assert_eq!(form.parse().unwrap_err(), ScreenerError::InvalidNumericInput);
    }

    #[test]
    fn test_metadata_populated() {
        let result = calculate_bond(&good_input()).unwrap();
        assert!(!result.methodology.is_empty());
        assert_eq!(result.metadata.precision, "ieee754_f64");
    }
}
