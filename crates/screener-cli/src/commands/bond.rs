use clap::Args;
use serde_json::Value;

use screener_core::bond::{self, BondInput};

use crate::input;

/// Arguments for the bond screen
#[derive(Args)]
pub struct BondArgs {
    /// Path to a JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Nominal (face) value
    #[arg(long)]
    pub nominal: Option<f64>,

    /// Market price
    #[arg(long)]
    pub market_price: Option<f64>,

    /// Annual coupon payment
    #[arg(long, alias = "coupon")]
    pub annual_coupon: Option<f64>,

    /// Whole years to maturity
    #[arg(long, alias = "years")]
    pub years_to_maturity: Option<i64>,

    /// Coupon payments per year (1, 2, or 4)
    #[arg(long, alias = "frequency")]
    pub coupon_frequency: Option<u32>,

    /// EBIT
    #[arg(long)]
    pub ebit: Option<f64>,

    /// Interest expense
    #[arg(long)]
    pub interest_expense: Option<f64>,

    /// Total debt
    #[arg(long)]
    pub total_debt: Option<f64>,

    /// Shareholders' equity
    #[arg(long)]
    pub equity: Option<f64>,

    /// EBITDA
    #[arg(long)]
    pub ebitda: Option<f64>,

    /// Current assets
    #[arg(long)]
    pub current_assets: Option<f64>,

    /// Current liabilities
    #[arg(long)]
    pub current_liabilities: Option<f64>,

    /// Inventory
    #[arg(long)]
    pub inventory: Option<f64>,
}

pub fn run_bond(args: BondArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let bond_input: BondInput = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        data
    } else {
        BondInput {
            nominal: args
                .nominal
                .ok_or("--nominal is required (or provide --input)")?,
            market_price: args
                .market_price
                .ok_or("--market-price is required (or provide --input)")?,
            annual_coupon: args
                .annual_coupon
                .ok_or("--annual-coupon is required (or provide --input)")?,
            years_to_maturity: args
                .years_to_maturity
                .ok_or("--years-to-maturity is required (or provide --input)")?
                as f64,
            coupon_frequency: args
                .coupon_frequency
                .ok_or("--coupon-frequency is required (or provide --input)")?,
            ebit: args.ebit.ok_or("--ebit is required (or provide --input)")?,
            interest_expense: args
                .interest_expense
                .ok_or("--interest-expense is required (or provide --input)")?,
            total_debt: args
                .total_debt
                .ok_or("--total-debt is required (or provide --input)")?,
            equity: args
                .equity
                .ok_or("--equity is required (or provide --input)")?,
            ebitda: args
                .ebitda
                .ok_or("--ebitda is required (or provide --input)")?,
            current_assets: args
                .current_assets
                .ok_or("--current-assets is required (or provide --input)")?,
            current_liabilities: args
                .current_liabilities
                .ok_or("--current-liabilities is required (or provide --input)")?,
            inventory: args
                .inventory
                .ok_or("--inventory is required (or provide --input)")?,
        }
    };

    let result = bond::calculate_bond(&bond_input)?;
    Ok(serde_json::to_value(result)?)
}
