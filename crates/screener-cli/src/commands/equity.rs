use clap::Args;
use serde_json::Value;

use screener_core::equity::{self, EquityInput};

use crate::input;

/// Arguments for the equity screen
#[derive(Args)]
pub struct EquityArgs {
    /// Path to a JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Market price per share
    #[arg(long)]
    pub market_price: Option<f64>,

    /// Earnings per share
    #[arg(long, alias = "eps")]
    pub earnings_per_share: Option<f64>,

    /// Book value per share
    #[arg(long, alias = "bvps")]
    pub book_value_per_share: Option<f64>,

    /// Revenue per share
    #[arg(long, alias = "rps")]
    pub revenue_per_share: Option<f64>,

    /// Annual dividend per share
    #[arg(long)]
    pub annual_dividend: Option<f64>,

    /// Total debt
    #[arg(long)]
    pub total_debt: Option<f64>,

    /// Shareholders' equity
    #[arg(long)]
    pub equity: Option<f64>,

    /// Net income
    #[arg(long)]
    pub net_income: Option<f64>,
}

pub fn run_equity(args: EquityArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let equity_input: EquityInput = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        data
    } else {
        EquityInput {
            market_price: args
                .market_price
                .ok_or("--market-price is required (or provide --input)")?,
            earnings_per_share: args
                .earnings_per_share
                .ok_or("--earnings-per-share is required (or provide --input)")?,
            book_value_per_share: args
                .book_value_per_share
                .ok_or("--book-value-per-share is required (or provide --input)")?,
            revenue_per_share: args
                .revenue_per_share
                .ok_or("--revenue-per-share is required (or provide --input)")?,
            annual_dividend: args
                .annual_dividend
                .ok_or("--annual-dividend is required (or provide --input)")?,
            total_debt: args
                .total_debt
                .ok_or("--total-debt is required (or provide --input)")?,
            equity: args
                .equity
                .ok_or("--equity is required (or provide --input)")?,
            net_income: args
                .net_income
                .ok_or("--net-income is required (or provide --input)")?,
        }
    };

    let result = equity::calculate_equity(&equity_input)?;
    Ok(serde_json::to_value(result)?)
}
