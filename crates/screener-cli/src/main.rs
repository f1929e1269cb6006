mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::bond::BondArgs;
use commands::equity::EquityArgs;

/// Equity and bond ratio screening
#[derive(Parser)]
#[command(
    name = "screener",
    version,
    about = "Equity and bond ratio screening",
    long_about = "Derives standard valuation and credit ratios from raw financial \
                  figures, screens them against static threshold rules, and emits a \
                  buy / do-not-buy recommendation with the thresholds that were \
                  violated."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Screen a stock from per-share and company figures
    Equity(EquityArgs),
    /// Screen a bond from instrument and issuer figures
    Bond(BondArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Equity(args) => commands::equity::run_equity(args),
        Commands::Bond(args) => commands::bond::run_bond(args),
        Commands::Version => {
            println!("screener {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
