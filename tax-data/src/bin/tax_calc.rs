use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tax_core::IncomeTaxCalculator;
use tax_data::CsvTaxBracketFetcher;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Compute progressive income tax offline from a CSV bracket file.
///
/// The CSV file should have the following columns:
/// - tax_year: The tax year (e.g., 2022)
/// - min: Lower bound of the bracket
/// - max: Upper bound of the bracket (empty for the top bracket)
/// - rate: The marginal tax rate as a fraction (e.g., 0.15)
#[derive(Parser, Debug)]
#[command(name = "tax-calc")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the CSV file containing tax bracket data
    #[arg(short, long)]
    file: PathBuf,

    /// Tax year whose brackets should be applied
    #[arg(short, long)]
    year: i32,

    /// Gross income to tax
    #[arg(short, long, allow_negative_numbers = true)]
    income: f64,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::from("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .without_time()
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let args = Args::parse();

    let fetcher = CsvTaxBracketFetcher::from_path(&args.file)
        .with_context(|| format!("Failed to load brackets from: {}", args.file.display()))?;
    debug!(years = ?fetcher.tax_years(), "loaded bracket file");

    let calculator = IncomeTaxCalculator::new(Arc::new(fetcher));
    let result = calculator
        .calculate_income_tax(args.income, args.year)
        .await
        .with_context(|| {
            format!(
                "Failed to calculate tax on {} for tax year {}",
                args.income, args.year
            )
        })?;

    println!(
        "{}",
        serde_json::to_string_pretty(&result).context("Failed to serialize result")?
    );

    Ok(())
}
