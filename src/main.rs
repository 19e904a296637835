use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use log::info;

use snapsync::config::{LedgerConfig, DEFAULT_API_URL};
use snapsync::data;
use snapsync::lunchmoney::HttpLedger;
use snapsync::sync::{Period, Synchronizer};

/// Rewrite the tagged placeholder transactions and the investment asset of a
/// Lunch Money ledger from a brokerage CSV export.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Name of the tag marking the placeholder transactions
    tag_name: String,

    /// Beginning of the period to fetch transactions for. Format: YYYY-MM-DD
    #[arg(value_parser = parse_date)]
    start_date: NaiveDate,

    /// End of the period to fetch transactions for. Format: YYYY-MM-DD
    #[arg(value_parser = parse_date)]
    end_date: NaiveDate,

    /// Path to the CSV export holding the investment accounts and their balances
    path: PathBuf,

    /// Lunch Money API access token
    #[arg(long, env = "LUNCHMONEY_API_TOKEN", hide_env_values = true)]
    token: String,

    /// Base url of the Lunch Money API
    #[arg(long, env = "LUNCHMONEY_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,
}

fn parse_date(input: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .map_err(|_| format!("This is not a valid date: {}. Please use this format YYYY-MM-DD.", input))
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let snapshot = data::load_snapshot(&args.path)
        .with_context(|| format!("failed to load snapshot {}", args.path.display()))?;
    info!("loaded {} snapshot rows", snapshot.len());

    let ledger = HttpLedger::new(LedgerConfig::new(args.api_url, args.token));
    let period = Period {
        start_date: args.start_date,
        end_date: args.end_date,
    };
    let today = chrono::Local::now().date_naive();

    let report = Synchronizer::new(&ledger, &snapshot).run(&args.tag_name, period, today)?;
    info!(
        "reconciled {} transactions, balance {}{}",
        report.updated,
        report.balance,
        if report.asset_updated { "" } else { " (asset not updated)" }
    );

    Ok(())
}
