//! `availability` CLI — resolve meeting slots and query holidays from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Resolve the common slot for a JSON array of ranges (stdin → stdout)
//! echo '[{"from":"2022-05-02T09:00:00+08:00","to":"2022-05-02T17:00:00+08:00","cc":"SG"}]' \
//!     | availability check
//!
//! # Resolve from file to file
//! availability check -i ranges.json -o slot.json
//!
//! # Ask whether a date is a public holiday
//! availability holiday --cc US --date 2022-12-23
//!
//! # Split a multi-day range into per-day pieces
//! availability split --from 2022-05-02T09:00:00+08:00 --to 2022-05-03T17:00:00+08:00
//! ```
//!
//! Holiday lookups go to Calendarific; pass `--api-key` or set `CALENDARIFIC_API_KEY`
//! (a `.env` file in the working directory is honoured).

use anyhow::{Context, Result};
use availability_engine::{split_days, CountryCode, EngineConfig, SlotResolver};
use chrono::{DateTime, FixedOffset, NaiveDate};
use clap::{Parser, Subcommand};
use std::io::{self, Read};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "availability",
    version,
    about = "Find the common meeting slot across countries and timezones"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Calendarific API key
    #[arg(long, global = true, env = "CALENDARIFIC_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Holiday directory base URL
    #[arg(long, global = true, env = "CALENDARIFIC_BASE_URL")]
    base_url: Option<String>,

    /// Timeout for each holiday directory request, in seconds
    #[arg(long, global = true, env = "HOLIDAY_TIMEOUT_SECS")]
    timeout_secs: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve the common slot for a JSON array of availability ranges
    Check {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Report whether a date is a public holiday in a country
    Holiday {
        /// ISO-3166 alpha-2 country code (e.g. "SG")
        #[arg(long)]
        cc: CountryCode,
        /// Calendar date, YYYY-MM-DD
        #[arg(long)]
        date: NaiveDate,
    },
    /// Split a range into one piece per local calendar day
    Split {
        /// Range start, RFC 3339 with offset
        #[arg(long)]
        from: DateTime<FixedOffset>,
        /// Range end, RFC 3339 with offset
        #[arg(long)]
        to: DateTime<FixedOffset>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = build_config(&cli);

    match cli.command {
        Commands::Check { input, output } => {
            let raw = read_input(input.as_deref())?;
            let body: serde_json::Value =
                serde_json::from_str(&raw).context("Input is not valid JSON")?;

            let resolver = SlotResolver::from_config(&config)?;
            let slot = resolver
                .resolve_json(&body)
                .await
                .context("Failed to resolve a meeting slot")?;

            let pretty = serde_json::to_string_pretty(&slot)?;
            write_output(output.as_deref(), &pretty)?;
        }
        Commands::Holiday { cc, date } => {
            let resolver = SlotResolver::from_config(&config)?;
            let holiday = resolver
                .is_holiday(date, cc)
                .await
                .with_context(|| format!("Failed to look up holidays for {}", cc))?;
            println!("{}", if holiday { "Holiday" } else { "Not holiday" });
        }
        Commands::Split { from, to } => {
            if from >= to {
                anyhow::bail!("--from must be earlier than --to");
            }
            for (start, end) in split_days(from, to) {
                println!("{} {}", start.to_rfc3339(), end.to_rfc3339());
            }
        }
    }

    Ok(())
}

/// Environment settings, overridden by whatever was given on the command line.
fn build_config(cli: &Cli) -> EngineConfig {
    let mut config = EngineConfig::from_env();
    if let Some(api_key) = &cli.api_key {
        config.api_key = api_key.clone();
    }
    if let Some(base_url) = &cli.base_url {
        config.base_url = base_url.clone();
    }
    if let Some(timeout_secs) = cli.timeout_secs {
        config.timeout_secs = timeout_secs;
    }
    config
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
