//! CLI argument definitions for skewtick.
//!
//! With no arguments the binary reports the six-month daily log return
//! skewness of NVDA and writes both charts under `docs/`.
//!
//! # Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--symbol` | `NVDA` | Ticker to analyze |
//! | `--period` | `6mo` | Trailing lookback range |
//! | `--interval` | `1d` | Bar granularity |
//! | `--window` | `30` | Rolling skewness window |
//! | `--output-dir` | `docs` | Chart directory |
//! | `--csv` | none | Also write the per-bar analysis table |
//! | `--json` | `false` | Print the full report as JSON |
//! | `--rows` | `false` | Include the per-bar table in the JSON report |
//! | `--timeout-ms` | none | Request timeout in ms |
//!
//! # Examples
//!
//! ```bash
//! # Default NVDA report
//! skewtick
//!
//! # One year of AMD with a 60-day window and a CSV dump
//! skewtick --symbol AMD --period 1y --window 60 --csv out/amd.csv
//!
//! # Machine-readable output
//! skewtick --json --pretty
//! ```

use std::path::PathBuf;

use clap::Parser;
use skewtick_core::pipeline::{DEFAULT_OUTPUT_DIR, DEFAULT_SYMBOL};
use skewtick_core::stats::{DEFAULT_ROLLING_WINDOW, MIN_SKEW_OBSERVATIONS};
use skewtick_core::{Interval, Period, PipelineConfig, Symbol};

/// Log return skewness report for a single ticker.
///
/// Downloads price history from Yahoo Finance, prints the skewness of daily
/// log returns, and writes volume and rolling-skew charts as PNG files.
#[derive(Debug, Parser)]
#[command(name = "skewtick", author, version, about = "Log return skewness report")]
pub struct Cli {
    /// Ticker symbol (case-insensitive; index tickers like ^GSPC allowed).
    #[arg(long, default_value = DEFAULT_SYMBOL, value_parser = Symbol::parse)]
    pub symbol: Symbol,

    /// Trailing lookback range: 1d, 5d, 1mo, 3mo, 6mo, 1y, 2y, 5y, 10y, ytd, max.
    #[arg(long, default_value_t = Period::default())]
    pub period: Period,

    /// Bar granularity: 1d, 5d, 1wk, 1mo, 3mo.
    #[arg(long, default_value_t = Interval::default())]
    pub interval: Interval,

    /// Observations per rolling skewness window (minimum 3).
    #[arg(long, default_value_t = DEFAULT_ROLLING_WINDOW, value_parser = parse_window)]
    pub window: usize,

    /// Directory the PNG charts are written to.
    #[arg(long, default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// Write the per-bar analysis table to this CSV file.
    #[arg(long, value_name = "PATH")]
    pub csv: Option<PathBuf>,

    /// Print the full report as JSON instead of the one-line summary.
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Pretty-print JSON output with indentation.
    #[arg(long, default_value_t = false, requires = "json")]
    pub pretty: bool,

    /// Include the per-bar table (close, return, SMA5, SMA20, rolling skew) in the JSON report.
    #[arg(long, default_value_t = false, requires = "json")]
    pub rows: bool,

    /// Draw charts without captions or axis labels.
    #[arg(long, default_value_t = false)]
    pub plain_charts: bool,

    /// Request timeout in milliseconds (no timeout when omitted).
    #[arg(long)]
    pub timeout_ms: Option<u64>,

    /// Increase log verbosity on stderr (-v info, -vv debug).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            symbol: self.symbol.clone(),
            period: self.period,
            interval: self.interval,
            window: self.window,
            output_dir: self.output_dir.clone(),
            csv_path: self.csv.clone(),
            plain_charts: self.plain_charts,
            include_rows: self.rows,
        }
    }
}

fn parse_window(value: &str) -> Result<usize, String> {
    let window: usize = value
        .parse()
        .map_err(|_| format!("'{value}' is not a whole number"))?;
    if window < MIN_SKEW_OBSERVATIONS {
        return Err(format!(
            "window must be at least {MIN_SKEW_OBSERVATIONS}, got {window}"
        ));
    }
    Ok(window)
}
