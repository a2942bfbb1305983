//! CLI argument definitions for tickchart.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `chart` | Fetch daily prices and write an interactive HTML chart |
//! | `fetch` | Fetch daily prices and print them as JSON |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--key-file` | `AlphaVantage.txt` | File holding the Alpha Vantage API key |
//! | `--timeout-ms` | `10000` | Per-request timeout in ms |
//!
//! `TICKCHART_ALPHAVANTAGE_API_KEY`, when set, takes precedence over the key
//! file. `RUST_LOG` controls diagnostic output on stderr.
//!
//! # Examples
//!
//! ```bash
//! tickchart chart GOOG
//! tickchart chart GOOG --days 365 --field open --field close --output goog.html
//! tickchart fetch MSFT --days 10 --pretty
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use tickchart_core::{PriceField, DEFAULT_KEY_FILE};

/// Daily stock price charts from Alpha Vantage.
#[derive(Debug, Parser)]
#[command(name = "tickchart", author, version, about = "Daily stock price charts from Alpha Vantage")]
pub struct Cli {
    /// File whose first line ends with the Alpha Vantage API key.
    #[arg(long, global = true, default_value = DEFAULT_KEY_FILE)]
    pub key_file: PathBuf,

    /// Request timeout budget in milliseconds.
    #[arg(long, global = true, default_value_t = 10_000)]
    pub timeout_ms: u64,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// 📈 Fetch daily prices and write an interactive chart.
    ///
    /// # Examples
    ///
    ///   tickchart chart GOOG
    ///   tickchart chart AAPL --days 180 --field high --field low
    Chart(ChartArgs),

    /// 📊 Fetch daily prices and print them as JSON.
    ///
    /// # Examples
    ///
    ///   tickchart fetch GOOG --days 10 --pretty
    Fetch(FetchArgs),
}

/// Ticker and window shared by every fetching command.
#[derive(Debug, Args)]
pub struct SeriesArgs {
    /// Ticker symbol (e.g., GOOG, MSFT, TSCO.LON).
    pub symbol: String,

    /// Number of calendar days of history, counted back from today.
    ///
    /// Windows of 100 days or more request the full history from Alpha Vantage.
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u32).range(1..))]
    pub days: u32,
}

#[derive(Debug, Args)]
pub struct ChartArgs {
    #[command(flatten)]
    pub series: SeriesArgs,

    /// Price field to plot; repeat for several. Defaults to close.
    #[arg(long = "field", value_enum)]
    pub fields: Vec<FieldArg>,

    /// Output HTML file. Defaults to `<symbol>.html`.
    #[arg(long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct FetchArgs {
    #[command(flatten)]
    pub series: SeriesArgs,

    /// Pretty-print JSON output with indentation.
    #[arg(long, default_value_t = false)]
    pub pretty: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FieldArg {
    Open,
    High,
    Low,
    Close,
}

impl From<FieldArg> for PriceField {
    fn from(value: FieldArg) -> Self {
        match value {
            FieldArg::Open => Self::Open,
            FieldArg::High => Self::High,
            FieldArg::Low => Self::Low,
            FieldArg::Close => Self::Close,
        }
    }
}
