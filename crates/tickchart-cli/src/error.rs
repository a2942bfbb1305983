use thiserror::Error;
use tickchart_core::Ticker;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Validation(#[from] tickchart_core::ValidationError),

    #[error(transparent)]
    Config(#[from] tickchart_core::ConfigError),

    #[error(transparent)]
    Fetch(#[from] tickchart_core::FetchError),

    #[error("{}", not_found_message(.ticker, .candidates))]
    TickerNotFound {
        ticker: Ticker,
        candidates: Vec<String>,
    },

    #[error("no data: {0}")]
    NoData(String),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Validation(_) => 2,
            Self::TickerNotFound { .. } | Self::NoData(_) => 3,
            Self::Serialization(_) => 4,
            Self::Config(_) => 7,
            Self::Fetch(tickchart_core::FetchError::Config(_)) => 7,
            Self::Fetch(tickchart_core::FetchError::Validation(_)) => 2,
            Self::Fetch(_) => 8,
            Self::Io(_) => 10,
        }
    }
}

fn not_found_message(ticker: &Ticker, candidates: &[String]) -> String {
    if candidates.is_empty() {
        return format!("ticker '{ticker}' not found and no similar tickers were suggested");
    }
    let suggestions = candidates.join(", ");
    format!("ticker '{ticker}' not found; did you mean: {suggestions}")
}
