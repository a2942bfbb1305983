//! Request and outcome types for daily price fetches.
//!
//! A fetch either fails hard with a [`FetchError`] (transport problems,
//! malformed payloads) or completes with a [`FetchOutcome`], which also
//! covers the upstream answers the caller is expected to show the user:
//! an unknown ticker with suggestions, or a throttling notice.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use time::Date;

use crate::http_client::HttpError;
use crate::{ConfigError, PriceSeries, Ticker, ValidationError};

/// Day counts at or above this use the full-history query.
pub const FULL_HISTORY_THRESHOLD_DAYS: u32 = 100;

/// Message returned for payloads that match no known response shape.
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong! Please try again.";

/// How much history to ask the upstream for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputSize {
    /// Latest ~100 trading days.
    Compact,
    /// Complete available history.
    Full,
}

impl OutputSize {
    pub const fn for_days(days: u32) -> Self {
        if days < FULL_HISTORY_THRESHOLD_DAYS {
            Self::Compact
        } else {
            Self::Full
        }
    }
}

/// Daily prices for `ticker` covering the last `days` calendar days.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyRequest {
    pub ticker: Ticker,
    pub days: u32,
}

impl DailyRequest {
    pub fn new(ticker: Ticker, days: u32) -> Result<Self, ValidationError> {
        if days == 0 {
            return Err(ValidationError::NonPositiveDays);
        }
        Ok(Self { ticker, days })
    }

    pub const fn output_size(&self) -> OutputSize {
        OutputSize::for_days(self.days)
    }

    /// Earliest date kept when the window ends on `today`.
    pub fn window_start(&self, today: Date) -> Date {
        today
            .checked_sub(time::Duration::days(i64::from(self.days)))
            .unwrap_or(Date::MIN)
    }
}

/// Result of a completed fetch. Exactly one shape holds per call.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    /// Prices within the requested window.
    Series(PriceSeries),
    /// No data; the message explains why (throttling or an unexpected payload).
    Failed { message: String },
    /// The ticker is unknown upstream; `candidates` holds the symbols the
    /// search endpoint suggested, verbatim, and may be empty.
    NotFound { candidates: Vec<String> },
}

impl FetchOutcome {
    pub fn series(&self) -> Option<&PriceSeries> {
        match self {
            Self::Series(series) => Some(series),
            _ => None,
        }
    }

    pub fn into_series(self) -> Option<PriceSeries> {
        match self {
            Self::Series(series) => Some(series),
            _ => None,
        }
    }

    /// Human-readable error, empty unless the outcome is [`FetchOutcome::Failed`].
    pub fn error(&self) -> &str {
        match self {
            Self::Failed { message } => message,
            _ => "",
        }
    }

    /// Suggested tickers, empty unless the outcome is [`FetchOutcome::NotFound`].
    pub fn candidates(&self) -> &[String] {
        match self {
            Self::NotFound { candidates } => candidates,
            _ => &[],
        }
    }
}

/// Unrecovered fetch failures.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("alphavantage transport error: {0}")]
    Transport(#[from] HttpError),

    #[error("alphavantage returned status {status}")]
    Status { status: u16 },

    #[error("failed to parse alphavantage response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid date key '{value}' in time series")]
    InvalidDate { value: String },

    #[error("invalid daily record on {date}: {source}")]
    InvalidRecord {
        date: Date,
        #[source]
        source: serde_json::Error,
    },
}
