use std::path::PathBuf;

use thiserror::Error;

/// Validation and contract errors exposed by `tickchart-core`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("ticker cannot be empty")]
    EmptyTicker,
    #[error("ticker length {len} exceeds max {max}")]
    TickerTooLong { len: usize, max: usize },
    #[error("ticker must start with an ASCII letter or digit: '{ch}'")]
    TickerInvalidStart { ch: char },
    #[error("ticker contains invalid character '{ch}' at index {index}")]
    TickerInvalidChar { ch: char, index: usize },

    #[error("days must be a positive integer")]
    NonPositiveDays,

    #[error("invalid price field '{value}', expected one of open, high, low, close")]
    InvalidPriceField { value: String },

    #[error("field '{field}' must be finite")]
    NonFiniteValue { field: &'static str },
    #[error("field '{field}' must be non-negative")]
    NegativeValue { field: &'static str },
}

/// Credential source failures. These are fatal and never recovered.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read API key file '{}': {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("API key file '{}' has no key on its first line", path.display())]
    Malformed { path: PathBuf },
}
