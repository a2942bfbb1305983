use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// Longest ticker accepted, including exchange suffixes such as `.LON`.
const MAX_TICKER_LEN: usize = 15;

/// Uppercased ticker symbol identifying a traded security.
///
/// Tickers start with an ASCII letter or digit and may contain letters,
/// digits, `.` and `-`, which covers plain US listings (`GOOG`), the
/// exchange-suffixed forms Alpha Vantage returns from symbol search
/// (`TSCO.LON`, `BRK-B`) and numeric Asian listings (`0700.HKG`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Ticker(String);

impl Ticker {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let normalized = input.trim().to_ascii_uppercase();

        let mut chars = normalized.chars();
        match chars.next() {
            None => return Err(ValidationError::EmptyTicker),
            Some(ch) if !ch.is_ascii_alphanumeric() => {
                return Err(ValidationError::TickerInvalidStart { ch })
            }
            Some(_) => {}
        }

        if let Some((index, ch)) = normalized
            .char_indices()
            .find(|(_, ch)| !(ch.is_ascii_alphanumeric() || matches!(ch, '.' | '-')))
        {
            return Err(ValidationError::TickerInvalidChar { ch, index });
        }

        // All remaining chars are ASCII, so byte length equals char count.
        if normalized.len() > MAX_TICKER_LEN {
            return Err(ValidationError::TickerTooLong {
                len: normalized.len(),
                max: MAX_TICKER_LEN,
            });
        }

        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Ticker {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Ticker {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Ticker {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Ticker> for String {
    fn from(value: Ticker) -> Self {
        value.0
    }
}
