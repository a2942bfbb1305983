use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use time::Date;

use crate::{Ticker, ValidationError};

/// One of the four daily OHLC price fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceField {
    Open,
    High,
    Low,
    Close,
}

impl PriceField {
    pub const ALL: [Self; 4] = [Self::Open, Self::High, Self::Low, Self::Close];

    /// Key used for this field inside an Alpha Vantage daily record.
    pub const fn wire_key(self) -> &'static str {
        match self {
            Self::Open => "1. open",
            Self::High => "2. high",
            Self::Low => "3. low",
            Self::Close => "4. close",
        }
    }

    /// Human-facing name, used for legends.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::High => "High",
            Self::Low => "Low",
            Self::Close => "Close",
        }
    }
}

impl Display for PriceField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PriceField {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|field| field.label().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ValidationError::InvalidPriceField {
                value: trimmed.to_owned(),
            })
    }
}

/// Open/high/low/close prices for one trading day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyPrice {
    pub date: Date,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl DailyPrice {
    pub fn new(
        date: Date,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
    ) -> Result<Self, ValidationError> {
        validate_price("open", open)?;
        validate_price("high", high)?;
        validate_price("low", low)?;
        validate_price("close", close)?;

        Ok(Self {
            date,
            open,
            high,
            low,
            close,
        })
    }

    pub const fn value(&self, field: PriceField) -> f64 {
        match field {
            PriceField::Open => self.open,
            PriceField::High => self.high,
            PriceField::Low => self.low,
            PriceField::Close => self.close,
        }
    }
}

fn validate_price(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFiniteValue { field });
    }
    if value < 0.0 {
        return Err(ValidationError::NegativeValue { field });
    }
    Ok(())
}

/// Date-indexed daily prices for a single ticker.
///
/// Rows are keyed by calendar date, so a date appears at most once and
/// iteration is always oldest first regardless of the order the upstream
/// payload used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "SeriesRepr", from = "SeriesRepr")]
pub struct PriceSeries {
    ticker: Ticker,
    rows: BTreeMap<Date, DailyPrice>,
}

impl PriceSeries {
    pub fn new(ticker: Ticker) -> Self {
        Self {
            ticker,
            rows: BTreeMap::new(),
        }
    }

    pub fn from_rows(ticker: Ticker, rows: impl IntoIterator<Item = DailyPrice>) -> Self {
        let mut series = Self::new(ticker);
        for row in rows {
            series.insert(row);
        }
        series
    }

    /// Insert a row, replacing any existing row for the same date.
    pub fn insert(&mut self, row: DailyPrice) -> Option<DailyPrice> {
        self.rows.insert(row.date, row)
    }

    pub fn ticker(&self) -> &Ticker {
        &self.ticker
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, date: Date) -> Option<&DailyPrice> {
        self.rows.get(&date)
    }

    pub fn first_date(&self) -> Option<Date> {
        self.rows.keys().next().copied()
    }

    pub fn last_date(&self) -> Option<Date> {
        self.rows.keys().next_back().copied()
    }

    pub fn rows(&self) -> impl Iterator<Item = &DailyPrice> + '_ {
        self.rows.values()
    }

    pub fn dates(&self) -> Vec<Date> {
        self.rows.keys().copied().collect()
    }

    /// Column of values for `field`, aligned with [`PriceSeries::dates`].
    pub fn values(&self, field: PriceField) -> Vec<f64> {
        self.rows.values().map(|row| row.value(field)).collect()
    }

    /// Keep only rows dated within `start..=end`.
    pub fn retain_between(&mut self, start: Date, end: Date) {
        self.rows.retain(|date, _| (start..=end).contains(date));
    }
}

#[derive(Serialize, Deserialize)]
struct SeriesRepr {
    ticker: Ticker,
    rows: Vec<DailyPrice>,
}

impl From<PriceSeries> for SeriesRepr {
    fn from(value: PriceSeries) -> Self {
        Self {
            ticker: value.ticker,
            rows: value.rows.into_values().collect(),
        }
    }
}

impl From<SeriesRepr> for PriceSeries {
    fn from(value: SeriesRepr) -> Self {
        Self::from_rows(value.ticker, value.rows)
    }
}
