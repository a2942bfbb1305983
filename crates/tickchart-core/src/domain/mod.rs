//! # Domain Models
//!
//! Validated types shared by the fetcher and the chart renderer.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Ticker`] | Validated, uppercased ticker symbol |
//! | [`PriceField`] | One of open, high, low, close |
//! | [`DailyPrice`] | OHLC prices for one trading day |
//! | [`PriceSeries`] | Date-indexed daily prices for a ticker |
//!
//! Construction validates invariants, so a `PriceSeries` never holds a
//! negative or non-finite price and never holds two rows for the same date.

mod price;
mod ticker;

pub use price::{DailyPrice, PriceField, PriceSeries};
pub use ticker::Ticker;
