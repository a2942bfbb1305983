//! # Tickchart Core
//!
//! Daily stock price fetching and chart building.
//!
//! ## Overview
//!
//! Two leaf components, used one after the other:
//!
//! - **Fetcher** ([`AlphaVantageAdapter`]): turns a ticker and a day count
//!   into a [`FetchOutcome`]: a [`PriceSeries`], an error message, or a list
//!   of suggested tickers when the symbol is unknown upstream.
//! - **Renderer** ([`chart::render`]): turns a [`PriceSeries`] into a
//!   [`ChartLayout`] with one coloured marker+line series per requested
//!   [`PriceField`], exportable as a standalone interactive HTML page.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`adapters`] | Alpha Vantage daily price fetcher |
//! | [`chart`] | Chart model, renderer, and HTML export |
//! | [`credentials`] | API key loading from file or environment |
//! | [`data_source`] | Fetch request, outcome, and error types |
//! | [`domain`] | Ticker and price series models |
//! | [`error`] | Validation and configuration errors |
//! | [`http_client`] | HTTP transport abstraction |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use tickchart_core::{chart, AlphaVantageAdapter, ApiKey, DailyRequest, ReqwestHttpClient, Ticker};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let key = ApiKey::from_file("AlphaVantage.txt")?;
//!     let adapter = AlphaVantageAdapter::new(Arc::new(ReqwestHttpClient::new()), key);
//!
//!     let request = DailyRequest::new(Ticker::parse("GOOG")?, 30)?;
//!     let outcome = adapter.fetch_daily(&request).await?;
//!
//!     if let Some(series) = outcome.series() {
//!         let layout = chart::render(series, "GOOG", &[]);
//!         std::fs::write("goog.html", layout.to_html())?;
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Configuration and transport problems are returned as [`FetchError`].
//! Unknown tickers, throttling notices and unexpected payloads are not
//! errors: they come back as [`FetchOutcome::NotFound`] or
//! [`FetchOutcome::Failed`] so the caller can show them to the user.

pub mod adapters;
pub mod chart;
pub mod credentials;
pub mod data_source;
pub mod domain;
pub mod error;
pub mod http_client;

pub use adapters::{AlphaVantageAdapter, ALPHAVANTAGE_BASE_URL};

pub use chart::{render, ChartLayout, ChartSpec};

pub use credentials::{ApiKey, API_KEY_ENV, DEFAULT_KEY_FILE};

pub use data_source::{
    DailyRequest, FetchError, FetchOutcome, OutputSize, FULL_HISTORY_THRESHOLD_DAYS,
    GENERIC_FAILURE_MESSAGE,
};

pub use domain::{DailyPrice, PriceField, PriceSeries, Ticker};

pub use error::{ConfigError, ValidationError};

pub use http_client::{
    HttpClient, HttpError, HttpFuture, HttpRequest, HttpResponse, ReqwestHttpClient,
    ScriptedHttpClient,
};
