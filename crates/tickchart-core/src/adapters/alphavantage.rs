use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use time::macros::format_description;
use time::{Date, OffsetDateTime};

use crate::credentials::ApiKey;
use crate::data_source::{
    DailyRequest, FetchError, FetchOutcome, OutputSize, GENERIC_FAILURE_MESSAGE,
};
use crate::http_client::{HttpClient, HttpRequest, HttpResponse};
use crate::{ConfigError, DailyPrice, PriceSeries, Ticker};

pub const ALPHAVANTAGE_BASE_URL: &str = "https://www.alphavantage.co/query";

const DEFAULT_TIMEOUT_MS: u64 = 10_000;

const ERROR_MESSAGE_KEY: &str = "Error Message";
const NOTE_KEY: &str = "Note";
const DAILY_SERIES_KEY: &str = "Time Series (Daily)";

/// Alpha Vantage daily price fetcher.
///
/// One call to [`AlphaVantageAdapter::fetch_daily`] issues a
/// `TIME_SERIES_DAILY` query and, when the ticker is unknown, a follow-up
/// `SYMBOL_SEARCH` query for suggestions. Requests are issued one after the
/// other, never concurrently.
#[derive(Clone)]
pub struct AlphaVantageAdapter {
    http_client: Arc<dyn HttpClient>,
    api_key: ApiKey,
    base_url: String,
    timeout_ms: u64,
}

impl AlphaVantageAdapter {
    pub fn new(http_client: Arc<dyn HttpClient>, api_key: ApiKey) -> Self {
        Self {
            http_client,
            api_key,
            base_url: String::from(ALPHAVANTAGE_BASE_URL),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }

    /// Build an adapter whose key is read from `key_file`.
    pub fn from_key_file(
        http_client: Arc<dyn HttpClient>,
        key_file: impl AsRef<Path>,
    ) -> Result<Self, ConfigError> {
        Ok(Self::new(http_client, ApiKey::from_file(key_file)?))
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Fetch daily prices for the window ending on the current UTC date.
    pub async fn fetch_daily(&self, req: &DailyRequest) -> Result<FetchOutcome, FetchError> {
        self.fetch_daily_as_of(req, OffsetDateTime::now_utc().date())
            .await
    }

    /// Fetch daily prices for the window `today - days ..= today`.
    pub async fn fetch_daily_as_of(
        &self,
        req: &DailyRequest,
        today: Date,
    ) -> Result<FetchOutcome, FetchError> {
        let response = self.get(self.daily_request(req)).await?;
        let payload = match serde_json::from_str::<Value>(&response.body) {
            Ok(payload) => DailyPayload::classify(payload),
            Err(_) if !response.is_success() => {
                return Err(FetchError::Status {
                    status: response.status,
                })
            }
            Err(error) => return Err(error.into()),
        };
        // A recognised body takes precedence over the status code.
        if payload == DailyPayload::Unrecognized && !response.is_success() {
            return Err(FetchError::Status {
                status: response.status,
            });
        }

        match payload {
            DailyPayload::UnknownSymbol(message) => {
                tracing::warn!(ticker = %req.ticker, %message, "ticker not found, searching for matches");
                let candidates = self.search(req.ticker.as_str()).await?;
                Ok(FetchOutcome::NotFound { candidates })
            }
            DailyPayload::Throttled(message) => {
                tracing::warn!(ticker = %req.ticker, %message, "alphavantage throttled the request");
                Ok(FetchOutcome::Failed { message })
            }
            DailyPayload::Series(records) => {
                let mut series = parse_daily_series(req.ticker.clone(), &records)?;
                let total = series.len();
                series.retain_between(req.window_start(today), today);
                tracing::info!(
                    ticker = %req.ticker,
                    days = req.days,
                    received = total,
                    kept = series.len(),
                    "fetched daily prices"
                );
                Ok(FetchOutcome::Series(series))
            }
            DailyPayload::Unrecognized => {
                tracing::warn!(ticker = %req.ticker, "unrecognized alphavantage payload");
                Ok(FetchOutcome::Failed {
                    message: String::from(GENERIC_FAILURE_MESSAGE),
                })
            }
        }
    }

    /// Symbols suggested by `SYMBOL_SEARCH` for `keywords`, in match order.
    ///
    /// Only transport failures are errors. An undecodable body or a missing
    /// `bestMatches` field yields an empty list.
    pub async fn search(&self, keywords: &str) -> Result<Vec<String>, FetchError> {
        let response = self.get(self.search_request(keywords)).await?;

        match serde_json::from_str::<AlphaVantageSearchResponse>(&response.body) {
            Ok(payload) => Ok(payload.symbols()),
            Err(error) => {
                tracing::warn!(status = response.status, %error, "undecodable symbol search response");
                Ok(Vec::new())
            }
        }
    }

    fn daily_request(&self, req: &DailyRequest) -> HttpRequest {
        let mut request = HttpRequest::get(&self.base_url)
            .with_timeout_ms(self.timeout_ms)
            .with_query("function", "TIME_SERIES_DAILY")
            .with_query("symbol", req.ticker.as_str());
        if req.output_size() == OutputSize::Full {
            request = request.with_query("outputsize", "full");
        }
        request.with_query("apikey", self.api_key.expose())
    }

    fn search_request(&self, keywords: &str) -> HttpRequest {
        HttpRequest::get(&self.base_url)
            .with_timeout_ms(self.timeout_ms)
            .with_query("function", "SYMBOL_SEARCH")
            .with_query("keywords", keywords)
            .with_query("apikey", self.api_key.expose())
    }

    async fn get(&self, request: HttpRequest) -> Result<HttpResponse, FetchError> {
        tracing::debug!(url = %request.redacted_url(), "alphavantage request");
        let response = self.http_client.execute(request).await?;
        tracing::debug!(status = response.status, bytes = response.body.len(), "alphavantage response");
        Ok(response)
    }
}

/// Known shapes of a `TIME_SERIES_DAILY` response body.
#[derive(Debug, PartialEq)]
enum DailyPayload {
    UnknownSymbol(String),
    Throttled(String),
    Series(Map<String, Value>),
    Unrecognized,
}

impl DailyPayload {
    fn classify(payload: Value) -> Self {
        let Value::Object(mut fields) = payload else {
            return Self::Unrecognized;
        };

        if let Some(message) = fields.get(ERROR_MESSAGE_KEY) {
            return Self::UnknownSymbol(text_of(message));
        }
        if let Some(note) = fields.get(NOTE_KEY) {
            return Self::Throttled(text_of(note));
        }
        if let Some(Value::Object(records)) = fields.remove(DAILY_SERIES_KEY) {
            return Self::Series(records);
        }
        Self::Unrecognized
    }
}

fn text_of(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn parse_daily_series(
    ticker: Ticker,
    records: &Map<String, Value>,
) -> Result<PriceSeries, FetchError> {
    let date_format = format_description!("[year]-[month]-[day]");
    let mut series = PriceSeries::new(ticker);

    for (date_key, record) in records {
        let date = Date::parse(date_key, &date_format).map_err(|_| FetchError::InvalidDate {
            value: date_key.clone(),
        })?;
        let bar = AlphaVantageDailyBar::deserialize(record)
            .map_err(|source| FetchError::InvalidRecord { date, source })?;
        series.insert(DailyPrice::new(date, bar.open, bar.high, bar.low, bar.close)?);
    }

    Ok(series)
}

#[derive(Debug, Deserialize)]
struct AlphaVantageDailyBar {
    #[serde(rename = "1. open", deserialize_with = "price_value")]
    open: f64,
    #[serde(rename = "2. high", deserialize_with = "price_value")]
    high: f64,
    #[serde(rename = "3. low", deserialize_with = "price_value")]
    low: f64,
    #[serde(rename = "4. close", deserialize_with = "price_value")]
    close: f64,
}

#[derive(Debug, Default, Deserialize)]
struct AlphaVantageSearchResponse {
    #[serde(rename = "bestMatches", default)]
    best_matches: Vec<AlphaVantageSearchMatch>,
}

#[derive(Debug, Deserialize)]
struct AlphaVantageSearchMatch {
    #[serde(rename = "1. symbol", default)]
    symbol: Option<String>,
}

impl AlphaVantageSearchResponse {
    fn symbols(self) -> Vec<String> {
        self.best_matches
            .into_iter()
            .filter_map(|entry| entry.symbol)
            .map(|symbol| symbol.trim().to_owned())
            .filter(|symbol| !symbol.is_empty())
            .collect()
    }
}

/// The API encodes prices as strings; bare JSON numbers are accepted too.
fn price_value<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawPrice {
        Number(f64),
        Text(String),
    }

    match RawPrice::deserialize(deserializer)? {
        RawPrice::Number(value) => Ok(value),
        RawPrice::Text(text) => text
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("invalid price '{text}'"))),
    }
}
