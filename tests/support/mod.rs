//! Canned Alpha Vantage payloads shared by the behaviour tests.

#![allow(dead_code)]

use std::sync::Arc;

use serde_json::{json, Map, Value};
use tickchart_core::{AlphaVantageAdapter, ApiKey, ScriptedHttpClient};
use time::{Date, Duration};

pub const TEST_KEY: &str = "test-key";

/// Adapter wired to a scripted client that answers with `bodies` in order.
pub fn scripted_adapter<I, S>(bodies: I) -> (AlphaVantageAdapter, Arc<ScriptedHttpClient>)
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let client = Arc::new(ScriptedHttpClient::json_bodies(bodies));
    let adapter = AlphaVantageAdapter::new(client.clone(), ApiKey::new(TEST_KEY));
    (adapter, client)
}

/// `TIME_SERIES_DAILY` body with one row per day for `days_back` days
/// ending on `today`, newest first like the real API.
pub fn daily_series_body(today: Date, days_back: i64) -> String {
    let mut records = Map::new();
    for offset in 0..days_back {
        let date = today - Duration::days(offset);
        let base = 100.0 + offset as f64;
        records.insert(
            date.to_string(),
            json!({
                "1. open": format!("{:.4}", base),
                "2. high": format!("{:.4}", base + 2.0),
                "3. low": format!("{:.4}", base - 1.5),
                "4. close": format!("{:.4}", base + 0.5),
                "5. volume": "1000000"
            }),
        );
    }

    json!({
        "Meta Data": {
            "1. Information": "Daily Prices (open, high, low, close) and Volumes",
            "2. Symbol": "GOOG"
        },
        "Time Series (Daily)": Value::Object(records)
    })
    .to_string()
}

pub fn invalid_symbol_body() -> String {
    json!({
        "Error Message": "Invalid API call. Please retry or visit the documentation (https://www.alphavantage.co/documentation/) for TIME_SERIES_DAILY."
    })
    .to_string()
}

pub const RATE_LIMIT_NOTE: &str = "Thank you for using Alpha Vantage! Our standard API call frequency is 5 calls per minute and 500 calls per day.";

pub fn rate_limit_body() -> String {
    json!({ "Note": RATE_LIMIT_NOTE }).to_string()
}

pub fn search_body(symbols: &[&str]) -> String {
    let matches: Vec<Value> = symbols
        .iter()
        .map(|symbol| {
            json!({
                "1. symbol": symbol,
                "2. name": format!("{symbol} Holdings"),
                "3. type": "Equity",
                "4. region": "United States",
                "8. currency": "USD",
                "9. matchScore": "0.7500"
            })
        })
        .collect();
    json!({ "bestMatches": matches }).to_string()
}
