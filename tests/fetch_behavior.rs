//! Behaviour tests for the Alpha Vantage daily price fetcher.
//!
//! Every test drives the adapter through a scripted transport, so the
//! scenarios below describe exactly what the upstream answers and what the
//! caller gets back.

mod support;

use std::sync::Arc;

use tickchart_core::{
    AlphaVantageAdapter, ApiKey, ConfigError, DailyRequest, FetchError, FetchOutcome, HttpError,
    HttpResponse, PriceField, ScriptedHttpClient, Ticker, GENERIC_FAILURE_MESSAGE,
};
use time::macros::date;
use time::{Date, Duration};

use support::{
    daily_series_body, invalid_symbol_body, rate_limit_body, scripted_adapter, search_body,
    RATE_LIMIT_NOTE, TEST_KEY,
};

const TODAY: Date = date!(2024 - 06 - 14);

fn request(symbol: &str, days: u32) -> DailyRequest {
    DailyRequest::new(Ticker::parse(symbol).expect("valid ticker"), days).expect("valid request")
}

// =============================================================================
// Successful fetches
// =============================================================================

#[tokio::test]
async fn when_prices_are_returned_only_the_requested_window_is_kept() {
    // Given: upstream has 60 days of prices, plus a row dated after today
    let mut body: serde_json::Value =
        serde_json::from_str(&daily_series_body(TODAY, 60)).expect("fixture is JSON");
    body["Time Series (Daily)"]["2024-06-20"] = serde_json::json!({
        "1. open": "1", "2. high": "1", "3. low": "1", "4. close": "1"
    });
    let (adapter, _) = scripted_adapter([body.to_string()]);

    // When: the caller asks for 30 days
    let outcome = adapter
        .fetch_daily_as_of(&request("GOOG", 30), TODAY)
        .await
        .expect("fetch should succeed");

    // Then: every row lies within [today - 30, today]
    let series = outcome.series().expect("series present");
    let start = TODAY - Duration::days(30);
    assert_eq!(series.len(), 31);
    assert!(series.rows().all(|row| row.date >= start && row.date <= TODAY));
    assert_eq!(series.first_date(), Some(start));
    assert_eq!(series.last_date(), Some(TODAY));
    assert_eq!(outcome.error(), "");
    assert!(outcome.candidates().is_empty());
}

#[tokio::test]
async fn when_prices_are_returned_rows_come_back_oldest_first_with_parsed_values() {
    let (adapter, _) = scripted_adapter([daily_series_body(TODAY, 3)]);

    let outcome = adapter
        .fetch_daily_as_of(&request("GOOG", 5), TODAY)
        .await
        .expect("fetch should succeed");

    let series = outcome.into_series().expect("series present");
    assert_eq!(series.ticker().as_str(), "GOOG");
    assert_eq!(series.values(PriceField::Open), vec![102.0, 101.0, 100.0]);
    assert_eq!(series.values(PriceField::Close), vec![102.5, 101.5, 100.5]);
    let newest = series.get(TODAY).expect("today present");
    assert_eq!((newest.high, newest.low), (102.0, 98.5));
}

#[tokio::test]
async fn when_window_is_short_the_compact_query_is_used() {
    let (adapter, client) = scripted_adapter([daily_series_body(TODAY, 5)]);

    adapter
        .fetch_daily_as_of(&request("goog", 99), TODAY)
        .await
        .expect("fetch should succeed");

    let requests = client.recorded_requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].query_value("function"), Some("TIME_SERIES_DAILY"));
    assert_eq!(requests[0].query_value("symbol"), Some("GOOG"));
    assert_eq!(requests[0].query_value("outputsize"), None);
    assert_eq!(requests[0].query_value("apikey"), Some(TEST_KEY));
}

#[tokio::test]
async fn when_window_is_long_the_full_history_query_is_used() {
    let (adapter, client) = scripted_adapter([daily_series_body(TODAY, 5)]);

    adapter
        .fetch_daily_as_of(&request("GOOG", 100), TODAY)
        .await
        .expect("fetch should succeed");

    let requests = client.recorded_requests();
    assert_eq!(requests[0].query_value("outputsize"), Some("full"));
    assert!(requests[0].url().contains("&outputsize=full&apikey="));
}

#[tokio::test]
async fn when_no_rows_fall_in_the_window_the_series_is_empty_not_an_error() {
    let stale_day = TODAY - Duration::days(400);
    let (adapter, _) = scripted_adapter([daily_series_body(stale_day, 10)]);

    let outcome = adapter
        .fetch_daily_as_of(&request("GOOG", 30), TODAY)
        .await
        .expect("fetch should succeed");

    assert!(outcome.series().expect("series present").is_empty());
}

// =============================================================================
// Unknown ticker: suggestion lookup
// =============================================================================

#[tokio::test]
async fn when_ticker_is_unknown_search_matches_become_candidates() {
    // Given: the daily query reports an invalid call, search has matches
    let (adapter, client) = scripted_adapter([
        invalid_symbol_body(),
        search_body(&["ZZLL", "ZZV.TRT"]),
    ]);

    // When
    let outcome = adapter
        .fetch_daily_as_of(&request("ZZZZINVALID", 30), TODAY)
        .await
        .expect("unknown ticker is not an error");

    // Then: no data, empty error, the suggested tickers
    assert!(outcome.series().is_none());
    assert_eq!(outcome.error(), "");
    assert_eq!(outcome.candidates(), &["ZZLL", "ZZV.TRT"]);

    // And: exactly one follow-up search request was issued
    let requests = client.recorded_requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[1].query_value("function"), Some("SYMBOL_SEARCH"));
    assert_eq!(requests[1].query_value("keywords"), Some("ZZZZINVALID"));
    assert_eq!(requests[1].query_value("apikey"), Some(TEST_KEY));
}

#[tokio::test]
async fn when_search_matches_numeric_listings_they_are_suggested_verbatim() {
    let (adapter, _) = scripted_adapter([
        invalid_symbol_body(),
        search_body(&["600519.SHH", "0700.HKG", "BABA"]),
    ]);

    let outcome = adapter
        .fetch_daily_as_of(&request("ZZZZINVALID", 30), TODAY)
        .await
        .expect("unknown ticker is not an error");

    assert_eq!(outcome.candidates(), &["600519.SHH", "0700.HKG", "BABA"]);
}

#[tokio::test]
async fn when_search_has_no_matches_the_candidate_list_is_empty() {
    let (adapter, _) = scripted_adapter([invalid_symbol_body(), search_body(&[])]);

    let outcome = adapter
        .fetch_daily_as_of(&request("ZZZZINVALID", 30), TODAY)
        .await
        .expect("unknown ticker is not an error");

    assert_eq!(outcome, FetchOutcome::NotFound { candidates: Vec::new() });
}

#[tokio::test]
async fn when_search_response_is_malformed_the_candidate_list_is_empty() {
    for search_reply in [
        String::from("{}"),
        String::from("{\"bestMatches\": 42}"),
        String::from("<html>busy</html>"),
        rate_limit_body(),
    ] {
        let (adapter, _) = scripted_adapter([invalid_symbol_body(), search_reply.clone()]);

        let outcome = adapter
            .fetch_daily_as_of(&request("ZZZZINVALID", 30), TODAY)
            .await
            .expect("malformed search is not an error");

        assert_eq!(
            outcome,
            FetchOutcome::NotFound { candidates: Vec::new() },
            "search reply: {search_reply}"
        );
    }
}

#[tokio::test]
async fn when_search_transport_fails_the_error_propagates() {
    let client = Arc::new(ScriptedHttpClient::new([
        Ok(HttpResponse::ok_json(invalid_symbol_body())),
        Err(HttpError::new("connection reset")),
    ]));
    let adapter = AlphaVantageAdapter::new(client, ApiKey::new(TEST_KEY));

    let error = adapter
        .fetch_daily_as_of(&request("ZZZZINVALID", 30), TODAY)
        .await
        .expect_err("network failure propagates");

    assert!(matches!(error, FetchError::Transport(_)));
}

// =============================================================================
// Throttling and unexpected payloads
// =============================================================================

#[tokio::test]
async fn when_rate_limited_the_notice_is_returned_as_the_error() {
    let (adapter, client) = scripted_adapter([rate_limit_body()]);

    let outcome = adapter
        .fetch_daily_as_of(&request("GOOG", 30), TODAY)
        .await
        .expect("rate limit is not an error");

    assert!(outcome.series().is_none());
    assert_eq!(outcome.error(), RATE_LIMIT_NOTE);
    assert!(outcome.candidates().is_empty());
    assert_eq!(client.recorded_requests().len(), 1, "no search on rate limit");
}

#[tokio::test]
async fn when_payload_shape_is_unknown_a_generic_message_is_returned() {
    let (adapter, _) = scripted_adapter(["{\"Meta Data\": {\"2. Symbol\": \"GOOG\"}}"]);

    let outcome = adapter
        .fetch_daily_as_of(&request("GOOG", 30), TODAY)
        .await
        .expect("unknown shape is not an error");

    assert_eq!(
        outcome,
        FetchOutcome::Failed {
            message: String::from(GENERIC_FAILURE_MESSAGE)
        }
    );
}

#[tokio::test]
async fn when_payload_is_an_information_notice_a_generic_message_is_returned() {
    let (adapter, _) = scripted_adapter(["{\"Information\": \"premium endpoint\"}"]);

    let outcome = adapter
        .fetch_daily_as_of(&request("GOOG", 30), TODAY)
        .await
        .expect("unknown shape is not an error");

    assert!(outcome.series().is_none());
    assert_eq!(outcome.error(), GENERIC_FAILURE_MESSAGE);
    assert!(outcome.candidates().is_empty());
}

#[tokio::test]
async fn when_a_rate_limit_arrives_with_an_error_status_the_notice_is_still_returned() {
    let client = Arc::new(ScriptedHttpClient::new([Ok(HttpResponse::with_status(
        429,
        rate_limit_body(),
    ))]));
    let adapter = AlphaVantageAdapter::new(client, ApiKey::new(TEST_KEY));

    let outcome = adapter
        .fetch_daily_as_of(&request("GOOG", 30), TODAY)
        .await
        .expect("a recognised body is not an error");

    assert_eq!(outcome.error(), RATE_LIMIT_NOTE);
}

#[tokio::test]
async fn when_an_error_status_carries_an_unknown_json_body_the_status_is_reported() {
    let client = Arc::new(ScriptedHttpClient::new([Ok(HttpResponse::with_status(
        500,
        "{\"detail\": \"internal\"}",
    ))]));
    let adapter = AlphaVantageAdapter::new(client, ApiKey::new(TEST_KEY));

    let error = adapter
        .fetch_daily_as_of(&request("GOOG", 30), TODAY)
        .await
        .expect_err("status errors propagate");

    assert!(matches!(error, FetchError::Status { status: 500 }));
}

// =============================================================================
// Failures that propagate
// =============================================================================

#[tokio::test]
async fn when_the_network_fails_the_error_propagates() {
    let client = Arc::new(ScriptedHttpClient::new([Err(HttpError::new(
        "connection failed: dns error",
    ))]));
    let adapter = AlphaVantageAdapter::new(client, ApiKey::new(TEST_KEY));

    let error = adapter
        .fetch_daily_as_of(&request("GOOG", 30), TODAY)
        .await
        .expect_err("transport errors propagate");

    assert!(error.to_string().contains("dns error"));
}

#[tokio::test]
async fn when_upstream_returns_a_server_error_the_status_is_reported() {
    let client = Arc::new(ScriptedHttpClient::new([Ok(HttpResponse::with_status(
        503,
        "Service Unavailable",
    ))]));
    let adapter = AlphaVantageAdapter::new(client, ApiKey::new(TEST_KEY));

    let error = adapter
        .fetch_daily_as_of(&request("GOOG", 30), TODAY)
        .await
        .expect_err("status errors propagate");

    assert!(matches!(error, FetchError::Status { status: 503 }));
}

#[tokio::test]
async fn when_the_body_is_not_json_a_decode_error_is_returned() {
    let (adapter, _) = scripted_adapter(["<html>maintenance</html>"]);

    let error = adapter
        .fetch_daily_as_of(&request("GOOG", 30), TODAY)
        .await
        .expect_err("non-JSON body propagates");

    assert!(matches!(error, FetchError::Decode(_)));
}

#[tokio::test]
async fn when_a_price_is_negative_the_validation_error_propagates() {
    let body = serde_json::json!({
        "Time Series (Daily)": {
            "2024-06-14": {"1. open": "-1", "2. high": "2", "3. low": "1", "4. close": "1"}
        }
    });
    let (adapter, _) = scripted_adapter([body.to_string()]);

    let error = adapter
        .fetch_daily_as_of(&request("GOOG", 30), TODAY)
        .await
        .expect_err("negative prices are rejected");

    assert!(matches!(error, FetchError::Validation(_)));
}

#[tokio::test]
async fn when_the_key_file_is_missing_no_request_is_made() {
    let client = Arc::new(ScriptedHttpClient::default());
    let dir = tempfile::tempdir().expect("temp dir");

    let error = AlphaVantageAdapter::from_key_file(client.clone(), dir.path().join("absent.txt"))
        .err()
        .expect("missing key file must fail");

    assert!(matches!(error, ConfigError::Unreadable { .. }));
    assert!(client.recorded_requests().is_empty());
}
