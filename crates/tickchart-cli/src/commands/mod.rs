mod chart;
mod fetch;

use std::sync::Arc;

use tickchart_core::{
    AlphaVantageAdapter, ApiKey, DailyRequest, FetchOutcome, PriceSeries, ReqwestHttpClient,
    Ticker,
};

use crate::cli::{Cli, Command, SeriesArgs};
use crate::error::CliError;

pub async fn run(cli: &Cli) -> Result<(), CliError> {
    match &cli.command {
        Command::Chart(args) => chart::run(args, cli).await,
        Command::Fetch(args) => fetch::run(args, cli).await,
    }
}

/// Validate the arguments, fetch, and reduce the outcome to a non-empty series.
async fn fetch_series(args: &SeriesArgs, cli: &Cli) -> Result<PriceSeries, CliError> {
    let ticker = Ticker::parse(&args.symbol)?;
    let request = DailyRequest::new(ticker, args.days)?;

    let api_key = ApiKey::resolve(&cli.key_file)?;
    let adapter = AlphaVantageAdapter::new(Arc::new(ReqwestHttpClient::new()), api_key)
        .with_timeout_ms(cli.timeout_ms);

    let outcome = adapter.fetch_daily(&request).await?;
    require_series(&request, outcome)
}

fn require_series(request: &DailyRequest, outcome: FetchOutcome) -> Result<PriceSeries, CliError> {
    match outcome {
        FetchOutcome::Series(series) if series.is_empty() => Err(CliError::NoData(format!(
            "no prices for {} in the last {} days",
            request.ticker, request.days
        ))),
        FetchOutcome::Series(series) => Ok(series),
        FetchOutcome::Failed { message } => Err(CliError::NoData(message)),
        FetchOutcome::NotFound { candidates } => Err(CliError::TickerNotFound {
            ticker: request.ticker.clone(),
            candidates,
        }),
    }
}
