use std::path::{Path, PathBuf};

use tickchart_core::{chart, PriceField, PriceSeries};

use crate::cli::{ChartArgs, Cli};
use crate::error::CliError;

use super::fetch_series;

pub async fn run(args: &ChartArgs, cli: &Cli) -> Result<(), CliError> {
    let series = fetch_series(&args.series, cli).await?;
    let fields: Vec<PriceField> = args.fields.iter().copied().map(PriceField::from).collect();

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| default_output(&series));
    write_chart(&series, &fields, &output)?;

    println!("{}", output.display());
    Ok(())
}

fn default_output(series: &PriceSeries) -> PathBuf {
    PathBuf::from(format!("{}.html", series.ticker()))
}

fn write_chart(series: &PriceSeries, fields: &[PriceField], output: &Path) -> Result<(), CliError> {
    let layout = chart::render(series, series.ticker().as_str(), fields);
    std::fs::write(output, layout.to_html())?;
    tracing::info!(
        path = %output.display(),
        rows = series.len(),
        "chart written"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn series() -> PriceSeries {
        serde_json::from_value(json!({
            "ticker": "GOOG",
            "rows": [
                { "date": "2024-03-01", "open": 8.0, "high": 10.0, "low": 7.5, "close": 9.0 },
                { "date": "2024-03-04", "open": 10.0, "high": 12.0, "low": 9.0, "close": 11.0 }
            ]
        }))
        .expect("valid series")
    }

    #[test]
    fn default_output_is_named_after_the_ticker() {
        assert_eq!(default_output(&series()), PathBuf::from("GOOG.html"));
    }

    #[test]
    fn writes_a_standalone_html_page() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("chart.html");

        write_chart(&series(), &[PriceField::High, PriceField::Low], &path).expect("written");

        let html = std::fs::read_to_string(&path).expect("readable");
        assert!(html.contains("<title>GOOG</title>"));
        assert!(html.contains("\"legendgroup\":\"High\""));
        assert!(html.contains("\"legendgroup\":\"Low\""));
    }

    #[test]
    fn missing_directory_is_an_io_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("missing").join("chart.html");

        let error = write_chart(&series(), &[], &path).expect_err("must fail");
        assert_eq!(error.exit_code(), 10);
    }
}
