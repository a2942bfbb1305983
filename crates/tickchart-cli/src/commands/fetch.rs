use crate::cli::{Cli, FetchArgs};
use crate::error::CliError;

use super::fetch_series;

pub async fn run(args: &FetchArgs, cli: &Cli) -> Result<(), CliError> {
    let series = fetch_series(&args.series, cli).await?;

    let rendered = if args.pretty {
        serde_json::to_string_pretty(&series)?
    } else {
        serde_json::to_string(&series)?
    };
    println!("{rendered}");
    Ok(())
}
