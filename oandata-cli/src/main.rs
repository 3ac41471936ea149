//! `fetch_oandata`: fetch historical candles for one instrument and print
//! them, optionally writing a CSV file.
//!
//! Set `OANDATA_USE_MOCK=1` to serve deterministic candles from the mock
//! provider instead of the v20 REST API; no config file is read then.

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use chrono::NaiveDate;
use clap::Parser;
use oandata::{CsvOptions, Oandata, write_csv, write_csv_path};
use oandata_core::{CandleProvider, FetchRequest, Granularity, OandataError, PriceKind};
use oandata_mock::MockProvider;
use oandata_v20::V20Connector;
use tracing_subscriber::EnvFilter;

const USE_MOCK_ENV: &str = "OANDATA_USE_MOCK";

#[derive(Parser, Debug)]
#[command(
    name = "fetch_oandata",
    version,
    about = "Fetch historical price data from OANDA"
)]
struct Cli {
    /// Instrument name, e.g. EUR_USD
    instrument: String,

    /// First day of the period (YYYY-MM-DD)
    from_date: NaiveDate,

    /// Last day of the period, inclusive (YYYY-MM-DD)
    to_date: NaiveDate,

    /// Path to the TOML config file with the v20 hostname and token
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Write the candles as CSV to this file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Candle width (S5 .. M)
    #[arg(short, long, default_value = "D")]
    granularity: Granularity,

    /// Bid (B), ask (A) or mid (M) prices
    #[arg(short, long, default_value = "M")]
    price: PriceKind,

    /// Split the period into this many sub-ranges instead of deriving the count
    #[arg(short, long)]
    split: Option<u32>,

    /// Attempts per sub-range before giving up
    #[arg(short, long, default_value_t = 3)]
    retry: u32,
}

fn use_mock() -> bool {
    std::env::var(USE_MOCK_ENV).is_ok_and(|v| !v.is_empty() && v != "0")
}

fn provider(cli: &Cli) -> Result<Arc<dyn CandleProvider>, OandataError> {
    if use_mock() {
        tracing::info!("{USE_MOCK_ENV} is set, serving candles from the mock provider");
        return Ok(Arc::new(MockProvider::new()));
    }
    let path = cli
        .config
        .as_ref()
        .ok_or_else(|| OandataError::Config("no config file is given".to_string()))?;
    tracing::info!(path = %path.display(), "reading configuration");
    Ok(Arc::new(V20Connector::from_path(path)?))
}

async fn run(cli: Cli) -> Result<(), OandataError> {
    let oandata = Oandata::builder()
        .with_provider(provider(&cli)?)
        .retry_bound(cli.retry)
        .build()?;

    let req = FetchRequest::builder(cli.instrument, cli.from_date, cli.to_date)
        .granularity(cli.granularity)
        .price(cli.price)
        .split_opt(cli.split)
        .retry_bound(cli.retry)
        .build()?;

    let table = oandata.fetch(&req).await?;

    if let Some(path) = &cli.output {
        write_csv_path(&table, path, &CsvOptions::default())?;
        tracing::info!(path = %path.display(), rows = table.len(), "wrote CSV");
    }

    let mut stdout = std::io::stdout().lock();
    write_csv(&table, &mut stdout, &CsvOptions::default())?;
    stdout
        .flush()
        .map_err(|e| OandataError::Output(e.to_string()))
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            eprintln!("To see the list of command line arguments, run the program with `-h`.");
            ExitCode::FAILURE
        }
    }
}
