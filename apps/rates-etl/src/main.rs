//! Rates ETL Binary
//!
//! Runs the exchange-rate pipeline once: fetch, transform, provision,
//! load. Scheduling repeated runs is the caller's job (cron, a workflow
//! engine, etc.); the binary itself has no sub-commands.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin rates-etl -- [config.yaml]
//! ```
//!
//! # Environment Variables
//!
//! - `RATES_ETL_CONFIG`: config file path (overridden by the CLI arg)
//! - `RATES_API_ACCESS_KEY`: API access key
//! - `RATES_DB_HOST` / `RATES_DB_PORT` / `RATES_DB_USER` / `RATES_DB_PASSWORD`
//! - `RUST_LOG`: log level (default: info)

use anyhow::Context;
use rates_etl::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = load_config()?;
    tracing::info!(
        api = %config.api.base_url,
        database = %config.database.target_database,
        table = %config.database.table,
        "Starting rates ETL run"
    );

    let report = rates_etl::pipeline::run(&config)
        .await
        .context("Pipeline run failed")?;

    tracing::info!(
        rates_fetched = report.rates_fetched,
        rows_loaded = report.rows_loaded,
        "Run complete"
    );
    Ok(())
}

/// Initialize the tracing subscriber with environment filter.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
}

/// Build the run configuration: optional YAML file (CLI arg or
/// `RATES_ETL_CONFIG`), then environment overrides for credentials.
fn load_config() -> anyhow::Result<Config> {
    let path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("RATES_ETL_CONFIG").ok());

    let mut config = match path {
        Some(path) => {
            Config::from_yaml_file(&path).with_context(|| format!("Loading config '{path}'"))?
        }
        None => Config::default(),
    };

    config.apply_env_overrides();
    config.validate().context("Invalid configuration")?;
    Ok(config)
}
