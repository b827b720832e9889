//! Pipeline driver: fetch → transform → provision → load.
//!
//! Plain function composition; scheduling, retries and metrics belong to
//! whatever orchestrator invokes the binary, not to the pipeline itself.
//! Execution is fully sequential and a run owns all of its intermediate
//! data; nothing is shared across runs.

use thiserror::Error;

use crate::config::{Config, ConfigError};
use crate::db::{self, LoadError, ProvisionError};
use crate::fetch::{FetchError, RateApiClient};
use crate::mapping::CurrencyMapping;
use crate::transform::transform;

/// Errors from a pipeline run. Any of these terminates the run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Configuration was invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The fetch stage failed; no dataset was produced.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Provisioning failed; the loader never ran.
    #[error(transparent)]
    Provision(#[from] ProvisionError),

    /// Loading failed; the transaction was rolled back.
    #[error(transparent)]
    Load(#[from] LoadError),
}

/// Summary of a completed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunReport {
    /// Number of (code, rate) pairs fetched from the API.
    pub rates_fetched: usize,
    /// Number of rows inserted into the target table.
    pub rows_loaded: u64,
}

/// Run the full pipeline once.
///
/// Stages run strictly in order and each failure aborts the run: a fetch
/// or transform problem means the database is never touched, and a
/// provisioning failure means the loader never runs.
pub async fn run(config: &Config) -> Result<RunReport, PipelineError> {
    config.validate()?;

    let mapping = config
        .currency_names
        .clone()
        .map_or_else(CurrencyMapping::builtin, CurrencyMapping::from_names);

    let client = RateApiClient::new(&config.api)?;
    tracing::info!(url = %redacted_url(client.url()), "Fetching rates");
    let payload = client.fetch().await?;
    let rates_fetched = payload.rates.len();
    tracing::info!(rates = rates_fetched, "Rates fetched");

    let dataset = transform(&payload, &mapping);

    db::provision(&config.database).await?;
    let rows_loaded = db::load(&config.database, &dataset).await?;

    Ok(RunReport {
        rates_fetched,
        rows_loaded,
    })
}

/// Strip the access key from a request URL for info-level logs.
fn redacted_url(url: &str) -> String {
    url.split_once("access_key=")
        .map_or_else(|| url.to_string(), |(prefix, _)| format!("{prefix}access_key=***"))
}
