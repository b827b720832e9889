//! Fetch stage: one GET request against the rates API.
//!
//! A run issues exactly one request; there is no retry. Any transport
//! failure or non-success status aborts the run before the transformer
//! sees anything.

use std::collections::BTreeMap;
use std::str::FromStr;
use std::time::Duration;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use thiserror::Error;

use crate::config::RateApiConfig;

/// Errors from the fetch stage.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network-level failure (DNS, connect, timeout, body read).
    #[error("Transport error: {0}")]
    Transport(String),

    /// The API answered with a non-success status.
    #[error("Remote fetch failed with status {status}: {body}")]
    RemoteFetch {
        /// HTTP status code.
        status: u16,
        /// Response body as returned by the API.
        body: String,
    },

    /// The response body was not the expected JSON shape.
    #[error("Payload parse error: {0}")]
    Payload(String),

    /// The client was configured without an access key.
    #[error("Access key is empty")]
    MissingAccessKey,
}

/// The unparsed-shape API response: a JSON object with at least a `rates`
/// field mapping currency codes to numeric rates. Other fields are
/// ignored; an absent `rates` field is treated as empty.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct RawPayload {
    /// Currency code → exchange rate against the API's base currency.
    #[serde(default, deserialize_with = "deserialize_rates")]
    pub rates: BTreeMap<String, Decimal>,
}

/// Deserialize rates through `serde_json::Number` so the decimal literal
/// survives exactly (no float truncation on values like `0.92`).
fn deserialize_rates<'de, D>(deserializer: D) -> Result<BTreeMap<String, Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: BTreeMap<String, serde_json::Number> = BTreeMap::deserialize(deserializer)?;
    raw.into_iter()
        .map(|(code, number)| {
            Decimal::from_str(&number.to_string())
                .map(|rate| (code, rate))
                .map_err(serde::de::Error::custom)
        })
        .collect()
}

/// HTTP client for the rates API.
#[derive(Debug, Clone)]
pub struct RateApiClient {
    client: reqwest::Client,
    url: String,
}

impl RateApiClient {
    /// Create a client from config.
    ///
    /// Fails if the access key is empty or the underlying HTTP client
    /// cannot be built.
    pub fn new(config: &RateApiConfig) -> Result<Self, FetchError> {
        if config.access_key.is_empty() {
            return Err(FetchError::MissingAccessKey);
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            url: request_url(config),
        })
    }

    /// The fully-qualified request URL (including the access key).
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Issue the single GET request and parse the response.
    pub async fn fetch(&self) -> Result<RawPayload, FetchError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(FetchError::RemoteFetch {
                status: status.as_u16(),
                body,
            });
        }

        tracing::debug!(body = %body, "Raw rates API response");

        serde_json::from_str(&body).map_err(|e| FetchError::Payload(e.to_string()))
    }
}

/// Build `{scheme}://{base_url}/{endpoint}?access_key={access_key}`.
fn request_url(config: &RateApiConfig) -> String {
    let scheme = if config.secure { "https" } else { "http" };
    format!(
        "{scheme}://{base_url}/{endpoint}?access_key={access_key}",
        base_url = config.base_url,
        endpoint = config.endpoint,
        access_key = config.access_key,
    )
}
