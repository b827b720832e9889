//! Transform stage: reshape a [`RawPayload`] into rows.
//!
//! Pure and deterministic: no I/O, no side effects, identical inputs
//! always yield an identical [`Dataset`].

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::fetch::RawPayload;
use crate::mapping::CurrencyMapping;

/// One row of the final dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateRecord {
    /// Display name for the currency, when the mapping knows the code.
    pub country_currency: Option<String>,
    /// Three-letter ISO-style currency code.
    pub currency_code: String,
    /// Exchange rate against the API's base currency. Not validated:
    /// negative or zero rates pass through unchanged.
    pub rate: Decimal,
}

/// The ordered collection of records produced by one run.
pub type Dataset = Vec<RateRecord>;

/// Produce one [`RateRecord`] per entry in the payload's `rates` map.
///
/// Records correspond 1:1 with the keys of `rates`; there is no
/// deduplication or merging. A code the mapping does not know yields a
/// record with no display name, not an error. Output order is the map's
/// order (sorted by code).
#[must_use]
pub fn transform(payload: &RawPayload, mapping: &CurrencyMapping) -> Dataset {
    payload
        .rates
        .iter()
        .map(|(code, rate)| RateRecord {
            country_currency: mapping.get(code).map(ToString::to_string),
            currency_code: code.clone(),
            rate: *rate,
        })
        .collect()
}
