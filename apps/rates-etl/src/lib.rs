// Allow unwrap/expect in tests - tests should panic on unexpected errors
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::too_many_lines,
        clippy::needless_pass_by_value
    )
)]

//! Rates ETL - Library
//!
//! A linear extract-transform-load pipeline for currency exchange rates.
//!
//! # Stages
//!
//! The pipeline runs four stages in strict order, each blocking on the
//! previous one:
//!
//! 1. **Fetch** (`fetch`): one GET request against the rates API, parsed
//!    into a [`RawPayload`].
//! 2. **Transform** (`transform`): pure reshaping into [`RateRecord`] rows,
//!    joining currency codes to display names via a [`CurrencyMapping`].
//! 3. **Provision** (`db::provision`): drop and recreate the target
//!    database and table. Destructive by design; every run starts from an
//!    empty table.
//! 4. **Load** (`db::load`): one transactional batch insert.
//!
//! Concurrent overlapping runs are unsafe (the provisioner drops the
//! database other runs may be using); at most one active run is assumed,
//! enforced by whatever schedules the binary.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

/// Configuration surface for a pipeline run.
pub mod config;

/// Database provisioning and loading.
pub mod db;

/// HTTP fetch stage.
pub mod fetch;

/// Currency code to display-name lookup.
pub mod mapping;

/// Pipeline driver composing the stages.
pub mod pipeline;

/// Pure transform stage.
pub mod transform;

pub use config::{Config, ConfigError, DatabaseConfig, RateApiConfig};
pub use db::{LoadError, ProvisionError};
pub use fetch::{FetchError, RateApiClient, RawPayload};
pub use mapping::CurrencyMapping;
pub use pipeline::{PipelineError, RunReport, run};
pub use transform::{Dataset, RateRecord, transform};
