//! Database stages: schema provisioning and loading.
//!
//! Each stage opens its own connection and releases it before the next
//! stage runs; connections are never pooled or shared across stages.

pub mod load;
pub mod provision;

pub use load::{LoadError, load};
pub use provision::{ProvisionError, provision};

use sqlx::postgres::PgConnectOptions;

use crate::config::DatabaseConfig;

/// Connection options for a specific database on the configured server.
pub(crate) fn connect_options(config: &DatabaseConfig, database: &str) -> PgConnectOptions {
    PgConnectOptions::new()
        .host(&config.host)
        .port(config.port)
        .username(&config.user)
        .password(&config.password)
        .database(database)
}

/// Quote an identifier for use in DDL, where bind parameters are not
/// available. Doubles embedded quotes per SQL rules.
pub(crate) fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quote_ident_wraps_plain_names() {
        assert_eq!(quote_ident("exchange_rates"), "\"exchange_rates\"");
    }

    #[test]
    fn quote_ident_escapes_embedded_quotes() {
        assert_eq!(quote_ident("we\"ird"), "\"we\"\"ird\"");
    }
}
