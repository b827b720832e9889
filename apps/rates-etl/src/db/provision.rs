//! Schema provisioning: drop and recreate the target database and table.
//!
//! Destructive by design: every run discards all prior data. Not safe
//! against concurrent runs; the pipeline assumes at most one active run,
//! enforced by whatever schedules it.

use sqlx::{Connection, PgConnection};
use thiserror::Error;

use super::{connect_options, quote_ident};
use crate::config::DatabaseConfig;

/// Postgres error code for "database already exists".
const DUPLICATE_DATABASE: &str = "42P04";

/// Errors from the provisioning stage.
///
/// All of these abort the run. Proceeding to the loader after a failed
/// provision would insert into a possibly missing table.
#[derive(Debug, Error)]
pub enum ProvisionError {
    /// Could not connect to the administrative or target database.
    #[error("Database connection failed ({database}): {source}")]
    Connect {
        /// Database the connection was aimed at.
        database: String,
        /// Underlying driver error.
        source: sqlx::Error,
    },

    /// A DDL statement failed.
    #[error("Provisioning statement failed: {0}")]
    Statement(#[from] sqlx::Error),
}

/// Ensure a fresh target database and a fresh, empty target table.
///
/// Step 1 connects to the administrative database and drops/recreates the
/// target database; each DDL statement auto-commits. A duplicate-database
/// race with another process is logged as a warning and ignored. Step 2
/// connects to the new target database and drops/recreates the table.
pub async fn provision(config: &DatabaseConfig) -> Result<(), ProvisionError> {
    recreate_database(config).await?;
    recreate_table(config).await
}

async fn recreate_database(config: &DatabaseConfig) -> Result<(), ProvisionError> {
    let mut conn = PgConnection::connect_with(&connect_options(config, &config.admin_database))
        .await
        .map_err(|source| ProvisionError::Connect {
            database: config.admin_database.clone(),
            source,
        })?;

    let target = quote_ident(&config.target_database);

    sqlx::query(&format!("DROP DATABASE IF EXISTS {target}"))
        .execute(&mut conn)
        .await?;

    match sqlx::query(&format!("CREATE DATABASE {target}"))
        .execute(&mut conn)
        .await
    {
        Ok(_) => {
            tracing::info!(database = %config.target_database, "Database created");
        }
        Err(e) if is_duplicate_database(&e) => {
            // Another process recreated it between our DROP and CREATE.
            tracing::warn!(database = %config.target_database, "Database already exists");
        }
        Err(e) => return Err(e.into()),
    }

    conn.close().await.map_err(ProvisionError::Statement)
}

async fn recreate_table(config: &DatabaseConfig) -> Result<(), ProvisionError> {
    let mut conn = PgConnection::connect_with(&connect_options(config, &config.target_database))
        .await
        .map_err(|source| ProvisionError::Connect {
            database: config.target_database.clone(),
            source,
        })?;

    let table = quote_ident(&config.table);

    sqlx::query(&format!("DROP TABLE IF EXISTS {table}"))
        .execute(&mut conn)
        .await?;

    // country_currency is nullable: unmapped codes load with a NULL name.
    sqlx::query(&format!(
        "CREATE TABLE {table} (
            country_currency VARCHAR(250),
            currency_code VARCHAR(10) NOT NULL,
            rate NUMERIC NOT NULL
        )"
    ))
    .execute(&mut conn)
    .await?;

    tracing::info!(table = %config.table, "Table created");

    conn.close().await.map_err(ProvisionError::Statement)
}

fn is_duplicate_database(error: &sqlx::Error) -> bool {
    matches!(
        error,
        sqlx::Error::Database(db) if db.code().as_deref() == Some(DUPLICATE_DATABASE)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_database_errors_are_not_duplicates() {
        assert!(!is_duplicate_database(&sqlx::Error::RowNotFound));
        assert!(!is_duplicate_database(&sqlx::Error::PoolClosed));
    }
}
