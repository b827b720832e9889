//! Load stage: transactional batch insert of the dataset.
//!
//! One connection, one transaction, one parameterized INSERT per record.
//! The commit happens once after the full sequence succeeds; any
//! statement failure rolls the whole batch back explicitly before the
//! error propagates. Row-by-row insertion is fine at this volume (dozens
//! of currencies).

use sqlx::{Connection, PgConnection};
use thiserror::Error;

use super::{connect_options, quote_ident};
use crate::config::DatabaseConfig;
use crate::transform::Dataset;

/// Errors from the load stage. All fatal.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Could not connect to the target database.
    #[error("Database connection failed ({database}): {source}")]
    Connect {
        /// Database the connection was aimed at.
        database: String,
        /// Underlying driver error.
        source: sqlx::Error,
    },

    /// An insert failed; the transaction was rolled back.
    #[error("Insert failed for '{currency_code}': {source}")]
    Insert {
        /// Currency code of the record that failed.
        currency_code: String,
        /// Underlying driver error.
        source: sqlx::Error,
    },

    /// Transaction control (begin/commit) failed.
    #[error("Transaction error: {0}")]
    Transaction(#[from] sqlx::Error),
}

/// Insert every record of the dataset into the freshly provisioned table.
///
/// Returns the number of rows inserted. The table was just created empty
/// by the provisioner, so there is no conflict handling.
pub async fn load(config: &DatabaseConfig, dataset: &Dataset) -> Result<u64, LoadError> {
    let mut conn = PgConnection::connect_with(&connect_options(config, &config.target_database))
        .await
        .map_err(|source| LoadError::Connect {
            database: config.target_database.clone(),
            source,
        })?;

    let insert = insert_statement(&config.table);
    let mut tx = conn.begin().await?;

    let mut inserted: u64 = 0;
    for record in dataset {
        let result = sqlx::query(&insert)
            .bind(record.country_currency.as_deref())
            .bind(&record.currency_code)
            .bind(record.rate)
            .execute(&mut *tx)
            .await;

        match result {
            Ok(done) => inserted += done.rows_affected(),
            Err(source) => {
                let code = record.currency_code.clone();
                if let Err(rollback_err) = tx.rollback().await {
                    tracing::error!(error = %rollback_err, "Rollback failed after insert error");
                }
                return Err(LoadError::Insert {
                    currency_code: code,
                    source,
                });
            }
        }
    }

    tx.commit().await?;
    tracing::info!(rows = inserted, table = %config.table, "Dataset loaded");

    conn.close().await.map_err(LoadError::Transaction)?;
    Ok(inserted)
}

/// The parameterized INSERT used for every record.
fn insert_statement(table: &str) -> String {
    format!(
        "INSERT INTO {} (country_currency, currency_code, rate) VALUES ($1, $2, $3)",
        quote_ident(table)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_statement_targets_quoted_table() {
        assert_eq!(
            insert_statement("exchange_rates"),
            "INSERT INTO \"exchange_rates\" (country_currency, currency_code, rate) \
             VALUES ($1, $2, $3)"
        );
    }
}
