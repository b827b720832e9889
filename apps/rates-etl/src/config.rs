//! Configuration for a pipeline run.
//!
//! One explicit [`Config`] object is built at the entry point, injected
//! into the pipeline, and never mutated afterwards. There is no
//! process-wide singleton.
//!
//! # Usage
//!
//! ```rust,ignore
//! use rates_etl::config::Config;
//!
//! // All defaults
//! let config = Config::default();
//!
//! // From a YAML file, then credential overrides from the environment
//! let mut config = Config::from_yaml_file("etl.yaml")?;
//! config.apply_env_overrides();
//! config.validate()?;
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        /// Path to the config file.
        path: String,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// Failed to parse YAML configuration.
    #[error("Failed to parse config YAML: {0}")]
    ParseError(#[from] serde_yaml_bw::Error),

    /// Configuration validation failed.
    #[error("Config validation failed: {0}")]
    ValidationError(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Rates API configuration.
    #[serde(default)]
    pub api: RateApiConfig,
    /// Database configuration.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Optional currency code → display name overrides. When absent the
    /// built-in table is used.
    #[serde(default)]
    pub currency_names: Option<BTreeMap<String, String>>,
}

/// Rates API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateApiConfig {
    /// API host and base path, without scheme.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Endpoint path under the base URL.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Static API access key, passed as a query parameter.
    #[serde(default)]
    pub access_key: String,
    /// Use https when true, plain http otherwise.
    #[serde(default = "default_secure")]
    pub secure: bool,
    /// HTTP request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for RateApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            endpoint: default_endpoint(),
            access_key: String::new(),
            secure: default_secure(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_base_url() -> String {
    "api.exchangeratesapi.io/v1".to_string()
}
fn default_endpoint() -> String {
    "latest".to_string()
}
const fn default_secure() -> bool {
    true
}
const fn default_timeout_secs() -> u64 {
    30
}

/// Database configuration.
///
/// `admin_database` is the maintenance database the provisioner connects
/// to in order to drop and recreate `target_database`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database host.
    #[serde(default = "default_db_host")]
    pub host: String,
    /// Database port.
    #[serde(default = "default_db_port")]
    pub port: u16,
    /// Database user.
    #[serde(default = "default_db_user")]
    pub user: String,
    /// Database password.
    #[serde(default)]
    pub password: String,
    /// Administrative database used for DROP/CREATE DATABASE.
    #[serde(default = "default_admin_database")]
    pub admin_database: String,
    /// Target database, dropped and recreated each run.
    #[serde(default = "default_target_database")]
    pub target_database: String,
    /// Target table, dropped and recreated each run.
    #[serde(default = "default_table")]
    pub table: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: default_db_host(),
            port: default_db_port(),
            user: default_db_user(),
            password: String::new(),
            admin_database: default_admin_database(),
            target_database: default_target_database(),
            table: default_table(),
        }
    }
}

fn default_db_host() -> String {
    "localhost".to_string()
}
const fn default_db_port() -> u16 {
    5432
}
fn default_db_user() -> String {
    "postgres".to_string()
}
fn default_admin_database() -> String {
    "postgres".to_string()
}
fn default_target_database() -> String {
    "rates".to_string()
}
fn default_table() -> String {
    "exchange_rates".to_string()
}

impl Config {
    /// Load configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml(&contents)
    }

    /// Parse configuration from a YAML string.
    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml_bw::from_str(contents)?)
    }

    /// Override credentials and connection details from the environment.
    ///
    /// Recognized variables: `RATES_API_ACCESS_KEY`, `RATES_DB_HOST`,
    /// `RATES_DB_PORT`, `RATES_DB_USER`, `RATES_DB_PASSWORD`.
    /// Environment values win over file values, which win over defaults.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    /// Apply overrides from an arbitrary variable lookup.
    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(key) = var("RATES_API_ACCESS_KEY") {
            self.api.access_key = key;
        }
        if let Some(host) = var("RATES_DB_HOST") {
            self.database.host = host;
        }
        if let Some(port) = var("RATES_DB_PORT") {
            match port.parse() {
                Ok(port) => self.database.port = port,
                Err(_) => {
                    tracing::warn!(value = %port, "Ignoring unparseable RATES_DB_PORT override");
                }
            }
        }
        if let Some(user) = var("RATES_DB_USER") {
            self.database.user = user;
        }
        if let Some(password) = var("RATES_DB_PASSWORD") {
            self.database.password = password;
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api.base_url.is_empty() {
            return Err(ConfigError::ValidationError(
                "api.base_url must not be empty".to_string(),
            ));
        }
        if self.database.port == 0 {
            return Err(ConfigError::ValidationError(
                "database.port must be non-zero".to_string(),
            ));
        }
        if self.database.target_database.is_empty() || self.database.table.is_empty() {
            return Err(ConfigError::ValidationError(
                "database.target_database and database.table must not be empty".to_string(),
            ));
        }
        if self.database.target_database == self.database.admin_database {
            return Err(ConfigError::ValidationError(
                "database.target_database must differ from database.admin_database".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn defaults_match_documented_surface() {
        let config = Config::default();
        assert_eq!(config.api.base_url, "api.exchangeratesapi.io/v1");
        assert_eq!(config.api.endpoint, "latest");
        assert!(config.api.secure);
        assert_eq!(config.database.host, "localhost");
        assert_eq!(config.database.port, 5432);
        assert_eq!(config.database.admin_database, "postgres");
        assert_eq!(config.database.target_database, "rates");
        assert_eq!(config.database.table, "exchange_rates");
        assert!(config.currency_names.is_none());
    }

    #[test]
    fn yaml_overrides_partial_fields() {
        let yaml = r"
api:
  access_key: abc123
  secure: false
database:
  host: db.internal
  target_database: rates_staging
";
        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(config.api.access_key, "abc123");
        assert!(!config.api.secure);
        // Untouched fields keep their defaults
        assert_eq!(config.api.endpoint, "latest");
        assert_eq!(config.database.host, "db.internal");
        assert_eq!(config.database.port, 5432);
        assert_eq!(config.database.target_database, "rates_staging");
    }

    #[test]
    fn yaml_currency_name_overrides() {
        let yaml = r"
currency_names:
  USD: United States Dollar
  EUR: Euro
";
        let config = Config::from_yaml(yaml).unwrap();
        let names = config.currency_names.unwrap();
        assert_eq!(names.get("USD").map(String::as_str), Some("United States Dollar"));
        assert_eq!(names.len(), 2);
    }

    #[test]
    fn validate_rejects_zero_port() {
        let mut config = Config::default();
        config.database.port = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn validate_rejects_admin_equal_to_target() {
        let mut config = Config::default();
        config.database.target_database = "postgres".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_accepts_defaults() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn invalid_yaml_is_a_parse_error() {
        let result = Config::from_yaml("api: [not, a, mapping");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn from_yaml_file_reads_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "api:\n  access_key: from-file\ndatabase:\n  host: file-host"
        )
        .unwrap();

        let config = Config::from_yaml_file(file.path()).unwrap();
        assert_eq!(config.api.access_key, "from-file");
        assert_eq!(config.database.host, "file-host");
        // Fields the file does not mention keep their defaults
        assert_eq!(config.database.port, 5432);
    }

    #[test]
    fn missing_config_file_is_a_read_error() {
        let err = Config::from_yaml_file("/nonexistent/rates-etl.yaml").unwrap_err();
        match err {
            ConfigError::ReadError { path, .. } => {
                assert_eq!(path, "/nonexistent/rates-etl.yaml");
            }
            other => panic!("expected ReadError, got {other:?}"),
        }
    }

    #[test]
    fn env_overrides_win_over_file_values() {
        let mut config = Config::from_yaml(
            "api:\n  access_key: file-key\ndatabase:\n  host: file-host\n  port: 5433",
        )
        .unwrap();

        config.apply_overrides(|name| match name {
            "RATES_API_ACCESS_KEY" => Some("env-key".to_string()),
            "RATES_DB_HOST" => Some("env-host".to_string()),
            "RATES_DB_PASSWORD" => Some("env-pass".to_string()),
            _ => None,
        });

        assert_eq!(config.api.access_key, "env-key");
        assert_eq!(config.database.host, "env-host");
        assert_eq!(config.database.password, "env-pass");
        // No env override for the port: the file value stays
        assert_eq!(config.database.port, 5433);
    }

    #[test]
    fn unparseable_port_override_keeps_prior_value() {
        let mut config = Config::default();
        config.apply_overrides(|name| {
            (name == "RATES_DB_PORT").then(|| "not-a-port".to_string())
        });
        assert_eq!(config.database.port, 5432);
    }

    #[test]
    fn parseable_port_override_applies() {
        let mut config = Config::default();
        config.apply_overrides(|name| (name == "RATES_DB_PORT").then(|| "6543".to_string()));
        assert_eq!(config.database.port, 6543);
    }
}
