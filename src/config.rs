use crate::error::{LedgerError, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    pub dataset: DatasetConfig,
    pub query: QueryConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    /// Path to the dataset file: a JSON array, NDJSON, or (with the `db`
    /// feature) a SQLite database.
    pub path: String,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    /// Maximum rows returned by a single search.
    pub result_cap: usize,
    /// Whether searches apply the quality gate unless told otherwise.
    pub high_quality_default: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dataset: DatasetConfig::default(),
            query: QueryConfig::default(),
        }
    }
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            path: "directory.json".to_string(),
        }
    }
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            result_cap: crate::query::DEFAULT_RESULT_CAP,
            high_quality_default: true,
        }
    }
}

impl Config {
    /// Load `config.toml` from the working directory, falling back to
    /// defaults when the file is absent.
    pub fn load() -> Result<Self> {
        let config_path = "config.toml";
        if !Path::new(config_path).exists() {
            return Ok(Config::default());
        }
        let config_content = fs::read_to_string(config_path).map_err(|e| {
            LedgerError::Config(format!("Failed to read config file '{}': {}", config_path, e))
        })?;

        let config: Config = toml::from_str(&config_content)?;
        Ok(config)
    }
}
