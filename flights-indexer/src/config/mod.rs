//! Configuration for the flights indexer binary.
//! Loads the run parameters from environment variables and exposes the
//! dependency wiring for the pipeline collaborators.
mod dependencies;

pub use dependencies::Dependencies;

use chrono::NaiveDate;

use flights_indexer_pipeline::orchestrator::PipelineConfig;

use crate::errors::ConfigError;

/// Default number of workers per fan-out stage.
const DEFAULT_WORKER_COUNT: usize = 4;

/// Runtime configuration loaded from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub neo4j_uri: String,
    pub neo4j_user: String,
    pub neo4j_password: String,
    pub worker_count: usize,
    pub clear_store: bool,
    pub target_currency: String,
    pub source_currencies: Vec<String>,
    pub date_from: NaiveDate,
    pub date_to: NaiveDate,
}

impl Config {
    /// Load the configuration from environment variables.
    ///
    /// `NEO4J_URI`, `TARGET_CURRENCY`, `SOURCE_CURRENCIES`, `DATE_FROM`
    /// and `DATE_TO` are required; `NEO4J_USER` and `NEO4J_PASSWORD`
    /// default to empty, `WORKER_COUNT` to 4 and `CLEAR_STORE` to false.
    pub fn from_env() -> Result<Self, ConfigError> {
        let neo4j_uri = require("NEO4J_URI")?;
        let neo4j_user = std::env::var("NEO4J_USER").unwrap_or_default();
        let neo4j_password = std::env::var("NEO4J_PASSWORD").unwrap_or_default();

        let worker_count = match std::env::var("WORKER_COUNT") {
            Ok(value) => value
                .parse::<usize>()
                .ok()
                .filter(|count| *count > 0)
                .ok_or(ConfigError::Invalid {
                    name: "WORKER_COUNT",
                    value,
                })?,
            Err(_) => DEFAULT_WORKER_COUNT,
        };

        let clear_store = match std::env::var("CLEAR_STORE") {
            Ok(value) => value.parse::<bool>().map_err(|_| ConfigError::Invalid {
                name: "CLEAR_STORE",
                value,
            })?,
            Err(_) => false,
        };

        let target_currency = require("TARGET_CURRENCY")?;

        let raw_sources = require("SOURCE_CURRENCIES")?;
        let source_currencies: Vec<String> = raw_sources
            .split(',')
            .map(str::trim)
            .filter(|currency| !currency.is_empty())
            .map(String::from)
            .collect();
        if source_currencies.is_empty() {
            return Err(ConfigError::Invalid {
                name: "SOURCE_CURRENCIES",
                value: raw_sources,
            });
        }

        let date_from = require_date("DATE_FROM")?;
        let date_to = require_date("DATE_TO")?;

        Ok(Config {
            neo4j_uri,
            neo4j_user,
            neo4j_password,
            worker_count,
            clear_store,
            target_currency,
            source_currencies,
            date_from,
            date_to,
        })
    }

    /// The pipeline-facing slice of this configuration.
    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            worker_count: self.worker_count,
            clear_store: self.clear_store,
            target_currency: self.target_currency.clone(),
            source_currencies: self.source_currencies.clone(),
            date_from: self.date_from,
            date_to: self.date_to,
        }
    }
}

fn require(name: &'static str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::Missing(name))
}

fn require_date(name: &'static str) -> Result<NaiveDate, ConfigError> {
    let value = require(name)?;
    NaiveDate::parse_from_str(&value, "%Y-%m-%d")
        .map_err(|_| ConfigError::Invalid { name, value })
}
