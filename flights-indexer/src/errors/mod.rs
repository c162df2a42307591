//! Error types for the flights indexer application.
//! Consolidates configuration, store-connection and pipeline errors into
//! the binary's top-level result.
use thiserror::Error;

/// A malformed or missing environment variable, surfaced before
/// anything runs.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("invalid value {value:?} for {name}")]
    Invalid { name: &'static str, value: String },
}

/// Represents errors that can occur while running the indexer.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("graph store error: {0}")]
    Store(#[from] flights_indexer_repository::GraphStoreError),

    #[error("pipeline error: {0}")]
    Pipeline(#[from] flights_indexer_pipeline::errors::PipelineError),
}
