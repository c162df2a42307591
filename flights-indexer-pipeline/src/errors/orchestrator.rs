//! Error type for the pipeline orchestrator.
//! Consolidates the per-stage errors into the overall run result.
use thiserror::Error;

use flights_indexer_repository::GraphStoreError;

use crate::errors::{AirportsError, PricesError, RatesError, RoutesError};

/// Represents a failed pipeline run. Each variant carries the stage that
/// aborted the run; no stage is retried or resumed.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("can't clear store: {0}")]
    ClearStore(GraphStoreError),

    #[error("can't fetch airports: {0}")]
    Airports(#[from] AirportsError),

    #[error("can't fetch routes: {0}")]
    Routes(#[from] RoutesError),

    #[error("can't fetch exchange rates: {0}")]
    Rates(#[from] RatesError),

    #[error("can't fetch prices: {0}")]
    Prices(#[from] PricesError),
}
