//! Error types for the airport fetch stage.
use thiserror::Error;

use airline_api::ApiError;
use flights_indexer_repository::GraphStoreError;

/// Represents errors that can occur while fetching and persisting the
/// airport listing. Any of them aborts the stage with no partial index.
#[derive(Debug, Error)]
pub enum AirportsError {
    #[error("airline api error: {0}")]
    Api(#[from] ApiError),

    #[error("graph store error: {0}")]
    Storage(#[from] GraphStoreError),
}
