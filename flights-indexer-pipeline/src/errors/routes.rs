//! Error types for the route fan-out stage.
use thiserror::Error;

use airline_api::ApiError;
use flights_indexer_repository::GraphStoreError;

/// Represents errors recorded by route-stage workers. One of these stops
/// the worker that hit it; the first one recorded becomes the stage
/// result once every worker has finished.
#[derive(Debug, Error)]
pub enum RoutesError {
    #[error("airline api error: {0}")]
    Api(#[from] ApiError),

    #[error("graph store error: {0}")]
    Storage(#[from] GraphStoreError),
}
