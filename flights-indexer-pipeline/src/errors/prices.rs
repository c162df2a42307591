//! Error types for the price fan-out stage.
use thiserror::Error;

use airline_api::ApiError;
use flights_indexer_repository::GraphStoreError;

/// Represents errors recorded by price-stage workers. Same discipline as
/// the route stage: the worker that hits one stops, siblings continue,
/// and the first recorded error becomes the stage result.
#[derive(Debug, Error)]
pub enum PricesError {
    #[error("airline api error: {0}")]
    Api(#[from] ApiError),

    #[error("graph store error: {0}")]
    Storage(#[from] GraphStoreError),
}

/// A flight's origin currency has no entry in the rate table.
///
/// The only non-fatal error in the pipeline: it is logged and counted,
/// the affected flight keeps its raw price only, and persistence of the
/// remaining flights in the page continues.
#[derive(Debug, Error)]
#[error("no exchange rate for currency {currency}")]
pub struct RateLookupError {
    pub currency: String,
}
