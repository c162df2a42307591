//! Error types for the exchange-rate stage.
use thiserror::Error;

use airline_api::ApiError;

/// Represents errors that can occur while building the exchange-rate
/// table. The stage is sequential, so the first one aborts it and no
/// partial table reaches the price stage.
#[derive(Debug, Error)]
pub enum RatesError {
    #[error("airline api error: {0}")]
    Api(#[from] ApiError),

    #[error("can't parse rate {value:?} for pair {pair}: {source}")]
    ParseRate {
        pair: String,
        value: String,
        source: std::num::ParseFloatError,
    },
}
