//! Error types for the graph store.
//! Defines specific errors that can occur during graph database operations.
use thiserror::Error;

/// Represents errors that can occur within the graph store.
///
/// This enum consolidates various error conditions specific to graph
/// database interactions, such as driver errors during queries and rows
/// missing expected data.
#[derive(Debug, Error)]
pub enum GraphStoreError {
    #[error("graph database error: {0}")]
    Database(#[from] neo4rs::Error),

    #[error("row deserialization error: {0}")]
    Deserialization(#[from] neo4rs::DeError),

    #[error("no row returned when creating airport node {0}")]
    MissingCreatedNode(String),

    #[error("missing store identifier for airport {0}")]
    MissingStoreId(String),

    #[error("storage unavailable: {0}")]
    Unavailable(String),
}
