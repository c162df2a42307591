//! # Flights Indexer Repository
//! This crate provides the abstract graph-store contract consumed by the
//! ingestion pipeline, together with its Neo4j implementation. It includes
//! definitions for errors, interfaces, and the concrete Cypher-backed store.
pub mod errors;
pub mod interfaces;
mod mock;
pub mod neo4j;

pub use errors::GraphStoreError;
pub use interfaces::GraphStore;
pub use mock::MockGraphStore;
pub use neo4j::Neo4jGraphStore;
