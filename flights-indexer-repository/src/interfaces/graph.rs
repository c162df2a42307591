//! This module defines the `GraphStore` trait, which provides an interface
//! for persisting airports, routes and flights into the underlying graph
//! database. It abstracts the storage operations consumed by the pipeline.
use flights_indexer_shared::types::{Airport, FlightsPage, Route};

use crate::errors::GraphStoreError;

/// A trait that defines the interface for the flights graph store.
///
/// Implementors provide methods for creating airport nodes, route edges
/// and priced flight edges, and for clearing the store between runs.
#[async_trait::async_trait]
pub trait GraphStore: Send + Sync {
    /// Creates an airport node and returns its store-assigned identifier.
    ///
    /// # Arguments
    ///
    /// * `airport` - The airport to persist.
    ///
    /// # Returns
    ///
    /// The node id on success, or a `GraphStoreError` if the insertion
    /// fails.
    async fn insert_airport(&self, airport: &Airport) -> Result<i64, GraphStoreError>;

    /// Creates a directed route edge from the origin node to each
    /// route's resolved destination node.
    ///
    /// Routes without a resolved destination carry no destination node
    /// id and produce no edge; the caller reports them.
    ///
    /// # Arguments
    ///
    /// * `origin_store_id` - Node id of the origin airport.
    /// * `routes` - The routes discovered for that origin.
    async fn insert_routes(
        &self,
        origin_store_id: i64,
        routes: &[Route],
    ) -> Result<(), GraphStoreError>;

    /// Creates one priced flight edge per flight in the page, carrying
    /// the original price, the exchanged price when computed, the
    /// currency code and both flight dates.
    ///
    /// # Arguments
    ///
    /// * `origin_store_id` - Node id of the origin airport.
    /// * `flights` - The flight page fetched for one (route, day) pair.
    async fn insert_flights(
        &self,
        origin_store_id: i64,
        flights: &FlightsPage,
    ) -> Result<(), GraphStoreError>;

    /// Deletes all nodes and edges from the store.
    async fn clear(&self) -> Result<(), GraphStoreError>;
}
