//! Mock graph store for testing.
//!
//! The `MockGraphStore` records every insert in memory and hands out
//! sequential node ids, allowing pipeline tests to run without a
//! database. Individual operations can be told to fail to exercise
//! stage failure paths, and an ordered operation log captures the
//! sequence of store calls across a run.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::RwLock;

use flights_indexer_shared::types::{Airport, FlightsPage, Route};

use crate::errors::GraphStoreError;
use crate::interfaces::GraphStore;

/// In-memory graph store that records all writes.
#[derive(Default)]
pub struct MockGraphStore {
    next_id: AtomicI64,
    airports: RwLock<HashMap<i64, Airport>>,
    routes: RwLock<HashMap<i64, Vec<Route>>>,
    flights: RwLock<Vec<(i64, FlightsPage)>>,
    operations: RwLock<Vec<String>>,
    insert_airport_failing: AtomicBool,
    insert_routes_failing: AtomicBool,
    insert_flights_failing: AtomicBool,
    clear_failing: AtomicBool,
}

impl MockGraphStore {
    /// Create a new empty mock store.
    pub fn new() -> Self {
        Self::default()
    }

    /// All airports inserted so far, keyed by their assigned node id.
    pub fn airports(&self) -> HashMap<i64, Airport> {
        self.airports.read().unwrap().clone()
    }

    /// Routes inserted per origin node id.
    pub fn routes(&self) -> HashMap<i64, Vec<Route>> {
        self.routes.read().unwrap().clone()
    }

    /// Every flight page inserted, with its origin node id, in insert
    /// order.
    pub fn flights(&self) -> Vec<(i64, FlightsPage)> {
        self.flights.read().unwrap().clone()
    }

    /// Ordered log of store operations, e.g. `clear`,
    /// `insert_airport KRK`.
    pub fn operations(&self) -> Vec<String> {
        self.operations.read().unwrap().clone()
    }

    /// Make `insert_airport` fail.
    pub fn fail_insert_airport(&self) {
        self.insert_airport_failing.store(true, Ordering::SeqCst);
    }

    /// Make `insert_routes` fail.
    pub fn fail_insert_routes(&self) {
        self.insert_routes_failing.store(true, Ordering::SeqCst);
    }

    /// Make `insert_flights` fail.
    pub fn fail_insert_flights(&self) {
        self.insert_flights_failing.store(true, Ordering::SeqCst);
    }

    /// Make `clear` fail.
    pub fn fail_clear(&self) {
        self.clear_failing.store(true, Ordering::SeqCst);
    }

    fn record(&self, operation: String) {
        self.operations.write().unwrap().push(operation);
    }
}

#[async_trait::async_trait]
impl GraphStore for MockGraphStore {
    async fn insert_airport(&self, airport: &Airport) -> Result<i64, GraphStoreError> {
        self.record(format!("insert_airport {}", airport.iata));
        if self.insert_airport_failing.load(Ordering::SeqCst) {
            return Err(GraphStoreError::Unavailable("insert_airport".to_string()));
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        self.airports.write().unwrap().insert(id, airport.clone());
        Ok(id)
    }

    async fn insert_routes(
        &self,
        origin_store_id: i64,
        routes: &[Route],
    ) -> Result<(), GraphStoreError> {
        self.record(format!("insert_routes {}", origin_store_id));
        if self.insert_routes_failing.load(Ordering::SeqCst) {
            return Err(GraphStoreError::Unavailable("insert_routes".to_string()));
        }

        // As in the real store, unresolved destinations produce no edge.
        let edges = routes
            .iter()
            .filter(|route| route.destination_store_id().is_some())
            .cloned();
        self.routes
            .write()
            .unwrap()
            .entry(origin_store_id)
            .or_default()
            .extend(edges);
        Ok(())
    }

    async fn insert_flights(
        &self,
        origin_store_id: i64,
        flights: &FlightsPage,
    ) -> Result<(), GraphStoreError> {
        self.record(format!("insert_flights {}", origin_store_id));
        if self.insert_flights_failing.load(Ordering::SeqCst) {
            return Err(GraphStoreError::Unavailable("insert_flights".to_string()));
        }

        self.flights
            .write()
            .unwrap()
            .push((origin_store_id, flights.clone()));
        Ok(())
    }

    async fn clear(&self) -> Result<(), GraphStoreError> {
        self.record("clear".to_string());
        if self.clear_failing.load(Ordering::SeqCst) {
            return Err(GraphStoreError::Unavailable("clear".to_string()));
        }

        self.airports.write().unwrap().clear();
        self.routes.write().unwrap().clear();
        self.flights.write().unwrap().clear();
        Ok(())
    }
}
