//! Route fan-out stage: a worker pool fetches the destination list for
//! every airport in the index, resolves each destination against the
//! shared index, persists the route edges and folds the results back
//! into the shared airport index and global route list.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tracing::{info, warn};

use airline_api::AirlineApi;
use flights_indexer_repository::{GraphStore, GraphStoreError};
use flights_indexer_shared::types::{Airport, Route};

use crate::errors::RoutesError;
use crate::pool::run_pool;

/// Airport index and global route list shared by all route workers.
/// One lock guards both, so the per-airport "update index entry and
/// append routes" write is a single critical section.
struct RouteTable {
    index: HashMap<String, Airport>,
    routes: Vec<Route>,
}

/// Fetch the destinations of every airport in the index with a pool of
/// `worker_count` workers.
///
/// A worker's error stops only that worker; the others keep consuming,
/// so route coverage can be partial when the stage fails. Side effects
/// already committed (store inserts, index updates) are not rolled
/// back; the first recorded error becomes the stage result once every
/// worker has finished.
pub async fn fetch_routes(
    api: Arc<dyn AirlineApi>,
    store: Arc<dyn GraphStore>,
    index: HashMap<String, Airport>,
    worker_count: usize,
) -> Result<(HashMap<String, Airport>, Vec<Route>), RoutesError> {
    let airports: Vec<Airport> = index.values().cloned().collect();
    let table = Arc::new(Mutex::new(RouteTable {
        index,
        routes: Vec::new(),
    }));

    let outcome = {
        let table = Arc::clone(&table);
        run_pool(airports, worker_count, move |airport| {
            let api = Arc::clone(&api);
            let store = Arc::clone(&store);
            let table = Arc::clone(&table);
            async move { fetch_airport_routes(api.as_ref(), store.as_ref(), &table, airport).await }
        })
        .await
    };

    if let Some(error) = outcome.first_error {
        warn!(errors = outcome.error_count, "route stage finished with errors");
        return Err(error);
    }

    let mut table = table.lock().unwrap();
    let index = std::mem::take(&mut table.index);
    let routes = std::mem::take(&mut table.routes);
    info!(total = routes.len(), "total fetched destinations");

    Ok((index, routes))
}

/// Process one airport: fetch its destinations, resolve them, persist
/// the route edges, then commit the airport's new index entry and the
/// routes to the shared table in one critical section.
async fn fetch_airport_routes(
    api: &dyn AirlineApi,
    store: &dyn GraphStore,
    table: &Mutex<RouteTable>,
    airport: Airport,
) -> Result<(String, usize), RoutesError> {
    let mut routes = api.destinations(&airport.iata).await?;

    {
        let guard = table.lock().unwrap();
        for route in &mut routes {
            // The origin is the airport being processed and always
            // resolves; the destination stays None on an index miss.
            route.origin = airport.clone();
            route.destination = guard.index.get(&route.iata_to).cloned();
        }
    }

    let unresolved = routes.iter().filter(|r| r.destination.is_none()).count();
    if unresolved > 0 {
        warn!(
            airport = %airport.iata,
            unresolved,
            "destination codes missing from the airport index"
        );
    }

    let origin_store_id = airport
        .store_id
        .ok_or_else(|| GraphStoreError::MissingStoreId(airport.iata.clone()))?;
    store.insert_routes(origin_store_id, &routes).await?;

    let count = routes.len();
    {
        let mut guard = table.lock().unwrap();
        let mut indexed = airport.clone();
        indexed.destinations = routes.clone();
        guard.index.insert(indexed.iata.clone(), indexed);
        guard.routes.extend(routes);
    }

    info!(
        airport = %airport.iata,
        name = %airport.name,
        destinations = count,
        "fetched destinations for airport"
    );

    Ok((airport.iata, count))
}

#[cfg(test)]
mod tests {
    use super::*;

    use airline_api::MockAirlineApi;
    use flights_indexer_repository::MockGraphStore;
    use flights_indexer_shared::types::Country;

    fn airport(iata: &str, store_id: i64) -> Airport {
        Airport {
            store_id: Some(store_id),
            iata: iata.to_string(),
            name: format!("{} airport", iata),
            country: Country {
                code: "pl".to_string(),
                name: "Poland".to_string(),
                currency: "PLN".to_string(),
            },
            ..Airport::default()
        }
    }

    fn wire_route(from: &str, to: &str) -> Route {
        Route {
            iata_from: from.to_string(),
            iata_to: to.to_string(),
            ..Route::default()
        }
    }

    fn index_of(airports: Vec<Airport>) -> HashMap<String, Airport> {
        airports
            .into_iter()
            .map(|a| (a.iata.clone(), a))
            .collect()
    }

    #[tokio::test]
    async fn resolves_destinations_and_updates_shared_state() {
        let api = Arc::new(MockAirlineApi::new());
        api.register_destinations("AAA", vec![wire_route("AAA", "BBB")]);
        let store = Arc::new(MockGraphStore::new());
        let index = index_of(vec![airport("AAA", 1), airport("BBB", 2)]);

        let (index, routes) = fetch_routes(api, store.clone(), index, 2).await.unwrap();

        assert_eq!(routes.len(), 1);
        let route = &routes[0];
        assert_eq!(route.origin.iata, "AAA");
        assert_eq!(route.destination.as_ref().unwrap().iata, "BBB");
        assert_eq!(route.destination_store_id(), Some(2));

        // The origin's index entry now carries its destination list.
        assert_eq!(index["AAA"].destinations.len(), 1);
        assert_eq!(store.routes()[&1].len(), 1);
    }

    #[tokio::test]
    async fn unknown_destination_stays_unresolved() {
        let api = Arc::new(MockAirlineApi::new());
        api.register_destinations("AAA", vec![wire_route("AAA", "ZZZ")]);
        let store = Arc::new(MockGraphStore::new());
        let index = index_of(vec![airport("AAA", 1)]);

        let (_, routes) = fetch_routes(api, store, index, 1).await.unwrap();

        assert_eq!(routes.len(), 1);
        assert!(routes[0].destination.is_none());
        assert_eq!(routes[0].destination_store_id(), None);
    }

    #[tokio::test]
    async fn one_failing_airport_does_not_stop_the_others() {
        let api = Arc::new(MockAirlineApi::new());
        api.register_destinations("AAA", vec![wire_route("AAA", "BBB")]);
        api.register_destinations("BBB", vec![wire_route("BBB", "AAA")]);
        api.fail_destinations("AAA");
        let store = Arc::new(MockGraphStore::new());
        let index = index_of(vec![airport("AAA", 1), airport("BBB", 2)]);

        let result = fetch_routes(api, store.clone(), index, 2).await;

        // The stage reports the failure, but the healthy airport's
        // routes were still fetched and persisted by its worker.
        assert!(matches!(result, Err(RoutesError::Api(_))));
        assert_eq!(store.routes().get(&2).map(Vec::len), Some(1));
        assert!(!store.routes().contains_key(&1));
    }

    #[tokio::test]
    async fn worker_count_does_not_change_the_outcome() {
        let codes = ["AAA", "BBB", "CCC", "DDD", "EEE"];

        let mut runs: Vec<Vec<(String, String)>> = Vec::new();
        for worker_count in [1usize, 4] {
            let api = Arc::new(MockAirlineApi::new());
            for (i, from) in codes.iter().enumerate() {
                let to = codes[(i + 1) % codes.len()];
                api.register_destinations(from, vec![wire_route(from, to)]);
            }
            let store = Arc::new(MockGraphStore::new());
            let index = index_of(
                codes
                    .iter()
                    .enumerate()
                    .map(|(i, code)| airport(code, i as i64 + 1))
                    .collect(),
            );

            let (index, routes) = fetch_routes(api, store, index, worker_count)
                .await
                .unwrap();

            assert!(index.values().all(|a| a.destinations.len() == 1));
            let mut pairs: Vec<(String, String)> = routes
                .iter()
                .map(|r| (r.iata_from.clone(), r.iata_to.clone()))
                .collect();
            pairs.sort();
            runs.push(pairs);
        }

        assert_eq!(runs[0], runs[1]);
    }
}
