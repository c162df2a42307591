//! Airport fetch stage: the listing endpoint is fetched once, every
//! airport is persisted, and the resulting index keyed by IATA code
//! seeds the rest of the pipeline.

use std::collections::HashMap;

use tracing::info;

use airline_api::AirlineApi;
use flights_indexer_repository::GraphStore;
use flights_indexer_shared::types::Airport;

use crate::errors::AirportsError;

/// Fetch the full airport listing and persist each airport.
///
/// The first api or store error aborts the stage; no partial index is
/// returned. On success every entry in the index carries the store id
/// assigned by `insert_airport`.
pub async fn fetch_airports(
    api: &dyn AirlineApi,
    store: &dyn GraphStore,
) -> Result<HashMap<String, Airport>, AirportsError> {
    let airports = api.airports().await?;
    info!(count = airports.len(), "fetched airports");

    let mut index = HashMap::with_capacity(airports.len());
    for mut airport in airports {
        let store_id = store.insert_airport(&airport).await?;
        airport.store_id = Some(store_id);
        index.insert(airport.iata.clone(), airport);
    }

    Ok(index)
}
