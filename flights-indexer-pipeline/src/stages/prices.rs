//! Price fan-out stage: a worker pool walks the global route list and
//! fetches one flight page per (route, day) pair, converts prices
//! through the rate table and persists the enriched pages.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{info, warn};

use airline_api::AirlineApi;
use flights_indexer_repository::{GraphStore, GraphStoreError};
use flights_indexer_shared::types::Route;

use crate::errors::{PricesError, RateLookupError};
use crate::pool::run_pool;

/// Totals aggregated across all price workers for the run summary.
#[derive(Debug, Clone, Copy, Default)]
pub struct PricesSummary {
    pub flights: usize,
    pub rate_misses: usize,
    pub errors: usize,
}

/// Every calendar day from `from` to `to`, both endpoints included.
/// `from == to` yields exactly one day; `from > to` yields none.
pub fn generate_days(from: NaiveDate, to: NaiveDate) -> Vec<NaiveDate> {
    if from > to {
        return Vec::new();
    }
    from.iter_days().take_while(|day| *day <= to).collect()
}

/// Fetch flight prices for every route and every day in the range with
/// a pool of `worker_count` workers.
///
/// Routes whose destination was never resolved are skipped with a
/// warning. A missing exchange rate is non-fatal: the affected flights
/// keep their raw price and the page is persisted anyway. Any other
/// error stops the worker that hit it, and the first one recorded
/// becomes the stage result after the totals are logged.
pub async fn fetch_prices(
    api: Arc<dyn AirlineApi>,
    store: Arc<dyn GraphStore>,
    routes: Vec<Route>,
    rates: HashMap<String, f64>,
    from: NaiveDate,
    to: NaiveDate,
    worker_count: usize,
) -> Result<PricesSummary, PricesError> {
    let days = Arc::new(generate_days(from, to));
    let rates = Arc::new(rates);
    let flights_total = Arc::new(AtomicUsize::new(0));
    let rate_misses = Arc::new(AtomicUsize::new(0));

    let outcome = {
        let flights_total = Arc::clone(&flights_total);
        let rate_misses = Arc::clone(&rate_misses);
        run_pool(routes, worker_count, move |route| {
            let api = Arc::clone(&api);
            let store = Arc::clone(&store);
            let days = Arc::clone(&days);
            let rates = Arc::clone(&rates);
            let flights_total = Arc::clone(&flights_total);
            let rate_misses = Arc::clone(&rate_misses);
            async move {
                fetch_route_prices(
                    api.as_ref(),
                    store.as_ref(),
                    &days,
                    &rates,
                    &flights_total,
                    &rate_misses,
                    route,
                )
                .await
            }
        })
        .await
    };

    let summary = PricesSummary {
        flights: flights_total.load(Ordering::Relaxed),
        rate_misses: rate_misses.load(Ordering::Relaxed),
        errors: outcome.error_count,
    };
    info!(
        flights = summary.flights,
        routes_completed = outcome.results.len(),
        rate_misses = summary.rate_misses,
        errors = summary.errors,
        "total fetched flights"
    );

    if let Some(error) = outcome.first_error {
        return Err(error);
    }

    Ok(summary)
}

/// Process one route: fetch, enrich and persist a flight page for every
/// day in the range. Returns the number of flights fetched.
async fn fetch_route_prices(
    api: &dyn AirlineApi,
    store: &dyn GraphStore,
    days: &[NaiveDate],
    rates: &HashMap<String, f64>,
    flights_total: &AtomicUsize,
    rate_misses: &AtomicUsize,
    route: Route,
) -> Result<usize, PricesError> {
    let Some(destination) = route.destination.as_ref() else {
        warn!(
            origin = %route.iata_from,
            destination = %route.iata_to,
            "skipping route with unresolved destination"
        );
        return Ok(0);
    };

    let origin = &route.origin;
    let origin_store_id = origin
        .store_id
        .ok_or_else(|| GraphStoreError::MissingStoreId(origin.iata.clone()))?;
    let destination_store_id = destination
        .store_id
        .ok_or_else(|| GraphStoreError::MissingStoreId(destination.iata.clone()))?;

    let mut fetched = 0;
    for day in days {
        let mut page = api.flights(&origin.iata, &destination.iata, *day).await?;

        for flight in &mut page.flights {
            let outbound = &mut flight.outbound;
            outbound.from.store_id = Some(origin_store_id);
            outbound.to.store_id = Some(destination_store_id);

            match rates.get(&origin.country.currency) {
                Some(rate) => {
                    outbound.price.value_exchanged = Some(outbound.price.value * rate);
                }
                None => {
                    let miss = RateLookupError {
                        currency: origin.country.currency.clone(),
                    };
                    warn!(origin = %origin.iata, error = %miss, "flight keeps its raw price");
                    rate_misses.fetch_add(1, Ordering::Relaxed);
                }
            }
        }

        store.insert_flights(origin_store_id, &page).await?;

        flights_total.fetch_add(page.flights.len(), Ordering::Relaxed);
        fetched += page.flights.len();
        info!(
            origin = %origin.iata,
            destination = %destination.iata,
            day = %day,
            flights = page.flights.len(),
            "fetched flights for route"
        );
    }

    Ok(fetched)
}
