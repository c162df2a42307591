//! Mock airline API client for testing.
//!
//! The `MockAirlineApi` is pre-registered with airports, destinations,
//! flight pages and exchange rates, allowing pipeline tests to run
//! without network access. Individual endpoints can be told to fail
//! with a status error to exercise worker and stage failure paths.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::StatusCode;

use flights_indexer_shared::types::{Airport, FlightsPage, Route};

use crate::{AirlineApi, ApiError, Result};

/// Mock airline API that returns pre-registered data.
#[derive(Default)]
pub struct MockAirlineApi {
    airports: RwLock<Vec<Airport>>,
    destinations: RwLock<HashMap<String, Vec<Route>>>,
    flights: RwLock<HashMap<(String, String), FlightsPage>>,
    rates: RwLock<HashMap<String, String>>,
    airports_failing: AtomicBool,
    failing_destinations: RwLock<HashSet<String>>,
    failing_flights: RwLock<HashSet<(String, String)>>,
    flight_requests: RwLock<Vec<(String, String, NaiveDate)>>,
}

impl MockAirlineApi {
    /// Create a new empty mock client.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an airport to be returned by the listing endpoint.
    pub fn register_airport(&self, airport: Airport) {
        self.airports.write().unwrap().push(airport);
    }

    /// Register the destination list for an origin. Origins without a
    /// registration return an empty list.
    pub fn register_destinations(&self, origin: &str, routes: Vec<Route>) {
        self.destinations
            .write()
            .unwrap()
            .insert(origin.to_string(), routes);
    }

    /// Register the flight page returned for a route, on every day.
    pub fn register_flights(&self, origin: &str, destination: &str, page: FlightsPage) {
        self.flights
            .write()
            .unwrap()
            .insert((origin.to_string(), destination.to_string()), page);
    }

    /// Register an exchange rate for a currency pair, e.g. `EURPLN`.
    pub fn register_rate(&self, pair: &str, rate: &str) {
        self.rates
            .write()
            .unwrap()
            .insert(pair.to_string(), rate.to_string());
    }

    /// Make the airports listing endpoint fail with a status error.
    pub fn fail_airports(&self) {
        self.airports_failing.store(true, Ordering::SeqCst);
    }

    /// Make the destinations endpoint fail for one origin.
    pub fn fail_destinations(&self, origin: &str) {
        self.failing_destinations
            .write()
            .unwrap()
            .insert(origin.to_string());
    }

    /// Make the flights endpoint fail for one route.
    pub fn fail_flights(&self, origin: &str, destination: &str) {
        self.failing_flights
            .write()
            .unwrap()
            .insert((origin.to_string(), destination.to_string()));
    }

    /// Every (origin, destination, day) the flights endpoint was asked
    /// for, in request order.
    pub fn flight_requests(&self) -> Vec<(String, String, NaiveDate)> {
        self.flight_requests.read().unwrap().clone()
    }
}

#[async_trait]
impl AirlineApi for MockAirlineApi {
    async fn airports(&self) -> Result<Vec<Airport>> {
        if self.airports_failing.load(Ordering::SeqCst) {
            return Err(ApiError::Status(StatusCode::INTERNAL_SERVER_ERROR));
        }
        Ok(self.airports.read().unwrap().clone())
    }

    async fn destinations(&self, origin: &str) -> Result<Vec<Route>> {
        if self.failing_destinations.read().unwrap().contains(origin) {
            return Err(ApiError::Status(StatusCode::INTERNAL_SERVER_ERROR));
        }
        Ok(self
            .destinations
            .read()
            .unwrap()
            .get(origin)
            .cloned()
            .unwrap_or_default())
    }

    async fn flights(&self, origin: &str, destination: &str, day: NaiveDate) -> Result<FlightsPage> {
        self.flight_requests
            .write()
            .unwrap()
            .push((origin.to_string(), destination.to_string(), day));

        let key = (origin.to_string(), destination.to_string());
        if self.failing_flights.read().unwrap().contains(&key) {
            return Err(ApiError::Status(StatusCode::INTERNAL_SERVER_ERROR));
        }
        Ok(self
            .flights
            .read()
            .unwrap()
            .get(&key)
            .cloned()
            .unwrap_or(FlightsPage { flights: vec![] }))
    }

    async fn exchange_rate(&self, pair: &str) -> Result<String> {
        self.rates
            .read()
            .unwrap()
            .get(pair)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(format!("no rate registered for pair {}", pair)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flights_indexer_shared::types::Country;

    fn test_airport(iata: &str) -> Airport {
        Airport {
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

    #[tokio::test]
    async fn returns_registered_airports() {
        let api = MockAirlineApi::new();
        api.register_airport(test_airport("KRK"));
        api.register_airport(test_airport("WRO"));

        let airports = api.airports().await.unwrap();
        assert_eq!(airports.len(), 2);
        assert_eq!(airports[0].iata, "KRK");
    }

    #[tokio::test]
    async fn unregistered_destinations_are_empty() {
        let api = MockAirlineApi::new();
        let routes = api.destinations("KRK").await.unwrap();
        assert!(routes.is_empty());
    }

    #[tokio::test]
    async fn failing_flights_return_status_error() {
        let api = MockAirlineApi::new();
        api.fail_flights("KRK", "STN");

        let day = NaiveDate::from_ymd_opt(2016, 5, 20).unwrap();
        let result = api.flights("KRK", "STN", day).await;
        assert!(matches!(result, Err(ApiError::Status(_))));

        // The request is still recorded.
        assert_eq!(api.flight_requests().len(), 1);
    }

    #[tokio::test]
    async fn missing_rate_is_not_found() {
        let api = MockAirlineApi::new();
        api.register_rate("EURPLN", "4.3");

        assert_eq!(api.exchange_rate("EURPLN").await.unwrap(), "4.3");
        let missing = api.exchange_rate("GBPPLN").await;
        assert!(matches!(missing, Err(ApiError::NotFound(_))));
    }
}
