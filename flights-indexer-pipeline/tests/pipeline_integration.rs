//! Integration tests for the ingestion pipeline orchestrator.
//!
//! These tests drive the real orchestrator and stages against the mock
//! airline api and mock graph store, without network or database access.

use std::sync::Arc;

use chrono::NaiveDate;

use airline_api::MockAirlineApi;
use flights_indexer_pipeline::errors::PipelineError;
use flights_indexer_pipeline::orchestrator::{Orchestrator, PipelineConfig, PipelineState};
use flights_indexer_repository::MockGraphStore;
use flights_indexer_shared::types::{
    Airport, AirportSummary, Country, Flight, FlightPrice, FlightsPage, Outbound, Route,
};

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn airport(iata: &str, currency: &str) -> Airport {
    Airport {
        iata: iata.to_string(),
        name: format!("{} airport", iata),
        country: Country {
            code: "pl".to_string(),
            name: "Poland".to_string(),
            currency: currency.to_string(),
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

fn flight_page(value: f64, currency: &str) -> FlightsPage {
    FlightsPage {
        flights: vec![Flight {
            outbound: Outbound {
                from: AirportSummary {
                    iata: "AAA".to_string(),
                    name: "AAA airport".to_string(),
                    ..AirportSummary::default()
                },
                to: AirportSummary {
                    iata: "BBB".to_string(),
                    name: "BBB airport".to_string(),
                    ..AirportSummary::default()
                },
                price: FlightPrice {
                    value,
                    value_exchanged: None,
                    currency: currency.to_string(),
                },
                date_from: "2016-05-20T06:25:00Z".parse().unwrap(),
                date_to: "2016-05-20T08:10:00Z".parse().unwrap(),
            },
        }],
    }
}

fn config(clear_store: bool) -> PipelineConfig {
    PipelineConfig {
        worker_count: 2,
        clear_store,
        target_currency: "PLN".to_string(),
        source_currencies: vec!["EUR".to_string()],
        date_from: day(2016, 5, 20),
        date_to: day(2016, 5, 20),
    }
}

#[tokio::test]
async fn full_run_converts_and_persists_flight_prices() {
    let api = Arc::new(MockAirlineApi::new());
    api.register_airport(airport("AAA", "EUR"));
    api.register_airport(airport("BBB", "PLN"));
    api.register_destinations("AAA", vec![wire_route("AAA", "BBB")]);
    api.register_rate("EURPLN", "4.3");
    api.register_flights("AAA", "BBB", flight_page(100.0, "EUR"));
    let store = Arc::new(MockGraphStore::new());

    let mut orchestrator = Orchestrator::new(api, store.clone(), config(false));
    let summary = orchestrator.run().await.unwrap();

    assert_eq!(orchestrator.state(), PipelineState::Done);
    assert_eq!(summary.airports, 2);
    assert_eq!(summary.routes, 1);
    assert_eq!(summary.unresolved_routes, 0);
    assert_eq!(summary.flights, 1);
    assert_eq!(summary.rate_misses, 0);
    assert_eq!(summary.worker_errors, 0);

    // AAA was inserted first and got node id 1; BBB got 2.
    assert_eq!(store.airports().len(), 2);
    assert_eq!(store.routes()[&1].len(), 1);

    let pages = store.flights();
    assert_eq!(pages.len(), 1);
    let (origin_id, page) = &pages[0];
    assert_eq!(*origin_id, 1);
    let outbound = &page.flights[0].outbound;
    assert_eq!(outbound.from.store_id, Some(1));
    assert_eq!(outbound.to.store_id, Some(2));
    assert_eq!(outbound.price.value, 100.0);
    assert_eq!(outbound.price.value_exchanged, Some(430.0));
}

#[tokio::test]
async fn one_flight_page_is_fetched_per_route_and_day() {
    let api = Arc::new(MockAirlineApi::new());
    api.register_airport(airport("AAA", "EUR"));
    api.register_airport(airport("BBB", "PLN"));
    api.register_destinations("AAA", vec![wire_route("AAA", "BBB")]);
    api.register_rate("EURPLN", "4.3");
    api.register_flights("AAA", "BBB", flight_page(100.0, "EUR"));
    let store = Arc::new(MockGraphStore::new());

    let mut cfg = config(false);
    cfg.date_to = day(2016, 5, 22);

    let mut orchestrator = Orchestrator::new(api.clone(), store, cfg);
    let summary = orchestrator.run().await.unwrap();

    let requests = api.flight_requests();
    assert_eq!(requests.len(), 3);
    assert_eq!(requests[0].2, day(2016, 5, 20));
    assert_eq!(requests[2].2, day(2016, 5, 22));
    assert_eq!(summary.flights, 3);
}

#[tokio::test]
async fn clear_store_completes_before_any_fetch() {
    let api = Arc::new(MockAirlineApi::new());
    api.register_airport(airport("AAA", "EUR"));
    api.register_rate("EURPLN", "4.3");
    let store = Arc::new(MockGraphStore::new());

    let mut orchestrator = Orchestrator::new(api, store.clone(), config(true));
    orchestrator.run().await.unwrap();

    let operations = store.operations();
    assert_eq!(operations.first().map(String::as_str), Some("clear"));
    assert!(operations[1..].iter().all(|op| op != "clear"));
}

#[tokio::test]
async fn clear_store_failure_aborts_before_fetching_starts() {
    let api = Arc::new(MockAirlineApi::new());
    api.register_airport(airport("AAA", "EUR"));
    let store = Arc::new(MockGraphStore::new());
    store.fail_clear();

    let mut orchestrator = Orchestrator::new(api, store.clone(), config(true));
    let result = orchestrator.run().await;

    assert!(matches!(result, Err(PipelineError::ClearStore(_))));
    assert_eq!(orchestrator.state(), PipelineState::Failed);
    assert_eq!(store.operations(), vec!["clear".to_string()]);
}

#[tokio::test]
async fn airport_stage_failure_is_fatal() {
    let api = Arc::new(MockAirlineApi::new());
    api.fail_airports();
    let store = Arc::new(MockGraphStore::new());

    let mut orchestrator = Orchestrator::new(api, store.clone(), config(false));
    let result = orchestrator.run().await;

    assert!(matches!(result, Err(PipelineError::Airports(_))));
    assert_eq!(orchestrator.state(), PipelineState::Failed);
    assert!(store.routes().is_empty());
}

#[tokio::test]
async fn missing_exchange_rate_pair_stops_the_run_before_prices() {
    let api = Arc::new(MockAirlineApi::new());
    api.register_airport(airport("AAA", "EUR"));
    api.register_airport(airport("BBB", "PLN"));
    api.register_destinations("AAA", vec![wire_route("AAA", "BBB")]);
    // No EURPLN rate registered: the rate stage fails.
    let store = Arc::new(MockGraphStore::new());

    let mut orchestrator = Orchestrator::new(api.clone(), store, config(false));
    let result = orchestrator.run().await;

    assert!(matches!(result, Err(PipelineError::Rates(_))));
    assert_eq!(orchestrator.state(), PipelineState::Failed);
    assert!(api.flight_requests().is_empty());
}

#[tokio::test]
async fn unresolved_destination_survives_the_whole_run() {
    let api = Arc::new(MockAirlineApi::new());
    api.register_airport(airport("AAA", "EUR"));
    // The destination code is not in the airport listing.
    api.register_destinations("AAA", vec![wire_route("AAA", "ZZZ")]);
    api.register_rate("EURPLN", "4.3");
    let store = Arc::new(MockGraphStore::new());

    let mut orchestrator = Orchestrator::new(api.clone(), store.clone(), config(false));
    let summary = orchestrator.run().await.unwrap();

    assert_eq!(orchestrator.state(), PipelineState::Done);
    assert_eq!(summary.routes, 1);
    assert_eq!(summary.unresolved_routes, 1);
    // No route edge, no price fetch for the unresolved pair.
    assert!(store.routes().get(&1).map(Vec::is_empty).unwrap_or(true));
    assert!(api.flight_requests().is_empty());
    assert_eq!(summary.flights, 0);
}

#[tokio::test]
async fn price_worker_error_fails_the_run_after_siblings_finish() {
    let api = Arc::new(MockAirlineApi::new());
    api.register_airport(airport("AAA", "EUR"));
    api.register_airport(airport("BBB", "EUR"));
    api.register_airport(airport("CCC", "EUR"));
    api.register_destinations("AAA", vec![wire_route("AAA", "BBB")]);
    api.register_destinations("BBB", vec![wire_route("BBB", "CCC")]);
    api.register_rate("EURPLN", "4.3");
    api.register_flights("AAA", "BBB", flight_page(10.0, "EUR"));
    api.fail_flights("BBB", "CCC");
    let store = Arc::new(MockGraphStore::new());

    let mut orchestrator = Orchestrator::new(api, store.clone(), config(false));
    let result = orchestrator.run().await;

    assert!(matches!(result, Err(PipelineError::Prices(_))));
    assert_eq!(orchestrator.state(), PipelineState::Failed);
    // The healthy route was fetched and persisted by its own worker.
    assert_eq!(store.flights().len(), 1);
}
