//! Client for the public airline REST API and the exchange-rate lookup.
//!
//! This crate provides:
//! - [`AirlineApi`] trait for abstracting access to the remote endpoints
//! - [`ApiClient`] production client backed by reqwest
//! - [`MockAirlineApi`] mock client for testing with pre-registered data
//!
//! All four endpoints go through one request/decode helper: GET with
//! connection-close semantics, a mandatory 200 status, and a JSON body
//! decoded into the target record.

mod mock;

pub use mock::MockAirlineApi;

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{header, Client as ReqwestClient, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use flights_indexer_shared::types::{Airport, FlightsPage, Route};

/// Airports listing endpoint.
pub const AIRPORTS_URL: &str = "https://www.ryanair.com/en/api/2/airports/";

/// Destinations endpoint; the origin IATA code is appended.
pub const DESTINATIONS_URL: &str = "https://www.ryanair.com/en/api/2/routes/";

/// Flight listings endpoint base. The full URL carries origin,
/// destination, the day twice (window start and end), the price
/// ceiling, page size and offset.
pub const FLIGHTS_URL: &str = "https://www.ryanair.com/pl/api/2/flights";

/// Exchange rate endpoint template; `$PAIR` is replaced by the currency
/// pair, e.g. `EURPLN`.
pub const EXCHANGE_RATE_URL: &str = "https://query.yahooapis.com/v1/public/yql?q=select+*+from+yahoo.finance.xchange+where+pair+in+(%22$PAIR%22)&format=json&env=store%3A%2F%2Fdatatables.org%2Falltableswithkeys";

/// Price ceiling for flight queries.
pub const MAX_PRICE: u32 = 5000;

/// Number of flights requested per page.
pub const FLIGHTS_PER_PAGE: u32 = 15;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected http status: {0}")]
    Status(StatusCode),
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("not found in mock: {0}")]
    NotFound(String),
}

pub type Result<T> = std::result::Result<T, ApiError>;

/// Trait for fetching airline route and price data.
///
/// This trait abstracts the remote API to enable dependency injection
/// and mocking for testing. Production code uses [`ApiClient`], while
/// tests use [`MockAirlineApi`].
#[async_trait]
pub trait AirlineApi: Send + Sync {
    /// Fetch the full airport listing.
    async fn airports(&self) -> Result<Vec<Airport>>;

    /// Fetch the outbound destinations for an origin airport.
    async fn destinations(&self, origin: &str) -> Result<Vec<Route>>;

    /// Fetch the flight listings for a route on a single day. The day is
    /// used as both the departure window start and end.
    async fn flights(&self, origin: &str, destination: &str, day: NaiveDate) -> Result<FlightsPage>;

    /// Fetch the exchange rate for a currency pair, as the decimal
    /// string the endpoint nests in its response.
    async fn exchange_rate(&self, pair: &str) -> Result<String>;
}

/// Production client over the remote REST endpoints.
///
/// Owns its reqwest client instance; share it across stages with an
/// `Arc` rather than constructing one per worker.
pub struct ApiClient {
    client: ReqwestClient,
}

impl ApiClient {
    pub fn new() -> Self {
        ApiClient {
            client: ReqwestClient::new(),
        }
    }

    /// GET a URL and decode the JSON body into `T`.
    ///
    /// The body is read in full before the status check so the
    /// connection is drained on every exit path, including non-200
    /// responses and decode failures.
    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self
            .client
            .get(url)
            .header(header::CONNECTION, "close")
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;
        if status != StatusCode::OK {
            return Err(ApiError::Status(status));
        }

        Ok(serde_json::from_slice(&body)?)
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AirlineApi for ApiClient {
    async fn airports(&self) -> Result<Vec<Airport>> {
        self.get_json(AIRPORTS_URL).await
    }

    async fn destinations(&self, origin: &str) -> Result<Vec<Route>> {
        let url = format!("{DESTINATIONS_URL}{origin}/");
        self.get_json(&url).await
    }

    async fn flights(&self, origin: &str, destination: &str, day: NaiveDate) -> Result<FlightsPage> {
        let day = day.format("%Y-%m-%d");
        let url = format!(
            "{FLIGHTS_URL}/from/{origin}/to/{destination}/{day}/{day}/{MAX_PRICE}/unique/?limit={FLIGHTS_PER_PAGE}&offset=0"
        );
        self.get_json(&url).await
    }

    async fn exchange_rate(&self, pair: &str) -> Result<String> {
        let url = EXCHANGE_RATE_URL.replace("$PAIR", pair);
        let response: ExchangeQuery = self.get_json(&url).await?;
        Ok(response.query.results.rate.rate)
    }
}

/// Envelope of the exchange-rate response; the rate sits nested three
/// levels deep as a decimal string.
#[derive(Debug, Deserialize)]
struct ExchangeQuery {
    query: ExchangeResults,
}

#[derive(Debug, Deserialize)]
struct ExchangeResults {
    results: ExchangeResult,
}

#[derive(Debug, Deserialize)]
struct ExchangeResult {
    rate: ExchangeRate,
}

#[derive(Debug, Deserialize)]
struct ExchangeRate {
    #[serde(rename = "Rate")]
    rate: String,
}
