use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One page of flight listings for a (route, day) query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightsPage {
    pub flights: Vec<Flight>,
}

/// A single flight listing wrapping one outbound leg.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flight {
    pub outbound: Outbound,
}

/// Outbound flight details: endpoints, price and the travel window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outbound {
    #[serde(rename = "airportFrom")]
    pub from: AirportSummary,
    #[serde(rename = "airportTo")]
    pub to: AirportSummary,
    pub price: FlightPrice,
    #[serde(rename = "dateFrom")]
    pub date_from: DateTime<Utc>,
    #[serde(rename = "dateTo")]
    pub date_to: DateTime<Utc>,
}

/// Abbreviated airport record embedded in a flight listing. The store id
/// is stamped from the resolved route before persistence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AirportSummary {
    #[serde(skip)]
    pub store_id: Option<i64>,
    #[serde(rename = "iataCode")]
    pub iata: String,
    pub name: String,
}

/// Listed price of a flight. `value_exchanged` is derived: raw value
/// times the exchange rate for the origin country's currency, left
/// unset when no rate is known.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlightPrice {
    pub value: f64,
    #[serde(skip)]
    pub value_exchanged: Option<f64>,
    #[serde(rename = "currencySymbol")]
    pub currency: String,
}
