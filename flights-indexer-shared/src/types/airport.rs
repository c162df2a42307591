use serde::{Deserialize, Serialize};

use crate::types::Route;

/// A single airport as returned by the airports listing endpoint.
///
/// The IATA code is the airport's identity. `store_id` and
/// `destinations` are not part of the wire record: the store id is
/// assigned when the airport node is persisted, and the destination
/// list is filled in by the route stage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Airport {
    #[serde(skip)]
    pub store_id: Option<i64>,
    #[serde(rename = "iataCode")]
    pub iata: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub country: Country,
    #[serde(skip)]
    pub destinations: Vec<Route>,
}

/// Country details attached to an airport, including the local currency
/// used to price flights departing from it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Country {
    pub code: String,
    pub name: String,
    pub currency: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_airport_wire_format() {
        let body = r#"{
            "iataCode": "KRK",
            "name": "Krakow",
            "latitude": 50.077671,
            "longitude": 19.784836,
            "country": {"code": "pl", "name": "Poland", "currency": "PLN"}
        }"#;

        let airport: Airport = serde_json::from_str(body).unwrap();
        assert_eq!(airport.iata, "KRK");
        assert_eq!(airport.country.currency, "PLN");
        assert_eq!(airport.store_id, None);
        assert!(airport.destinations.is_empty());
    }
}
