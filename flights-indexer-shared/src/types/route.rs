use serde::{Deserialize, Serialize};

use crate::types::Airport;

/// A directed origin → destination pair between two airports.
///
/// The wire record only carries the two IATA codes. The route stage
/// resolves them against the airport index: `origin` is always the
/// airport being processed, while `destination` stays `None` when the
/// destination code is unknown to the index. Unresolved routes produce
/// no graph edge and are skipped by the price stage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Route {
    #[serde(rename = "airportFrom")]
    pub iata_from: String,
    #[serde(rename = "airportTo")]
    pub iata_to: String,
    #[serde(skip)]
    pub origin: Airport,
    #[serde(skip)]
    pub destination: Option<Airport>,
}

impl Route {
    /// Store id of the resolved destination, if any.
    pub fn destination_store_id(&self) -> Option<i64> {
        self.destination.as_ref().and_then(|airport| airport.store_id)
    }
}
