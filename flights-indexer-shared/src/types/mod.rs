mod airport;
mod flight;
mod route;

pub use airport::{Airport, Country};
pub use flight::{AirportSummary, Flight, FlightPrice, FlightsPage, Outbound};
pub use route::Route;
