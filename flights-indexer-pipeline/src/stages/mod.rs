//! The four fetch stages, run in order by the orchestrator:
//! airports, routes, exchange rates, prices.
mod airports;
mod prices;
mod rates;
mod routes;

pub use airports::fetch_airports;
pub use prices::{fetch_prices, generate_days, PricesSummary};
pub use rates::fetch_exchange_rates;
pub use routes::fetch_routes;
