mod airports;
mod orchestrator;
mod prices;
mod rates;
mod routes;

pub use airports::AirportsError;
pub use orchestrator::PipelineError;
pub use prices::{PricesError, RateLookupError};
pub use rates::RatesError;
pub use routes::RoutesError;
