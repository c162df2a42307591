//! Orchestrator for the ingestion pipeline.
//!
//! Drives the fetch stages in fixed order over injected api and store
//! collaborators, tracking progress through an explicitly ordered state
//! machine. Any stage failure moves the run to the terminal `Failed`
//! state and aborts it; nothing is retried or resumed, and side effects
//! already committed stay in the store.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, error, info};

use airline_api::AirlineApi;
use flights_indexer_repository::GraphStore;

use crate::errors::PipelineError;
use crate::stages;

/// Pipeline progress. States are strictly ordered and never revisited;
/// `Failed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PipelineState {
    Idle,
    ClearingStore,
    AirportsFetched,
    RoutesFetched,
    RatesFetched,
    Done,
    Failed,
}

/// Configuration for one pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Number of parallel workers in each fan-out stage.
    pub worker_count: usize,
    /// Delete all store nodes and edges before fetching.
    pub clear_store: bool,
    /// Currency every price is converted into.
    pub target_currency: String,
    /// Currencies to fetch exchange rates for.
    pub source_currencies: Vec<String>,
    /// First day of the price query window.
    pub date_from: NaiveDate,
    /// Last day of the price query window, inclusive.
    pub date_to: NaiveDate,
}

/// Counts reported after a successful run.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunSummary {
    pub airports: usize,
    pub routes: usize,
    pub unresolved_routes: usize,
    pub flights: usize,
    pub rate_misses: usize,
    pub worker_errors: usize,
}

/// `Orchestrator` coordinates the fetch stages over an airline api
/// client and a graph store.
pub struct Orchestrator {
    api: Arc<dyn AirlineApi>,
    store: Arc<dyn GraphStore>,
    config: PipelineConfig,
    state: PipelineState,
}

impl Orchestrator {
    /// Creates a new `Orchestrator` in the `Idle` state.
    ///
    /// # Arguments
    ///
    /// * `api` - The remote airline api client.
    /// * `store` - The graph store receiving the fetched data.
    /// * `config` - Run configuration.
    pub fn new(api: Arc<dyn AirlineApi>, store: Arc<dyn GraphStore>, config: PipelineConfig) -> Self {
        Self {
            api,
            store,
            config,
            state: PipelineState::Idle,
        }
    }

    /// Current pipeline state.
    pub fn state(&self) -> PipelineState {
        self.state
    }

    /// Runs the pipeline stages in order: clear store (when configured),
    /// airports, routes, exchange rates, prices.
    ///
    /// # Returns
    ///
    /// The run summary on success, or the first stage error, after which
    /// the orchestrator is in the `Failed` state.
    pub async fn run(&mut self) -> Result<RunSummary, PipelineError> {
        match self.drive().await {
            Ok(summary) => {
                info!(
                    airports = summary.airports,
                    routes = summary.routes,
                    unresolved_routes = summary.unresolved_routes,
                    flights = summary.flights,
                    rate_misses = summary.rate_misses,
                    worker_errors = summary.worker_errors,
                    "pipeline run complete"
                );
                Ok(summary)
            }
            Err(e) => {
                error!(state = ?self.state, error = %e, "pipeline run failed");
                self.state = PipelineState::Failed;
                Err(e)
            }
        }
    }

    async fn drive(&mut self) -> Result<RunSummary, PipelineError> {
        if self.config.clear_store {
            self.transition(PipelineState::ClearingStore);
            info!("clearing graph store");
            self.store.clear().await.map_err(PipelineError::ClearStore)?;
        }

        let index = stages::fetch_airports(self.api.as_ref(), self.store.as_ref()).await?;
        self.transition(PipelineState::AirportsFetched);

        let (index, routes) = stages::fetch_routes(
            Arc::clone(&self.api),
            Arc::clone(&self.store),
            index,
            self.config.worker_count,
        )
        .await?;
        self.transition(PipelineState::RoutesFetched);

        let airports = index.len();
        let route_count = routes.len();
        let unresolved_routes = routes.iter().filter(|r| r.destination.is_none()).count();

        let rates = stages::fetch_exchange_rates(
            self.api.as_ref(),
            &self.config.target_currency,
            &self.config.source_currencies,
        )
        .await?;
        self.transition(PipelineState::RatesFetched);

        let prices = stages::fetch_prices(
            Arc::clone(&self.api),
            Arc::clone(&self.store),
            routes,
            rates,
            self.config.date_from,
            self.config.date_to,
            self.config.worker_count,
        )
        .await?;
        self.transition(PipelineState::Done);

        Ok(RunSummary {
            airports,
            routes: route_count,
            unresolved_routes,
            flights: prices.flights,
            rate_misses: prices.rate_misses,
            worker_errors: prices.errors,
        })
    }

    fn transition(&mut self, next: PipelineState) {
        // States only ever move forward.
        debug_assert!(self.state < next);
        debug!(from = ?self.state, to = ?next, "pipeline state transition");
        self.state = next;
    }
}
