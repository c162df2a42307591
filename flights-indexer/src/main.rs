use dotenv::dotenv;
use tracing::info;

use flights_indexer::{Config, Dependencies, IngestError};
use flights_indexer_pipeline::orchestrator::Orchestrator;

/// Main entry point for the flights indexer application.
///
/// Initializes tracing and dotenv, loads the configuration, wires the
/// api client and graph store, and runs the ingestion pipeline.
///
/// # Returns
///
/// A `Result` indicating success or an `IngestError` if an error occurs
/// during initialization or the run.
#[tokio::main]
async fn main() -> Result<(), IngestError> {
    tracing_subscriber::fmt()
        .with_env_filter("info")
        .with_target(false)
        .init();

    dotenv().ok();

    info!("Starting flights indexer");

    let config = Config::from_env()?;
    let dependencies = Dependencies::new(&config)?;

    let mut orchestrator = Orchestrator::new(
        dependencies.api,
        dependencies.store,
        config.pipeline_config(),
    );
    let summary = orchestrator.run().await?;

    info!(
        airports = summary.airports,
        routes = summary.routes,
        flights = summary.flights,
        "Feed complete"
    );

    Ok(())
}
