use std::sync::Arc;

use airline_api::{AirlineApi, ApiClient};
use flights_indexer_repository::{GraphStore, Neo4jGraphStore};

use crate::config::Config;
use crate::errors::IngestError;

/// `Dependencies` holds the collaborators the pipeline runs over.
///
/// It wires the production airline api client and the Neo4j graph
/// store; tests construct the orchestrator directly with mocks instead.
pub struct Dependencies {
    pub api: Arc<dyn AirlineApi>,
    pub store: Arc<dyn GraphStore>,
}

impl Dependencies {
    /// Creates a new `Dependencies` instance from the configuration.
    ///
    /// # Returns
    ///
    /// A `Result` which is `Ok(Self)` once the store connection is
    /// established, or an `IngestError` if it fails.
    pub fn new(config: &Config) -> Result<Self, IngestError> {
        let api = ApiClient::new();
        let store = Neo4jGraphStore::connect(
            &config.neo4j_uri,
            &config.neo4j_user,
            &config.neo4j_password,
        )?;

        Ok(Dependencies {
            api: Arc::new(api),
            store: Arc::new(store),
        })
    }
}
