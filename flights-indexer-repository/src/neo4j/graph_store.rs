//! Neo4j implementation of the graph store contract.
//!
//! Airports become `:Airport` nodes, routes become `:ROUTE` edges and
//! priced flights become `:FLIGHT` edges. All queries are parameterized
//! Cypher run through a shared `neo4rs::Graph` connection.

use neo4rs::{Graph, Query};

use flights_indexer_shared::types::{Airport, FlightsPage, Route};

use crate::errors::GraphStoreError;
use crate::interfaces::GraphStore;

/// Graph store backed by a Neo4j database.
pub struct Neo4jGraphStore {
    graph: Graph,
}

impl Neo4jGraphStore {
    /// Connect to Neo4j at the given URI.
    pub fn connect(uri: &str, user: &str, password: &str) -> Result<Self, GraphStoreError> {
        let graph = Graph::new(uri, user, password)?;
        Ok(Neo4jGraphStore { graph })
    }
}

#[async_trait::async_trait]
impl GraphStore for Neo4jGraphStore {
    async fn insert_airport(&self, airport: &Airport) -> Result<i64, GraphStoreError> {
        let query = Query::new(
            "CREATE (n:Airport) \
             SET n.iata = $iata, \
                 n.name = $name, \
                 n.latitude = $latitude, \
                 n.longitude = $longitude, \
                 n.country = $country, \
                 n.currency = $currency \
             RETURN id(n) AS id"
                .to_string(),
        )
        .param("iata", airport.iata.clone())
        .param("name", airport.name.clone())
        .param("latitude", airport.latitude)
        .param("longitude", airport.longitude)
        .param("country", airport.country.code.clone())
        .param("currency", airport.country.currency.clone());

        let mut result = self.graph.execute(query).await?;
        let row = result
            .next()
            .await?
            .ok_or_else(|| GraphStoreError::MissingCreatedNode(airport.iata.clone()))?;

        Ok(row.get::<i64>("id")?)
    }

    async fn insert_routes(
        &self,
        origin_store_id: i64,
        routes: &[Route],
    ) -> Result<(), GraphStoreError> {
        for route in routes {
            // Unresolved destinations carry no node id and produce no edge.
            let Some(destination_id) = route.destination_store_id() else {
                continue;
            };

            let query = Query::new(
                "MATCH (from:Airport) WHERE id(from) = $from_id \
                 MATCH (to:Airport) WHERE id(to) = $to_id \
                 CREATE (from)-[:ROUTE]->(to)"
                    .to_string(),
            )
            .param("from_id", origin_store_id)
            .param("to_id", destination_id);

            self.graph.run(query).await?;
        }

        Ok(())
    }

    async fn insert_flights(
        &self,
        origin_store_id: i64,
        flights: &FlightsPage,
    ) -> Result<(), GraphStoreError> {
        for flight in &flights.flights {
            let outbound = &flight.outbound;
            let destination_id = outbound
                .to
                .store_id
                .ok_or_else(|| GraphStoreError::MissingStoreId(outbound.to.iata.clone()))?;

            let mut set_clauses = vec![
                "r.originalPrice = $original_price",
                "r.currency = $currency",
                "r.dateFrom = $date_from",
                "r.dateTo = $date_to",
            ];
            // The exchanged price is only written when it was computed.
            if outbound.price.value_exchanged.is_some() {
                set_clauses.push("r.price = $price");
            }

            let query_str = format!(
                "MATCH (from:Airport) WHERE id(from) = $from_id \
                 MATCH (to:Airport) WHERE id(to) = $to_id \
                 CREATE (from)-[r:FLIGHT]->(to) SET {}",
                set_clauses.join(", ")
            );

            let mut query = Query::new(query_str)
                .param("from_id", origin_store_id)
                .param("to_id", destination_id)
                .param("original_price", outbound.price.value)
                .param("currency", outbound.price.currency.clone())
                .param("date_from", outbound.date_from.to_rfc3339())
                .param("date_to", outbound.date_to.to_rfc3339());

            if let Some(exchanged) = outbound.price.value_exchanged {
                query = query.param("price", exchanged);
            }

            self.graph.run(query).await?;
        }

        Ok(())
    }

    async fn clear(&self) -> Result<(), GraphStoreError> {
        let query = Query::new("MATCH (n) DETACH DELETE n".to_string());
        self.graph.run(query).await?;
        Ok(())
    }
}
