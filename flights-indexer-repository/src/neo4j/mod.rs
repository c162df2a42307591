mod graph_store;

pub use graph_store::Neo4jGraphStore;
