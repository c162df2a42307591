mod graph;

pub use graph::GraphStoreError;
