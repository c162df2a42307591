//! # Flights Indexer Shared
//! This crate defines the data records shared across the flights indexer
//! ecosystem: airports, routes, flight listings and their prices.
pub mod types;
