//! Instrumented search engine and path reconstruction

mod dijkstra;
mod reconstruct;
mod state;

pub use dijkstra::{SearchOutcome, SearchState, dijkstra};
pub use reconstruct::{RouteMetrics, reconstruct};
