//! Instrumented shortest-path engine for road networks.
//!
//! Runs Dijkstra's algorithm over a directed road multigraph and reports
//! every state transition (finalized nodes, edge status changes) as a
//! deterministic, replayable sequence of [`trace::SearchEvent`]s, so an
//! external renderer can play the search and the reconstructed route back
//! as discrete snapshots.
//!
//! The crate owns the algorithm and its observable state only. Building the
//! graph from real map data, drawing frames and encoding video are the
//! caller's business; they meet the engine through [`model::RoadGraph`] on
//! the way in and [`trace::SnapshotSink`] on the way out.

pub mod error;
pub mod model;
pub mod prelude;
pub mod routing;
pub mod trace;

pub use error::Error;
pub use model::{NodeId, RoadGraph};
pub use routing::{RouteMetrics, SearchOutcome, SearchState, dijkstra, reconstruct};
pub use trace::{SearchEvent, SearchPhase, SnapshotSink};

/// Fallback speed limit in km/h for segments whose source data carries none.
/// Applied by preprocessors building a [`RoadGraph`]; the engine itself only
/// requires positive weights.
pub const DEFAULT_MAX_SPEED: f64 = 60.0;
