//! Road network model
//!
//! Static graph payload plus the per-node and per-edge search state the
//! engine mutates during a run.

pub mod components;
pub mod network;

pub use components::{EdgeStatus, NodeId, NodeSearchState, RoadEdge, RoadNode};
pub use network::RoadGraph;
