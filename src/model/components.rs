//! Road network components - nodes, edges, and per-element search state

use geo::{LineString, Point};
use petgraph::graph::NodeIndex;
use serde::Serialize;

/// External identifier of a road junction (OSM node id or similar)
pub type NodeId = i64;

/// Road graph node
#[derive(Debug, Clone)]
pub struct RoadNode {
    /// External id of the junction
    pub id: NodeId,
    /// Node coordinates, carried for renderers; the search never reads them
    pub geometry: Point<f64>,
}

/// Road graph edge (street segment)
#[derive(Debug, Clone)]
pub struct RoadEdge {
    /// Segment length in meters
    pub length: f64,
    /// Speed limit in km/h
    pub max_speed: f64,
    /// Travel cost, `length / max_speed`
    pub weight: f64,
    /// Optional geometry for visualization
    pub geometry: Option<LineString<f64>>,
}

/// Renderer-facing status of an edge during a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeStatus {
    #[default]
    Unvisited,
    /// Outgoing edge of a finalized node
    Visited,
    /// Outgoing edge of a node whose tentative distance just improved
    Active,
    /// Part of the reconstructed route
    OnPath,
}

/// Mutable per-node bookkeeping, wiped before every search
#[derive(Debug, Clone, PartialEq)]
pub struct NodeSearchState {
    /// Distance is final once set
    pub visited: bool,
    /// Tentative travel cost from the origin
    pub distance: f64,
    pub predecessor: Option<NodeIndex>,
    /// Origin/destination marker, meaningful to renderers only
    pub highlight: bool,
}

impl Default for NodeSearchState {
    fn default() -> Self {
        Self {
            visited: false,
            distance: f64::INFINITY,
            predecessor: None,
            highlight: false,
        }
    }
}
