//! Road graph storage and search-state bookkeeping

use geo::{LineString, Point};
use hashbrown::HashMap;
use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;

use super::components::{EdgeStatus, NodeId, NodeSearchState, RoadEdge, RoadNode};
use crate::Error;

/// Directed road multigraph together with the mutable state of one search run.
///
/// The static payload lives in a petgraph arena; search state sits in dense
/// arrays parallel to the node and edge arenas, so a reset never touches the
/// topology. Parallel edges between the same pair of junctions are allowed
/// and distinguished by their dense edge index.
///
/// The search engine and the reconstructor borrow the graph mutably for the
/// whole run, which rules out concurrent mutation by construction.
#[derive(Debug, Clone, Default)]
pub struct RoadGraph {
    graph: DiGraph<RoadNode, RoadEdge>,
    node_index: HashMap<NodeId, NodeIndex>,
    node_state: Vec<NodeSearchState>,
    edge_status: Vec<EdgeStatus>,
}

impl RoadGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Add a junction. Ids must be unique within the graph.
    pub fn add_node(&mut self, id: NodeId, position: Point<f64>) -> Result<(), Error> {
        if self.node_index.contains_key(&id) {
            return Err(Error::InvalidData(format!("duplicate node id {id}")));
        }
        let index = self.graph.add_node(RoadNode {
            id,
            geometry: position,
        });
        self.node_index.insert(id, index);
        self.node_state.push(NodeSearchState::default());
        Ok(())
    }

    /// Add a directed street segment and derive its travel cost.
    ///
    /// `length` is meters, `max_speed` km/h; both must be finite and
    /// positive, so every stored weight satisfies Dijkstra's
    /// non-negative-cost precondition. Returns the dense edge index, which
    /// doubles as the multigraph key in event payloads.
    pub fn add_edge(
        &mut self,
        from: NodeId,
        to: NodeId,
        length: f64,
        max_speed: f64,
    ) -> Result<usize, Error> {
        let source = self.resolve(from)?;
        let target = self.resolve(to)?;
        if !(length.is_finite() && length > 0.0) {
            return Err(Error::InvalidData(format!(
                "edge {from} -> {to} has non-positive length {length}"
            )));
        }
        if !(max_speed.is_finite() && max_speed > 0.0) {
            return Err(Error::InvalidData(format!(
                "edge {from} -> {to} has non-positive max speed {max_speed}"
            )));
        }
        let edge = RoadEdge {
            length,
            max_speed,
            weight: length / max_speed,
            geometry: None,
        };
        let index = self.graph.add_edge(source, target, edge);
        self.edge_status.push(EdgeStatus::Unvisited);
        Ok(index.index())
    }

    /// Attach display geometry to an edge. Renderer convenience only.
    pub fn set_edge_geometry(
        &mut self,
        edge: usize,
        geometry: LineString<f64>,
    ) -> Result<(), Error> {
        let payload = self
            .graph
            .edge_weight_mut(EdgeIndex::new(edge))
            .ok_or_else(|| Error::InvalidData(format!("no edge with index {edge}")))?;
        payload.geometry = Some(geometry);
        Ok(())
    }

    /// Wipe all per-node and per-edge search state. Idempotent; called by
    /// the engine before every run, so no state leaks between searches.
    pub fn reset_search_state(&mut self) {
        for state in &mut self.node_state {
            *state = NodeSearchState::default();
        }
        for status in &mut self.edge_status {
            *status = EdgeStatus::Unvisited;
        }
    }

    /// Tentative or finalized travel cost of a node, `+inf` when unreached.
    pub fn distance(&self, id: NodeId) -> Result<f64, Error> {
        Ok(self.state(self.resolve(id)?).distance)
    }

    /// Whether a node's distance has been finalized in the current run.
    pub fn is_visited(&self, id: NodeId) -> Result<bool, Error> {
        Ok(self.state(self.resolve(id)?).visited)
    }

    /// Predecessor on the current shortest-path tree, as an external id.
    pub fn predecessor(&self, id: NodeId) -> Result<Option<NodeId>, Error> {
        let index = self.resolve(id)?;
        Ok(self.state(index).predecessor.map(|p| self.node_id(p)))
    }

    /// Whether the node is an endpoint of the current run.
    pub fn is_highlighted(&self, id: NodeId) -> Result<bool, Error> {
        Ok(self.state(self.resolve(id)?).highlight)
    }

    pub fn position(&self, id: NodeId) -> Result<Point<f64>, Error> {
        Ok(self.graph[self.resolve(id)?].geometry)
    }

    /// Status of an edge by dense index.
    pub fn edge_status(&self, edge: usize) -> Option<EdgeStatus> {
        self.edge_status.get(edge).copied()
    }

    /// Endpoints of an edge as external ids.
    pub fn edge_endpoints(&self, edge: usize) -> Option<(NodeId, NodeId)> {
        self.graph
            .edge_endpoints(EdgeIndex::new(edge))
            .map(|(a, b)| (self.node_id(a), self.node_id(b)))
    }

    /// Static payload of an edge by dense index.
    pub fn edge(&self, edge: usize) -> Option<&RoadEdge> {
        self.graph.edge_weight(EdgeIndex::new(edge))
    }

    /// All node ids, in insertion order.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.graph.node_weights().map(|node| node.id)
    }

    pub(crate) fn resolve(&self, id: NodeId) -> Result<NodeIndex, Error> {
        self.node_index
            .get(&id)
            .copied()
            .ok_or(Error::UnknownNode(id))
    }

    pub(crate) fn node_id(&self, node: NodeIndex) -> NodeId {
        self.graph[node].id
    }

    pub(crate) fn state(&self, node: NodeIndex) -> &NodeSearchState {
        &self.node_state[node.index()]
    }

    /// Outgoing edges of `node` as `(edge, target, weight)` triples, in
    /// stable adjacency order.
    pub(crate) fn out_edges(&self, node: NodeIndex) -> Vec<(EdgeIndex, NodeIndex, f64)> {
        self.graph
            .edges(node)
            .map(|edge| (edge.id(), edge.target(), edge.weight().weight))
            .collect()
    }

    /// Parallel edges `from -> to`, sorted so the lowest-keyed comes first.
    pub(crate) fn edges_between(&self, from: NodeIndex, to: NodeIndex) -> Vec<EdgeIndex> {
        let mut edges: Vec<EdgeIndex> = self
            .graph
            .edges_connecting(from, to)
            .map(|edge| edge.id())
            .collect();
        edges.sort_unstable();
        edges
    }

    pub(crate) fn edge_payload(&self, edge: EdgeIndex) -> &RoadEdge {
        &self.graph[edge]
    }

    pub(crate) fn set_distance(&mut self, node: NodeIndex, value: f64) {
        self.node_state[node.index()].distance = value;
    }

    pub(crate) fn mark_visited(&mut self, node: NodeIndex) {
        self.node_state[node.index()].visited = true;
    }

    pub(crate) fn set_predecessor(&mut self, node: NodeIndex, from: NodeIndex) {
        self.node_state[node.index()].predecessor = Some(from);
    }

    pub(crate) fn set_highlight(&mut self, node: NodeIndex) {
        self.node_state[node.index()].highlight = true;
    }

    pub(crate) fn set_edge_status(&mut self, edge: EdgeIndex, status: EdgeStatus) {
        self.edge_status[edge.index()] = status;
    }
}
