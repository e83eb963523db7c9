//! Dijkstra's algorithm over the road graph, instrumented for replay

use std::collections::BinaryHeap;

use serde::Serialize;

use super::state::FrontierEntry;
use crate::Error;
use crate::model::{EdgeStatus, NodeId, RoadGraph};
use crate::trace::{EdgeStatusChange, SearchEvent, SearchPhase, SnapshotSink};

/// Terminal state of a search run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchState {
    /// Destination popped from the frontier with a finalized distance
    Found,
    /// Frontier drained without reaching the destination
    Unreachable,
}

/// What a completed search run reports back to the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOutcome {
    /// Number of finalized-node steps before termination
    pub steps: usize,
    pub state: SearchState,
}

/// Run Dijkstra's algorithm from `origin` towards `destination`.
///
/// Wipes all prior search state, then finalizes nodes in ascending distance
/// order, emitting one [`SearchEvent`] per finalized node carrying that
/// step's edge status changes: each outgoing edge of the finalized node is
/// marked [`EdgeStatus::Visited`], and every outgoing edge of a just-relaxed
/// neighbor [`EdgeStatus::Active`]. Stale frontier entries are discarded
/// without a step or an event.
///
/// An unreachable destination is an outcome, not an error; unknown endpoint
/// ids fail before any graph state is touched. Once finalized, a node's
/// distance is the exact shortest travel cost from the origin.
pub fn dijkstra(
    graph: &mut RoadGraph,
    origin: NodeId,
    destination: NodeId,
    sink: &mut dyn SnapshotSink,
) -> Result<SearchOutcome, Error> {
    let origin_index = graph.resolve(origin)?;
    let destination_index = graph.resolve(destination)?;

    graph.reset_search_state();
    graph.set_highlight(origin_index);
    graph.set_highlight(destination_index);
    graph.set_distance(origin_index, 0.0);

    let mut frontier = BinaryHeap::new();
    frontier.push(FrontierEntry::new(origin_index, origin, 0.0));
    let mut steps = 0;

    while let Some(entry) = frontier.pop() {
        let node = entry.node;

        if node == destination_index {
            graph.mark_visited(node);
            sink.on_event(&SearchEvent {
                step: steps,
                phase: SearchPhase::Found,
                finalized: Some(destination),
                changes: Vec::new(),
            });
            log::debug!(
                "Reached {destination} from {origin} in {steps} steps, travel cost {:.3}",
                entry.cost.0
            );
            return Ok(SearchOutcome {
                steps,
                state: SearchState::Found,
            });
        }

        // Stale entry: this node was already finalized via a better path.
        if graph.state(node).visited {
            continue;
        }
        graph.mark_visited(node);

        let base = graph.state(node).distance;
        let mut changes = Vec::new();
        for (edge, neighbor, weight) in graph.out_edges(node) {
            graph.set_edge_status(edge, EdgeStatus::Visited);
            changes.push(EdgeStatusChange {
                edge: edge.index(),
                status: EdgeStatus::Visited,
            });

            if base + weight < graph.state(neighbor).distance {
                graph.set_distance(neighbor, base + weight);
                graph.set_predecessor(neighbor, node);
                frontier.push(FrontierEntry::new(
                    neighbor,
                    graph.node_id(neighbor),
                    base + weight,
                ));

                for (touched, _, _) in graph.out_edges(neighbor) {
                    graph.set_edge_status(touched, EdgeStatus::Active);
                    changes.push(EdgeStatusChange {
                        edge: touched.index(),
                        status: EdgeStatus::Active,
                    });
                }
            }
        }

        sink.on_event(&SearchEvent {
            step: steps,
            phase: SearchPhase::Finding,
            finalized: Some(graph.node_id(node)),
            changes,
        });
        steps += 1;
    }

    log::debug!("Frontier drained after {steps} steps: {destination} is unreachable from {origin}");
    Ok(SearchOutcome {
        steps,
        state: SearchState::Unreachable,
    })
}
