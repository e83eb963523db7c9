//! Predecessor walk and aggregate route metrics

use serde::Serialize;

use crate::Error;
use crate::model::{EdgeStatus, NodeId, RoadGraph};
use crate::trace::{EdgeStatusChange, SearchEvent, SearchPhase, SnapshotSink};

/// Aggregate metrics of a reconstructed route
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteMetrics {
    /// Total length of the route in kilometers
    pub distance_km: f64,
    /// Speed limit of every traversed segment, destination-to-origin order
    pub speeds: Vec<f64>,
    /// Unweighted mean of `speeds`; 0 for a zero-length route
    pub avg_speed: f64,
    /// `distance_km / avg_speed * 60`; 0 for a zero-length route
    pub eta_minutes: f64,
}

impl RouteMetrics {
    fn empty() -> Self {
        Self {
            distance_km: 0.0,
            speeds: Vec::new(),
            avg_speed: 0.0,
            eta_minutes: 0.0,
        }
    }
}

/// Walk predecessor links from `destination` back to `origin`.
///
/// Requires a completed [`dijkstra`](super::dijkstra) run on the same graph.
/// Every parallel edge along a hop is marked [`EdgeStatus::OnPath`] and
/// reported in one event per hop, in destination-to-origin order; length and
/// speed limit are read from the lowest-keyed parallel edge. A missing
/// predecessor before the origin means the search never reached the
/// destination and fails with [`Error::UnreachableDestination`].
///
/// The degenerate `origin == destination` route yields all-zero metrics by
/// convention (the average speed over zero segments is defined as 0, not a
/// division by zero) and emits no events.
pub fn reconstruct(
    graph: &mut RoadGraph,
    origin: NodeId,
    destination: NodeId,
    sink: &mut dyn SnapshotSink,
) -> Result<RouteMetrics, Error> {
    let origin_index = graph.resolve(origin)?;
    let destination_index = graph.resolve(destination)?;

    if origin_index == destination_index {
        return Ok(RouteMetrics::empty());
    }

    let mut total_length = 0.0;
    let mut speeds = Vec::new();
    let mut current = destination_index;
    let mut steps = 0;

    while current != origin_index {
        let previous = graph
            .state(current)
            .predecessor
            .ok_or(Error::UnreachableDestination {
                origin,
                destination,
            })?;

        let parallels = graph.edges_between(previous, current);
        let Some(&first) = parallels.first() else {
            return Err(Error::UnreachableDestination {
                origin,
                destination,
            });
        };

        let mut changes = Vec::with_capacity(parallels.len());
        for &edge in &parallels {
            graph.set_edge_status(edge, EdgeStatus::OnPath);
            changes.push(EdgeStatusChange {
                edge: edge.index(),
                status: EdgeStatus::OnPath,
            });
        }

        let segment = graph.edge_payload(first);
        total_length += segment.length;
        speeds.push(segment.max_speed);

        sink.on_event(&SearchEvent {
            step: steps,
            phase: SearchPhase::Reconstructing,
            finalized: None,
            changes,
        });
        steps += 1;
        current = previous;
    }

    let distance_km = total_length / 1000.0;
    let avg_speed = speeds.iter().sum::<f64>() / speeds.len() as f64;
    let eta_minutes = distance_km / avg_speed * 60.0;
    log::info!(
        "Route {origin} -> {destination}: {distance_km:.3} km, avg speed {avg_speed:.1} km/h, eta {eta_minutes:.1} min"
    );

    Ok(RouteMetrics {
        distance_km,
        speeds,
        avg_speed,
        eta_minutes,
    })
}
