//! Search trace events and the sinks that consume them
//!
//! The engine reports its progress as a stream of [`SearchEvent`]s pushed
//! into a caller-supplied [`SnapshotSink`]. Events are after-the-fact
//! notifications: by the time a sink sees one, the graph mutations it
//! describes are already committed, so a slow or failing sink can never
//! corrupt a search.

use std::io::Write;

use serde::Serialize;

use crate::model::{EdgeStatus, NodeId};

/// Phase of the run an event belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchPhase {
    /// Dijkstra main loop
    Finding,
    /// Predecessor walk from destination back to origin
    Reconstructing,
    /// Terminal event: destination popped from the frontier
    Found,
}

/// One edge status transition within a step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EdgeStatusChange {
    /// Dense edge index, see [`RoadGraph::edge_endpoints`](crate::model::RoadGraph::edge_endpoints)
    pub edge: usize,
    pub status: EdgeStatus,
}

/// Immutable record of one algorithm step
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchEvent {
    /// Step index, strictly increasing within a phase
    pub step: usize,
    pub phase: SearchPhase,
    /// Node finalized this step, if any
    pub finalized: Option<NodeId>,
    /// Edge transitions in application order; later entries win on overlap
    pub changes: Vec<EdgeStatusChange>,
}

/// Consumer of step-by-step search notifications.
///
/// Called synchronously from the search loops, fire-and-forget: the engine
/// never inspects any outcome of the call, and an expensive sink serializes
/// its cost straight into the search.
pub trait SnapshotSink {
    fn on_event(&mut self, event: &SearchEvent);
}

/// Discards every event. For callers that only want the metrics.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl SnapshotSink for NullSink {
    fn on_event(&mut self, _event: &SearchEvent) {}
}

/// Records every event in memory, for tests and offline replay
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Vec<SearchEvent>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[SearchEvent] {
        &self.events
    }

    pub fn into_events(self) -> Vec<SearchEvent> {
        self.events
    }
}

impl SnapshotSink for RecordingSink {
    fn on_event(&mut self, event: &SearchEvent) {
        self.events.push(event.clone());
    }
}

/// Per-phase cadence for [`SampledSink`]
#[derive(Debug, Clone, Copy)]
pub struct SamplingPolicy {
    /// Forward every Nth event while finding; 0 or 1 forwards all
    pub finding_every: usize,
    /// Forward every Nth event while reconstructing; 0 or 1 forwards all
    pub reconstructing_every: usize,
}

impl Default for SamplingPolicy {
    /// Cadence tuned for smooth playback of city-sized searches.
    fn default() -> Self {
        Self {
            finding_every: 32,
            reconstructing_every: 3,
        }
    }
}

/// Thins the event stream to a caller-chosen cadence.
///
/// Terminal [`SearchPhase::Found`] events always pass through, so a replay
/// always ends on the completed picture.
#[derive(Debug)]
pub struct SampledSink<S> {
    inner: S,
    policy: SamplingPolicy,
}

impl<S: SnapshotSink> SampledSink<S> {
    pub fn new(inner: S, policy: SamplingPolicy) -> Self {
        Self { inner, policy }
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: SnapshotSink> SnapshotSink for SampledSink<S> {
    fn on_event(&mut self, event: &SearchEvent) {
        let every = match event.phase {
            SearchPhase::Finding => self.policy.finding_every,
            SearchPhase::Reconstructing => self.policy.reconstructing_every,
            SearchPhase::Found => 1,
        };
        if every <= 1 || event.step % every == 0 {
            self.inner.on_event(event);
        }
    }
}

/// Writes one JSON object per event, newline separated, so a renderer in
/// another process can replay a search from a log file.
#[derive(Debug)]
pub struct JsonLinesSink<W> {
    writer: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> SnapshotSink for JsonLinesSink<W> {
    fn on_event(&mut self, event: &SearchEvent) {
        // Fire-and-forget: a broken log must not abort the search.
        let result = serde_json::to_writer(&mut self.writer, event)
            .map_err(std::io::Error::from)
            .and_then(|()| self.writer.write_all(b"\n"));
        if let Err(err) = result {
            log::warn!("Dropping search event {}: {err}", event.step);
        }
    }
}
