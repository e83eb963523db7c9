// Re-export key components
pub use crate::DEFAULT_MAX_SPEED;
pub use crate::error::Error;
pub use crate::model::{EdgeStatus, NodeId, RoadEdge, RoadGraph, RoadNode};
pub use crate::routing::{RouteMetrics, SearchOutcome, SearchState, dijkstra, reconstruct};
pub use crate::trace::{
    EdgeStatusChange, JsonLinesSink, NullSink, RecordingSink, SampledSink, SamplingPolicy,
    SearchEvent, SearchPhase, SnapshotSink,
};
