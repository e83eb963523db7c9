use thiserror::Error;

use crate::model::NodeId;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Unknown node id {0}")]
    UnknownNode(NodeId),
    #[error("Destination {destination} cannot be reached from {origin}")]
    UnreachableDestination { origin: NodeId, destination: NodeId },
    #[error("Invalid data: {0}")]
    InvalidData(String),
}
