use crate::graph::PortDirection;
use thiserror::Error;
use uuid::Uuid;

/// Reasons a proposed connection is rejected. Every rejection leaves the
/// graph untouched.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConnectError {
    #[error("node '{0}' does not exist in the graph")]
    UnknownNode(Uuid),

    #[error("node '{node}' has no {direction} port named '{port}'")]
    UnknownPort {
        node: Uuid,
        port: String,
        direction: PortDirection,
    },

    #[error("connection {from_node}.{from_port} -> {to_node}.{to_port} already exists")]
    Duplicate {
        from_node: Uuid,
        from_port: String,
        to_node: Uuid,
        to_port: String,
    },

    #[error("connection rejected by the acceptance policy")]
    PolicyRejected,
}

/// Errors from in-place node edits.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PropertyError {
    #[error("node '{0}' does not exist in the graph")]
    UnknownNode(Uuid),

    #[error("'{found}' properties cannot be applied to a '{expected}' node")]
    TypeMismatch { expected: String, found: String },
}
