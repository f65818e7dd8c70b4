//! Connection validation and the replace rule.
//!
//! A proposal that survives the structural checks either lands on a free
//! input port or displaces whatever connection currently holds that
//! port. Displacement is normal operation, not a failure; the displaced
//! connection is returned so the caller can reconcile visuals.

use crate::error::ConnectError;
use crate::graph::{Connection, FlowGraph, PortDirection};
use uuid::Uuid;

/// A drop-resolved connection candidate, as forwarded by the drag
/// controller. Direction is structural: `from_port` names an output,
/// `to_port` an input.
#[derive(Clone, Debug, PartialEq)]
pub struct ConnectionProposal {
    pub from_node: Uuid,
    pub from_port: String,
    pub to_node: Uuid,
    pub to_port: String,
}

/// Hook for stricter acceptance rules (port-type compatibility, cycle
/// bans). Runs after the structural checks; returning `false` rejects
/// the proposal without mutation.
pub type AcceptFn = fn(&FlowGraph, &ConnectionProposal) -> bool;

#[derive(Default)]
pub struct ConnectionValidator {
    accept: Option<AcceptFn>,
}

/// What a committed proposal did to the graph.
#[derive(Clone, Debug)]
pub struct CommitOutcome {
    pub connection: Connection,
    pub replaced: Option<Connection>,
}

impl ConnectionValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_acceptance(accept: AcceptFn) -> Self {
        Self {
            accept: Some(accept),
        }
    }

    pub fn commit(
        &self,
        graph: &mut FlowGraph,
        proposal: &ConnectionProposal,
    ) -> Result<CommitOutcome, ConnectError> {
        let source = graph
            .node(proposal.from_node)
            .ok_or(ConnectError::UnknownNode(proposal.from_node))?;
        let target = graph
            .node(proposal.to_node)
            .ok_or(ConnectError::UnknownNode(proposal.to_node))?;

        if !source.outputs.iter().any(|p| p.name == proposal.from_port) {
            return Err(ConnectError::UnknownPort {
                node: proposal.from_node,
                port: proposal.from_port.clone(),
                direction: PortDirection::Output,
            });
        }
        if !target.inputs.iter().any(|p| p.name == proposal.to_port) {
            return Err(ConnectError::UnknownPort {
                node: proposal.to_node,
                port: proposal.to_port.clone(),
                direction: PortDirection::Input,
            });
        }

        // Idempotence guard: proposing an existing wire is a no-op.
        if graph.has_connection(
            proposal.from_node,
            &proposal.from_port,
            proposal.to_node,
            &proposal.to_port,
        ) {
            return Err(ConnectError::Duplicate {
                from_node: proposal.from_node,
                from_port: proposal.from_port.clone(),
                to_node: proposal.to_node,
                to_port: proposal.to_port.clone(),
            });
        }

        if let Some(accept) = self.accept {
            if !accept(graph, proposal) {
                return Err(ConnectError::PolicyRejected);
            }
        }

        // An input port holds at most one incoming connection; a new
        // wire displaces the old one.
        let displaced = graph
            .incoming(proposal.to_node, &proposal.to_port)
            .map(|c| c.id);
        let replaced = displaced.and_then(|id| graph.remove_connection(id));

        let connection = Connection::new(
            proposal.from_node,
            proposal.from_port.clone(),
            proposal.to_node,
            proposal.to_port.clone(),
        );
        graph.add_connection(connection.clone());

        Ok(CommitOutcome {
            connection,
            replaced,
        })
    }
}
