//! # Flow editor core
//!
//! The interactive editing engine behind the flow canvas. Translates raw
//! pointer events from the host view into graph mutations and publishes
//! immutable [`EditorEvent`] records for the renderer to reconcile.
//!
//! ## Submodules
//! - [`ports`]: port anchor placement and hit-testing
//! - [`drag`]: the connection-drag session state
//! - [`validate`]: connection invariants and the replace rule
//! - [`routing`]: wire paths and the node→connection adjacency index
//! - [`events`]: the event records drained by the view layer
//!
//! ## Main Type
//! [`FlowEditor`] - owns the graph and wires the pieces together

pub mod drag;
pub mod events;
pub mod ports;
pub mod routing;
pub mod validate;

pub use events::EditorEvent;
pub use ports::{PORT_RADIUS, PortAnchor};
pub use routing::WirePath;
pub use validate::{AcceptFn, CommitOutcome, ConnectionProposal, ConnectionValidator};

use crate::error::PropertyError;
use crate::graph::{FlowGraph, Node, PortDirection};
use crate::node_types::{NodeProperties, NodeType};
use drag::DragSession;
use egui::Pos2;
use routing::ConnectionIndex;
use uuid::Uuid;

pub struct FlowEditor {
    pub graph: FlowGraph,
    /// Drops landing back on the source node are refused by default;
    /// hosts that want self-loops can flip this.
    pub allow_self_connections: bool,
    validator: ConnectionValidator,
    drag: Option<DragSession>,
    index: ConnectionIndex,
    events: Vec<EditorEvent>,
}

impl Default for FlowEditor {
    fn default() -> Self {
        Self {
            graph: FlowGraph::default(),
            allow_self_connections: false,
            validator: ConnectionValidator::new(),
            drag: None,
            index: ConnectionIndex::default(),
            events: Vec::new(),
        }
    }
}

impl FlowEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// An editor whose validator runs the given acceptance predicate on
    /// top of the structural checks.
    pub fn with_acceptance(accept: AcceptFn) -> Self {
        Self {
            validator: ConnectionValidator::with_acceptance(accept),
            ..Self::default()
        }
    }

    /// The "add from palette" action: builds a node of the given type
    /// with its default name, size, ports, and properties.
    pub fn add_node(&mut self, node_type: NodeType, position: Pos2) -> Uuid {
        let node = Node::new(node_type, (position.x, position.y));
        let id = node.id;
        let anchors = ports::anchors(&node);
        self.graph.add_node(node);
        self.events
            .push(EditorEvent::PortAnchorsChanged { node: id, anchors });
        id
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn drag_session(&self) -> Option<&DragSession> {
        self.drag.as_ref()
    }

    /// Scene anchor of a named port, or `None` if the node or port does
    /// not exist.
    pub fn port_anchor(&self, node: Uuid, direction: PortDirection, port: &str) -> Option<Pos2> {
        ports::scene_anchor(self.graph.node(node)?, direction, port)
    }

    /// Cached wire geometry for a live connection.
    pub fn wire_path(&self, connection: Uuid) -> Option<&WirePath> {
        self.index.path(connection)
    }

    /// Events accumulated since the last drain, oldest first.
    pub fn drain_events(&mut self) -> Vec<EditorEvent> {
        std::mem::take(&mut self.events)
    }

    /// A press starts a drag only when it lands on an output-port
    /// region while no session is active. A press on an input port is
    /// deliberately inert: connections are always drawn source-first.
    pub fn pointer_down(&mut self, scene_pos: Pos2, hit: Option<Uuid>) {
        // The drag-start check only runs while idle, so a second press
        // during a live session cannot open another one.
        if self.drag.is_some() {
            return;
        }
        let Some(node_id) = hit else { return };
        let Some(node) = self.graph.node(node_id) else {
            return;
        };
        let Some((PortDirection::Output, name)) = ports::hit_test(node, local_point(node, scene_pos))
        else {
            return;
        };
        let port = name.to_string();
        let Some(anchor) = ports::scene_anchor(node, PortDirection::Output, &port) else {
            return;
        };
        log::debug!("drag started from {node_id}.{port}");
        self.drag = Some(DragSession {
            source_node: node_id,
            source_port: port.clone(),
            anchor,
            current: scene_pos,
        });
        self.events.push(EditorEvent::DragStarted {
            node: node_id,
            port,
            anchor,
        });
        // Publish every node's anchors so the view can highlight
        // candidate drop targets while the wire is in flight.
        for node in self.graph.nodes.values() {
            self.events.push(EditorEvent::PortAnchorsChanged {
                node: node.id,
                anchors: ports::anchors(node),
            });
        }
    }

    pub fn pointer_move(&mut self, scene_pos: Pos2) {
        let Some(session) = self.drag.as_mut() else {
            return;
        };
        session.current = scene_pos;
        self.events.push(EditorEvent::DragWireMoved {
            anchor: session.anchor,
            current: scene_pos,
        });
    }

    /// Commit-or-abandon: the session is discarded and the controller
    /// returns to idle no matter how the drop resolves.
    pub fn pointer_up(&mut self, scene_pos: Pos2, hit: Option<Uuid>) {
        let Some(session) = self.drag.take() else { return };
        let Some(proposal) = self.resolve_drop(&session, scene_pos, hit) else {
            self.events.push(EditorEvent::DragAbandoned);
            return;
        };
        match self.validator.commit(&mut self.graph, &proposal) {
            Ok(outcome) => {
                if let Some(replaced) = &outcome.replaced {
                    self.index.remove(replaced);
                }
                self.index.insert(&self.graph, &outcome.connection);
                log::debug!(
                    "connected {}.{} -> {}.{}",
                    outcome.connection.from_node,
                    outcome.connection.from_port,
                    outcome.connection.to_node,
                    outcome.connection.to_port
                );
                self.events.push(EditorEvent::ConnectionCreated {
                    connection: outcome.connection,
                    replaced: outcome.replaced.map(|c| c.id),
                });
            }
            Err(err) => {
                log::debug!("connection rejected: {err}");
                self.events.push(EditorEvent::DragAbandoned);
            }
        }
    }

    fn resolve_drop(
        &self,
        session: &DragSession,
        scene_pos: Pos2,
        hit: Option<Uuid>,
    ) -> Option<ConnectionProposal> {
        let node_id = hit?;
        let node = self.graph.node(node_id)?;
        let (PortDirection::Input, port) = ports::hit_test(node, local_point(node, scene_pos))?
        else {
            return None;
        };
        if node_id == session.source_node && !self.allow_self_connections {
            log::debug!("self-connection refused on {node_id}");
            return None;
        }
        Some(ConnectionProposal {
            from_node: session.source_node,
            from_port: session.source_port.clone(),
            to_node: node_id,
            to_port: port.to_string(),
        })
    }

    /// The external drag-to-move behavior reports a new position here.
    /// Refreshes the moved node's anchors and the wires touching it;
    /// returns the refreshed connection ids.
    pub fn node_moved(&mut self, node: Uuid, position: Pos2) -> Vec<Uuid> {
        let Some(data) = self.graph.node_mut(node) else {
            return Vec::new();
        };
        data.position = (position.x, position.y);
        let anchors = ports::anchors(data);
        self.events
            .push(EditorEvent::PortAnchorsChanged { node, anchors });
        self.index.refresh_node(&self.graph, node)
    }

    pub fn set_display_name(
        &mut self,
        node: Uuid,
        name: impl Into<String>,
    ) -> Result<(), PropertyError> {
        let data = self
            .graph
            .node_mut(node)
            .ok_or(PropertyError::UnknownNode(node))?;
        data.display_name = name.into();
        Ok(())
    }

    /// Replaces a node's properties record. The variant must match the
    /// node's type; numeric fields are clamped to their editable ranges.
    pub fn set_properties(
        &mut self,
        node: Uuid,
        mut properties: NodeProperties,
    ) -> Result<(), PropertyError> {
        let data = self
            .graph
            .node_mut(node)
            .ok_or(PropertyError::UnknownNode(node))?;
        if properties.kind() != data.node_type {
            return Err(PropertyError::TypeMismatch {
                expected: data.node_type.label().to_string(),
                found: properties.kind().label().to_string(),
            });
        }
        properties.clamp_ranges();
        data.properties = properties;
        Ok(())
    }
}

fn local_point(node: &Node, scene_pos: Pos2) -> Pos2 {
    Pos2::new(
        scene_pos.x - node.position.0,
        scene_pos.y - node.position.1,
    )
}
