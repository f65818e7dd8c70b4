//! Node-graph editing engine for visual automation flows.
//!
//! The canvas widget, palette, and property panel live in the host
//! application; this crate owns the part that is easy to get wrong: the
//! canonical graph model, port geometry and hit-testing, the
//! connection-drag state machine, and the validation/replace rules that
//! keep every input port at most singly fed.
//!
//! ```
//! use botcanvas::{FlowEditor, NodeType, PortDirection};
//! use egui::Pos2;
//!
//! let mut editor = FlowEditor::new();
//! let start = editor.add_node(NodeType::Start, Pos2::new(0.0, 0.0));
//! let log = editor.add_node(NodeType::LogMessage, Pos2::new(200.0, 0.0));
//!
//! // Drag from Start's output port onto the log node's input port.
//! let from = editor.port_anchor(start, PortDirection::Output, "out").unwrap();
//! let to = editor.port_anchor(log, PortDirection::Input, "in").unwrap();
//! editor.pointer_down(from, Some(start));
//! editor.pointer_move(Pos2::new(120.0, 30.0));
//! editor.pointer_up(to, Some(log));
//!
//! assert_eq!(editor.graph.connections.len(), 1);
//! ```

pub mod editor;
pub mod error;
pub mod graph;
pub mod node_types;

pub use editor::{EditorEvent, FlowEditor, PortAnchor, WirePath};
pub use error::{ConnectError, PropertyError};
pub use graph::{Connection, FlowGraph, Node, Port, PortDirection};
pub use node_types::{NodeProperties, NodeType, SearchMode};
