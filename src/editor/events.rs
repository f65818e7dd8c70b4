use super::ports::PortAnchor;
use crate::graph::Connection;
use egui::Pos2;
use uuid::Uuid;

/// Observations published for the view layer, drained once per frame.
/// The core never holds visuals; reconciliation happens on the other
/// side of this queue.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorEvent {
    DragStarted {
        node: Uuid,
        port: String,
        anchor: Pos2,
    },
    /// Cosmetic feedback for the provisional wire; no model mutation
    /// happens while these are flowing.
    DragWireMoved {
        anchor: Pos2,
        current: Pos2,
    },
    DragAbandoned,
    ConnectionCreated {
        connection: Connection,
        /// Id of the connection this one displaced from the target
        /// input port, so the view can drop its visual.
        replaced: Option<Uuid>,
    },
    PortAnchorsChanged {
        node: Uuid,
        anchors: Vec<PortAnchor>,
    },
}
