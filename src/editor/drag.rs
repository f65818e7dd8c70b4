use egui::Pos2;
use uuid::Uuid;

/// Live connection-drag session. At most one exists at a time; the
/// editor holds `Option<DragSession>` and `None` is the idle state.
#[derive(Clone, Debug)]
pub struct DragSession {
    pub source_node: Uuid,
    pub source_port: String,
    /// Scene anchor of the source output port, captured at drag start.
    pub anchor: Pos2,
    pub current: Pos2,
}
