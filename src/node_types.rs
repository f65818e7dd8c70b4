use super::graph::Port;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum NodeType {
    Start,
    End,
    FindWindow,
    FindImage,
    MouseAction,
    KeyboardAction,
    Delay,
    Conditional,
    LogMessage,
}

impl Default for NodeType {
    fn default() -> Self {
        NodeType::Start
    }
}

impl NodeType {
    /// Palette order.
    pub const CATALOG: [NodeType; 9] = [
        NodeType::Start,
        NodeType::End,
        NodeType::FindWindow,
        NodeType::FindImage,
        NodeType::MouseAction,
        NodeType::KeyboardAction,
        NodeType::Delay,
        NodeType::Conditional,
        NodeType::LogMessage,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            NodeType::Start => "Start",
            NodeType::End => "End",
            NodeType::FindWindow => "Find Window",
            NodeType::FindImage => "Find Image",
            NodeType::MouseAction => "Mouse Action",
            NodeType::KeyboardAction => "Keyboard Action",
            NodeType::Delay => "Delay/Wait",
            NodeType::Conditional => "Conditional (If/Else)",
            NodeType::LogMessage => "Log Message",
        }
    }

    /// Returns the input and output port lists for a node of this type.
    ///
    /// Start has no inputs, End has no outputs, Conditional has the two
    /// named branch outputs; everything else gets one generic "in" and
    /// one generic "out".
    pub fn ports(&self) -> (Vec<Port>, Vec<Port>) {
        let inputs = match self {
            NodeType::Start => vec![],
            _ => vec![Port::new("in")],
        };
        let outputs = match self {
            NodeType::End => vec![],
            NodeType::Conditional => vec![Port::new("true"), Port::new("false")],
            _ => vec![Port::new("out")],
        };
        (inputs, outputs)
    }

    pub fn default_properties(&self) -> NodeProperties {
        match self {
            NodeType::Start => NodeProperties::Start,
            NodeType::End => NodeProperties::End,
            NodeType::FindWindow => NodeProperties::FindWindow {
                title: String::new(),
                exact_match: false,
            },
            NodeType::FindImage => NodeProperties::FindImage {
                image_path: String::new(),
                confidence: 0.8,
                search_mode: SearchMode::FullScreen,
            },
            NodeType::MouseAction => NodeProperties::MouseAction {
                x: 0,
                y: 0,
                button: MouseButton::Left,
                gesture: MouseGesture::Click,
            },
            NodeType::KeyboardAction => NodeProperties::KeyboardAction {
                mode: KeyboardGesture::TypeText,
                text: String::new(),
                key: String::new(),
            },
            NodeType::Delay => NodeProperties::Delay { duration_ms: 1000 },
            NodeType::Conditional => NodeProperties::Conditional,
            NodeType::LogMessage => NodeProperties::LogMessage {
                message: "Default log message".to_string(),
            },
        }
    }
}

/// Per-type property record. The variant tag doubles as the schema: an
/// edit whose variant does not match the node's type is rejected.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum NodeProperties {
    Start,
    End,
    FindWindow {
        title: String,
        exact_match: bool,
    },
    FindImage {
        image_path: String,
        confidence: f32,
        search_mode: SearchMode,
    },
    MouseAction {
        x: i32,
        y: i32,
        button: MouseButton,
        gesture: MouseGesture,
    },
    KeyboardAction {
        mode: KeyboardGesture,
        text: String,
        key: String,
    },
    Delay {
        duration_ms: u64,
    },
    Conditional,
    LogMessage {
        message: String,
    },
}

impl NodeProperties {
    pub fn kind(&self) -> NodeType {
        match self {
            NodeProperties::Start => NodeType::Start,
            NodeProperties::End => NodeType::End,
            NodeProperties::FindWindow { .. } => NodeType::FindWindow,
            NodeProperties::FindImage { .. } => NodeType::FindImage,
            NodeProperties::MouseAction { .. } => NodeType::MouseAction,
            NodeProperties::KeyboardAction { .. } => NodeType::KeyboardAction,
            NodeProperties::Delay { .. } => NodeType::Delay,
            NodeProperties::Conditional => NodeType::Conditional,
            NodeProperties::LogMessage { .. } => NodeType::LogMessage,
        }
    }

    /// Clamps numeric fields to their editable ranges.
    pub fn clamp_ranges(&mut self) {
        match self {
            NodeProperties::FindImage {
                confidence,
                search_mode,
                ..
            } => {
                *confidence = confidence.clamp(0.0, 1.0);
                if let SearchMode::Rectangle { x, y, w, h } = search_mode {
                    *x = (*x).clamp(-10_000, 10_000);
                    *y = (*y).clamp(-10_000, 10_000);
                    *w = (*w).clamp(1, 10_000);
                    *h = (*h).clamp(1, 10_000);
                }
            }
            NodeProperties::Delay { duration_ms } => {
                *duration_ms = (*duration_ms).min(600_000);
            }
            _ => {}
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum SearchMode {
    FullScreen,
    Rectangle { x: i32, y: i32, w: i32, h: i32 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MouseGesture {
    Click,
    DoubleClick,
    Down,
    Up,
    Move,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyboardGesture {
    TypeText,
    PressKey,
}
