//! Graph model, validator, and property-edit behavior.

use botcanvas::editor::{ConnectionProposal, ConnectionValidator};
use botcanvas::node_types::{KeyboardGesture, MouseButton, MouseGesture};
use botcanvas::{
    ConnectError, FlowEditor, FlowGraph, Node, NodeProperties, NodeType, PropertyError, SearchMode,
};
use egui::Pos2;
use uuid::Uuid;

fn proposal(from: &Node, from_port: &str, to: &Node, to_port: &str) -> ConnectionProposal {
    ConnectionProposal {
        from_node: from.id,
        from_port: from_port.to_string(),
        to_node: to.id,
        to_port: to_port.to_string(),
    }
}

#[test]
fn port_derivation_per_type() {
    let names = |ports: &[botcanvas::Port]| {
        ports.iter().map(|p| p.name.clone()).collect::<Vec<_>>()
    };
    for node_type in NodeType::CATALOG {
        let (inputs, outputs) = node_type.ports();
        match node_type {
            NodeType::Start => {
                assert!(inputs.is_empty());
                assert_eq!(names(&outputs), ["out"]);
            }
            NodeType::End => {
                assert_eq!(names(&inputs), ["in"]);
                assert!(outputs.is_empty());
            }
            NodeType::Conditional => {
                assert_eq!(names(&inputs), ["in"]);
                assert_eq!(names(&outputs), ["true", "false"]);
            }
            _ => {
                assert_eq!(names(&inputs), ["in"]);
                assert_eq!(names(&outputs), ["out"]);
            }
        }
    }
}

#[test]
fn validator_rejects_unknown_nodes() {
    let mut graph = FlowGraph::default();
    let validator = ConnectionValidator::new();
    let ghost = ConnectionProposal {
        from_node: Uuid::new_v4(),
        from_port: "out".to_string(),
        to_node: Uuid::new_v4(),
        to_port: "in".to_string(),
    };
    let err = validator.commit(&mut graph, &ghost).unwrap_err();
    assert!(matches!(err, ConnectError::UnknownNode(_)));
    assert!(graph.connections.is_empty());
}

#[test]
fn validator_rejects_unknown_ports() {
    let mut graph = FlowGraph::default();
    let start = Node::new(NodeType::Start, (0.0, 0.0));
    let end = Node::new(NodeType::End, (200.0, 0.0));
    graph.add_node(start.clone());
    graph.add_node(end.clone());
    let validator = ConnectionValidator::new();

    // Start has no output named "next".
    let err = validator
        .commit(&mut graph, &proposal(&start, "next", &end, "in"))
        .unwrap_err();
    assert!(matches!(err, ConnectError::UnknownPort { .. }));

    // End's only input is "in".
    let err = validator
        .commit(&mut graph, &proposal(&start, "out", &end, "else"))
        .unwrap_err();
    assert!(matches!(err, ConnectError::UnknownPort { .. }));
    assert!(graph.connections.is_empty());
}

#[test]
fn validator_guards_against_duplicates() {
    let mut graph = FlowGraph::default();
    let a = Node::new(NodeType::Start, (0.0, 0.0));
    let b = Node::new(NodeType::LogMessage, (200.0, 0.0));
    graph.add_node(a.clone());
    graph.add_node(b.clone());
    let validator = ConnectionValidator::new();

    validator
        .commit(&mut graph, &proposal(&a, "out", &b, "in"))
        .unwrap();
    let err = validator
        .commit(&mut graph, &proposal(&a, "out", &b, "in"))
        .unwrap_err();
    assert!(matches!(err, ConnectError::Duplicate { .. }));
    assert_eq!(graph.connections.len(), 1);
}

#[test]
fn validator_replaces_occupied_input_port() {
    let mut graph = FlowGraph::default();
    let s1 = Node::new(NodeType::Start, (0.0, 0.0));
    let s2 = Node::new(NodeType::Delay, (0.0, 100.0));
    let t = Node::new(NodeType::End, (300.0, 0.0));
    graph.add_node(s1.clone());
    graph.add_node(s2.clone());
    graph.add_node(t.clone());
    let validator = ConnectionValidator::new();

    let first = validator
        .commit(&mut graph, &proposal(&s1, "out", &t, "in"))
        .unwrap();
    assert!(first.replaced.is_none());

    let second = validator
        .commit(&mut graph, &proposal(&s2, "out", &t, "in"))
        .unwrap();
    let replaced = second.replaced.unwrap();
    assert_eq!(replaced.id, first.connection.id);

    assert_eq!(graph.connections.len(), 1);
    let survivor = graph.incoming(t.id, "in").unwrap();
    assert_eq!(survivor.id, second.connection.id);
    assert_eq!(survivor.from_node, s2.id);
}

#[test]
fn fan_out_from_one_output_is_allowed() {
    let mut graph = FlowGraph::default();
    let s = Node::new(NodeType::Start, (0.0, 0.0));
    let t1 = Node::new(NodeType::LogMessage, (300.0, -60.0));
    let t2 = Node::new(NodeType::LogMessage, (300.0, 60.0));
    graph.add_node(s.clone());
    graph.add_node(t1.clone());
    graph.add_node(t2.clone());
    let validator = ConnectionValidator::new();

    validator
        .commit(&mut graph, &proposal(&s, "out", &t1, "in"))
        .unwrap();
    validator
        .commit(&mut graph, &proposal(&s, "out", &t2, "in"))
        .unwrap();
    assert_eq!(graph.connections.len(), 2);
}

fn reject_everything(_: &FlowGraph, _: &ConnectionProposal) -> bool {
    false
}

#[test]
fn acceptance_predicate_can_veto() {
    let mut graph = FlowGraph::default();
    let a = Node::new(NodeType::Start, (0.0, 0.0));
    let b = Node::new(NodeType::LogMessage, (200.0, 0.0));
    graph.add_node(a.clone());
    graph.add_node(b.clone());

    let validator = ConnectionValidator::with_acceptance(reject_everything);
    let err = validator
        .commit(&mut graph, &proposal(&a, "out", &b, "in"))
        .unwrap_err();
    assert_eq!(err, ConnectError::PolicyRejected);
    assert!(graph.connections.is_empty());

    // The same hook through the editor: the drop resolves but nothing
    // lands in the model.
    let mut editor = FlowEditor::with_acceptance(reject_everything);
    let a = editor.add_node(NodeType::Start, Pos2::new(0.0, 0.0));
    let b = editor.add_node(NodeType::LogMessage, Pos2::new(200.0, 0.0));
    let out = editor
        .port_anchor(a, botcanvas::PortDirection::Output, "out")
        .unwrap();
    let target = editor
        .port_anchor(b, botcanvas::PortDirection::Input, "in")
        .unwrap();
    editor.pointer_down(out, Some(a));
    editor.pointer_up(target, Some(b));
    assert!(editor.graph.connections.is_empty());
}

#[test]
fn default_properties_follow_the_catalog() {
    let find_image = Node::new(NodeType::FindImage, (0.0, 0.0));
    assert_eq!(
        find_image.properties,
        NodeProperties::FindImage {
            image_path: String::new(),
            confidence: 0.8,
            search_mode: SearchMode::FullScreen,
        }
    );

    let delay = Node::new(NodeType::Delay, (0.0, 0.0));
    assert_eq!(delay.properties, NodeProperties::Delay { duration_ms: 1000 });

    let log = Node::new(NodeType::LogMessage, (0.0, 0.0));
    assert_eq!(
        log.properties,
        NodeProperties::LogMessage {
            message: "Default log message".to_string(),
        }
    );

    let mouse = Node::new(NodeType::MouseAction, (0.0, 0.0));
    assert_eq!(
        mouse.properties,
        NodeProperties::MouseAction {
            x: 0,
            y: 0,
            button: MouseButton::Left,
            gesture: MouseGesture::Click,
        }
    );

    let keyboard = Node::new(NodeType::KeyboardAction, (0.0, 0.0));
    assert_eq!(
        keyboard.properties,
        NodeProperties::KeyboardAction {
            mode: KeyboardGesture::TypeText,
            text: String::new(),
            key: String::new(),
        }
    );

    let display = Node::new(NodeType::Delay, (0.0, 0.0));
    assert_eq!(display.display_name, "Delay/Wait");
}

#[test]
fn mismatched_properties_are_rejected() {
    let mut editor = FlowEditor::new();
    let delay = editor.add_node(NodeType::Delay, Pos2::new(0.0, 0.0));

    let err = editor
        .set_properties(
            delay,
            NodeProperties::LogMessage {
                message: "nope".to_string(),
            },
        )
        .unwrap_err();
    assert!(matches!(err, PropertyError::TypeMismatch { .. }));
    assert_eq!(
        editor.graph.node(delay).unwrap().properties,
        NodeProperties::Delay { duration_ms: 1000 }
    );

    let err = editor
        .set_properties(Uuid::new_v4(), NodeProperties::Start)
        .unwrap_err();
    assert!(matches!(err, PropertyError::UnknownNode(_)));
}

#[test]
fn property_edits_clamp_to_editable_ranges() {
    let mut editor = FlowEditor::new();

    let image = editor.add_node(NodeType::FindImage, Pos2::new(0.0, 0.0));
    editor
        .set_properties(
            image,
            NodeProperties::FindImage {
                image_path: "button.png".to_string(),
                confidence: 1.5,
                search_mode: SearchMode::Rectangle {
                    x: -20_000,
                    y: 0,
                    w: 0,
                    h: -5,
                },
            },
        )
        .unwrap();
    assert_eq!(
        editor.graph.node(image).unwrap().properties,
        NodeProperties::FindImage {
            image_path: "button.png".to_string(),
            confidence: 1.0,
            search_mode: SearchMode::Rectangle {
                x: -10_000,
                y: 0,
                w: 1,
                h: 1,
            },
        }
    );

    let delay = editor.add_node(NodeType::Delay, Pos2::new(0.0, 100.0));
    editor
        .set_properties(
            delay,
            NodeProperties::Delay {
                duration_ms: 700_000,
            },
        )
        .unwrap();
    assert_eq!(
        editor.graph.node(delay).unwrap().properties,
        NodeProperties::Delay {
            duration_ms: 600_000,
        }
    );
}

#[test]
fn incoming_resolves_by_node_and_port() {
    let mut graph = FlowGraph::default();
    let c = Node::new(NodeType::Conditional, (0.0, 0.0));
    let d = Node::new(NodeType::LogMessage, (300.0, 0.0));
    graph.add_node(c.clone());
    graph.add_node(d.clone());
    let validator = ConnectionValidator::new();
    validator
        .commit(&mut graph, &proposal(&c, "true", &d, "in"))
        .unwrap();

    assert!(graph.incoming(d.id, "in").is_some());
    assert!(graph.incoming(c.id, "in").is_none());
    assert!(graph.incoming(d.id, "other").is_none());
}

#[test]
fn graph_survives_a_serde_round_trip() {
    let mut editor = FlowEditor::new();
    let a = editor.add_node(NodeType::Conditional, Pos2::new(0.0, 0.0));
    let b = editor.add_node(NodeType::FindImage, Pos2::new(250.0, 0.0));
    let out = editor
        .port_anchor(a, botcanvas::PortDirection::Output, "true")
        .unwrap();
    let target = editor
        .port_anchor(b, botcanvas::PortDirection::Input, "in")
        .unwrap();
    editor.pointer_down(out, Some(a));
    editor.pointer_up(target, Some(b));

    let json = serde_json::to_string(&editor.graph).unwrap();
    let restored: FlowGraph = serde_json::from_str(&json).unwrap();
    assert_eq!(restored.nodes.len(), 2);
    assert_eq!(restored.connections.len(), 1);
    assert!(restored.has_connection(a, "true", b, "in"));
    assert_eq!(restored.node(a).unwrap().node_type, NodeType::Conditional);
}
