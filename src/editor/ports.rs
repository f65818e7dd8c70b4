//! Port geometry for flow nodes.
//!
//! Pure functions from a node's size and port lists to anchor points and
//! hit regions, in the node's local coordinate space (origin at the
//! node's top-left corner). Inputs sit on the left edge, outputs on the
//! right edge. The same regions are used for drawing and for hit-testing.

use crate::graph::{Node, PortDirection};
use crate::node_types::NodeType;
use egui::{Pos2, Rect, Vec2};

/// Half-extent of a port's square hit region, and its visual radius.
pub const PORT_RADIUS: f32 = 6.0;

/// A port's scene-space anchor, as published to the view layer.
#[derive(Clone, Debug, PartialEq)]
pub struct PortAnchor {
    pub direction: PortDirection,
    pub name: String,
    pub pos: Pos2,
}

/// Generic vertical distribution: `count` ports share a side of the
/// given height evenly, at height/(count+1) × (i+1) for the i-th port.
pub fn spread_offsets(height: f32, count: usize) -> Vec<f32> {
    let step = height / (count as f32 + 1.0);
    (1..=count).map(|i| step * i as f32).collect()
}

/// Branch spacing for a Conditional node's "true"/"false" outputs, at
/// height/3 and 2·height/3.
///
/// Deliberately its own rule, selected on the node type: a future type
/// with two *generic* outputs must keep [`spread_offsets`] spacing.
pub fn branch_offsets(height: f32) -> [f32; 2] {
    [height / 3.0, height * 2.0 / 3.0]
}

pub fn input_offsets(node: &Node) -> Vec<f32> {
    spread_offsets(node.size.1, node.inputs.len())
}

pub fn output_offsets(node: &Node) -> Vec<f32> {
    if node.node_type == NodeType::Conditional && is_branch_pair(node) {
        branch_offsets(node.size.1).to_vec()
    } else {
        spread_offsets(node.size.1, node.outputs.len())
    }
}

fn is_branch_pair(node: &Node) -> bool {
    node.outputs.len() == 2 && node.outputs[0].name == "true" && node.outputs[1].name == "false"
}

/// Local anchor point of the `index`-th port on the given side. The
/// index must be within the node's port list for that direction.
pub fn local_anchor(node: &Node, direction: PortDirection, index: usize) -> Pos2 {
    match direction {
        PortDirection::Input => Pos2::new(0.0, input_offsets(node)[index]),
        PortDirection::Output => Pos2::new(node.size.0, output_offsets(node)[index]),
    }
}

/// Square hit region around a local anchor point.
pub fn port_rect(anchor: Pos2) -> Rect {
    Rect::from_center_size(anchor, Vec2::splat(PORT_RADIUS * 2.0))
}

/// First port whose region contains `local`, or `None`. Input ports are
/// scanned before output ports, each in list order; regions do not
/// overlap by construction, so the first hit is the only hit.
pub fn hit_test(node: &Node, local: Pos2) -> Option<(PortDirection, &str)> {
    for (index, port) in node.inputs.iter().enumerate() {
        if port_rect(local_anchor(node, PortDirection::Input, index)).contains(local) {
            return Some((PortDirection::Input, port.name.as_str()));
        }
    }
    for (index, port) in node.outputs.iter().enumerate() {
        if port_rect(local_anchor(node, PortDirection::Output, index)).contains(local) {
            return Some((PortDirection::Output, port.name.as_str()));
        }
    }
    None
}

/// Scene-space anchor of a named port.
pub fn scene_anchor(node: &Node, direction: PortDirection, name: &str) -> Option<Pos2> {
    let list = match direction {
        PortDirection::Input => &node.inputs,
        PortDirection::Output => &node.outputs,
    };
    let index = list.iter().position(|p| p.name == name)?;
    let local = local_anchor(node, direction, index);
    Some(Pos2::new(
        node.position.0 + local.x,
        node.position.1 + local.y,
    ))
}

/// Scene-space anchors of every port on a node, the payload of a
/// `PortAnchorsChanged` event.
pub fn anchors(node: &Node) -> Vec<PortAnchor> {
    let mut out = Vec::with_capacity(node.inputs.len() + node.outputs.len());
    for (offset, port) in input_offsets(node).into_iter().zip(&node.inputs) {
        out.push(PortAnchor {
            direction: PortDirection::Input,
            name: port.name.clone(),
            pos: Pos2::new(node.position.0, node.position.1 + offset),
        });
    }
    for (offset, port) in output_offsets(node).into_iter().zip(&node.outputs) {
        out.push(PortAnchor {
            direction: PortDirection::Output,
            name: port.name.clone(),
            pos: Pos2::new(node.position.0 + node.size.0, node.position.1 + offset),
        });
    }
    out
}
