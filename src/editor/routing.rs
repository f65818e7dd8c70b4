//! Connection wire geometry and the node→connection adjacency index.
//!
//! Each connection's rendered path is a cubic bezier between its two
//! port anchors, cached by connection id. The index keeps per-node
//! adjacency sets so a node move only recomputes the wires touching the
//! moved node, not the whole collection.

use super::ports;
use crate::graph::{Connection, FlowGraph, PortDirection};
use egui::Pos2;
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

/// Cubic bezier of a rendered connection. Endpoints are the source
/// output anchor and the target input anchor, in scene coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WirePath {
    pub from: Pos2,
    pub c1: Pos2,
    pub c2: Pos2,
    pub to: Pos2,
}

/// Control points extend horizontally from each anchor so wires bow
/// outward; short wires keep a minimum bow.
pub fn wire_path(p1: Pos2, p2: Pos2) -> WirePath {
    let control_offset = ((p2.x - p1.x).abs() * 0.5).max(50.0);
    WirePath {
        from: p1,
        c1: Pos2::new(p1.x + control_offset, p1.y),
        c2: Pos2::new(p2.x - control_offset, p2.y),
        to: p2,
    }
}

#[derive(Default)]
pub struct ConnectionIndex {
    by_node: HashMap<Uuid, HashSet<Uuid>>,
    paths: HashMap<Uuid, WirePath>,
}

impl ConnectionIndex {
    pub fn insert(&mut self, graph: &FlowGraph, connection: &Connection) {
        self.by_node
            .entry(connection.from_node)
            .or_default()
            .insert(connection.id);
        self.by_node
            .entry(connection.to_node)
            .or_default()
            .insert(connection.id);
        if let Some(path) = compute(graph, connection) {
            self.paths.insert(connection.id, path);
        }
    }

    pub fn remove(&mut self, connection: &Connection) {
        for end in [connection.from_node, connection.to_node] {
            if let Some(set) = self.by_node.get_mut(&end) {
                set.remove(&connection.id);
                if set.is_empty() {
                    self.by_node.remove(&end);
                }
            }
        }
        self.paths.remove(&connection.id);
    }

    /// Recomputes the wires touching `node` and returns the refreshed
    /// connection ids. Cost is proportional to that node's degree.
    pub fn refresh_node(&mut self, graph: &FlowGraph, node: Uuid) -> Vec<Uuid> {
        let ids: Vec<Uuid> = match self.by_node.get(&node) {
            Some(set) => set.iter().copied().collect(),
            None => return Vec::new(),
        };
        let mut refreshed = Vec::with_capacity(ids.len());
        for id in ids {
            let Some(connection) = graph.connection(id) else {
                continue;
            };
            if let Some(path) = compute(graph, connection) {
                self.paths.insert(id, path);
                refreshed.push(id);
            }
        }
        refreshed
    }

    pub fn path(&self, connection: Uuid) -> Option<&WirePath> {
        self.paths.get(&connection)
    }
}

fn compute(graph: &FlowGraph, connection: &Connection) -> Option<WirePath> {
    let source = graph.node(connection.from_node)?;
    let target = graph.node(connection.to_node)?;
    let p1 = ports::scene_anchor(source, PortDirection::Output, &connection.from_port)?;
    let p2 = ports::scene_anchor(target, PortDirection::Input, &connection.to_port)?;
    Some(wire_path(p1, p2))
}
