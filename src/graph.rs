use super::node_types::{NodeProperties, NodeType};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use uuid::Uuid;

pub const DEFAULT_NODE_SIZE: (f32, f32) = (150.0, 80.0);

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct FlowGraph {
    pub nodes: HashMap<Uuid, Node>,
    pub connections: HashMap<Uuid, Connection>,
}

impl FlowGraph {
    pub fn add_node(&mut self, node: Node) {
        self.nodes.insert(node.id, node);
    }

    pub fn node(&self, id: Uuid) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn node_mut(&mut self, id: Uuid) -> Option<&mut Node> {
        self.nodes.get_mut(&id)
    }

    pub fn add_connection(&mut self, connection: Connection) {
        self.connections.insert(connection.id, connection);
    }

    pub fn connection(&self, id: Uuid) -> Option<&Connection> {
        self.connections.get(&id)
    }

    pub fn remove_connection(&mut self, id: Uuid) -> Option<Connection> {
        self.connections.remove(&id)
    }

    /// The at-most-one connection currently feeding an input port.
    pub fn incoming(&self, node: Uuid, port: &str) -> Option<&Connection> {
        self.connections
            .values()
            .find(|c| c.to_node == node && c.to_port == port)
    }

    pub fn has_connection(
        &self,
        from_node: Uuid,
        from_port: &str,
        to_node: Uuid,
        to_port: &str,
    ) -> bool {
        self.connections.values().any(|c| {
            c.from_node == from_node
                && c.from_port == from_port
                && c.to_node == to_node
                && c.to_port == to_port
        })
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Node {
    pub id: Uuid,
    pub node_type: NodeType,
    pub display_name: String,
    pub position: (f32, f32),
    pub size: (f32, f32),
    pub properties: NodeProperties,
    // Port lists are derived from the node type at creation and never
    // change afterwards.
    pub inputs: Vec<Port>,
    pub outputs: Vec<Port>,
}

impl Node {
    pub fn new(node_type: NodeType, position: (f32, f32)) -> Self {
        let (inputs, outputs) = node_type.ports();
        Self {
            id: Uuid::new_v4(),
            display_name: node_type.label().to_string(),
            position,
            size: DEFAULT_NODE_SIZE,
            properties: node_type.default_properties(),
            inputs,
            outputs,
            node_type,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Port {
    pub name: String,
}

impl Port {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PortDirection {
    Input,
    Output,
}

impl fmt::Display for PortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PortDirection::Input => "input",
            PortDirection::Output => "output",
        })
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    pub id: Uuid,
    pub from_node: Uuid,
    pub from_port: String,
    pub to_node: Uuid,
    pub to_port: String,
}

impl Connection {
    pub fn new(
        from_node: Uuid,
        from_port: impl Into<String>,
        to_node: Uuid,
        to_port: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            from_node,
            from_port: from_port.into(),
            to_node,
            to_port: to_port.into(),
        }
    }
}
