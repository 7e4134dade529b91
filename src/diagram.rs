//! Diagram-mutation capability.
//!
//! The synthesizer never owns a diagram: the host application does. This
//! module defines the narrow capability trait the synthesizer mutates a
//! diagram through, plus an in-memory implementation used by tests and by
//! callers that want a standalone graph without a host.

use crate::error::SynthError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

// ─── Element specs ────────────────────────────────────────────

/// Cosmetic placement of a node. Carries no invariants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Which of the three script regions a service task executes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskKind {
    Preprocess,
    Quantum,
    Postprocess,
}

/// Fork/merge role of an exclusive gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GatewayKind {
    Split,
    Join,
}

/// What to create. Tasks carry their external-worker topic; gateways and
/// tasks carry a display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum NodeSpec {
    Start,
    End,
    Task {
        task: TaskKind,
        name: String,
        topic: String,
    },
    Gateway {
        gateway: GatewayKind,
        name: String,
    },
}

/// Spec for a sequence flow. The condition is set after creation via
/// [`DiagramHandle::set_field`], never here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl EdgeSpec {
    pub fn labeled(label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
        }
    }
}

// ─── Handles ──────────────────────────────────────────────────

/// Opaque reference to a node owned by the diagram container.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeHandle(Uuid);

/// Opaque reference to an edge owned by the diagram container.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EdgeHandle(Uuid);

/// Root process context new elements are attached to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessHandle(Uuid);

/// Node or edge, for field writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementHandle {
    Node(NodeHandle),
    Edge(EdgeHandle),
}

/// Field name holding an edge's boolean condition expression.
pub const CONDITION_FIELD: &str = "conditionExpression";

// ─── Capability trait ─────────────────────────────────────────

/// The mutation surface the synthesizer needs from a diagram container.
///
/// In the host application this is backed by the modeling API; in tests
/// and standalone use it is backed by [`MemoryDiagram`]. Implementations
/// are exclusively owned by one orchestration at a time; callers must
/// serialize concurrent use of the same container.
pub trait DiagramHandle {
    /// The root process context, if the container has one.
    fn root_process(&self) -> Option<ProcessHandle>;

    /// The container's start event, if one exists.
    fn find_start(&self) -> Option<NodeHandle>;

    /// Look up a node by handle.
    fn find_node(&self, handle: &NodeHandle) -> Option<&NodeSpec>;

    /// Create a node under the given process.
    fn create_node(&mut self, process: &ProcessHandle, spec: NodeSpec, at: Position)
        -> NodeHandle;

    /// Connect two nodes with a sequence flow.
    fn connect(&mut self, from: &NodeHandle, to: &NodeHandle, spec: EdgeSpec) -> EdgeHandle;

    /// Write a named field on an element. Fails if the handle is stale.
    fn set_field(
        &mut self,
        element: &ElementHandle,
        field: &str,
        value: &str,
    ) -> Result<(), SynthError>;

    /// Read a named field back, if set.
    fn field(&self, element: &ElementHandle, field: &str) -> Option<&str>;
}

// ─── MemoryDiagram ────────────────────────────────────────────

/// One node as stored by [`MemoryDiagram`].
#[derive(Debug, Clone)]
pub struct NodeRecord {
    pub spec: NodeSpec,
    pub position: Position,
    pub fields: BTreeMap<String, String>,
}

/// One edge as stored by [`MemoryDiagram`].
#[derive(Debug, Clone)]
pub struct EdgeRecord {
    pub from: NodeHandle,
    pub to: NodeHandle,
    pub spec: EdgeSpec,
    pub fields: BTreeMap<String, String>,
}

/// In-memory diagram container for tests and standalone use.
///
/// A fresh diagram has a root process and one start event, matching what
/// a newly opened host diagram provides. [`MemoryDiagram::empty`] builds
/// a container with no start event, for exercising the invalid-container
/// path.
#[derive(Debug)]
pub struct MemoryDiagram {
    process: ProcessHandle,
    nodes: BTreeMap<Uuid, NodeRecord>,
    edges: BTreeMap<Uuid, EdgeRecord>,
}

impl MemoryDiagram {
    pub fn new() -> Self {
        let mut diagram = Self::empty();
        let start = NodeHandle(Uuid::new_v4());
        diagram.nodes.insert(
            start.0,
            NodeRecord {
                spec: NodeSpec::Start,
                position: Position::new(0, 100),
                fields: BTreeMap::new(),
            },
        );
        diagram
    }

    /// A container without a start event. Not extensible.
    pub fn empty() -> Self {
        Self {
            process: ProcessHandle(Uuid::new_v4()),
            nodes: BTreeMap::new(),
            edges: BTreeMap::new(),
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn node(&self, handle: &NodeHandle) -> Option<&NodeRecord> {
        self.nodes.get(&handle.0)
    }

    pub fn edge(&self, handle: &EdgeHandle) -> Option<&EdgeRecord> {
        self.edges.get(&handle.0)
    }

    /// Iterate all nodes with their handles.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeHandle, &NodeRecord)> {
        self.nodes.iter().map(|(id, rec)| (NodeHandle(*id), rec))
    }

    /// Iterate all edges with their handles.
    pub fn edges(&self) -> impl Iterator<Item = (EdgeHandle, &EdgeRecord)> {
        self.edges.iter().map(|(id, rec)| (EdgeHandle(*id), rec))
    }

    /// Edges leaving the given node.
    pub fn outgoing(&self, from: &NodeHandle) -> Vec<(EdgeHandle, &EdgeRecord)> {
        self.edges
            .iter()
            .filter(|(_, rec)| rec.from == *from)
            .map(|(id, rec)| (EdgeHandle(*id), rec))
            .collect()
    }
}

impl Default for MemoryDiagram {
    fn default() -> Self {
        Self::new()
    }
}

impl DiagramHandle for MemoryDiagram {
    fn root_process(&self) -> Option<ProcessHandle> {
        Some(self.process.clone())
    }

    fn find_start(&self) -> Option<NodeHandle> {
        self.nodes
            .iter()
            .find(|(_, rec)| matches!(rec.spec, NodeSpec::Start))
            .map(|(id, _)| NodeHandle(*id))
    }

    fn find_node(&self, handle: &NodeHandle) -> Option<&NodeSpec> {
        self.nodes.get(&handle.0).map(|rec| &rec.spec)
    }

    fn create_node(
        &mut self,
        _process: &ProcessHandle,
        spec: NodeSpec,
        at: Position,
    ) -> NodeHandle {
        let handle = NodeHandle(Uuid::new_v4());
        self.nodes.insert(
            handle.0,
            NodeRecord {
                spec,
                position: at,
                fields: BTreeMap::new(),
            },
        );
        handle
    }

    fn connect(&mut self, from: &NodeHandle, to: &NodeHandle, spec: EdgeSpec) -> EdgeHandle {
        let handle = EdgeHandle(Uuid::new_v4());
        self.edges.insert(
            handle.0,
            EdgeRecord {
                from: from.clone(),
                to: to.clone(),
                spec,
                fields: BTreeMap::new(),
            },
        );
        handle
    }

    fn set_field(
        &mut self,
        element: &ElementHandle,
        field: &str,
        value: &str,
    ) -> Result<(), SynthError> {
        let fields = match element {
            ElementHandle::Node(h) => self.nodes.get_mut(&h.0).map(|rec| &mut rec.fields),
            ElementHandle::Edge(h) => self.edges.get_mut(&h.0).map(|rec| &mut rec.fields),
        };
        let fields = fields.ok_or_else(|| SynthError::InvalidContainer {
            reason: format!("stale element handle for field '{field}'"),
        })?;
        fields.insert(field.to_string(), value.to_string());
        Ok(())
    }

    fn field(&self, element: &ElementHandle, field: &str) -> Option<&str> {
        let fields = match element {
            ElementHandle::Node(h) => self.nodes.get(&h.0).map(|rec| &rec.fields),
            ElementHandle::Edge(h) => self.edges.get(&h.0).map(|rec| &rec.fields),
        };
        fields.and_then(|f| f.get(field)).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_diagram_has_process_and_start() {
        let diagram = MemoryDiagram::new();
        assert!(diagram.root_process().is_some());
        assert!(diagram.find_start().is_some());
        assert_eq!(diagram.node_count(), 1);
        assert_eq!(diagram.edge_count(), 0);
    }

    #[test]
    fn empty_diagram_has_no_start() {
        let diagram = MemoryDiagram::empty();
        assert!(diagram.find_start().is_none());
    }

    #[test]
    fn create_connect_and_set_field() {
        let mut diagram = MemoryDiagram::new();
        let process = diagram.root_process().unwrap();
        let start = diagram.find_start().unwrap();
        let end = diagram.create_node(&process, NodeSpec::End, Position::new(200, 100));
        let edge = diagram.connect(&start, &end, EdgeSpec::labeled("done"));

        let element = ElementHandle::Edge(edge.clone());
        diagram.set_field(&element, CONDITION_FIELD, "x > 1").unwrap();
        assert_eq!(diagram.field(&element, CONDITION_FIELD), Some("x > 1"));

        let record = diagram.edge(&edge).unwrap();
        assert_eq!(record.from, start);
        assert_eq!(record.to, end);
        assert_eq!(record.spec.label.as_deref(), Some("done"));
    }

    #[test]
    fn set_field_on_stale_handle_fails() {
        let mut stale_source = MemoryDiagram::new();
        let process = stale_source.root_process().unwrap();
        let node = stale_source.create_node(&process, NodeSpec::End, Position::new(0, 0));

        let mut other = MemoryDiagram::new();
        let err = other
            .set_field(&ElementHandle::Node(node), "name", "x")
            .unwrap_err();
        assert_eq!(err.code(), "INVALID_CONTAINER");
    }
}
