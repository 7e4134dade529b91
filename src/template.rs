//! Workflow template construction.
//!
//! Stamps the fixed quantum-loop template into a diagram:
//!
//! ```text
//! Start → Preprocessing → Split ⇄ Quantum → Join → Postprocessing → End
//!                           ↑__________________|   (back-edge = loop guard)
//! ```
//!
//! The start event is found, never created; the remaining six nodes and
//! all seven edges are created fresh on every call, so repeated builds on
//! the same container produce independent, non-interacting subgraphs.

use crate::diagram::{
    DiagramHandle, EdgeHandle, EdgeSpec, GatewayKind, NodeSpec, Position, TaskKind,
};
use crate::error::SynthError;
use tracing::info;
use uuid::Uuid;

/// Display names from the stock template.
const PRE_TASK_NAME: &str = "Preprocessing Part";
const QUANTUM_TASK_NAME: &str = "Quantum Part";
const POST_TASK_NAME: &str = "Postprocessing Part";
const SPLIT_GATEWAY_NAME: &str = "Quantum-Loop";
const JOIN_GATEWAY_NAME: &str = "Quantum-Loop completed?";
const LOOP_REPEAT_LABEL: &str = "Quantum Loop not finished";
const LOOP_EXIT_LABEL: &str = "Quantum Loop finished";

/// Capability reference to the Join→Split back-edge whose condition the
/// injector rewrites. The container keeps ownership of the edge.
#[derive(Debug, Clone)]
pub struct LoopGuard {
    edge: EdgeHandle,
}

impl LoopGuard {
    pub fn edge(&self) -> &EdgeHandle {
        &self.edge
    }
}

/// External-worker topics for one template instantiation.
///
/// Each topic gets its own v4 UUID suffix, so the three are pairwise
/// distinct by construction and never collide across instantiations.
#[derive(Debug, Clone)]
struct Topics {
    pre: String,
    quantum: String,
    post: String,
}

impl Topics {
    fn generate() -> Self {
        Self {
            pre: format!("PreTopic_{}", Uuid::new_v4().simple()),
            quantum: format!("QuantumTopic_{}", Uuid::new_v4().simple()),
            post: format!("PostTopic_{}", Uuid::new_v4().simple()),
        }
    }
}

/// Build one instance of the quantum-loop template in `diagram`.
///
/// Creates exactly 6 nodes and 7 edges and returns the loop-guard handle.
/// Fails with `InvalidContainer` when the diagram has no root process or
/// no start event to attach to.
pub fn build(diagram: &mut dyn DiagramHandle) -> Result<LoopGuard, SynthError> {
    let process = diagram
        .root_process()
        .ok_or_else(|| SynthError::InvalidContainer {
            reason: "no root process".to_string(),
        })?;
    let start = diagram
        .find_start()
        .ok_or_else(|| SynthError::InvalidContainer {
            reason: "no start event".to_string(),
        })?;

    let topics = Topics::generate();

    let preprocess = diagram.create_node(
        &process,
        NodeSpec::Task {
            task: TaskKind::Preprocess,
            name: PRE_TASK_NAME.to_string(),
            topic: topics.pre,
        },
        Position::new(150, 100),
    );
    let split = diagram.create_node(
        &process,
        NodeSpec::Gateway {
            gateway: GatewayKind::Split,
            name: SPLIT_GATEWAY_NAME.to_string(),
        },
        Position::new(300, 100),
    );
    let quantum = diagram.create_node(
        &process,
        NodeSpec::Task {
            task: TaskKind::Quantum,
            name: QUANTUM_TASK_NAME.to_string(),
            topic: topics.quantum,
        },
        Position::new(450, 100),
    );
    let join = diagram.create_node(
        &process,
        NodeSpec::Gateway {
            gateway: GatewayKind::Join,
            name: JOIN_GATEWAY_NAME.to_string(),
        },
        Position::new(600, 100),
    );
    let postprocess = diagram.create_node(
        &process,
        NodeSpec::Task {
            task: TaskKind::Postprocess,
            name: POST_TASK_NAME.to_string(),
            topic: topics.post,
        },
        Position::new(750, 100),
    );
    let end = diagram.create_node(&process, NodeSpec::End, Position::new(900, 100));

    diagram.connect(&start, &preprocess, EdgeSpec::default());
    diagram.connect(&preprocess, &split, EdgeSpec::default());
    diagram.connect(&split, &quantum, EdgeSpec::default());
    diagram.connect(&quantum, &join, EdgeSpec::default());
    let loop_guard = diagram.connect(&join, &split, EdgeSpec::labeled(LOOP_REPEAT_LABEL));
    diagram.connect(&join, &postprocess, EdgeSpec::labeled(LOOP_EXIT_LABEL));
    diagram.connect(&postprocess, &end, EdgeSpec::default());

    info!("quantum-loop template built");
    Ok(LoopGuard { edge: loop_guard })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagram::MemoryDiagram;
    use std::collections::HashSet;

    #[test]
    fn builds_six_nodes_and_seven_edges() {
        let mut diagram = MemoryDiagram::new();
        build(&mut diagram).unwrap();
        // start pre-exists, six created
        assert_eq!(diagram.node_count(), 7);
        assert_eq!(diagram.edge_count(), 7);
    }

    #[test]
    fn topology_is_fixed() {
        let mut diagram = MemoryDiagram::new();
        let guard = build(&mut diagram).unwrap();

        let find = |pred: &dyn Fn(&NodeSpec) -> bool| {
            diagram
                .nodes()
                .find(|(_, rec)| pred(&rec.spec))
                .map(|(h, _)| h)
                .unwrap()
        };
        let start = find(&|s| matches!(s, NodeSpec::Start));
        let pre = find(&|s| matches!(s, NodeSpec::Task { task: TaskKind::Preprocess, .. }));
        let split = find(&|s| matches!(s, NodeSpec::Gateway { gateway: GatewayKind::Split, .. }));
        let quantum = find(&|s| matches!(s, NodeSpec::Task { task: TaskKind::Quantum, .. }));
        let join = find(&|s| matches!(s, NodeSpec::Gateway { gateway: GatewayKind::Join, .. }));
        let post = find(&|s| matches!(s, NodeSpec::Task { task: TaskKind::Postprocess, .. }));
        let end = find(&|s| matches!(s, NodeSpec::End));

        let has_edge = |from: &crate::diagram::NodeHandle, to: &crate::diagram::NodeHandle| {
            diagram
                .edges()
                .any(|(_, rec)| rec.from == *from && rec.to == *to)
        };
        assert!(has_edge(&start, &pre));
        assert!(has_edge(&pre, &split));
        assert!(has_edge(&split, &quantum));
        assert!(has_edge(&quantum, &join));
        assert!(has_edge(&join, &split));
        assert!(has_edge(&join, &post));
        assert!(has_edge(&post, &end));

        // the guard is specifically the Join→Split back-edge, labeled
        let guard_edge = diagram.edge(guard.edge()).unwrap();
        assert_eq!(guard_edge.from, join);
        assert_eq!(guard_edge.to, split);
        assert_eq!(guard_edge.spec.label.as_deref(), Some(LOOP_REPEAT_LABEL));

        // the exit edge carries the opposite label
        let exit = diagram
            .edges()
            .find(|(_, rec)| rec.from == join && rec.to == post)
            .unwrap();
        assert_eq!(exit.1.spec.label.as_deref(), Some(LOOP_EXIT_LABEL));
    }

    #[test]
    fn topics_are_pairwise_distinct() {
        let mut diagram = MemoryDiagram::new();
        build(&mut diagram).unwrap();

        let topics: Vec<String> = diagram
            .nodes()
            .filter_map(|(_, rec)| match &rec.spec {
                NodeSpec::Task { topic, .. } => Some(topic.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(topics.len(), 3);
        let unique: HashSet<&String> = topics.iter().collect();
        assert_eq!(unique.len(), 3);
    }

    #[test]
    fn repeated_builds_are_independent() {
        let mut diagram = MemoryDiagram::new();
        let first = build(&mut diagram).unwrap();
        let second = build(&mut diagram).unwrap();

        assert_eq!(diagram.node_count(), 13);
        assert_eq!(diagram.edge_count(), 14);
        assert_ne!(first.edge(), second.edge());

        // topics of the second instance do not collide with the first
        let topics: Vec<String> = diagram
            .nodes()
            .filter_map(|(_, rec)| match &rec.spec {
                NodeSpec::Task { topic, .. } => Some(topic.clone()),
                _ => None,
            })
            .collect();
        let unique: HashSet<&String> = topics.iter().collect();
        assert_eq!(unique.len(), 6);
    }

    #[test]
    fn container_without_start_is_invalid() {
        let mut diagram = MemoryDiagram::empty();
        let err = build(&mut diagram).unwrap_err();
        assert_eq!(err.code(), "INVALID_CONTAINER");
        assert_eq!(diagram.node_count(), 0);
        assert_eq!(diagram.edge_count(), 0);
    }
}
