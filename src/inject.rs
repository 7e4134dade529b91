//! Loop-condition injection.

use crate::diagram::{DiagramHandle, ElementHandle, CONDITION_FIELD};
use crate::error::SynthError;
use crate::metadata::SplitMetadata;
use crate::template::LoopGuard;
use tracing::debug;

/// Write the selected loop condition onto the loop-guard edge.
///
/// The condition is resolved before any mutation, so a metadata record
/// with no conditions fails with `MissingLoopCondition` and leaves the
/// edge untouched. Re-running with the same metadata writes the same
/// text; the operation is idempotent.
pub fn inject(
    diagram: &mut dyn DiagramHandle,
    guard: &LoopGuard,
    metadata: &SplitMetadata,
) -> Result<(), SynthError> {
    let condition = metadata.selected_loop_condition()?;
    diagram.set_field(
        &ElementHandle::Edge(guard.edge().clone()),
        CONDITION_FIELD,
        condition,
    )?;
    debug!(condition, "loop condition injected");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagram::MemoryDiagram;
    use crate::template;

    fn metadata(conditions: &[&str]) -> SplitMetadata {
        SplitMetadata {
            pre_start: 12,
            quantum_start: 26,
            post_start: 87,
            loop_conditions: conditions.iter().map(|c| c.to_string()).collect(),
        }
    }

    fn guard_condition(diagram: &MemoryDiagram, guard: &LoopGuard) -> Option<String> {
        diagram
            .field(&ElementHandle::Edge(guard.edge().clone()), CONDITION_FIELD)
            .map(str::to_string)
    }

    #[test]
    fn writes_first_condition() {
        let mut diagram = MemoryDiagram::new();
        let guard = template::build(&mut diagram).unwrap();

        inject(&mut diagram, &guard, &metadata(&["A", "B"])).unwrap();
        assert_eq!(guard_condition(&diagram, &guard).as_deref(), Some("A"));
    }

    #[test]
    fn injection_is_idempotent() {
        let mut diagram = MemoryDiagram::new();
        let guard = template::build(&mut diagram).unwrap();
        let meta = metadata(&["iterator < list.length"]);

        inject(&mut diagram, &guard, &meta).unwrap();
        let first = guard_condition(&diagram, &guard);
        inject(&mut diagram, &guard, &meta).unwrap();
        assert_eq!(guard_condition(&diagram, &guard), first);
    }

    #[test]
    fn empty_conditions_leave_edge_unmutated() {
        let mut diagram = MemoryDiagram::new();
        let guard = template::build(&mut diagram).unwrap();

        let err = inject(&mut diagram, &guard, &metadata(&[])).unwrap_err();
        assert_eq!(err.code(), "MISSING_LOOP_CONDITION");
        assert_eq!(guard_condition(&diagram, &guard), None);
    }
}
