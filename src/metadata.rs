//! Wire-level metadata returned by the splitter service.

use crate::error::SynthError;
use serde::{Deserialize, Serialize};

/// Result of running the splitting algorithm over one source script.
///
/// The service reports where the pre-processing, quantum, and
/// post-processing regions begin (1-based line numbers) plus the ordered
/// loop continuation conditions it extracted. Immutable once received.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitMetadata {
    /// First line of the pre-processing region.
    #[serde(rename = "PreStart")]
    pub pre_start: u32,
    /// First line of the quantum region.
    #[serde(rename = "QuantumStart")]
    pub quantum_start: u32,
    /// First line of the post-processing region.
    #[serde(rename = "PostStart")]
    pub post_start: u32,
    /// Extracted loop continuation conditions, in source order.
    #[serde(rename = "LoopConditions")]
    pub loop_conditions: Vec<String>,
}

impl SplitMetadata {
    /// The authoritative loop condition: the first entry.
    ///
    /// The splitter reports conditions in source order, so the first one
    /// guards the loop the template models. Empty list is an error.
    pub fn selected_loop_condition(&self) -> Result<&str, SynthError> {
        self.loop_conditions
            .first()
            .map(String::as_str)
            .ok_or(SynthError::MissingLoopCondition)
    }
}
