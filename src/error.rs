//! Error types for the synthesizer.

use thiserror::Error;

/// Everything that can go wrong between picking a source file and having a
/// finished template in the diagram. No variant is recovered internally;
/// the orchestrator aborts on the first error and reports it verbatim.
#[derive(Debug, Error)]
pub enum SynthError {
    /// The splitter service URL is not a well-formed HTTP(S) URL.
    #[error("invalid splitter service url '{url}': {reason}")]
    InvalidServiceUrl { url: String, reason: String },

    /// Transport-level failure reaching the splitter service.
    #[error("splitter service unreachable: {reason}")]
    ServiceUnavailable { reason: String },

    /// The splitter service answered with a non-success HTTP status.
    #[error("splitter service rejected the request with HTTP {status}")]
    ServiceRejected { status: u16 },

    /// The response body did not match the expected metadata shape.
    #[error("malformed splitter response: {detail}")]
    MalformedResponse { detail: String },

    /// The target diagram has no root process or no locatable start event.
    #[error("diagram container is not extensible: {reason}")]
    InvalidContainer { reason: String },

    /// The split metadata carries no usable loop condition.
    #[error("split metadata contains no loop condition")]
    MissingLoopCondition,
}

impl SynthError {
    /// Stable error code for logs and notifications.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidServiceUrl { .. } => "INVALID_SERVICE_URL",
            Self::ServiceUnavailable { .. } => "SERVICE_UNAVAILABLE",
            Self::ServiceRejected { .. } => "SERVICE_REJECTED",
            Self::MalformedResponse { .. } => "MALFORMED_RESPONSE",
            Self::InvalidContainer { .. } => "INVALID_CONTAINER",
            Self::MissingLoopCondition => "MISSING_LOOP_CONDITION",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_distinct() {
        let errors = [
            SynthError::InvalidServiceUrl {
                url: "x".into(),
                reason: "y".into(),
            },
            SynthError::ServiceUnavailable { reason: "y".into() },
            SynthError::ServiceRejected { status: 500 },
            SynthError::MalformedResponse { detail: "y".into() },
            SynthError::InvalidContainer { reason: "y".into() },
            SynthError::MissingLoopCondition,
        ];
        let codes: std::collections::HashSet<_> = errors.iter().map(|e| e.code()).collect();
        assert_eq!(codes.len(), errors.len());
    }

    #[test]
    fn rejected_display_carries_status() {
        let err = SynthError::ServiceRejected { status: 404 };
        assert!(err.to_string().contains("404"));
    }
}
