//! End-to-end orchestration: split, build, inject, report.

use crate::client::SplitClient;
use crate::diagram::DiagramHandle;
use crate::error::SynthError;
use crate::inject;
use crate::notify::{NotificationKind, NotificationSink};
use crate::template;
use tracing::{info, warn};

const NOTIFICATION_TITLE: &str = "Script Splitter";
const NOTIFICATION_DURATION_MS: u64 = 10_000;

/// Permanent limitation: the generated template references external-worker
/// topics, but nothing starts the polling agents that serve them.
pub const POLLING_AGENT_REMINDER: &str = "polling agents must be started manually";

/// What a successful run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryReport {
    /// The condition text written onto the loop-guard edge.
    pub loop_condition: String,
}

impl SummaryReport {
    /// Human-readable summary for the notification sink.
    pub fn message(&self) -> String {
        format!(
            "Loop-Condition found: {} ----> {}!",
            self.loop_condition, POLLING_AGENT_REMINDER
        )
    }
}

/// Sequences one template synthesis: call the splitter, stamp the
/// template, inject the loop condition, report.
///
/// The splitter call runs first, so a dead service leaves the diagram
/// untouched. No partial-state rollback: if injection fails after a
/// successful build, the template stays in the container without a valid
/// loop condition, visible and correctable by the user.
#[derive(Debug, Clone)]
pub struct Orchestrator {
    client: SplitClient,
}

impl Orchestrator {
    pub fn new(client: SplitClient) -> Self {
        Self { client }
    }

    /// Convenience constructor from a service URL.
    pub fn for_service(service_url: &str) -> Result<Self, SynthError> {
        Ok(Self::new(SplitClient::new(service_url)?))
    }

    /// Run one synthesis against `diagram`, reporting progress and the
    /// outcome through `sink`. Errors are notified and then returned
    /// unchanged. The caller must not run two orchestrations against the
    /// same container concurrently.
    pub async fn run(
        &self,
        source_file_id: &str,
        diagram: &mut dyn DiagramHandle,
        sink: &dyn NotificationSink,
    ) -> Result<SummaryReport, SynthError> {
        sink.notify(
            NotificationKind::Info,
            NOTIFICATION_TITLE,
            "Starting the splitting algorithm.",
            NOTIFICATION_DURATION_MS,
        );

        let result = self.run_inner(source_file_id, diagram).await;
        match &result {
            Ok(report) => {
                info!(condition = %report.loop_condition, "workflow template synthesized");
                sink.notify(
                    NotificationKind::Info,
                    NOTIFICATION_TITLE,
                    &report.message(),
                    NOTIFICATION_DURATION_MS,
                );
            }
            Err(err) => {
                warn!(code = err.code(), "workflow synthesis failed: {err}");
                sink.notify(
                    NotificationKind::Error,
                    NOTIFICATION_TITLE,
                    &err.to_string(),
                    NOTIFICATION_DURATION_MS,
                );
            }
        }
        result
    }

    async fn run_inner(
        &self,
        source_file_id: &str,
        diagram: &mut dyn DiagramHandle,
    ) -> Result<SummaryReport, SynthError> {
        let metadata = self.client.split(source_file_id).await?;
        let guard = template::build(diagram)?;
        inject::inject(diagram, &guard, &metadata)?;

        // inject validated the selection, so this cannot fail here
        let loop_condition = metadata.selected_loop_condition()?.to_string();
        Ok(SummaryReport { loop_condition })
    }
}
