//! Workflow template synthesizer for split quantum scripts.
//!
//! Given a source script identifier, this crate asks an external
//! script-splitter service where the pre-processing, quantum, and
//! post-processing regions of the script begin, stamps a fixed
//! quantum-loop workflow template into a caller-supplied diagram, and
//! writes the reported loop condition onto the template's back-edge.
//!
//! The diagram itself is external: all mutation goes through the
//! [`diagram::DiagramHandle`] capability, and user-facing messages go
//! through [`notify::NotificationSink`]. The crate holds no state across
//! invocations.
//!
//! ```no_run
//! use qsplit_workflow::diagram::MemoryDiagram;
//! use qsplit_workflow::notify::TracingSink;
//! use qsplit_workflow::orchestrator::Orchestrator;
//!
//! # async fn run() -> Result<(), qsplit_workflow::error::SynthError> {
//! let mut diagram = MemoryDiagram::new();
//! let orchestrator = Orchestrator::for_service("http://127.0.0.1:5000/scriptSplitter")?;
//! let report = orchestrator
//!     .run("Example/exampleScript.py", &mut diagram, &TracingSink)
//!     .await?;
//! println!("{}", report.message());
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod codegen;
pub mod diagram;
pub mod error;
pub mod inject;
pub mod metadata;
pub mod notify;
pub mod orchestrator;
pub mod template;

pub use client::SplitClient;
pub use diagram::{DiagramHandle, MemoryDiagram};
pub use error::SynthError;
pub use metadata::SplitMetadata;
pub use notify::{NotificationKind, NotificationSink};
pub use orchestrator::{Orchestrator, SummaryReport};
pub use template::LoopGuard;
