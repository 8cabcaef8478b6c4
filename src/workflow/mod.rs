//! The ingestion workflow: preview, orchestration state machine, status
//! projection, and the session context that owns them.

pub mod events;
pub mod orchestrator;
pub mod preview;
pub mod session;
pub mod status;

pub use events::{EventCallback, TransferEvent};
pub use orchestrator::{IngestionOrchestrator, JobOutcome, JobPhase};
pub use preview::PreviewController;
pub use session::IngestionSession;
pub use status::{StatusReport, report};
