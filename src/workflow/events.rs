//! Workflow events for reactive consumers.
//!
//! The callback is the extension point for finer-grained progress: the
//! minimal contract stays coarse (phase-level), and consumers that need more
//! subscribe here instead of polling the orchestrator.

use std::sync::Arc;

/// Events emitted by the orchestrator over the course of one job.
#[derive(Debug, Clone)]
pub enum TransferEvent {
    /// Validation passed; the job is underway.
    Started,
    /// Source file upload finished (fresh upload only, not a cache hit).
    FileUploaded { path: String },
    /// Transfer finished successfully.
    Completed { records: u64 },
    /// Upload or transfer failed with the backend's message.
    Failed { error: String },
}

/// Callback type for observing transfer events.
pub type EventCallback = Arc<dyn Fn(&TransferEvent) + Send + Sync>;
