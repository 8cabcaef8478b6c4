//! Status projection for UI feedback.

use super::orchestrator::JobPhase;

/// Point-in-time, user-facing view of an ingestion job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusReport {
    pub status: String,
    /// Coarse phase indicator in 0..=100, not a byte/row ratio.
    pub progress: u8,
    pub records: u64,
}

/// Project a job phase into status text, progress percent, and the records
/// transferred so far. Pure; carries no state of its own.
pub fn report(phase: &JobPhase) -> StatusReport {
    let (status, progress, records) = match phase {
        JobPhase::Idle => ("Idle".to_string(), 0, 0),
        JobPhase::Validating => ("Validating selection...".to_string(), 10, 0),
        JobPhase::Uploading => ("Uploading file...".to_string(), 30, 0),
        JobPhase::Transferring => ("Transferring data...".to_string(), 60, 0),
        JobPhase::Succeeded { records, .. } => {
            (format!("Ingestion complete: {records} records processed"), 100, *records)
        }
        // Progress stays at 0 so the record count surface hides itself.
        JobPhase::Failed { reason } => (format!("Failed: {reason}"), 0, 0),
    };
    StatusReport { status, progress, records }
}
