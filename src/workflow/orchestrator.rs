//! The ingestion state machine.
//!
//! One job at a time: `Idle → Validating → (Uploading) → Transferring →
//! Succeeded | Failed`. Validation failures are pre-flight and return the
//! machine to `Idle`; gateway failures land in `Failed` with the backend's
//! message. Terminal phases require an explicit `reset()` before the next
//! run — a job is created fresh each time, never resumed or retried.

use parking_lot::Mutex;

use crate::error::{GatewayError, Result, StateError, ValidationError};
use crate::gateway::{JobDescriptor, TransferGateway, UploadedFile};
use crate::helpers;
use crate::models::{EndpointKind, SelectionState};

use super::events::{EventCallback, TransferEvent};

/// Phase of the current (or last) ingestion job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobPhase {
    Idle,
    Validating,
    Uploading,
    Transferring,
    Succeeded {
        records: u64,
        /// Basename of the produced export, flat-file targets only. The
        /// download itself stays a separate, explicit action.
        result_file: Option<String>,
    },
    Failed {
        reason: String,
    },
}

impl Default for JobPhase {
    fn default() -> Self {
        JobPhase::Idle
    }
}

impl JobPhase {
    /// A job is in flight; a new `start()` must be rejected.
    pub fn is_active(&self) -> bool {
        matches!(self, JobPhase::Validating | JobPhase::Uploading | JobPhase::Transferring)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, JobPhase::Succeeded { .. } | JobPhase::Failed { .. })
    }
}

/// What a successful run hands back to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobOutcome {
    pub message: String,
    pub records: u64,
    pub result_file: Option<String>,
}

/// Upload handle memoized for the file generation it was uploaded under.
#[derive(Debug, Clone)]
struct CachedUpload {
    generation: u64,
    file: UploadedFile,
}

/// Drives one full transfer: validate → upload if needed → ingest.
///
/// State lives behind mutexes so a session can be shared across request
/// handlers; locks are never held across gateway calls.
#[derive(Default)]
pub struct IngestionOrchestrator {
    phase: Mutex<JobPhase>,
    upload_cache: Mutex<Option<CachedUpload>>,
    on_event: Mutex<Option<EventCallback>>,
}

impl IngestionOrchestrator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an observer for transfer events.
    pub fn set_event_callback(&self, callback: EventCallback) {
        *self.on_event.lock() = Some(callback);
    }

    pub fn phase(&self) -> JobPhase {
        self.phase.lock().clone()
    }

    /// Clear the job phase so a new run can start. The memoized upload
    /// handle survives; it is keyed by the selection's file generation, so
    /// re-selecting or clearing the file is what invalidates it.
    pub fn reset(&self) {
        *self.phase.lock() = JobPhase::Idle;
    }

    /// Run one ingestion job for the given selection.
    ///
    /// Sequential by design: the upload must finish before the ingest can
    /// reference its path. No automatic retry on any failure.
    pub fn start(
        &self,
        selection: &SelectionState,
        gateway: &dyn TransferGateway,
    ) -> Result<JobOutcome> {
        {
            let mut phase = self.phase.lock();
            if phase.is_active() {
                return Err(StateError::JobAlreadyRunning.into());
            }
            if phase.is_terminal() {
                return Err(StateError::JobNotReset.into());
            }
            *phase = JobPhase::Validating;
        }

        let mut job = match build_job(selection) {
            Ok(job) => job,
            Err(err) => {
                // Pre-flight failure: nothing reached the gateway, so the
                // machine goes back to Idle rather than a terminal Failed.
                *self.phase.lock() = JobPhase::Idle;
                return Err(err.into());
            }
        };

        self.emit(TransferEvent::Started);

        if selection.source == EndpointKind::FlatFile {
            let Some(file) = selection.file() else {
                *self.phase.lock() = JobPhase::Idle;
                return Err(ValidationError::NoFileSelected.into());
            };
            let generation = selection.file_generation();

            let cached = self.upload_cache.lock().clone();
            let uploaded = match cached.filter(|c| c.generation == generation) {
                Some(cached) => {
                    log::debug!("reusing uploaded handle for {}", file.name);
                    cached.file
                }
                None => {
                    *self.phase.lock() = JobPhase::Uploading;
                    match gateway.upload(file) {
                        Ok(uploaded) => {
                            *self.upload_cache.lock() =
                                Some(CachedUpload { generation, file: uploaded.clone() });
                            self.emit(TransferEvent::FileUploaded {
                                path: uploaded.path.clone(),
                            });
                            uploaded
                        }
                        // Fail fast: no transfer attempt after a failed upload
                        Err(err) => return self.fail(err),
                    }
                }
            };
            job.file_path = uploaded.path;
        }

        *self.phase.lock() = JobPhase::Transferring;
        log::info!(
            "starting ingest: {} -> {}",
            job.source.label(),
            job.target.label()
        );

        let outcome = match gateway.ingest(&job) {
            Ok(outcome) => outcome,
            Err(err) => return self.fail(err),
        };

        let result_file = match job.target {
            EndpointKind::FlatFile => outcome.file_path.as_deref().map(helpers::safe_filename),
            EndpointKind::ClickHouse => None,
        };

        *self.phase.lock() =
            JobPhase::Succeeded { records: outcome.records, result_file: result_file.clone() };
        self.emit(TransferEvent::Completed { records: outcome.records });
        log::info!("ingest finished: {} records", outcome.records);

        Ok(JobOutcome { message: outcome.message, records: outcome.records, result_file })
    }

    fn fail(&self, err: GatewayError) -> Result<JobOutcome> {
        // The reason is the gateway's message, never synthesized here
        let reason = err.to_string();
        *self.phase.lock() = JobPhase::Failed { reason: reason.clone() };
        self.emit(TransferEvent::Failed { error: reason });
        Err(err.into())
    }

    fn emit(&self, event: TransferEvent) {
        if let Some(callback) = self.on_event.lock().clone() {
            callback(&event);
        }
    }
}

/// Validate the selection and build the descriptor, short-circuiting on the
/// first failure. The file path is resolved later, after the upload step.
fn build_job(selection: &SelectionState) -> std::result::Result<JobDescriptor, ValidationError> {
    match selection.source {
        EndpointKind::ClickHouse if selection.tables.is_empty() => {
            return Err(ValidationError::NoSourceTableSelected);
        }
        EndpointKind::FlatFile if selection.file().is_none() => {
            return Err(ValidationError::NoFileSelected);
        }
        _ => {}
    }

    if selection.target == EndpointKind::ClickHouse && selection.target_table.trim().is_empty() {
        return Err(ValidationError::NoTargetTableSpecified);
    }

    let target_file = match selection.target {
        EndpointKind::FlatFile => {
            let name = selection.export_file_name();
            if !helpers::has_csv_extension(&name) {
                log::warn!("export file name {name:?} does not end in .csv");
            }
            Some(name)
        }
        EndpointKind::ClickHouse => None,
    };
    let target_table = match selection.target {
        EndpointKind::ClickHouse => Some(selection.target_table.trim().to_string()),
        EndpointKind::FlatFile => None,
    };

    Ok(JobDescriptor {
        source: selection.source,
        target: selection.target,
        tables: selection.tables.clone(),
        columns: selection.columns.clone(),
        file_path: String::new(),
        target_file,
        target_table,
    })
}
