//! One user session driving the whole workflow: connection, selection,
//! preview, and the ingestion job, all against a single gateway.

use std::path::{Path, PathBuf};

use crate::config::ConfigManager;
use crate::error::{Result, StateError};
use crate::gateway::{ConnectOutcome, PreviewRow, TransferGateway};
use crate::models::{ConnectionConfig, SelectionState};
use crate::workflow::events::EventCallback;
use crate::workflow::orchestrator::{IngestionOrchestrator, JobOutcome, JobPhase};
use crate::workflow::preview::PreviewController;
use crate::workflow::status::{self, StatusReport};
use crate::{helpers, models::SavedProfile};

/// Owns the state of one ingestion session.
///
/// Connection settings are editable only while disconnected; once a
/// connection is established they are locked until [`disconnect`]. The
/// selection stays freely editable throughout.
///
/// [`disconnect`]: IngestionSession::disconnect
pub struct IngestionSession {
    gateway: Box<dyn TransferGateway>,
    config: ConnectionConfig,
    connected: bool,
    selection: SelectionState,
    preview: PreviewController,
    orchestrator: IngestionOrchestrator,
}

impl IngestionSession {
    pub fn new(gateway: Box<dyn TransferGateway>) -> Self {
        Self::with_config(gateway, ConnectionConfig::default())
    }

    pub fn with_config(gateway: Box<dyn TransferGateway>, config: ConnectionConfig) -> Self {
        Self {
            gateway,
            config,
            connected: false,
            selection: SelectionState::new(),
            preview: PreviewController::new(),
            orchestrator: IngestionOrchestrator::new(),
        }
    }

    pub fn config(&self) -> &ConnectionConfig {
        &self.config
    }

    /// Mutable access to the connection settings, refused while connected.
    pub fn config_mut(&mut self) -> Result<&mut ConnectionConfig> {
        if self.connected {
            return Err(StateError::ConfigLocked.into());
        }
        Ok(&mut self.config)
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// Validate the connection settings and open a session against the
    /// backend. An app-level refusal comes back as `success: false` and
    /// leaves the session disconnected.
    pub fn connect(&mut self) -> Result<ConnectOutcome> {
        self.config.validate()?;
        let outcome = self.gateway.connect(&self.config)?;
        if outcome.success {
            self.connected = true;
            log::info!("connected to {}:{}", self.config.host, self.config.port);
        } else {
            log::warn!("connection refused: {}", outcome.message);
        }
        Ok(outcome)
    }

    /// Drop the session. Connection settings become editable again; the
    /// selection and any finished job state are left as they are.
    pub fn disconnect(&mut self) {
        self.connected = false;
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn selection_mut(&mut self) -> &mut SelectionState {
        &mut self.selection
    }

    /// Inspect and select a local source file. Rejected files (unsupported
    /// extension, over the size ceiling) leave the current selection
    /// untouched. A sniffed delimiter overrides the session's current one.
    pub fn choose_file(&mut self, path: &Path) -> Result<()> {
        let inspected = helpers::files::inspect(path)?;
        log::info!(
            "selected {} ({}, {} bytes)",
            inspected.file.name,
            inspected.format.label(),
            inspected.file.size
        );
        if let Some(delimiter) = inspected.delimiter {
            self.selection.delimiter = delimiter;
        }
        self.selection.select_file(inspected.file);
        Ok(())
    }

    /// Fetch a preview for the current selection.
    pub fn request_preview(&mut self) -> Result<&[PreviewRow]> {
        self.preview.request(&self.selection, self.gateway.as_ref())
    }

    pub fn preview_rows(&self) -> &[PreviewRow] {
        self.preview.rows()
    }

    /// Run the ingestion job for the current selection.
    pub fn start(&mut self) -> Result<JobOutcome> {
        self.orchestrator.start(&self.selection, self.gateway.as_ref())
    }

    pub fn phase(&self) -> JobPhase {
        self.orchestrator.phase()
    }

    /// Current user-facing status of the ingestion job.
    pub fn status(&self) -> StatusReport {
        status::report(&self.orchestrator.phase())
    }

    pub fn set_event_callback(&mut self, callback: EventCallback) {
        self.orchestrator.set_event_callback(callback);
    }

    /// Download the export produced by the last successful flat-file job
    /// into `dest_dir`, returning the written path.
    pub fn download_export(&self, dest_dir: &Path) -> Result<PathBuf> {
        let JobPhase::Succeeded { result_file: Some(name), .. } = self.orchestrator.phase() else {
            return Err(StateError::NoExportAvailable.into());
        };
        let dest = dest_dir.join(&name);
        let bytes = self.gateway.download(&name, &dest)?;
        log::info!("downloaded {name} ({bytes} bytes)");
        Ok(dest)
    }

    /// Clear the job state and the preview, keeping connection and selection.
    /// Connection settings stay locked while connected; use [`disconnect`]
    /// to unlock them.
    ///
    /// [`disconnect`]: IngestionSession::disconnect
    pub fn reset(&mut self) {
        self.orchestrator.reset();
        self.preview.clear();
    }

    /// Save the current connection settings as a named profile. The password
    /// is stripped before anything touches disk.
    pub fn save_profile(&self, manager: &ConfigManager, name: &str) -> Result<SavedProfile> {
        let profile = SavedProfile::new(name.to_string(), self.config.clone());
        manager.save_profile(&profile)?;
        Ok(profile)
    }

    /// Load a saved profile into the session. Refused while connected, same
    /// as any other settings edit.
    pub fn load_profile(&mut self, profile: &SavedProfile) -> Result<()> {
        *self.config_mut()? = profile.config.clone();
        Ok(())
    }
}
