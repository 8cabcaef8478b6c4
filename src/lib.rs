//! Workflow core for moving tabular data between a ClickHouse database and
//! flat files (CSV/TSV/TXT/JSON), in either direction.
//!
//! The crate models one user session driving one ingestion workflow:
//! - `models`: connection parameters and source/target selection
//! - `gateway`: the HTTP boundary to the transfer backend
//! - `workflow`: preview, orchestration state machine, and status reporting
//! - `config`: persistence of saved connection profiles

pub mod config;
pub mod error;
pub mod gateway;
pub mod helpers;
pub mod models;
pub mod workflow;

pub use config::ConfigManager;
pub use error::{Error, GatewayError, Result, StateError, ValidationError};
pub use gateway::{
    ConnectOutcome, HttpGateway, IngestOutcome, JobDescriptor, PreviewRow, TransferGateway,
    UploadedFile,
};
pub use models::{ConnectionConfig, EndpointKind, SavedProfile, SelectedFile, SelectionState};
pub use workflow::{
    EventCallback, IngestionOrchestrator, IngestionSession, JobOutcome, JobPhase,
    PreviewController, StatusReport, TransferEvent, report,
};
