//! The boundary to the transfer backend.
//!
//! This module provides:
//! - `TransferGateway`: the trait the workflow drives (mockable in tests)
//! - `http`: the HTTP implementation over the backend's endpoints
//! - typed request/response values shared by both

pub mod http;

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::GatewayError;
use crate::models::{ConnectionConfig, EndpointKind, SelectedFile};

pub use http::HttpGateway;

/// One preview row: column name → value, in server order. Relies on
/// serde_json's `preserve_order` feature; without it the map alphabetizes
/// its keys and consumers lose the backend's column order.
pub type PreviewRow = serde_json::Map<String, serde_json::Value>;

/// Result of a connect attempt. A refused connection is `success: false`
/// with a human-readable message, not an error.
#[derive(Debug, Clone, Deserialize)]
pub struct ConnectOutcome {
    pub success: bool,
    #[serde(default)]
    pub message: String,
}

/// Server-side handle to a previously uploaded source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedFile {
    pub path: String,
    pub name: String,
    pub size: u64,
}

/// Backend response to a completed ingest run.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestOutcome {
    #[serde(default)]
    pub message: String,
    pub records: u64,
    #[serde(default)]
    pub file_path: Option<String>,
}

/// Fully resolved description of one ingest run, as sent to the backend.
/// `target_file` is present only for flat-file targets, `target_table` only
/// for ClickHouse targets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobDescriptor {
    pub source: EndpointKind,
    pub target: EndpointKind,
    pub tables: Vec<String>,
    pub columns: HashMap<String, Vec<String>>,
    pub file_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_table: Option<String>,
}

/// The operations the workflow core needs from the transfer backend.
///
/// Every call is a single blocking request/response; large transfers are
/// chunked inside the backend, invisibly to callers. Implementations must
/// surface backend failure messages verbatim.
pub trait TransferGateway: Send + Sync {
    /// Open a session against the configured database. App-level refusal is
    /// reported through the outcome, transport failure through the error.
    fn connect(&self, config: &ConnectionConfig) -> Result<ConnectOutcome, GatewayError>;

    /// Fetch a bounded row sample of one table. The row limit is enforced
    /// server-side and not re-validated here.
    fn preview(&self, table: &str, columns: &[String]) -> Result<Vec<PreviewRow>, GatewayError>;

    /// Upload a local source file, returning the server-side handle.
    fn upload(&self, file: &SelectedFile) -> Result<UploadedFile, GatewayError>;

    /// Run one full transfer described by the job descriptor.
    fn ingest(&self, job: &JobDescriptor) -> Result<IngestOutcome, GatewayError>;

    /// Retrieve a previously produced export into `dest`. Returns the number
    /// of bytes written.
    fn download(&self, filename: &str, dest: &Path) -> Result<u64, GatewayError>;
}
