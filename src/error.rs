use thiserror::Error;

/// Pre-flight validation failures. Resolved locally; a validation error never
/// reaches the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("select at least one table to preview")]
    NoTableSelected,

    #[error("select at least one column to preview")]
    NoColumnSelected,

    #[error("select at least one table to ingest")]
    NoSourceTableSelected,

    #[error("select a file before starting the ingestion")]
    NoFileSelected,

    #[error("specify a target table name")]
    NoTargetTableSpecified,

    #[error("missing required connection field: {0}")]
    MissingConnectionField(&'static str),
}

/// Failures surfaced by the transfer backend. The scripted variants carry the
/// backend's message verbatim; the rest are transport-level conversions.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("{0}")]
    Connect(String),

    #[error("{0}")]
    Preview(String),

    #[error("{0}")]
    Upload(String),

    #[error("{0}")]
    Ingest(String),

    #[error("{0}")]
    Download(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// An operation was attempted outside its valid workflow state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StateError {
    #[error("a transfer job is already running")]
    JobAlreadyRunning,

    #[error("previous job has finished; reset the session before starting a new one")]
    JobNotReset,

    #[error("connection settings are locked while connected")]
    ConfigLocked,

    #[error("no export file is available for download")]
    NoExportAvailable,
}

/// A local source file was rejected before selection.
#[derive(Debug, Error)]
pub enum FileError {
    #[error("unsupported file type {0:?} (expected csv, tsv, txt, or json)")]
    UnsupportedFormat(String),

    #[error("file is {size} bytes, over the {limit} byte upload limit")]
    TooLarge { size: u64, limit: u64 },

    #[error("failed to read file: {0}")]
    Io(#[from] std::io::Error),
}

/// Application-wide error type
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error(transparent)]
    State(#[from] StateError),

    #[error(transparent)]
    File(#[from] FileError),

    #[error("config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience Result type using our Error
pub type Result<T> = std::result::Result<T, Error>;
