//! Common test utilities for the workflow integration tests.
//!
//! `MockGateway` is a scripted [`TransferGateway`]: each operation returns
//! whatever the test queued for it and counts its calls, so tests can assert
//! both outcomes and traffic (e.g. that a memoized upload never repeats).

#![allow(dead_code)]

pub mod fixtures;

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;

use clickbridge::{
    ConnectOutcome, ConnectionConfig, GatewayError, IngestOutcome, JobDescriptor, PreviewRow,
    SelectedFile, TransferGateway, UploadedFile,
};

type GatewayResult<T> = std::result::Result<T, GatewayError>;

/// Enable log output for a test when `RUST_LOG` is set.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Hook invoked from inside `ingest`, before the scripted response is
/// returned. Used to observe or poke the orchestrator mid-job.
pub type IngestHook = Arc<dyn Fn(&JobDescriptor) + Send + Sync>;

#[derive(Default)]
struct Script {
    connect: Vec<GatewayResult<ConnectOutcome>>,
    preview: Vec<GatewayResult<Vec<PreviewRow>>>,
    upload: Vec<GatewayResult<UploadedFile>>,
    ingest: Vec<GatewayResult<IngestOutcome>>,
    download: Vec<GatewayResult<u64>>,
}

#[derive(Debug, Default)]
pub struct CallCounts {
    pub connect: AtomicUsize,
    pub preview: AtomicUsize,
    pub upload: AtomicUsize,
    pub ingest: AtomicUsize,
    pub download: AtomicUsize,
}

/// Scripted transfer backend. Responses are consumed in FIFO order; an
/// operation with an exhausted script fails the test with a panic, which is
/// always a bug in the test's expectations about traffic.
#[derive(Default)]
pub struct MockGateway {
    script: Mutex<Script>,
    pub calls: CallCounts,
    ingest_hook: Mutex<Option<IngestHook>>,
    last_job: Mutex<Option<JobDescriptor>>,
    last_preview: Mutex<Option<(String, Vec<String>)>>,
}

impl MockGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn queue_connect(&self, outcome: GatewayResult<ConnectOutcome>) {
        self.script.lock().connect.push(outcome);
    }

    pub fn queue_preview(&self, outcome: GatewayResult<Vec<PreviewRow>>) {
        self.script.lock().preview.push(outcome);
    }

    pub fn queue_upload(&self, outcome: GatewayResult<UploadedFile>) {
        self.script.lock().upload.push(outcome);
    }

    pub fn queue_ingest(&self, outcome: GatewayResult<IngestOutcome>) {
        self.script.lock().ingest.push(outcome);
    }

    pub fn queue_download(&self, outcome: GatewayResult<u64>) {
        self.script.lock().download.push(outcome);
    }

    pub fn set_ingest_hook(&self, hook: IngestHook) {
        *self.ingest_hook.lock() = Some(hook);
    }

    /// The descriptor the most recent `ingest` call received.
    pub fn last_job(&self) -> Option<JobDescriptor> {
        self.last_job.lock().clone()
    }

    /// Table and columns of the most recent `preview` call.
    pub fn last_preview(&self) -> Option<(String, Vec<String>)> {
        self.last_preview.lock().clone()
    }

    fn next<T>(queue: &mut Vec<GatewayResult<T>>, op: &str) -> GatewayResult<T> {
        if queue.is_empty() {
            panic!("unscripted {op} call");
        }
        queue.remove(0)
    }
}

impl TransferGateway for MockGateway {
    fn connect(&self, _config: &ConnectionConfig) -> GatewayResult<ConnectOutcome> {
        self.calls.connect.fetch_add(1, Ordering::SeqCst);
        Self::next(&mut self.script.lock().connect, "connect")
    }

    fn preview(&self, table: &str, columns: &[String]) -> GatewayResult<Vec<PreviewRow>> {
        self.calls.preview.fetch_add(1, Ordering::SeqCst);
        *self.last_preview.lock() = Some((table.to_string(), columns.to_vec()));
        Self::next(&mut self.script.lock().preview, "preview")
    }

    fn upload(&self, _file: &SelectedFile) -> GatewayResult<UploadedFile> {
        self.calls.upload.fetch_add(1, Ordering::SeqCst);
        Self::next(&mut self.script.lock().upload, "upload")
    }

    fn ingest(&self, job: &JobDescriptor) -> GatewayResult<IngestOutcome> {
        self.calls.ingest.fetch_add(1, Ordering::SeqCst);
        *self.last_job.lock() = Some(job.clone());
        let hook = self.ingest_hook.lock().clone();
        if let Some(hook) = hook {
            hook(job);
        }
        Self::next(&mut self.script.lock().ingest, "ingest")
    }

    fn download(&self, _filename: &str, dest: &Path) -> GatewayResult<u64> {
        self.calls.download.fetch_add(1, Ordering::SeqCst);
        let result = Self::next(&mut self.script.lock().download, "download");
        if let Ok(bytes) = &result {
            std::fs::write(dest, vec![b'x'; *bytes as usize])?;
        }
        result
    }
}
