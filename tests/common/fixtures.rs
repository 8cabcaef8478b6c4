//! Shared fixtures: canned selections, gateway responses, and sample files.

use std::io::Write;
use std::path::PathBuf;

use serde_json::json;
use tempfile::TempDir;

use clickbridge::{
    ConnectOutcome, EndpointKind, IngestOutcome, PreviewRow, SelectionState, UploadedFile,
};

pub fn connected() -> ConnectOutcome {
    ConnectOutcome { success: true, message: "Connected successfully".to_string() }
}

/// A ClickHouse → flat-file selection over `events` with id and ts columns.
pub fn export_selection() -> SelectionState {
    let mut selection = SelectionState::new();
    selection.source = EndpointKind::ClickHouse;
    selection.target = EndpointKind::FlatFile;
    selection.select_table("events");
    selection.set_columns("events", vec!["id".to_string(), "ts".to_string()]);
    selection
}

/// A flat-file → ClickHouse selection targeting `orders`, with a real 2KB
/// CSV file on disk. The `TempDir` must outlive the selection.
pub fn import_selection(dir: &TempDir) -> SelectionState {
    let mut selection = SelectionState::new();
    selection.source = EndpointKind::FlatFile;
    selection.target = EndpointKind::ClickHouse;
    selection.target_table = "orders".to_string();

    let path = write_orders_csv(dir);
    let size = std::fs::metadata(&path).expect("stat fixture csv").len();
    selection.select_file(clickbridge::SelectedFile {
        name: "orders.csv".to_string(),
        size,
        path,
    });
    selection
}

/// Write a ~2KB orders CSV into `dir` and return its path.
pub fn write_orders_csv(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("orders.csv");
    let mut file = std::fs::File::create(&path).expect("create fixture csv");
    writeln!(file, "id,amount,currency").expect("write header");
    for i in 0..80 {
        writeln!(file, "{i},{}.50,EUR", i * 3).expect("write row");
    }
    path
}

pub fn uploaded_orders() -> UploadedFile {
    UploadedFile {
        path: "/uploads/orders.csv".to_string(),
        name: "orders.csv".to_string(),
        size: 2048,
    }
}

pub fn ingest_success(records: u64, file_path: Option<&str>) -> IngestOutcome {
    serde_json::from_value(json!({
        "message": "Data ingestion completed",
        "records": records,
        "filePath": file_path,
    }))
    .expect("build ingest outcome")
}

/// Preview rows shaped like the backend's JSON: column name → value.
pub fn preview_rows(count: usize) -> Vec<PreviewRow> {
    (0..count)
        .map(|i| {
            let row = json!({ "id": i, "ts": format!("2026-08-{:02}", i % 28 + 1) });
            match row {
                serde_json::Value::Object(map) => map,
                _ => unreachable!(),
            }
        })
        .collect()
}
