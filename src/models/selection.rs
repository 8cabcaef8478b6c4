//! Source/target selection state for one ingestion session.

use std::collections::HashMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Default export file name used when the user leaves the field empty.
pub const DEFAULT_EXPORT_FILE: &str = "export.csv";

/// Where data comes from or goes to. Source and target are independent and
/// may be the same kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EndpointKind {
    #[default]
    ClickHouse,
    FlatFile,
}

impl EndpointKind {
    pub fn label(self) -> &'static str {
        match self {
            EndpointKind::ClickHouse => "ClickHouse",
            EndpointKind::FlatFile => "Flat File",
        }
    }
}

/// A locally chosen source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub size: u64,
    pub path: PathBuf,
}

/// Everything the user has picked for the current transfer.
///
/// The selected file is private: it can only change through [`select_file`]
/// and [`clear_file`], which bump a generation counter. The upload cache in
/// the orchestrator is keyed by that generation, so re-selecting a file —
/// even one with the same name — always invalidates a previously uploaded
/// handle.
///
/// [`select_file`]: SelectionState::select_file
/// [`clear_file`]: SelectionState::clear_file
#[derive(Debug, Clone)]
pub struct SelectionState {
    pub source: EndpointKind,
    pub target: EndpointKind,
    /// Ordered, duplicate-free list of selected tables.
    pub tables: Vec<String>,
    /// Selected columns per table.
    pub columns: HashMap<String, Vec<String>>,
    /// Target table name, required when the target is ClickHouse.
    pub target_table: String,
    /// Export file name, used when the target is a flat file.
    pub target_file: String,
    /// Field delimiter for flat-file data.
    pub delimiter: char,
    file: Option<SelectedFile>,
    file_generation: u64,
}

impl Default for SelectionState {
    fn default() -> Self {
        Self {
            source: EndpointKind::default(),
            target: EndpointKind::default(),
            tables: Vec::new(),
            columns: HashMap::new(),
            target_table: String::new(),
            target_file: DEFAULT_EXPORT_FILE.to_string(),
            delimiter: ',',
            file: None,
            file_generation: 0,
        }
    }
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a table to the selection, keeping the list duplicate-free.
    pub fn select_table(&mut self, table: impl Into<String>) {
        let table = table.into();
        if !self.tables.iter().any(|t| *t == table) {
            self.tables.push(table);
        }
    }

    /// Replace the column selection for a table.
    pub fn set_columns(&mut self, table: impl Into<String>, columns: Vec<String>) {
        self.columns.insert(table.into(), columns);
    }

    /// Select a local source file. Always bumps the file generation, so a
    /// cached upload handle from a previous selection can never be reused.
    pub fn select_file(&mut self, file: SelectedFile) {
        self.file = Some(file);
        self.file_generation += 1;
    }

    pub fn clear_file(&mut self) {
        self.file = None;
        self.file_generation += 1;
    }

    pub fn file(&self) -> Option<&SelectedFile> {
        self.file.as_ref()
    }

    pub fn file_generation(&self) -> u64 {
        self.file_generation
    }

    /// Export file name with the default substituted for an emptied field.
    pub fn export_file_name(&self) -> String {
        let name = self.target_file.trim();
        if name.is_empty() { DEFAULT_EXPORT_FILE.to_string() } else { name.to_string() }
    }
}
