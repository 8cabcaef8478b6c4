//! Bounded-row preview of a selected ClickHouse table.

use crate::error::{Error, ValidationError};
use crate::gateway::{PreviewRow, TransferGateway};
use crate::models::SelectionState;

/// Validates the selection, fetches a row sample, and holds the latest
/// result. Each successful request replaces the previous rows; nothing is
/// cached between calls.
#[derive(Debug, Default)]
pub struct PreviewController {
    rows: Vec<PreviewRow>,
}

impl PreviewController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch a preview for the current selection.
    ///
    /// Only the first selected table is previewed — a deliberate
    /// simplification of this workflow, not an oversight. Both preconditions
    /// fail locally, before any gateway call.
    pub fn request(
        &mut self,
        selection: &SelectionState,
        gateway: &dyn TransferGateway,
    ) -> Result<&[PreviewRow], Error> {
        let Some(table) = selection.tables.first() else {
            return Err(ValidationError::NoTableSelected.into());
        };
        let columns = selection
            .columns
            .get(table)
            .filter(|columns| !columns.is_empty())
            .ok_or(ValidationError::NoColumnSelected)?;

        let rows = gateway.preview(table, columns)?;
        log::info!("preview loaded: {} rows from {table}", rows.len());
        self.rows = rows;
        Ok(&self.rows)
    }

    /// Rows from the most recent successful request.
    pub fn rows(&self) -> &[PreviewRow] {
        &self.rows
    }

    pub fn clear(&mut self) {
        self.rows.clear();
    }
}
