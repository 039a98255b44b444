//! The spreadsheet-like store abstraction.

use async_trait::async_trait;
use std::sync::Arc;

use domain::models::Sheet;

use crate::error::StoreError;

/// A workbook of named, row-oriented sheets.
///
/// Reads return snapshots: callers resolve sheets and run heuristics over
/// plain [`Sheet`] values, then issue targeted writes by sheet name. Writes
/// on one sheet are serialized by the backend, but a read followed by a
/// write is not atomic — concurrent submissions can interleave between the
/// duplicate check and the append. That matches the upstream behavior and
/// is documented rather than fixed.
#[async_trait]
pub trait SheetStore: Send + Sync {
    /// Names of all sheets, in workbook order.
    async fn sheet_names(&self) -> Result<Vec<String>, StoreError>;

    /// Snapshot of one sheet, or `None` if no such sheet exists.
    async fn snapshot(&self, name: &str) -> Result<Option<Sheet>, StoreError>;

    /// Snapshot of every sheet, in workbook order.
    async fn snapshot_all(&self) -> Result<Vec<Sheet>, StoreError>;

    /// Appends a row after the current last row of `sheet`.
    async fn append_row(&self, sheet: &str, row: Vec<String>) -> Result<(), StoreError>;

    /// Replaces an entire row, extending the sheet with empty rows if
    /// `index` is past the end. Cells beyond the new row's length are
    /// dropped.
    async fn write_row(&self, sheet: &str, index: usize, row: Vec<String>)
        -> Result<(), StoreError>;

    /// Writes one cell, extending the row with empty cells as needed.
    async fn write_cell(
        &self,
        sheet: &str,
        row: usize,
        col: usize,
        value: String,
    ) -> Result<(), StoreError>;

    /// Creates an empty sheet. A no-op if the name already exists.
    async fn create_sheet(&self, name: &str) -> Result<(), StoreError>;
}

/// Shared handle to a store implementation.
pub type DynSheetStore = Arc<dyn SheetStore>;
