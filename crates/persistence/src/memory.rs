//! In-memory store backend.

use async_trait::async_trait;
use tokio::sync::RwLock;

use domain::models::Sheet;

use crate::error::StoreError;
use crate::store::SheetStore;

/// A workbook held entirely in process memory.
///
/// Used by tests and by the `memory` backend for throwaway deployments;
/// contents vanish on restart.
#[derive(Debug, Default)]
pub struct MemorySheetStore {
    sheets: RwLock<Vec<Sheet>>,
}

impl MemorySheetStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sheets(sheets: Vec<Sheet>) -> Self {
        Self {
            sheets: RwLock::new(sheets),
        }
    }

    async fn mutate<F, T>(&self, sheet: &str, f: F) -> Result<T, StoreError>
    where
        F: FnOnce(&mut Sheet) -> T,
    {
        let mut sheets = self.sheets.write().await;
        let target = sheets
            .iter_mut()
            .find(|s| s.name == sheet)
            .ok_or_else(|| StoreError::SheetNotFound(sheet.to_string()))?;
        Ok(f(target))
    }
}

#[async_trait]
impl SheetStore for MemorySheetStore {
    async fn sheet_names(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.sheets.read().await.iter().map(|s| s.name.clone()).collect())
    }

    async fn snapshot(&self, name: &str) -> Result<Option<Sheet>, StoreError> {
        Ok(self.sheets.read().await.iter().find(|s| s.name == name).cloned())
    }

    async fn snapshot_all(&self) -> Result<Vec<Sheet>, StoreError> {
        Ok(self.sheets.read().await.clone())
    }

    async fn append_row(&self, sheet: &str, row: Vec<String>) -> Result<(), StoreError> {
        self.mutate(sheet, |s| s.rows.push(row)).await
    }

    async fn write_row(
        &self,
        sheet: &str,
        index: usize,
        row: Vec<String>,
    ) -> Result<(), StoreError> {
        self.mutate(sheet, |s| {
            if s.rows.len() <= index {
                s.rows.resize(index + 1, Vec::new());
            }
            s.rows[index] = row;
        })
        .await
    }

    async fn write_cell(
        &self,
        sheet: &str,
        row: usize,
        col: usize,
        value: String,
    ) -> Result<(), StoreError> {
        self.mutate(sheet, |s| {
            if s.rows.len() <= row {
                s.rows.resize(row + 1, Vec::new());
            }
            let cells = &mut s.rows[row];
            if cells.len() <= col {
                cells.resize(col + 1, String::new());
            }
            cells[col] = value;
        })
        .await
    }

    async fn create_sheet(&self, name: &str) -> Result<(), StoreError> {
        let mut sheets = self.sheets.write().await;
        if !sheets.iter().any(|s| s.name == name) {
            sheets.push(Sheet::new(name));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[tokio::test]
    async fn test_create_and_append() {
        let store = MemorySheetStore::new();
        store.create_sheet("Log").await.unwrap();
        store.append_row("Log", row(&["a", "b"])).await.unwrap();

        let sheet = store.snapshot("Log").await.unwrap().unwrap();
        assert_eq!(sheet.rows, vec![row(&["a", "b"])]);
    }

    #[tokio::test]
    async fn test_create_sheet_idempotent() {
        let store = MemorySheetStore::new();
        store.create_sheet("Log").await.unwrap();
        store.append_row("Log", row(&["a"])).await.unwrap();
        store.create_sheet("Log").await.unwrap();

        let sheet = store.snapshot("Log").await.unwrap().unwrap();
        assert_eq!(sheet.row_count(), 1);
    }

    #[tokio::test]
    async fn test_append_to_missing_sheet() {
        let store = MemorySheetStore::new();
        let err = store.append_row("Nope", row(&["a"])).await.unwrap_err();
        assert!(matches!(err, StoreError::SheetNotFound(name) if name == "Nope"));
    }

    #[tokio::test]
    async fn test_write_row_replaces_and_truncates() {
        let store =
            MemorySheetStore::with_sheets(vec![Sheet::with_rows("Log", vec![row(&["a", "b", "c"])])]);
        store.write_row("Log", 0, row(&["x"])).await.unwrap();

        let sheet = store.snapshot("Log").await.unwrap().unwrap();
        assert_eq!(sheet.rows[0], row(&["x"]));
    }

    #[tokio::test]
    async fn test_write_row_extends_sheet() {
        let store = MemorySheetStore::with_sheets(vec![Sheet::new("Log")]);
        store.write_row("Log", 2, row(&["x"])).await.unwrap();

        let sheet = store.snapshot("Log").await.unwrap().unwrap();
        assert_eq!(sheet.row_count(), 3);
        assert_eq!(sheet.rows[2], row(&["x"]));
        assert!(sheet.rows[0].is_empty());
    }

    #[tokio::test]
    async fn test_write_cell_extends_row() {
        let store = MemorySheetStore::with_sheets(vec![Sheet::with_rows("Log", vec![row(&["a"])])]);
        store
            .write_cell("Log", 0, 2, "z".to_string())
            .await
            .unwrap();

        let sheet = store.snapshot("Log").await.unwrap().unwrap();
        assert_eq!(sheet.rows[0], row(&["a", "", "z"]));
    }

    #[tokio::test]
    async fn test_sheet_names_preserve_order() {
        let store = MemorySheetStore::with_sheets(vec![Sheet::new("B"), Sheet::new("A")]);
        assert_eq!(store.sheet_names().await.unwrap(), vec!["B", "A"]);
    }
}
