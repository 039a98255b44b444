//! JSON-file store backend.
//!
//! The whole workbook lives in one JSON document on disk. Every mutation
//! rewrites the file under the write lock, which serializes writers within
//! this process; the format is small enough that this is fine for the
//! request volumes a PIN-gate sees.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;
use tracing::info;

use domain::models::Sheet;

use crate::error::StoreError;
use crate::store::SheetStore;

#[derive(Debug, Default, Serialize, Deserialize)]
struct Workbook {
    sheets: Vec<Sheet>,
}

/// A workbook persisted as a JSON document.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    workbook: RwLock<Workbook>,
}

impl JsonFileStore {
    /// Opens the workbook at `path`, creating an empty one if the file does
    /// not exist yet.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let workbook = match tokio::fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!(path = %path.display(), "workbook file not found, starting empty");
                Workbook::default()
            }
            Err(e) => return Err(e.into()),
        };
        Ok(Self {
            path,
            workbook: RwLock::new(workbook),
        })
    }

    async fn flush(&self, workbook: &Workbook) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(workbook)?;
        tokio::fs::write(&self.path, bytes).await?;
        Ok(())
    }

    async fn mutate<F>(&self, sheet: &str, f: F) -> Result<(), StoreError>
    where
        F: FnOnce(&mut Sheet),
    {
        let mut workbook = self.workbook.write().await;
        let target = workbook
            .sheets
            .iter_mut()
            .find(|s| s.name == sheet)
            .ok_or_else(|| StoreError::SheetNotFound(sheet.to_string()))?;
        f(target);
        self.flush(&workbook).await
    }
}

#[async_trait]
impl SheetStore for JsonFileStore {
    async fn sheet_names(&self) -> Result<Vec<String>, StoreError> {
        Ok(self
            .workbook
            .read()
            .await
            .sheets
            .iter()
            .map(|s| s.name.clone())
            .collect())
    }

    async fn snapshot(&self, name: &str) -> Result<Option<Sheet>, StoreError> {
        Ok(self
            .workbook
            .read()
            .await
            .sheets
            .iter()
            .find(|s| s.name == name)
            .cloned())
    }

    async fn snapshot_all(&self) -> Result<Vec<Sheet>, StoreError> {
        Ok(self.workbook.read().await.sheets.clone())
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
        let mut workbook = self.workbook.write().await;
        if !workbook.sheets.iter().any(|s| s.name == name) {
            workbook.sheets.push(Sheet::new(name));
            self.flush(&workbook).await?;
        }
        Ok(())
    }
}
