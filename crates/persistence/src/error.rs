//! Store error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("sheet not found: {0}")]
    SheetNotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("workbook serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
