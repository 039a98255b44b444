//! Sheet snapshot model.

use serde::{Deserialize, Serialize};

/// An immutable snapshot of one named sheet: rows of string cells.
///
/// Rows may be ragged; cell accessors treat missing cells as absent rather
/// than panicking. Row 0 usually (but not always) holds column headers —
/// whether it does is decided heuristically, see
/// [`crate::services::resolver`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sheet {
    pub name: String,
    pub rows: Vec<Vec<String>>,
}

impl Sheet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rows: Vec::new(),
        }
    }

    pub fn with_rows(name: impl Into<String>, rows: Vec<Vec<String>>) -> Self {
        Self {
            name: name.into(),
            rows,
        }
    }

    /// Returns the cell at (row, col), if present.
    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row)?.get(col).map(String::as_str)
    }

    /// Returns all values of one column, skipping rows too short to reach it.
    pub fn column(&self, col: usize) -> impl Iterator<Item = &str> {
        self.rows
            .iter()
            .filter_map(move |row| row.get(col).map(String::as_str))
    }

    /// The header row, if the sheet has any rows at all.
    pub fn header(&self) -> Option<&[String]> {
        self.rows.first().map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}
