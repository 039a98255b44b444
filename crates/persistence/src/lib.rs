//! Persistence layer for the Sheetgate backend.
//!
//! This crate contains:
//! - The `SheetStore` trait over the external spreadsheet-like store
//! - Store backends (in-memory, JSON file)
//! - Repository implementations built on sheet snapshots

pub mod error;
pub mod json_file;
pub mod memory;
pub mod repositories;
pub mod store;

pub use error::StoreError;
pub use json_file::JsonFileStore;
pub use memory::MemorySheetStore;
pub use store::{DynSheetStore, SheetStore};
