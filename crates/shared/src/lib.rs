//! Shared utilities and common types for the Sheetgate backend.
//!
//! This crate provides common functionality used across all other crates:
//! - Timestamp parsing for the mixed formats found in spreadsheet cells
//! - The canonical timestamp format written to the access log

pub mod timestamp;
