//! Domain layer for the Sheetgate backend.
//!
//! This crate contains:
//! - Domain models (Sheet, AccessRequestRecord, SubmissionInput)
//! - Pure business logic: heuristic sheet resolution, PIN validation,
//!   cooldown-window duplicate detection

pub mod models;
pub mod services;
