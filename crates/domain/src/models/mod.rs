//! Domain models for Sheetgate.

pub mod access_request;
pub mod sheet;
pub mod submission;

pub use access_request::{AccessRequestRecord, RequestStatus, CANONICAL_HEADERS};
pub use sheet::Sheet;
pub use submission::{SubmissionInput, SubmitOutcome};
