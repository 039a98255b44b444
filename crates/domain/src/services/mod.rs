//! Domain services for Sheetgate.
//!
//! Services contain pure business logic that operates on domain models;
//! nothing here touches the store directly.

pub mod dedup;
pub mod pin;
pub mod resolver;

pub use dedup::{find_recent_duplicate, DuplicateHit};
pub use pin::validate_pin;
pub use resolver::{
    log_data_start, looks_like_access_log_sheet, looks_like_pin_sheet, pin_codes, pin_data_start,
    resolve_sheet, ACCESS_SHEET_CANDIDATES, PIN_SHEET_CANDIDATES,
};
