//! Repository implementations over the sheet store.

pub mod access_log;
pub mod pin;

pub use access_log::AccessLogRepository;
pub use pin::PinRepository;
