pub mod cors_headers;
pub mod logging;
pub mod trace_id;

pub use cors_headers::cors_headers_middleware;
pub use trace_id::trace_id;
