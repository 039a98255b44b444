//! CORS headers middleware.
//!
//! The webhook is called from browser contexts on arbitrary origins, so the
//! permissive CORS headers go on every response from the webhook surface,
//! not just preflight answers.

use axum::{
    body::Body,
    http::{header::HeaderName, HeaderValue, Request},
    middleware::Next,
    response::Response,
};

/// Middleware that stamps the static CORS policy onto all responses.
///
/// Headers added:
/// - `Access-Control-Allow-Origin: *`
/// - `Access-Control-Allow-Methods: POST, OPTIONS`
/// - `Access-Control-Allow-Headers: Content-Type`
pub async fn cors_headers_middleware(req: Request<Body>, next: Next) -> Response {
    let mut response = next.run(req).await;
    let headers = response.headers_mut();

    headers.insert(
        HeaderName::from_static("access-control-allow-origin"),
        HeaderValue::from_static("*"),
    );
    headers.insert(
        HeaderName::from_static("access-control-allow-methods"),
        HeaderValue::from_static("POST, OPTIONS"),
    );
    headers.insert(
        HeaderName::from_static("access-control-allow-headers"),
        HeaderValue::from_static("Content-Type"),
    );

    response
}

/// CORS header names as constants for testing and documentation.
#[allow(dead_code)] // Available for use in integration tests
pub mod headers {
    /// Access-Control-Allow-Origin header name.
    pub const ALLOW_ORIGIN: &str = "access-control-allow-origin";
    /// Access-Control-Allow-Methods header name.
    pub const ALLOW_METHODS: &str = "access-control-allow-methods";
    /// Access-Control-Allow-Headers header name.
    pub const ALLOW_HEADERS: &str = "access-control-allow-headers";
}
