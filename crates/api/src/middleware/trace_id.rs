//! Per-request tracing middleware.

use axum::{
    body::Body,
    http::{header::HeaderName, HeaderValue, Request},
    middleware::Next,
    response::Response,
};
use tracing::Instrument;
use uuid::Uuid;

/// Header carrying the request ID, inbound and outbound.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Wraps each request in a span keyed by a request ID.
///
/// A caller-supplied `x-request-id` header is reused so IDs survive proxy
/// hops; otherwise a fresh UUID v4 is minted. The handler runs instrumented
/// with the span, a completion line records status and elapsed time, and
/// the ID is echoed on the response.
pub async fn trace_id(req: Request<Body>, next: Next) -> Response {
    let request_id = req
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned)
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    let span = tracing::info_span!(
        "webhook_request",
        request_id = %request_id,
        method = %req.method(),
        path = %req.uri().path(),
    );

    let started = std::time::Instant::now();
    let mut response = next.run(req).instrument(span).await;

    tracing::info!(
        request_id = %request_id,
        status = response.status().as_u16(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "request finished"
    );

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response
            .headers_mut()
            .insert(HeaderName::from_static(REQUEST_ID_HEADER), value);
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_id_header_is_valid_header_name() {
        let name = HeaderName::from_static(REQUEST_ID_HEADER);
        assert_eq!(name.as_str(), "x-request-id");
    }

    #[test]
    fn test_generated_ids_are_header_safe() {
        let id = Uuid::new_v4().to_string();
        assert!(HeaderValue::from_str(&id).is_ok());
        assert_eq!(id.len(), 36);
    }
}
