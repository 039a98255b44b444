//! Webhook endpoint handlers.
//!
//! The POST surface never signals failure through HTTP status codes: form
//! clients only read the JSON envelope, so every outcome (including bad
//! JSON) ships as a 200 with a `status` field.

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::collections::HashMap;
use tracing::warn;

use domain::models::{SubmissionInput, SubmitOutcome};
use persistence::repositories::AccessLogRepository;

use crate::app::AppState;
use crate::services::access_gate;

/// CORS preflight handler. The actual headers come from the CORS
/// middleware; this just supplies an empty 204.
pub async fn preflight() -> StatusCode {
    StatusCode::NO_CONTENT
}

/// GET handler for the webhook path.
///
/// `?action=getData&userEmail=...` returns the caller's access-request
/// history as a JSON array. Any other GET answers 204 so probes against
/// the webhook URL stay quiet.
pub async fn handle_get(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let is_get_data = params.get("action").map(String::as_str) == Some("getData");
    let email = params.get("userEmail").map(String::as_str).unwrap_or("");

    if !is_get_data || email.is_empty() {
        return StatusCode::NO_CONTENT.into_response();
    }

    let log = AccessLogRepository::new(
        state.store.clone(),
        state.config.gate.access_sheet.clone(),
        state.config.store.repair_headers,
    );

    match log.find_by_email(email).await {
        Ok(records) => Json(records).into_response(),
        Err(e) => {
            warn!(error = %e, "getData query failed");
            Json(SubmitOutcome::error(format!("Lookup failed: {e}"))).into_response()
        }
    }
}

/// POST handler: parses the submission body and runs it through the gate.
///
/// The body is taken as raw bytes and parsed by hand so any malformed
/// payload (bad JSON, bad encoding) produces the error envelope instead of
/// an axum 4xx rejection.
pub async fn handle_post(State(state): State<AppState>, body: Bytes) -> Json<SubmitOutcome> {
    let input: SubmissionInput = match serde_json::from_slice(&body) {
        Ok(input) => input,
        Err(e) => {
            warn!(error = %e, "rejecting unparsable submission body");
            return Json(SubmitOutcome::error(format!("Invalid JSON body: {e}")));
        }
    };

    Json(access_gate::process(&state, input).await)
}
