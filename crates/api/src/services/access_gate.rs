//! Submission processing.
//!
//! One entry point, [`process`], drives a webhook POST end to end: PIN
//! check, duplicate suppression, audit-row append, and the timestamp
//! canonicalization sweep. Every submission that reaches the append step is
//! logged, including rejected ones; the row's status column records how the
//! request fared.

use chrono::{Duration, NaiveDateTime, Utc};
use tracing::{info, warn};

use domain::models::access_request::{AccessRequestRecord, RequestStatus};
use domain::models::{SubmissionInput, SubmitOutcome};
use domain::services::{find_recent_duplicate, validate_pin};
use persistence::repositories::{AccessLogRepository, PinRepository};
use shared::timestamp;

use crate::app::AppState;

pub async fn process(state: &AppState, input: SubmissionInput) -> SubmitOutcome {
    let now = submission_time(&input);

    // A missing or unreadable PIN sheet fails closed: nobody validates.
    let pin_valid = match PinRepository::new(
        state.store.clone(),
        state.config.gate.pin_sheet.clone(),
    )
    .load_codes()
    .await
    {
        Ok(Some(codes)) => validate_pin(&input.pin, &codes),
        Ok(None) => {
            warn!("no PIN sheet found in workbook; rejecting submission");
            false
        }
        Err(e) => {
            warn!(error = %e, "failed to read PIN sheet; rejecting submission");
            false
        }
    };

    let log = AccessLogRepository::new(
        state.store.clone(),
        state.config.gate.access_sheet.clone(),
        state.config.store.repair_headers,
    );

    let sheet_name = match log.ensure_sheet().await {
        Ok(name) => name,
        Err(e) => {
            warn!(error = %e, "could not resolve or create the access-log sheet");
            return SubmitOutcome::error(format!("Access log unavailable: {e}"));
        }
    };

    let (outcome, status) = if pin_valid {
        let rows = match log.data_rows(&sheet_name).await {
            Ok(rows) => rows,
            Err(e) => {
                warn!(error = %e, sheet = %sheet_name, "could not read access-log rows");
                return SubmitOutcome::error(format!("Access log unavailable: {e}"));
            }
        };
        let cooldown = Duration::seconds(state.config.gate.cooldown_secs as i64);
        match find_recent_duplicate(&rows, &input.url, now, cooldown) {
            Some(hit) => {
                info!(
                    url = %input.url,
                    age_secs = hit.age_secs,
                    "suppressing duplicate submission"
                );
                (
                    SubmitOutcome::Duplicate {
                        message: format!(
                            "Duplicate request: same URL submitted {} seconds ago",
                            hit.age_secs
                        ),
                    },
                    RequestStatus::Duplicate,
                )
            }
            None => (SubmitOutcome::Success, RequestStatus::Success),
        }
    } else {
        (SubmitOutcome::invalid_pin(), RequestStatus::Failed)
    };

    let record = AccessRequestRecord {
        timestamp: timestamp::format_canonical(now),
        pin: input.pin,
        user_email: input.user_email,
        title: input.title,
        url: input.url,
        request_status: status,
        media_type: String::new(),
        access_link: String::new(),
    };

    if let Err(e) = log.append(&sheet_name, &record).await {
        warn!(error = %e, sheet = %sheet_name, "failed to append access-log row");
        return SubmitOutcome::error(format!("Failed to record request: {e}"));
    }

    // Best-effort sweep; a failure here must not fail the submission.
    if let Err(e) = log.repair_timestamps(&sheet_name).await {
        warn!(error = %e, sheet = %sheet_name, "timestamp canonicalization pass failed");
    }

    outcome
}

/// Timestamp for this submission: the client value when it parses, the
/// server clock otherwise.
fn submission_time(input: &SubmissionInput) -> NaiveDateTime {
    match timestamp::parse_flexible(&input.timestamp) {
        Ok(ts) => ts,
        Err(_) => Utc::now().naive_utc(),
    }
}
