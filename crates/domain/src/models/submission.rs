//! Inbound submission payload and outcome envelope.

use serde::{Deserialize, Serialize};

/// JSON body of a webhook POST.
///
/// Every field is optional on the wire; missing fields default to empty
/// strings so malformed clients degrade to a logged-but-failed request
/// instead of a rejected one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SubmissionInput {
    pub url: String,
    pub title: String,
    pub timestamp: String,
    pub user_email: String,
    pub user_id: String,
    pub pin: String,
}

/// Result envelope returned for every webhook POST.
///
/// The transport status is always 200; callers dispatch on the `status`
/// field, so failures must round-trip through this type rather than an
/// HTTP error code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum SubmitOutcome {
    Success,
    Duplicate { message: String },
    Failure { message: String },
    Error { message: String },
}

impl SubmitOutcome {
    pub fn error(message: impl Into<String>) -> Self {
        SubmitOutcome::Error {
            message: message.into(),
        }
    }

    pub fn invalid_pin() -> Self {
        SubmitOutcome::Failure {
            message: "Invalid PIN/Password".to_string(),
        }
    }
}
