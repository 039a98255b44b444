//! Access-request record model.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The fixed column-name sequence enforced on row 1 of the access-log sheet.
pub const CANONICAL_HEADERS: [&str; 8] = [
    "Timestamp",
    "PIN",
    "User Email",
    "Title",
    "URL",
    "Request Status",
    "Media Type",
    "Access Link",
];

/// Outcome recorded in the `Request Status` column.
///
/// The well-known values keep their historical spellings (`PENDING` is
/// upper-case, the rest are capitalized); anything else read back from the
/// sheet is preserved verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RequestStatus {
    Pending,
    Success,
    Failed,
    Duplicate,
    Other(String),
}

impl RequestStatus {
    pub fn as_str(&self) -> &str {
        match self {
            RequestStatus::Pending => "PENDING",
            RequestStatus::Success => "Success",
            RequestStatus::Failed => "Failed",
            RequestStatus::Duplicate => "Duplicate",
            RequestStatus::Other(s) => s,
        }
    }
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RequestStatus {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(RequestStatus::from(s.to_string()))
    }
}

impl From<String> for RequestStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "PENDING" => RequestStatus::Pending,
            "Success" => RequestStatus::Success,
            "Failed" => RequestStatus::Failed,
            "Duplicate" => RequestStatus::Duplicate,
            _ => RequestStatus::Other(s),
        }
    }
}

impl From<RequestStatus> for String {
    fn from(status: RequestStatus) -> Self {
        status.as_str().to_string()
    }
}

/// One row of the access log, in canonical column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessRequestRecord {
    pub timestamp: String,
    pub pin: String,
    pub user_email: String,
    pub title: String,
    pub url: String,
    pub request_status: RequestStatus,
    pub media_type: String,
    pub access_link: String,
}

impl AccessRequestRecord {
    /// Serializes the record as a sheet row in canonical column order.
    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.timestamp.clone(),
            self.pin.clone(),
            self.user_email.clone(),
            self.title.clone(),
            self.url.clone(),
            self.request_status.to_string(),
            self.media_type.clone(),
            self.access_link.clone(),
        ]
    }

    /// Reads a record back from a sheet row; missing trailing cells become
    /// empty strings.
    pub fn from_row(row: &[String]) -> Self {
        let cell = |i: usize| row.get(i).cloned().unwrap_or_default();
        Self {
            timestamp: cell(0),
            pin: cell(1),
            user_email: cell(2),
            title: cell(3),
            url: cell(4),
            request_status: cell(5).into(),
            media_type: cell(6),
            access_link: cell(7),
        }
    }

    /// The 0-based sheet column holding the timestamp.
    pub const TIMESTAMP_COL: usize = 0;
    /// The 0-based sheet column holding the URL.
    pub const URL_COL: usize = 4;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> AccessRequestRecord {
        AccessRequestRecord {
            timestamp: "Friday, Aug 29, 2025 03:41 PM".to_string(),
            pin: "1234".to_string(),
            user_email: "a@b.com".to_string(),
            title: "Ex".to_string(),
            url: "https://example.com".to_string(),
            request_status: RequestStatus::Success,
            media_type: String::new(),
            access_link: String::new(),
        }
    }

    #[test]
    fn test_row_round_trip() {
        let record = sample();
        let row = record.to_row();
        assert_eq!(row.len(), CANONICAL_HEADERS.len());
        assert_eq!(AccessRequestRecord::from_row(&row), record);
    }

    #[test]
    fn test_row_column_order_matches_headers() {
        let row = sample().to_row();
        assert_eq!(row[AccessRequestRecord::TIMESTAMP_COL], sample().timestamp);
        assert_eq!(row[AccessRequestRecord::URL_COL], sample().url);
        assert_eq!(row[5], "Success");
    }

    #[test]
    fn test_from_row_short_row() {
        let row = vec!["ts".to_string(), "99".to_string()];
        let record = AccessRequestRecord::from_row(&row);
        assert_eq!(record.timestamp, "ts");
        assert_eq!(record.pin, "99");
        assert_eq!(record.url, "");
        assert_eq!(record.request_status, RequestStatus::Other(String::new()));
    }

    #[test]
    fn test_request_status_spellings() {
        assert_eq!(RequestStatus::Pending.to_string(), "PENDING");
        assert_eq!(RequestStatus::Duplicate.to_string(), "Duplicate");
        assert_eq!(
            "Needs Review".parse::<RequestStatus>().unwrap(),
            RequestStatus::Other("Needs Review".to_string())
        );
        assert_eq!("Failed".parse::<RequestStatus>().unwrap(), RequestStatus::Failed);
    }

    #[test]
    fn test_record_serializes_camel_case() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["userEmail"], "a@b.com");
        assert_eq!(json["requestStatus"], "Success");
        assert_eq!(json["mediaType"], "");
    }
}
