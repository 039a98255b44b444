//! Cooldown-window duplicate detection over access-log rows.

use chrono::{Duration, NaiveDateTime};

use crate::models::access_request::AccessRequestRecord;

/// A prior submission of the same URL inside the cooldown window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateHit {
    /// 0-based index into the scanned data rows.
    pub row_index: usize,
    /// Age of the prior submission relative to the candidate timestamp.
    pub age_secs: i64,
}

/// Scans data rows newest-to-oldest for a prior submission of `url` whose
/// timestamp falls within `cooldown` of `now`.
///
/// The scan stops at the first row older than the window: rows are assumed
/// contiguous and time-ordered, so everything before it is older still. If
/// manual edits break that ordering the early stop can miss real duplicates;
/// that is accepted, the check is best-effort. Rows whose timestamp cell
/// does not parse are skipped.
///
/// A blank candidate URL never matches anything, so repeated submissions
/// with no URL are not suppressed against each other.
pub fn find_recent_duplicate(
    rows: &[Vec<String>],
    url: &str,
    now: NaiveDateTime,
    cooldown: Duration,
) -> Option<DuplicateHit> {
    let url = url.trim();
    if url.is_empty() {
        return None;
    }

    for (index, row) in rows.iter().enumerate().rev() {
        let ts_cell = match row.get(AccessRequestRecord::TIMESTAMP_COL) {
            Some(cell) => cell,
            None => continue,
        };
        let ts = match shared::timestamp::parse_flexible(ts_cell) {
            Ok(ts) => ts,
            Err(_) => continue,
        };

        let age = now - ts;
        if age > cooldown {
            break;
        }

        if row.get(AccessRequestRecord::URL_COL).map(|u| u.trim()) == Some(url) {
            return Some(DuplicateHit {
                row_index: index,
                age_secs: age.num_seconds(),
            });
        }
    }
    None
}
