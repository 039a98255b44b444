//! Heuristic sheet resolution.
//!
//! Workbooks arrive with unpredictable tab names and column layouts, so the
//! resolver locates the PIN sheet and the access-log sheet by trying, in
//! order: an explicitly configured name, a fixed candidate-name list, and
//! finally a content scan of every sheet. Name matches from the candidate
//! list are only accepted when the sheet's content also qualifies, which
//! keeps a tab that merely happens to be called `Sheet1` from being treated
//! as a PIN list.
//!
//! All functions here are pure over [`Sheet`] snapshots and are independent
//! of the store.

use lazy_static::lazy_static;
use regex::Regex;
use tracing::warn;

use crate::models::access_request::AccessRequestRecord;
use crate::models::Sheet;

/// Tab names tried for the PIN sheet, in priority order.
pub const PIN_SHEET_CANDIDATES: &[&str] =
    &["PINs", "PIN", "Sheet1", "password", "codes", "access"];

/// Tab names tried for the access-log sheet, in priority order.
pub const ACCESS_SHEET_CANDIDATES: &[&str] =
    &["Access Requests", "AccessRequests", "Requests", "Access Log", "Log"];

/// How many column values the content inspection samples.
const SAMPLE_LIMIT: usize = 10;

/// Fraction of sampled values that must match a shape for a sheet to
/// qualify by content.
const SHAPE_MATCH_RATIO: f64 = 0.6;

lazy_static! {
    /// Keywords that mark a cell as PIN-related header text.
    static ref PIN_KEYWORD: Regex = Regex::new(r"(?i)pin|password|code|auth|key|access").unwrap();

    /// Keywords that mark row 1 of a PIN sheet as a header row.
    static ref PIN_HEADER_CELL: Regex = Regex::new(r"(?i)pin|password|code|auth|key").unwrap();

    /// Value shapes a stored PIN is expected to take.
    static ref PIN_SHAPES: Vec<Regex> = vec![
        // 3-8 digit numeric string
        Regex::new(r"^\d{3,8}$").unwrap(),
        // 4-12 character alphanumeric string
        Regex::new(r"^[A-Za-z0-9]{4,12}$").unwrap(),
        // ####-####
        Regex::new(r"^\d{4}-\d{4}$").unwrap(),
        // 2-4 letters followed by 2-6 digits
        Regex::new(r"^[A-Za-z]{2,4}\d{2,6}$").unwrap(),
    ];

    /// Header keywords expected on an access-log sheet.
    static ref LOG_KEYWORD: Regex =
        Regex::new(r"(?i)timestamp|url|email|request|status|title").unwrap();

    static ref URL_SHAPE: Regex = Regex::new(r"(?i)^https?://").unwrap();
}

/// Locates the sheet to use, first match wins:
///
/// 1. The explicitly configured `preferred` name (exact, then
///    case-insensitive). A configured name is trusted without content
///    inspection; operators know their workbook.
/// 2. Each candidate name (exact, then case-insensitive), accepted only if
///    `qualifies` passes on the sheet's content.
/// 3. Any sheet whose content qualifies, in enumeration order.
///
/// When several sheets qualify in step 3 the tie is broken by enumeration
/// order and the ambiguity is logged at WARN with all qualifying names.
pub fn resolve_sheet<'a, F>(
    preferred: Option<&str>,
    candidates: &[&str],
    qualifies: F,
    sheets: &'a [Sheet],
) -> Option<&'a Sheet>
where
    F: Fn(&Sheet) -> bool,
{
    if let Some(name) = preferred {
        if let Some(sheet) = find_by_name(name, sheets) {
            return Some(sheet);
        }
        warn!(
            sheet = name,
            "configured sheet name not found, falling back to heuristics"
        );
    }

    for name in candidates {
        if let Some(sheet) = find_by_name(name, sheets) {
            if qualifies(sheet) {
                return Some(sheet);
            }
        }
    }

    let qualifying: Vec<&Sheet> = sheets.iter().filter(|s| qualifies(s)).collect();
    if qualifying.len() > 1 {
        let names: Vec<&str> = qualifying.iter().map(|s| s.name.as_str()).collect();
        warn!(
            candidates = ?names,
            chosen = names[0],
            "multiple sheets qualify, picking the first in enumeration order"
        );
    }
    qualifying.first().copied()
}

fn find_by_name<'a>(name: &str, sheets: &'a [Sheet]) -> Option<&'a Sheet> {
    sheets
        .iter()
        .find(|s| s.name == name)
        .or_else(|| sheets.iter().find(|s| s.name.eq_ignore_ascii_case(name)))
}

/// Content inspection for a PIN sheet.
///
/// Qualifies when any of the first three rows' first three cells contains a
/// PIN-related keyword, or when at least 60% of up to ten sampled column-A
/// values match a PIN shape.
pub fn looks_like_pin_sheet(sheet: &Sheet) -> bool {
    for row in sheet.rows.iter().take(3) {
        for cell in row.iter().take(3) {
            if PIN_KEYWORD.is_match(cell) {
                return true;
            }
        }
    }

    let samples: Vec<&str> = sheet
        .column(0)
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .take(SAMPLE_LIMIT)
        .collect();
    if samples.is_empty() {
        return false;
    }
    let matching = samples
        .iter()
        .filter(|v| PIN_SHAPES.iter().any(|shape| shape.is_match(v)))
        .count();
    matching as f64 / samples.len() as f64 >= SHAPE_MATCH_RATIO
}

/// Content inspection for an access-log sheet: header text mentioning the
/// expected columns, or URL-shaped values in the URL column.
pub fn looks_like_access_log_sheet(sheet: &Sheet) -> bool {
    if let Some(header) = sheet.header() {
        if header.iter().any(|cell| LOG_KEYWORD.is_match(cell)) {
            return true;
        }
    }

    let samples: Vec<&str> = sheet
        .column(AccessRequestRecord::URL_COL)
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .take(SAMPLE_LIMIT)
        .collect();
    if samples.is_empty() {
        return false;
    }
    let matching = samples.iter().filter(|v| URL_SHAPE.is_match(v)).count();
    matching as f64 / samples.len() as f64 >= SHAPE_MATCH_RATIO
}

/// Index of the first data row of an access-log sheet: 1 when row 1 reads
/// like a header, 0 when the sheet starts directly with data. Sheets picked
/// up by URL-shaped content alone have no header row to skip.
pub fn log_data_start(sheet: &Sheet) -> usize {
    match sheet.header() {
        Some(header) if header.iter().any(|cell| LOG_KEYWORD.is_match(cell)) => 1,
        _ => 0,
    }
}

/// Index of the first data row of a PIN sheet: 1 when row 1 looks like a
/// header, 0 otherwise.
pub fn pin_data_start(sheet: &Sheet) -> usize {
    match sheet.cell(0, 0) {
        Some(cell) if PIN_HEADER_CELL.is_match(cell) => 1,
        _ => 0,
    }
}

/// Extracts the trimmed, non-blank PIN codes from column A of a resolved
/// PIN sheet, skipping the header row when one is detected.
pub fn pin_codes(sheet: &Sheet) -> Vec<String> {
    sheet
        .rows
        .iter()
        .skip(pin_data_start(sheet))
        .filter_map(|row| row.first())
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .collect()
}
