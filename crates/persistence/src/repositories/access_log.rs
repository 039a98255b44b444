//! Access-log repository.
//!
//! Owns everything about the access-log sheet: resolve-or-create, header
//! verification and (opt-in) repair, reads for duplicate detection and the
//! per-user query, appends, and the timestamp canonicalization pass.

use tracing::{debug, info, warn};

use domain::models::access_request::{AccessRequestRecord, CANONICAL_HEADERS};
use domain::models::Sheet;
use domain::services::resolver;
use shared::timestamp;

use crate::error::StoreError;
use crate::store::DynSheetStore;

/// Sheet name used when no access-log sheet exists and none is configured.
const DEFAULT_SHEET_NAME: &str = "Access Requests";

/// Header spellings accepted for the email column of legacy sheets.
const EMAIL_HEADER_SPELLINGS: &[&str] =
    &["user email", "useremail", "email", "e-mail", "email address"];

#[derive(Clone)]
pub struct AccessLogRepository {
    store: DynSheetStore,
    preferred: Option<String>,
    repair_headers: bool,
}

impl AccessLogRepository {
    pub fn new(store: DynSheetStore, preferred: Option<String>, repair_headers: bool) -> Self {
        Self {
            store,
            preferred,
            repair_headers,
        }
    }

    /// Resolves the access-log sheet, creating it (with canonical headers)
    /// when the workbook has no qualifying sheet. Returns the sheet name.
    pub async fn ensure_sheet(&self) -> Result<String, StoreError> {
        let sheets = self.store.snapshot_all().await?;
        if let Some(sheet) = resolver::resolve_sheet(
            self.preferred.as_deref(),
            resolver::ACCESS_SHEET_CANDIDATES,
            resolver::looks_like_access_log_sheet,
            &sheets,
        ) {
            let name = sheet.name.clone();
            self.ensure_headers(sheet).await?;
            return Ok(name);
        }

        let name = self
            .preferred
            .clone()
            .unwrap_or_else(|| DEFAULT_SHEET_NAME.to_string());

        // The target name can exist without qualifying by content. Row 1 of
        // such a sheet goes through the same repair policy as a resolved
        // one; only a genuinely absent sheet gets created.
        if let Some(sheet) = self.store.snapshot(&name).await? {
            self.ensure_headers(&sheet).await?;
            return Ok(name);
        }

        info!(sheet = %name, "access-log sheet not found, creating it");
        self.store.create_sheet(&name).await?;
        self.store.write_row(&name, 0, canonical_header_row()).await?;
        Ok(name)
    }

    /// Verifies row 1 against the canonical headers.
    ///
    /// An empty row 1 is bootstrapped in place. A mismatched row 1 is only
    /// rewritten when header repair is enabled, because the rewrite also
    /// drops any columns beyond the canonical eight; every cell it replaces
    /// is logged first. With repair disabled the mismatch is logged and the
    /// sheet is used as-is.
    async fn ensure_headers(&self, sheet: &Sheet) -> Result<(), StoreError> {
        let current = sheet.header().unwrap_or(&[]);
        if headers_are_canonical(current) {
            return Ok(());
        }

        if current.iter().all(|cell| cell.trim().is_empty()) {
            info!(sheet = %sheet.name, "writing canonical headers to empty header row");
            return self.store.write_row(&sheet.name, 0, canonical_header_row()).await;
        }

        if !self.repair_headers {
            warn!(
                sheet = %sheet.name,
                headers = ?current,
                "header row does not match canonical headers; repair is disabled"
            );
            return Ok(());
        }

        for (col, cell) in current.iter().enumerate() {
            let expected = CANONICAL_HEADERS.get(col).copied().unwrap_or("");
            if cell != expected {
                warn!(
                    sheet = %sheet.name,
                    col,
                    overwritten = %cell,
                    replacement = expected,
                    "repairing header cell"
                );
            }
        }
        self.store.write_row(&sheet.name, 0, canonical_header_row()).await
    }

    /// Data rows of the sheet. A sheet without a recognizable header row
    /// (possible when repair is disabled) yields every row.
    pub async fn data_rows(&self, sheet_name: &str) -> Result<Vec<Vec<String>>, StoreError> {
        let sheet = self
            .store
            .snapshot(sheet_name)
            .await?
            .ok_or_else(|| StoreError::SheetNotFound(sheet_name.to_string()))?;
        let start = resolver::log_data_start(&sheet);
        Ok(sheet.rows.into_iter().skip(start).collect())
    }

    /// Appends one record in canonical column order.
    pub async fn append(
        &self,
        sheet_name: &str,
        record: &AccessRequestRecord,
    ) -> Result<(), StoreError> {
        self.store.append_row(sheet_name, record.to_row()).await
    }

    /// Returns all records whose email column matches `email`
    /// (case-insensitive). Resolves the sheet read-only; an absent sheet
    /// yields an empty list.
    pub async fn find_by_email(&self, email: &str) -> Result<Vec<AccessRequestRecord>, StoreError> {
        let sheets = self.store.snapshot_all().await?;
        let Some(sheet) = resolver::resolve_sheet(
            self.preferred.as_deref(),
            resolver::ACCESS_SHEET_CANDIDATES,
            resolver::looks_like_access_log_sheet,
            &sheets,
        ) else {
            return Ok(Vec::new());
        };

        let col = email_column(sheet);
        let email = email.trim();
        Ok(sheet
            .rows
            .iter()
            .skip(resolver::log_data_start(sheet))
            .filter(|row| {
                row.get(col)
                    .map(|cell| cell.trim().eq_ignore_ascii_case(email))
                    .unwrap_or(false)
            })
            .map(|row| AccessRequestRecord::from_row(row))
            .collect())
    }

    /// Best-effort canonicalization of the timestamp column.
    ///
    /// Non-canonical but parseable values are rewritten to the canonical
    /// pattern; unparsable values are logged and left untouched. Returns
    /// the number of cells rewritten.
    pub async fn repair_timestamps(&self, sheet_name: &str) -> Result<usize, StoreError> {
        let sheet = self
            .store
            .snapshot(sheet_name)
            .await?
            .ok_or_else(|| StoreError::SheetNotFound(sheet_name.to_string()))?;

        let mut rewritten = 0;
        let start = resolver::log_data_start(&sheet);
        for (index, row) in sheet.rows.iter().enumerate().skip(start) {
            let Some(cell) = row.get(AccessRequestRecord::TIMESTAMP_COL) else {
                continue;
            };
            if cell.trim().is_empty() || timestamp::is_canonical(cell) {
                continue;
            }
            match timestamp::parse_flexible(cell) {
                Ok(ts) => {
                    self.store
                        .write_cell(
                            sheet_name,
                            index,
                            AccessRequestRecord::TIMESTAMP_COL,
                            timestamp::format_canonical(ts),
                        )
                        .await?;
                    rewritten += 1;
                }
                Err(e) => {
                    debug!(sheet = %sheet_name, row = index, error = %e,
                        "leaving unparsable timestamp untouched");
                }
            }
        }
        if rewritten > 0 {
            info!(sheet = %sheet_name, rewritten, "canonicalized timestamp cells");
        }
        Ok(rewritten)
    }
}

fn canonical_header_row() -> Vec<String> {
    CANONICAL_HEADERS.iter().map(|h| h.to_string()).collect()
}

fn headers_are_canonical(current: &[String]) -> bool {
    current.len() == CANONICAL_HEADERS.len()
        && current
            .iter()
            .zip(CANONICAL_HEADERS.iter())
            .all(|(cell, expected)| cell == expected)
}

/// Finds the email column of a possibly legacy sheet: known spellings
/// first, then any header containing "email", then the canonical position.
fn email_column(sheet: &Sheet) -> usize {
    if let Some(header) = sheet.header() {
        for (col, cell) in header.iter().enumerate() {
            let normalized = cell.trim().to_lowercase();
            if EMAIL_HEADER_SPELLINGS.contains(&normalized.as_str()) {
                return col;
            }
        }
        for (col, cell) in header.iter().enumerate() {
            if cell.to_lowercase().contains("email") {
                return col;
            }
        }
    }
    2
}
