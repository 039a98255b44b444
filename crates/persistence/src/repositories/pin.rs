//! PIN list repository.

use domain::services::resolver;

use crate::error::StoreError;
use crate::store::DynSheetStore;

/// Read-only access to the PIN code list.
///
/// The PIN sheet is maintained by hand outside this service; this
/// repository only locates it and reads column A.
#[derive(Clone)]
pub struct PinRepository {
    store: DynSheetStore,
    preferred: Option<String>,
}

impl PinRepository {
    pub fn new(store: DynSheetStore, preferred: Option<String>) -> Self {
        Self { store, preferred }
    }

    /// Resolves the PIN sheet and returns its trimmed, non-blank codes, or
    /// `None` when no sheet in the workbook qualifies.
    pub async fn load_codes(&self) -> Result<Option<Vec<String>>, StoreError> {
        let sheets = self.store.snapshot_all().await?;
        let resolved = resolver::resolve_sheet(
            self.preferred.as_deref(),
            resolver::PIN_SHEET_CANDIDATES,
            resolver::looks_like_pin_sheet,
            &sheets,
        );
        Ok(resolved.map(resolver::pin_codes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemorySheetStore;
    use domain::models::Sheet;
    use std::sync::Arc;

    fn rows(data: &[&[&str]]) -> Vec<Vec<String>> {
        data.iter()
            .map(|row| row.iter().map(|c| c.to_string()).collect())
            .collect()
    }

    #[tokio::test]
    async fn test_load_codes_from_named_sheet() {
        let store = Arc::new(MemorySheetStore::with_sheets(vec![Sheet::with_rows(
            "PINs",
            rows(&[&["PIN"], &["1234"], &["5678"]]),
        )]));
        let repo = PinRepository::new(store, None);
        assert_eq!(
            repo.load_codes().await.unwrap(),
            Some(vec!["1234".to_string(), "5678".to_string()])
        );
    }

    #[tokio::test]
    async fn test_load_codes_prefers_configured_name() {
        let store = Arc::new(MemorySheetStore::with_sheets(vec![
            Sheet::with_rows("PINs", rows(&[&["PIN"], &["1111"]])),
            Sheet::with_rows("Staff Codes", rows(&[&["code"], &["2222"]])),
        ]));
        let repo = PinRepository::new(store, Some("Staff Codes".to_string()));
        assert_eq!(repo.load_codes().await.unwrap(), Some(vec!["2222".to_string()]));
    }

    #[tokio::test]
    async fn test_load_codes_no_qualifying_sheet() {
        let store = Arc::new(MemorySheetStore::with_sheets(vec![Sheet::with_rows(
            "Notes",
            rows(&[&["a very long line of meeting prose"]]),
        )]));
        let repo = PinRepository::new(store, None);
        assert_eq!(repo.load_codes().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_load_codes_empty_workbook() {
        let repo = PinRepository::new(Arc::new(MemorySheetStore::new()), None);
        assert_eq!(repo.load_codes().await.unwrap(), None);
    }
}
