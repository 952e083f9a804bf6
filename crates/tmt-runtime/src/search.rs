//! Key search over translation records.

use std::sync::Arc;

use serde::Serialize;
use tmt_core::Result;
use tmt_store::{SqliteStore, TranslationRecord};

/// Aggregate counts for the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranslationStats {
    #[serde(rename = "totalKeys")]
    pub total_keys: usize,
    /// Records with at least one target field equal to the English source.
    #[serde(rename = "degradedKeys")]
    pub degraded_keys: usize,
}

pub struct TranslationSearch {
    store: Arc<SqliteStore>,
}

impl TranslationSearch {
    pub fn new(store: Arc<SqliteStore>) -> Self {
        Self { store }
    }

    /// Records whose key contains `fragment`, ignoring case, in insertion
    /// order. An empty or absent fragment returns every record.
    ///
    /// The fragment is a literal: `.` and `*` match only themselves.
    pub fn search(&self, fragment: Option<&str>) -> Result<Vec<TranslationRecord>> {
        let records = self.store.list_translations()?;
        let fragment = fragment.unwrap_or_default();
        if fragment.is_empty() {
            return Ok(records);
        }

        Ok(records
            .into_iter()
            .filter(|record| matches_key(&record.key, fragment))
            .collect())
    }

    pub fn stats(&self) -> Result<TranslationStats> {
        let records = self.store.list_translations()?;
        let degraded_keys = records
            .iter()
            .filter(|r| !r.translations.fallback_languages().is_empty())
            .count();
        Ok(TranslationStats {
            total_keys: records.len(),
            degraded_keys,
        })
    }
}

/// Case-insensitive literal substring match on a key.
pub fn matches_key(key: &str, fragment: &str) -> bool {
    fragment.is_empty() || key.to_lowercase().contains(&fragment.to_lowercase())
}
