//! Record reconciler — turns fan-out results or caller overrides into
//! persisted translation records.

use std::sync::Arc;

use tmt_core::{Error, Result};
use tmt_store::{SqliteStore, TranslationRecord, Translations};
use tmt_translate::{FanOutOrchestrator, TargetTranslations};
use tracing::{debug, info};

pub struct Reconciler {
    store: Arc<SqliteStore>,
    fanout: FanOutOrchestrator,
}

impl Reconciler {
    pub fn new(store: Arc<SqliteStore>, fanout: FanOutOrchestrator) -> Self {
        Self { store, fanout }
    }

    /// Create a record for `key`, translating `english` into every target
    /// language.
    ///
    /// Validation and the duplicate-key check both run before any outbound
    /// call. The store's unique index settles races between concurrent
    /// creates that pass the pre-check together.
    pub async fn create_record(&self, key: &str, english: &str) -> Result<TranslationRecord> {
        let key = key.trim();
        if key.is_empty() || english.trim().is_empty() {
            return Err(Error::Validation(
                "Both key and englishText are required".to_string(),
            ));
        }

        if self.store.find_translation_by_key(key)?.is_some() {
            return Err(Error::Conflict(format!(
                "Translation key '{}' already exists",
                key
            )));
        }

        let targets = self.fanout.expand(english).await;
        let translations = Translations {
            en: english.to_string(),
            hi: Some(targets.hi),
            es: Some(targets.es),
            fr: Some(targets.fr),
        };

        let record = self.store.insert_translation(key, &translations)?;
        info!(
            "Created translation '{}' ({} fallback fields)",
            record.key,
            record.translations.fallback_languages().len()
        );
        Ok(record)
    }

    /// Replace all language fields of record `id` with `translations`, verbatim.
    ///
    /// No re-validation and no provider calls: the caller has already
    /// reconciled the texts (for instance with [`Reconciler::preview`]).
    pub fn update_record(&self, id: &str, translations: Translations) -> Result<TranslationRecord> {
        let record = self
            .store
            .replace_translations(id, &translations)?
            .ok_or_else(|| Error::NotFound(format!("Translation {}", id)))?;
        debug!("Updated translation '{}' ({})", record.key, record.id);
        Ok(record)
    }

    /// Run the fan-out for `english` without persisting anything.
    pub async fn preview(&self, english: &str) -> Result<TargetTranslations> {
        if english.trim().is_empty() {
            return Err(Error::Validation("text is required".to_string()));
        }
        Ok(self.fanout.expand(english).await)
    }

    pub fn get_record(&self, id: &str) -> Result<TranslationRecord> {
        self.store
            .get_translation(id)?
            .ok_or_else(|| Error::NotFound(format!("Translation {}", id)))
    }

    pub fn provider_name(&self) -> &'static str {
        self.fanout.gateway().provider_name()
    }
}
