//! Fan-out orchestrator: one English text in, one text per target language out.

use futures::future::join_all;
use serde::{Deserialize, Serialize};
use tmt_core::{LanguageCode, TARGET_LANGUAGES};
use tracing::debug;

use crate::gateway::TranslatorGateway;

/// Result of a fan-out. Every field is either a provider translation or a
/// copy of the English input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetTranslations {
    pub hi: String,
    pub es: String,
    pub fr: String,
}

impl TargetTranslations {
    pub fn get(&self, lang: LanguageCode) -> Option<&str> {
        match lang {
            LanguageCode::Hi => Some(&self.hi),
            LanguageCode::Es => Some(&self.es),
            LanguageCode::Fr => Some(&self.fr),
            LanguageCode::En => None,
        }
    }

    fn set(&mut self, lang: LanguageCode, text: String) {
        match lang {
            LanguageCode::Hi => self.hi = text,
            LanguageCode::Es => self.es = text,
            LanguageCode::Fr => self.fr = text,
            LanguageCode::En => {}
        }
    }
}

#[derive(Clone)]
pub struct FanOutOrchestrator {
    gateway: TranslatorGateway,
}

impl FanOutOrchestrator {
    pub fn new(gateway: TranslatorGateway) -> Self {
        Self { gateway }
    }

    pub fn gateway(&self) -> &TranslatorGateway {
        &self.gateway
    }

    /// Translate `english` into every target language.
    ///
    /// Calls are issued concurrently and merged by language once all have
    /// resolved, so completion order does not matter.
    pub async fn expand(&self, english: &str) -> TargetTranslations {
        let calls = TARGET_LANGUAGES.iter().map(|&lang| async move {
            (lang, self.gateway.translate(english, lang).await)
        });

        let mut merged = TargetTranslations::default();
        for (lang, text) in join_all(calls).await {
            merged.set(lang, text);
        }

        let fallbacks = TARGET_LANGUAGES
            .iter()
            .filter(|lang| merged.get(**lang) == Some(english))
            .count();
        debug!(
            "Fan-out complete: {}/{} languages fell back to English",
            fallbacks,
            TARGET_LANGUAGES.len()
        );

        merged
    }
}
