//! TMT Translate — translator gateway and fan-out orchestrator.
//!
//! Provides the `TranslationProvider` trait for remote translation.
//! `MyMemoryProvider` talks to a MyMemory-compatible HTTP endpoint;
//! `NoopProvider` is used offline and makes every field fall back to the
//! English source text. `TranslatorGateway` absorbs provider failures and
//! `FanOutOrchestrator` expands one English text into all target languages.

pub mod fanout;
pub mod gateway;
pub mod mymemory;

pub use fanout::{FanOutOrchestrator, TargetTranslations};
pub use gateway::{NoopProvider, ProviderError, TranslationProvider, TranslatorGateway};
pub use mymemory::MyMemoryProvider;

use std::sync::Arc;

use tmt_core::{TranslatorConfig, TranslatorKind};

/// Create the configured provider.
///
/// Falls back to `NoopProvider` when the HTTP client cannot be built.
pub fn create_provider(config: &TranslatorConfig) -> Arc<dyn TranslationProvider> {
    match config.kind {
        TranslatorKind::MyMemory => match MyMemoryProvider::new(config) {
            Ok(provider) => {
                tracing::info!(
                    "Using MyMemory translator at {} (timeout={}s)",
                    config.base_url,
                    config.timeout.as_secs()
                );
                return Arc::new(provider);
            }
            Err(e) => {
                tracing::warn!("MyMemory translator unavailable: {}. Translations will fall back to English.", e);
            }
        },
        TranslatorKind::None => {
            tracing::info!("Translator disabled. Translations will fall back to English.");
        }
    }

    Arc::new(NoopProvider)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_provider_none() {
        let config = TranslatorConfig {
            kind: TranslatorKind::None,
            ..Default::default()
        };
        assert_eq!(create_provider(&config).name(), "none");
    }

    #[test]
    fn test_create_provider_mymemory() {
        let config = TranslatorConfig::default();
        assert_eq!(create_provider(&config).name(), "mymemory");
    }
}
