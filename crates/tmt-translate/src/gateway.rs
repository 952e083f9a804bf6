//! Translator gateway: one remote attempt per call, fallback to the source
//! text on any failure.
//!
//! `TranslationProvider` reports *why* a call failed; `TranslatorGateway`
//! logs the cause and hands back the original English so callers never see
//! an error. A field equal to its English source is the only trace a
//! failure leaves in a persisted record.

use std::sync::Arc;
use std::time::Duration;

use futures::future::BoxFuture;
use thiserror::Error;
use tmt_core::LanguageCode;
use tracing::{debug, warn};

/// Why a provider could not produce a translation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("timed out")]
    Timeout,

    #[error("provider returned status {0}")]
    Status(u16),

    #[error("malformed response: {0}")]
    MalformedPayload(String),

    #[error("response has no translated text")]
    MissingTranslation,

    #[error("no translation provider configured")]
    Unavailable,
}

/// A remote text-translation capability. English is always the source.
pub trait TranslationProvider: Send + Sync {
    /// Translate `text` from English into `target`.
    fn translate<'a>(
        &'a self,
        text: &'a str,
        target: LanguageCode,
    ) -> BoxFuture<'a, Result<String, ProviderError>>;

    /// Short identifier for logs and health output.
    fn name(&self) -> &'static str;
}

/// Provider that never translates (offline mode).
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopProvider;

impl TranslationProvider for NoopProvider {
    fn translate<'a>(
        &'a self,
        _text: &'a str,
        _target: LanguageCode,
    ) -> BoxFuture<'a, Result<String, ProviderError>> {
        Box::pin(async { Err(ProviderError::Unavailable) })
    }

    fn name(&self) -> &'static str {
        "none"
    }
}

/// Wraps a provider with the timeout and fallback-to-original policy.
#[derive(Clone)]
pub struct TranslatorGateway {
    provider: Arc<dyn TranslationProvider>,
    timeout: Duration,
}

impl TranslatorGateway {
    pub fn new(provider: Arc<dyn TranslationProvider>, timeout: Duration) -> Self {
        Self { provider, timeout }
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    /// Translate `text` into `target`, returning `text` unchanged on failure.
    ///
    /// English targets are returned as-is without a remote call.
    pub async fn translate(&self, text: &str, target: LanguageCode) -> String {
        if target.is_source() {
            return text.to_string();
        }

        match self.try_translate(text, target).await {
            Ok(translated) => {
                debug!(language = %target, "Translated via {}", self.provider.name());
                translated
            }
            Err(e) => {
                warn!(
                    language = %target,
                    provider = self.provider.name(),
                    cause = %e,
                    "No translation available, using original text"
                );
                text.to_string()
            }
        }
    }

    /// Single attempt bounded by the gateway timeout. Errors are not absorbed.
    pub async fn try_translate(
        &self,
        text: &str,
        target: LanguageCode,
    ) -> Result<String, ProviderError> {
        match tokio::time::timeout(self.timeout, self.provider.translate(text, target)).await {
            Ok(Ok(translated)) if !translated.trim().is_empty() => Ok(translated),
            Ok(Ok(_)) => Err(ProviderError::MissingTranslation),
            Ok(Err(e)) => Err(e),
            Err(_) => Err(ProviderError::Timeout),
        }
    }
}
