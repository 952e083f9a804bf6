//! MyMemory-compatible HTTP translation provider.
//!
//! `GET {base_url}?q=<text>&langpair=en|<target>`; the translation is read
//! from `responseData.translatedText`.

use futures::future::BoxFuture;
use reqwest::Client;
use serde::Deserialize;
use tmt_core::{LanguageCode, TranslatorConfig};
use tracing::debug;

use crate::gateway::{ProviderError, TranslationProvider};

#[derive(Debug, Deserialize)]
struct MyMemoryResponse {
    #[serde(rename = "responseData")]
    response_data: Option<ResponseData>,
    /// Number or numeric string; MyMemory reports quota errors here with HTTP 200.
    #[serde(rename = "responseStatus")]
    response_status: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct ResponseData {
    #[serde(rename = "translatedText")]
    translated_text: Option<String>,
}

pub struct MyMemoryProvider {
    client: Client,
    base_url: String,
}

impl MyMemoryProvider {
    pub fn new(config: &TranslatorConfig) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ProviderError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    async fn request(&self, text: &str, target: LanguageCode) -> Result<String, ProviderError> {
        let langpair = format!("en|{}", target.code());
        let response = self
            .client
            .get(&self.base_url)
            .query(&[("q", text), ("langpair", langpair.as_str())])
            .send()
            .await
            .map_err(classify)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Status(status.as_u16()));
        }

        let body: MyMemoryResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                ProviderError::Timeout
            } else {
                ProviderError::MalformedPayload(e.to_string())
            }
        })?;
        debug!("MyMemory response for {}: {:?}", target, body);

        if let Some(code) = body.response_status.as_ref().and_then(status_code) {
            if !(200..300).contains(&code) {
                return Err(ProviderError::Status(code));
            }
        }

        body.response_data
            .and_then(|data| data.translated_text)
            .filter(|text| !text.trim().is_empty())
            .ok_or(ProviderError::MissingTranslation)
    }
}

impl TranslationProvider for MyMemoryProvider {
    fn translate<'a>(
        &'a self,
        text: &'a str,
        target: LanguageCode,
    ) -> BoxFuture<'a, Result<String, ProviderError>> {
        Box::pin(self.request(text, target))
    }

    fn name(&self) -> &'static str {
        "mymemory"
    }
}

fn classify(e: reqwest::Error) -> ProviderError {
    if e.is_timeout() {
        ProviderError::Timeout
    } else {
        ProviderError::Transport(e.to_string())
    }
}

fn status_code(value: &serde_json::Value) -> Option<u16> {
    match value {
        serde_json::Value::Number(n) => n.as_u64().and_then(|n| u16::try_from(n).ok()),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
