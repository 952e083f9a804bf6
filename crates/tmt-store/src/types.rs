//! Data types for translation records, users and sessions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tmt_core::LanguageCode;

/// Per-language texts of a record. `en` is the source text.
///
/// Missing fields deserialize as empty/absent so an update body is stored
/// exactly as sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Translations {
    pub en: String,
    pub hi: Option<String>,
    pub es: Option<String>,
    pub fr: Option<String>,
}

impl Translations {
    /// Text for a language, if present.
    pub fn get(&self, lang: LanguageCode) -> Option<&str> {
        match lang {
            LanguageCode::En => Some(self.en.as_str()),
            LanguageCode::Hi => self.hi.as_deref(),
            LanguageCode::Es => self.es.as_deref(),
            LanguageCode::Fr => self.fr.as_deref(),
        }
    }

    /// Target languages whose text is identical to the English source,
    /// i.e. fields that fell back when the provider had no translation.
    pub fn fallback_languages(&self) -> Vec<LanguageCode> {
        tmt_core::TARGET_LANGUAGES
            .iter()
            .copied()
            .filter(|lang| self.get(*lang) == Some(self.en.as_str()))
            .collect()
    }
}

/// A persisted translation record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationRecord {
    #[serde(rename = "_id")]
    pub id: String,
    pub key: String,
    pub translations: Translations,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

/// A registered user. The password hash is never serialized.
#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

/// A login session keyed by an opaque bearer token.
#[derive(Debug, Clone, Serialize)]
pub struct Session {
    pub token: String,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Store-level statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreStats {
    pub total_translations: i64,
    pub total_users: i64,
    pub active_sessions: i64,
    pub db_path: String,
    pub db_size_mb: f64,
}
