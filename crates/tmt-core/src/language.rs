//! Language codes supported by translation records.

use serde::{Deserialize, Serialize};

/// Closed set of languages a record can hold. `En` is the source language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageCode {
    En,
    Hi,
    Es,
    Fr,
}

/// Fan-out targets, in dispatch order.
pub const TARGET_LANGUAGES: [LanguageCode; 3] = [LanguageCode::Hi, LanguageCode::Es, LanguageCode::Fr];

impl LanguageCode {
    /// Two-letter ISO 639-1 code, as used in provider `langpair` parameters.
    pub fn code(&self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Hi => "hi",
            Self::Es => "es",
            Self::Fr => "fr",
        }
    }

    pub fn is_source(&self) -> bool {
        matches!(self, Self::En)
    }
}

impl std::fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}
