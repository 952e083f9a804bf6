//! TMT Core — error taxonomy, configuration, language codes.

pub mod config;
pub mod error;
pub mod language;

pub use config::{TmtConfig, TranslatorConfig, TranslatorKind, DB_FILE};
pub use error::{Error, Result};
pub use language::{LanguageCode, TARGET_LANGUAGES};
