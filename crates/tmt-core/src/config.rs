//! Configuration, built once at startup and passed to component constructors.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default MyMemory endpoint.
pub const DEFAULT_TRANSLATOR_URL: &str = "https://api.mymemory.translated.net/get";

/// Database file name inside the data directory.
pub const DB_FILE: &str = "tmt.db";

/// Which translation provider backs the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TranslatorKind {
    /// MyMemory-compatible HTTP endpoint.
    MyMemory,
    /// Offline: every translation falls back to the source text.
    None,
}

impl TranslatorKind {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "mymemory" => Some(Self::MyMemory),
            "none" | "off" | "offline" => Some(Self::None),
            _ => None,
        }
    }
}

/// Outbound translation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslatorConfig {
    pub kind: TranslatorKind,
    /// Endpoint accepting `q` and `langpair` query parameters.
    pub base_url: String,
    /// Per-call timeout. No retries are made.
    pub timeout: Duration,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            kind: TranslatorKind::MyMemory,
            base_url: DEFAULT_TRANSLATOR_URL.to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

/// Top-level service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TmtConfig {
    /// HTTP server port.
    pub port: u16,
    /// Root data directory.
    pub data_dir: PathBuf,
    /// SQLite database file (`<data_dir>/tmt.db`).
    pub db_path: PathBuf,
    pub translator: TranslatorConfig,
    /// Require a session token on `/api/translations/*`.
    pub require_auth: bool,
    pub session_ttl: Duration,
}

impl TmtConfig {
    /// Create configuration from environment and defaults. Creates `data_dir`.
    pub fn from_env(data_dir: impl AsRef<Path>) -> std::io::Result<Self> {
        let port = env_parse("PORT").unwrap_or(8080);

        let translator = TranslatorConfig {
            kind: std::env::var("TMT_TRANSLATOR")
                .ok()
                .and_then(|v| TranslatorKind::parse(&v))
                .unwrap_or(TranslatorKind::MyMemory),
            base_url: std::env::var("TMT_TRANSLATOR_URL")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_TRANSLATOR_URL.to_string()),
            timeout: Duration::from_secs(env_parse("TMT_TRANSLATOR_TIMEOUT_SECS").unwrap_or(10)),
        };

        let require_auth = std::env::var("TMT_REQUIRE_AUTH")
            .ok()
            .and_then(|v| parse_bool(&v))
            .unwrap_or(true);

        let ttl_hours: u64 = env_parse("TMT_SESSION_TTL_HOURS").unwrap_or(24);

        let mut config = Self::with_data_dir(data_dir)?;
        config.port = port;
        config.translator = translator;
        config.require_auth = require_auth;
        config.session_ttl = Duration::from_secs(ttl_hours * 3600);
        Ok(config)
    }

    /// Defaults rooted at `data_dir`, ignoring the environment.
    pub fn with_data_dir(data_dir: impl AsRef<Path>) -> std::io::Result<Self> {
        let data_dir = data_dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&data_dir)?;
        Ok(Self {
            port: 8080,
            db_path: data_dir.join(DB_FILE),
            data_dir,
            translator: TranslatorConfig::default(),
            require_auth: true,
            session_ttl: Duration::from_secs(24 * 3600),
        })
    }
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_data_dir_defaults() {
        let dir = std::env::temp_dir().join(format!("tmt-config-{}", std::process::id()));
        let config = TmtConfig::with_data_dir(&dir).unwrap();
        assert_eq!(config.db_path, dir.join("tmt.db"));
        assert_eq!(config.translator.timeout, Duration::from_secs(10));
        assert_eq!(config.translator.kind, TranslatorKind::MyMemory);
        assert!(config.require_auth);
        assert!(dir.exists());
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_translator_kind_parse() {
        assert_eq!(TranslatorKind::parse("MyMemory"), Some(TranslatorKind::MyMemory));
        assert_eq!(TranslatorKind::parse("none"), Some(TranslatorKind::None));
        assert_eq!(TranslatorKind::parse("offline"), Some(TranslatorKind::None));
        assert_eq!(TranslatorKind::parse("deepl"), None);
    }

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool("TRUE"), Some(true));
        assert_eq!(parse_bool("0"), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }
}
