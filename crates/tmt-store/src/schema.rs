//! Database schema SQL.

/// Translation records. `key` uniqueness is enforced here, not only in
/// application code, so concurrent creates cannot both succeed.
pub const TRANSLATIONS_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS translations (
    id TEXT PRIMARY KEY,
    key TEXT NOT NULL UNIQUE,
    en TEXT NOT NULL,
    hi TEXT,
    es TEXT,
    fr TEXT,
    created_at INTEGER NOT NULL,
    updated_at INTEGER NOT NULL
);
"#;

/// Users and their login sessions.
pub const AUTH_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    email TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,
    created_at INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS sessions (
    token TEXT PRIMARY KEY,
    user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    created_at INTEGER NOT NULL,
    expires_at INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_sessions_user ON sessions(user_id);
CREATE INDEX IF NOT EXISTS idx_sessions_expires ON sessions(expires_at);
"#;
