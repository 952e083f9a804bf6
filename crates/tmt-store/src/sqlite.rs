//! SQLite-backed store for translation records, users and sessions.
//!
//! All methods are synchronous and take the connection lock for the duration
//! of a single statement, so callers must not hold results across awaits
//! expecting isolation.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use rusqlite::{params, Connection, ErrorCode, OpenFlags, OptionalExtension};
use tracing::{debug, info};

use crate::schema::{AUTH_SQL, TRANSLATIONS_SQL};
use crate::types::*;
use tmt_core::{Error, Result};

/// SQLite store. Cheap to share behind an `Arc`.
pub struct SqliteStore {
    conn: Mutex<Connection>,
    db_path: PathBuf,
}

impl SqliteStore {
    /// Open or create the store at `db_path`, creating parent directories.
    pub fn open(db_path: impl AsRef<Path>) -> Result<Self> {
        let db_path = db_path.as_ref().to_path_buf();
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| Error::Storage(e.to_string()))?;
        }

        let conn = Connection::open(&db_path).map_err(db_err)?;
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA foreign_keys = ON;
             PRAGMA synchronous = NORMAL;",
        )
        .map_err(db_err)?;

        let store = Self::from_connection(conn, db_path)?;
        info!(
            "SqliteStore initialized: {} translations, {} users, path={}",
            store.count_translations()?,
            store.count_users()?,
            store.db_path.display()
        );
        Ok(store)
    }

    /// Open a store that must already exist. Nothing is created on disk when
    /// `db_path` is missing; the result is `Error::NotFound`.
    pub fn open_existing(db_path: impl AsRef<Path>) -> Result<Self> {
        let db_path = db_path.as_ref().to_path_buf();
        if !db_path.is_file() {
            return Err(Error::NotFound(format!("Database {}", db_path.display())));
        }

        let conn = Connection::open_with_flags(
            &db_path,
            OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(db_err)?;
        Self::from_connection(conn, db_path)
    }

    /// In-memory store, used by tests.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(db_err)?;
        conn.execute_batch("PRAGMA foreign_keys = ON;").map_err(db_err)?;
        Self::from_connection(conn, PathBuf::from(":memory:"))
    }

    fn from_connection(conn: Connection, db_path: PathBuf) -> Result<Self> {
        let full_schema = format!("{}\n{}", TRANSLATIONS_SQL, AUTH_SQL);
        conn.execute_batch(&full_schema)
            .map_err(|e| Error::Database(format!("Schema init failed: {}", e)))?;
        Ok(Self {
            conn: Mutex::new(conn),
            db_path,
        })
    }

    // ---------------------------------------------------------------
    // Translation records
    // ---------------------------------------------------------------

    /// Insert a new record. A duplicate `key` fails with `Error::Conflict`.
    pub fn insert_translation(
        &self,
        key: &str,
        translations: &Translations,
    ) -> Result<TranslationRecord> {
        let id = uuid::Uuid::new_v4().to_string();
        let now = now_millis();

        let conn = self.conn.lock();
        conn.prepare_cached(
            "INSERT INTO translations (id, key, en, hi, es, fr, created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)",
        )
        .map_err(db_err)?
        .execute(params![
            id,
            key,
            translations.en,
            translations.hi,
            translations.es,
            translations.fr,
            now,
        ])
        .map_err(|e| {
            if is_unique_violation(&e) {
                Error::Conflict(format!("Translation key '{}' already exists", key))
            } else {
                db_err(e)
            }
        })?;
        debug!("Inserted translation {} ({})", key, id);

        Ok(TranslationRecord {
            id,
            key: key.to_string(),
            translations: translations.clone(),
            created_at: from_millis(now),
            updated_at: from_millis(now),
        })
    }

    /// Get a record by id.
    pub fn get_translation(&self, id: &str) -> Result<Option<TranslationRecord>> {
        let conn = self.conn.lock();
        let row = conn
            .prepare_cached("SELECT * FROM translations WHERE id = ?1")
            .map_err(db_err)?
            .query_row(params![id], Self::row_to_record)
            .optional()
            .map_err(db_err)?;
        Ok(row)
    }

    /// Find a record by its exact (case-sensitive) key.
    pub fn find_translation_by_key(&self, key: &str) -> Result<Option<TranslationRecord>> {
        let conn = self.conn.lock();
        let row = conn
            .prepare_cached("SELECT * FROM translations WHERE key = ?1")
            .map_err(db_err)?
            .query_row(params![key], Self::row_to_record)
            .optional()
            .map_err(db_err)?;
        Ok(row)
    }

    /// Overwrite all four language fields of a record.
    /// Returns `None` when no record has this id.
    pub fn replace_translations(
        &self,
        id: &str,
        translations: &Translations,
    ) -> Result<Option<TranslationRecord>> {
        let now = now_millis();
        let conn = self.conn.lock();
        let count = conn
            .prepare_cached(
                "UPDATE translations SET en = ?1, hi = ?2, es = ?3, fr = ?4, updated_at = ?5 \
                 WHERE id = ?6",
            )
            .map_err(db_err)?
            .execute(params![
                translations.en,
                translations.hi,
                translations.es,
                translations.fr,
                now,
                id,
            ])
            .map_err(db_err)?;
        if count == 0 {
            return Ok(None);
        }

        let row = conn
            .prepare_cached("SELECT * FROM translations WHERE id = ?1")
            .map_err(db_err)?
            .query_row(params![id], Self::row_to_record)
            .optional()
            .map_err(db_err)?;
        Ok(row)
    }

    /// All records in insertion order.
    pub fn list_translations(&self) -> Result<Vec<TranslationRecord>> {
        let conn = self.conn.lock();
        let mut stmt = conn
            .prepare_cached("SELECT * FROM translations ORDER BY rowid ASC")
            .map_err(db_err)?;
        let records = stmt
            .query_map([], Self::row_to_record)
            .map_err(db_err)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(db_err)?;
        Ok(records)
    }

    pub fn count_translations(&self) -> Result<i64> {
        let conn = self.conn.lock();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM translations", [], |row| row.get(0))
            .map_err(db_err)?;
        Ok(count)
    }

    // ---------------------------------------------------------------
    // Users
    // ---------------------------------------------------------------

    /// Insert a user. A duplicate email fails with `Error::Conflict`.
    pub fn insert_user(&self, name: &str, email: &str, password_hash: &str) -> Result<User> {
        let id = uuid::Uuid::new_v4().to_string();
        let now = now_millis();

        let conn = self.conn.lock();
        conn.prepare_cached(
            "INSERT INTO users (id, name, email, password_hash, created_at) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .map_err(db_err)?
        .execute(params![id, name, email, password_hash, now])
        .map_err(|e| {
            if is_unique_violation(&e) {
                Error::Conflict("User with this email already exists".to_string())
            } else {
                db_err(e)
            }
        })?;

        Ok(User {
            id,
            name: name.to_string(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            created_at: from_millis(now),
        })
    }

    pub fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let conn = self.conn.lock();
        let row = conn
            .prepare_cached("SELECT * FROM users WHERE email = ?1")
            .map_err(db_err)?
            .query_row(params![email], Self::row_to_user)
            .optional()
            .map_err(db_err)?;
        Ok(row)
    }

    pub fn get_user(&self, id: &str) -> Result<Option<User>> {
        let conn = self.conn.lock();
        let row = conn
            .prepare_cached("SELECT * FROM users WHERE id = ?1")
            .map_err(db_err)?
            .query_row(params![id], Self::row_to_user)
            .optional()
            .map_err(db_err)?;
        Ok(row)
    }

    pub fn count_users(&self) -> Result<i64> {
        let conn = self.conn.lock();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))
            .map_err(db_err)?;
        Ok(count)
    }

    // ---------------------------------------------------------------
    // Sessions
    // ---------------------------------------------------------------

    pub fn insert_session(&self, session: &Session) -> Result<()> {
        let conn = self.conn.lock();
        conn.prepare_cached(
            "INSERT INTO sessions (token, user_id, created_at, expires_at) VALUES (?1, ?2, ?3, ?4)",
        )
        .map_err(db_err)?
        .execute(params![
            session.token,
            session.user_id,
            session.created_at.timestamp_millis(),
            session.expires_at.timestamp_millis(),
        ])
        .map_err(db_err)?;
        Ok(())
    }

    pub fn find_session(&self, token: &str) -> Result<Option<Session>> {
        let conn = self.conn.lock();
        let row = conn
            .prepare_cached("SELECT * FROM sessions WHERE token = ?1")
            .map_err(db_err)?
            .query_row(params![token], |row| {
                Ok(Session {
                    token: row.get("token")?,
                    user_id: row.get("user_id")?,
                    created_at: from_millis(row.get("created_at")?),
                    expires_at: from_millis(row.get("expires_at")?),
                })
            })
            .optional()
            .map_err(db_err)?;
        Ok(row)
    }

    /// Delete a session. Returns whether it existed.
    pub fn delete_session(&self, token: &str) -> Result<bool> {
        let conn = self.conn.lock();
        let count = conn
            .execute("DELETE FROM sessions WHERE token = ?1", params![token])
            .map_err(db_err)?;
        Ok(count > 0)
    }

    /// Remove sessions that expired at or before `now`.
    pub fn purge_expired_sessions(&self, now: DateTime<Utc>) -> Result<usize> {
        let conn = self.conn.lock();
        let count = conn
            .execute(
                "DELETE FROM sessions WHERE expires_at <= ?1",
                params![now.timestamp_millis()],
            )
            .map_err(db_err)?;
        Ok(count)
    }

    // ---------------------------------------------------------------
    // Stats
    // ---------------------------------------------------------------

    pub fn get_stats(&self) -> Result<StoreStats> {
        let total_translations = self.count_translations()?;
        let total_users = self.count_users()?;

        let conn = self.conn.lock();
        let active_sessions: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sessions WHERE expires_at > ?1",
                params![now_millis()],
                |row| row.get(0),
            )
            .map_err(db_err)?;
        drop(conn);

        let db_size = std::fs::metadata(&self.db_path)
            .map(|m| m.len())
            .unwrap_or(0);

        Ok(StoreStats {
            total_translations,
            total_users,
            active_sessions,
            db_path: self.db_path.to_string_lossy().to_string(),
            db_size_mb: db_size as f64 / (1024.0 * 1024.0),
        })
    }

    // ---------------------------------------------------------------
    // Row Mapping Helpers
    // ---------------------------------------------------------------

    fn row_to_record(row: &rusqlite::Row<'_>) -> rusqlite::Result<TranslationRecord> {
        Ok(TranslationRecord {
            id: row.get("id")?,
            key: row.get("key")?,
            translations: Translations {
                en: row.get("en")?,
                hi: row.get("hi")?,
                es: row.get("es")?,
                fr: row.get("fr")?,
            },
            created_at: from_millis(row.get("created_at")?),
            updated_at: from_millis(row.get("updated_at")?),
        })
    }

    fn row_to_user(row: &rusqlite::Row<'_>) -> rusqlite::Result<User> {
        Ok(User {
            id: row.get("id")?,
            name: row.get("name")?,
            email: row.get("email")?,
            password_hash: row.get("password_hash")?,
            created_at: from_millis(row.get("created_at")?),
        })
    }
}

fn db_err(e: rusqlite::Error) -> Error {
    Error::Database(e.to_string())
}

fn is_unique_violation(e: &rusqlite::Error) -> bool {
    matches!(
        e,
        rusqlite::Error::SqliteFailure(err, _) if err.code == ErrorCode::ConstraintViolation
    )
}

fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

fn from_millis(ms: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(ms).unwrap_or_default()
}
