//! TMT Store — SQLite persistence for translation records, users and sessions.

pub mod schema;
pub mod sqlite;
pub mod types;

pub use sqlite::SqliteStore;
pub use types::*;
