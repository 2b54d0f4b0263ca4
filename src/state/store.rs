use rusqlite::{Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// The Store is the device-local key-value database behind every persisted
/// field: personalization, the guestbook, the gallery folder. One row per
/// key, values as JSON, so a corrupt or missing field never invalidates the
/// others.
///
/// Failure policy lives here and only here: internals return typed errors,
/// the public `get`/`set` surface falls back to defaults and keeps the
/// in-memory value authoritative for the session. Store trouble must never
/// crash the page.
pub struct Store {
    conn: Option<Connection>,
    cache: HashMap<String, serde_json::Value>,
    db_path: PathBuf,
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("storage unavailable")]
    Unavailable,
}

impl Store {
    /// Where the database lives by default:
    /// - Linux: ~/.local/share/birthday-gift/bday.db
    /// - macOS: ~/Library/Application Support/birthday-gift/bday.db
    /// - Windows: %APPDATA%\birthday-gift\bday.db
    pub fn default_path() -> PathBuf {
        let mut path = dirs::data_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."));
        path.push("birthday-gift");
        path.push("bday.db");
        path
    }

    /// Open (or create) the store at `db_path`.
    ///
    /// Never fails: if the database cannot be opened the store runs
    /// in-memory for the session and durability is simply lost. Storage is
    /// typically unavailable for the whole session once it fails, so there
    /// is no retry.
    pub fn open(db_path: &Path) -> Self {
        let conn = match Self::try_open(db_path) {
            Ok(conn) => {
                log::info!("📁 Store opened at {}", db_path.display());
                Some(conn)
            }
            Err(e) => {
                log::warn!("store unavailable, running in-memory: {e}");
                None
            }
        };

        Self {
            conn,
            cache: HashMap::new(),
            db_path: db_path.to_path_buf(),
        }
    }

    fn try_open(db_path: &Path) -> Result<Connection, StoreError> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).map_err(|_| StoreError::Unavailable)?;
        }
        let conn = Connection::open(db_path)?;
        conn.execute(
            "CREATE TABLE IF NOT EXISTS kv (
                key     TEXT PRIMARY KEY,
                value   TEXT NOT NULL
            )",
            [],
        )?;
        Ok(conn)
    }

    /// Read `key`, or `default` when the key is absent, unreadable, or does
    /// not deserialize as `T`.
    pub fn get<T: DeserializeOwned>(&mut self, key: &str, default: T) -> T {
        self.get_opt(key).unwrap_or(default)
    }

    /// Like [`Store::get`] but keeps absence observable; the guestbook uses
    /// this to seed its welcome note exactly once.
    pub fn get_opt<T: DeserializeOwned>(&mut self, key: &str) -> Option<T> {
        if let Some(value) = self.cache.get(key) {
            return serde_json::from_value(value.clone()).ok();
        }

        let value = match self.fetch(key) {
            Ok(Some(value)) => value,
            Ok(None) => return None,
            Err(e) => {
                log::warn!("read of {key:?} failed, falling back to default: {e}");
                return None;
            }
        };

        let parsed = serde_json::from_value(value.clone()).ok();
        if parsed.is_some() {
            self.cache.insert(key.to_owned(), value);
        } else {
            log::warn!("stored value for {key:?} has the wrong shape, ignoring");
        }
        parsed
    }

    /// Read and decode a row; corruption surfaces as a typed error here and
    /// becomes a default exactly one level up
    fn fetch(&self, key: &str) -> Result<Option<serde_json::Value>, StoreError> {
        match self.read_raw(key)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Write-through set: the cache is updated first and stays authoritative
    /// for the session even when the disk write fails.
    pub fn set<T: Serialize>(&mut self, key: &str, value: &T) {
        let value = match serde_json::to_value(value) {
            Ok(value) => value,
            Err(e) => {
                log::warn!("value for {key:?} is not serializable, dropping: {e}");
                return;
            }
        };

        let raw = value.to_string();
        self.cache.insert(key.to_owned(), value);

        if let Err(e) = self.write_raw(key, &raw) {
            log::warn!("persisting {key:?} failed, keeping in-memory value: {e}");
        }
    }

    fn read_raw(&self, key: &str) -> Result<Option<String>, StoreError> {
        let conn = self.conn.as_ref().ok_or(StoreError::Unavailable)?;
        let raw = conn
            .query_row("SELECT value FROM kv WHERE key = ?1", [key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(raw)
    }

    fn write_raw(&self, key: &str, raw: &str) -> Result<(), StoreError> {
        let conn = self.conn.as_ref().ok_or(StoreError::Unavailable)?;
        conn.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            [key, raw],
        )?;
        Ok(())
    }
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("db_path", &self.db_path)
            .field("durable", &self.conn.is_some())
            .finish()
    }
}
