//! SQLite-backed durable store

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;
use rusqlite::{Connection, OptionalExtension};
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;

use crate::accessor::KeyValueStore;
use crate::error::StorageError;
use crate::migrations::run_migrations;
use crate::Result;

/// Durable store keeping each slot as a JSON text row.
///
/// All statements run on the blocking thread pool; the connection itself is
/// shared between clones behind a mutex.
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;

        let _: String =
            conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))?;

        run_migrations(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        run_migrations(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    async fn with_connection<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let conn = conn.lock();
            f(&conn)
        })
        .await?
    }
}

impl Clone for SqliteStore {
    fn clone(&self) -> Self {
        Self {
            conn: Arc::clone(&self.conn),
        }
    }
}

#[async_trait]
impl KeyValueStore for SqliteStore {
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        let owned_key = key.to_string();
        let raw: Option<String> = self
            .with_connection(move |conn| {
                let value = conn
                    .query_row(
                        "SELECT value FROM kv WHERE key = ?1",
                        [owned_key.as_str()],
                        |row| row.get(0),
                    )
                    .optional()?;
                Ok(value)
            })
            .await?;

        raw.map(|text| {
            serde_json::from_str(&text).map_err(|source| StorageError::Decode {
                key: key.to_string(),
                source,
            })
        })
        .transpose()
    }

    async fn set(&self, key: &str, value: Value) -> Result<()> {
        let owned_key = key.to_string();
        let text = serde_json::to_string(&value).map_err(StorageError::Encode)?;
        let updated_at = Utc::now().to_rfc3339();

        self.with_connection(move |conn| {
            conn.execute(
                "INSERT OR REPLACE INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)",
                rusqlite::params![owned_key, text, updated_at],
            )?;
            Ok(())
        })
        .await
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let owned_key = key.to_string();
        self.with_connection(move |conn| {
            conn.execute("DELETE FROM kv WHERE key = ?1", [owned_key.as_str()])?;
            Ok(())
        })
        .await
    }
}
