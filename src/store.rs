//! Persisted key-value storage.
//!
//! Everything the application keeps between runs (API key, bookmarks, cached
//! responses) goes through [`KvStore`], so the persistent backend can be swapped
//! for [`MemoryStore`] in tests.

use std::{fs::create_dir_all, path::Path, sync::Arc};

use async_trait::async_trait;
use dashmap::DashMap;
use libsql::{Builder, Connection, Database};
use log::debug;

use crate::error::FvResult;

pub static KEY_PREFIX: &str = "eps_";

pub type SharedStore = Arc<dyn KvStore>;

#[async_trait]
pub trait KvStore: Send + Sync {
    async fn get(&self, key: &str) -> FvResult<Option<String>>;

    /// Overwrites any existing value.
    async fn set(&self, key: &str, value: &str) -> FvResult<()>;

    async fn delete(&self, key: &str) -> FvResult<()>;
}

pub fn namespaced(key: &str) -> String {
    format!("{KEY_PREFIX}{key}")
}

pub struct LibsqlStore {
    _db: Database,
    conn: Connection,
}

impl LibsqlStore {
    pub async fn open(path: &Path) -> FvResult<Self> {
        if let Some(dir) = path.parent() {
            if !dir.as_os_str().is_empty() {
                create_dir_all(dir)?;
            }
        }

        let db = Builder::new_local(path).build().await?;
        Self::init(db).await
    }

    pub async fn open_in_memory() -> FvResult<Self> {
        let db = Builder::new_local(":memory:").build().await?;
        Self::init(db).await
    }

    async fn init(db: Database) -> FvResult<Self> {
        let conn = db.connect()?;
        conn.execute(
            r#"
CREATE TABLE IF NOT EXISTS "kv" (
    "key"    TEXT PRIMARY KEY,
    "value"  TEXT NOT NULL)
;"#,
            (),
        )
        .await?;

        Ok(Self { _db: db, conn })
    }
}

#[async_trait]
impl KvStore for LibsqlStore {
    async fn get(&self, key: &str) -> FvResult<Option<String>> {
        let mut rows = self
            .conn
            .query(
                r#"
SELECT "value"
FROM "kv"
WHERE "key" = ?
LIMIT 1
;"#,
                [key],
            )
            .await?;

        if let Some(row) = rows.next().await? {
            return Ok(Some(row.get::<String>(0)?));
        }

        Ok(None)
    }

    async fn set(&self, key: &str, value: &str) -> FvResult<()> {
        self.conn
            .execute(
                r#"
INSERT INTO "kv"
    ("key", "value")
VALUES
    (?, ?)
ON CONFLICT ("key") DO UPDATE SET "value" = excluded."value"
;"#,
                [key, value],
            )
            .await?;

        Ok(())
    }

    async fn delete(&self, key: &str) -> FvResult<()> {
        let deleted = self
            .conn
            .execute(
                r#"
DELETE FROM "kv"
WHERE "key" = ?
;"#,
                [key],
            )
            .await?;
        debug!("[Store] delete '{key}' ({deleted} rows)");

        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryStore {
    entries: DashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KvStore for MemoryStore {
    async fn get(&self, key: &str) -> FvResult<Option<String>> {
        Ok(self.entries.get(key).map(|v| v.value().clone()))
    }

    async fn set(&self, key: &str, value: &str) -> FvResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn delete(&self, key: &str) -> FvResult<()> {
        self.entries.remove(key);
        Ok(())
    }
}
