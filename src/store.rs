// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Key-value record storage. Values are opaque JSON text; typing lives in
//! [`crate::repo::Repository`].

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use rusqlite::{Connection, OptionalExtension, params};
use tracing::debug;

use crate::db::init_schema;
use crate::error::{Result, TrakrError};

#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Writes every entry or none of them.
    async fn set_many(&self, entries: &[(String, String)]) -> Result<()>;

    async fn remove(&self, key: &str) -> Result<()>;

    async fn keys(&self) -> Result<Vec<String>>;

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.set_many(&[(key.to_string(), value.to_string())]).await
    }
}

fn lock<T>(m: &Mutex<T>) -> Result<MutexGuard<'_, T>> {
    m.lock()
        .map_err(|_| TrakrError::Store("store lock poisoned".into()))
}

pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn new(conn: Connection) -> Result<Self> {
        init_schema(&conn)?;
        Ok(SqliteStore {
            conn: Mutex::new(conn),
        })
    }

    pub fn open(path: &Path) -> Result<Self> {
        Self::new(Connection::open(path)?)
    }

    pub fn in_memory() -> Result<Self> {
        Self::new(Connection::open_in_memory()?)
    }
}

#[async_trait]
impl RecordStore for SqliteStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let conn = lock(&self.conn)?;
        let v = conn
            .query_row(
                "SELECT value FROM records WHERE key=?1",
                params![key],
                |r| r.get::<_, String>(0),
            )
            .optional()?;
        Ok(v)
    }

    async fn set_many(&self, entries: &[(String, String)]) -> Result<()> {
        let mut conn = lock(&self.conn)?;
        let tx = conn.transaction()?;
        for (key, value) in entries {
            tx.execute(
                "INSERT INTO records(key, value, updated_at) VALUES (?1, ?2, datetime('now'))
                 ON CONFLICT(key) DO UPDATE
                 SET value=excluded.value, updated_at=excluded.updated_at",
                params![key, value],
            )?;
        }
        tx.commit()?;
        debug!(count = entries.len(), "records written");
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let conn = lock(&self.conn)?;
        conn.execute("DELETE FROM records WHERE key=?1", params![key])?;
        Ok(())
    }

    async fn keys(&self) -> Result<Vec<String>> {
        let conn = lock(&self.conn)?;
        let mut stmt = conn.prepare("SELECT key FROM records ORDER BY key")?;
        let rows = stmt.query_map([], |r| r.get::<_, String>(0))?;
        let mut out = Vec::new();
        for row in rows {
            out.push(row?);
        }
        Ok(out)
    }
}

#[derive(Default)]
pub struct MemoryStore {
    records: Mutex<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(lock(&self.records)?.get(key).cloned())
    }

    async fn set_many(&self, entries: &[(String, String)]) -> Result<()> {
        let mut records = lock(&self.records)?;
        for (key, value) in entries {
            records.insert(key.clone(), value.clone());
        }
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        lock(&self.records)?.remove(key);
        Ok(())
    }

    async fn keys(&self) -> Result<Vec<String>> {
        Ok(lock(&self.records)?.keys().cloned().collect())
    }
}
