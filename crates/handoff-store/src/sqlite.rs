// SPDX-FileCopyrightText: 2026 Handoff Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the DocumentStore trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::{params, OptionalExtension};
use serde_json::Map;
use tokio::sync::OnceCell;
use tracing::debug;

use handoff_config::model::StorageConfig;
use handoff_core::{
    Adapter, AdapterType, Document, DocumentStore, HandoffError, HealthStatus,
};

use crate::database::{map_tr_err, Database, TIMESTAMP_FORMAT};

/// SQLite-backed document store.
///
/// Wraps a [`Database`] handle; all reads and writes go through the single
/// tokio-rusqlite background thread, which is the only concurrency control
/// the store offers (per-document merge writes, no compare-and-swap).
/// The database is lazily initialized on the first call to
/// [`SqliteStore::initialize`].
pub struct SqliteStore {
    config: StorageConfig,
    db: OnceCell<Database>,
}

impl SqliteStore {
    /// Create a new SqliteStore with the given configuration.
    ///
    /// The database connection is not opened until [`initialize`] is called.
    ///
    /// [`initialize`]: SqliteStore::initialize
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            db: OnceCell::new(),
        }
    }

    /// Open the database at the configured path and run migrations.
    ///
    /// Guarded by the `OnceCell`: a second call fails rather than racing.
    pub async fn initialize(&self) -> Result<(), HandoffError> {
        let db = Database::open(&self.config.database_path, self.config.wal_mode).await?;
        self.db.set(db).map_err(|_| HandoffError::Storage {
            source: "store already initialized".into(),
        })?;
        debug!(path = %self.config.database_path, "SQLite document store initialized");
        Ok(())
    }

    /// Checkpoint the WAL and flush pending writes.
    pub async fn close(&self) -> Result<(), HandoffError> {
        self.db()?.close().await?;
        debug!("WAL checkpoint complete");
        Ok(())
    }

    /// Returns the underlying Database, or an error if not initialized.
    fn db(&self) -> Result<&Database, HandoffError> {
        self.db.get().ok_or_else(|| HandoffError::Storage {
            source: "store not initialized -- call initialize() first".into(),
        })
    }
}

/// Materialize one `documents` row into a [`Document`].
///
/// Unparseable timestamps degrade to `None` rather than failing the read;
/// a malformed fields column is a hard error.
fn row_to_document(
    key: String,
    fields: String,
    created_at: String,
    updated_at: String,
) -> Result<Document, rusqlite::Error> {
    let fields: Map<String, serde_json::Value> =
        serde_json::from_str(&fields).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(
                0,
                rusqlite::types::Type::Text,
                Box::new(e),
            )
        })?;
    Ok(Document {
        key,
        fields,
        created_at: parse_timestamp(&created_at),
        updated_at: parse_timestamp(&updated_at),
    })
}

fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|t| t.with_timezone(&Utc))
}

fn now_string() -> String {
    Utc::now().format(TIMESTAMP_FORMAT).to_string()
}

#[async_trait]
impl Adapter for SqliteStore {
    fn name(&self) -> &str {
        "sqlite"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Storage
    }

    async fn health_check(&self) -> Result<HealthStatus, HandoffError> {
        let db = self.db()?;
        db.connection()
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch("SELECT 1;")?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)?;
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), HandoffError> {
        // Shutdown delegates to close if the DB was initialized.
        if let Some(db) = self.db.get() {
            db.close().await?;
            debug!("shutdown: WAL checkpoint complete");
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for SqliteStore {
    async fn get(
        &self,
        collection: &str,
        key: &str,
    ) -> Result<Option<Document>, HandoffError> {
        let collection = collection.to_string();
        let key = key.to_string();
        self.db()?
            .connection()
            .call(move |conn| {
                conn.query_row(
                    "SELECT key, fields, created_at, updated_at
                     FROM documents WHERE collection = ?1 AND key = ?2",
                    params![collection, key],
                    |row| {
                        row_to_document(row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?)
                    },
                )
                .optional()
            })
            .await
            .map_err(map_tr_err)
    }

    async fn set_merge(
        &self,
        collection: &str,
        key: &str,
        fields: Map<String, serde_json::Value>,
    ) -> Result<(), HandoffError> {
        let collection = collection.to_string();
        let key = key.to_string();
        self.db()?
            .connection()
            .call(move |conn| {
                let existing: Option<String> = conn
                    .query_row(
                        "SELECT fields FROM documents WHERE collection = ?1 AND key = ?2",
                        params![collection, key],
                        |row| row.get(0),
                    )
                    .optional()?;

                // A malformed fields column fails the write, like the read
                // path, instead of silently replacing the stored document.
                let mut merged: Map<String, serde_json::Value> = match existing {
                    Some(s) => serde_json::from_str(&s).map_err(|e| {
                        rusqlite::Error::FromSqlConversionFailure(
                            0,
                            rusqlite::types::Type::Text,
                            Box::new(e),
                        )
                    })?,
                    None => Map::new(),
                };
                for (k, v) in fields {
                    merged.insert(k, v);
                }
                let merged = serde_json::Value::Object(merged).to_string();

                // Both timestamps refresh on every write (the accepted
                // merge-strategy quirk: created_at is not first-write time).
                let now = now_string();
                conn.execute(
                    "INSERT INTO documents (collection, key, fields, created_at, updated_at)
                     VALUES (?1, ?2, ?3, ?4, ?4)
                     ON CONFLICT (collection, key) DO UPDATE SET
                       fields = excluded.fields,
                       created_at = excluded.created_at,
                       updated_at = excluded.updated_at",
                    params![collection, key, merged, now],
                )?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)
    }

    async fn delete(&self, collection: &str, key: &str) -> Result<(), HandoffError> {
        let collection = collection.to_string();
        let key = key.to_string();
        self.db()?
            .connection()
            .call(move |conn| {
                conn.execute(
                    "DELETE FROM documents WHERE collection = ?1 AND key = ?2",
                    params![collection, key],
                )?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)
    }

    async fn list(&self, collection: &str) -> Result<Vec<Document>, HandoffError> {
        let collection = collection.to_string();
        self.db()?
            .connection()
            .call(move |conn| {
                let mut stmt = conn.prepare(
                    "SELECT key, fields, created_at, updated_at
                     FROM documents WHERE collection = ?1",
                )?;
                let rows = stmt.query_map(params![collection], |row| {
                    row_to_document(row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?)
                })?;
                let mut documents = Vec::new();
                for row in rows {
                    documents.push(row?);
                }
                Ok(documents)
            })
            .await
            .map_err(map_tr_err)
    }

    async fn query_desc(
        &self,
        collection: &str,
        order_by: &str,
        limit: i64,
    ) -> Result<Vec<Document>, HandoffError> {
        let collection = collection.to_string();
        let path = format!("$.{order_by}");
        self.db()?
            .connection()
            .call(move |conn| {
                // NULLs sort last under DESC, so documents missing the
                // order field end up at the tail.
                let mut stmt = conn.prepare(
                    "SELECT key, fields, created_at, updated_at
                     FROM documents WHERE collection = ?1
                     ORDER BY json_extract(fields, ?2) DESC LIMIT ?3",
                )?;
                let rows = stmt.query_map(params![collection, path, limit], |row| {
                    row_to_document(row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?)
                })?;
                let mut documents = Vec::new();
                for row in rows {
                    documents.push(row?);
                }
                Ok(documents)
            })
            .await
            .map_err(map_tr_err)
    }
}
