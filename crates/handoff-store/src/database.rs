// SPDX-FileCopyrightText: 2026 Handoff Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Database connection management with PRAGMA setup, WAL mode, and lifecycle.
//!
//! All writes are serialized through tokio-rusqlite's single background
//! thread. The [`Database`] struct IS the single writer; do NOT create
//! additional Connection instances for writes.

use std::time::Duration;

use handoff_core::HandoffError;
use tokio_rusqlite::Connection;

/// Format for store-assigned timestamps (RFC3339 with millisecond precision).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

/// Convert a tokio-rusqlite error into `HandoffError::Storage`.
pub(crate) fn map_tr_err(e: tokio_rusqlite::Error<rusqlite::Error>) -> HandoffError {
    HandoffError::Storage {
        source: Box::new(e),
    }
}

/// Handle to the SQLite database behind the document store.
///
/// Wraps a single `tokio_rusqlite::Connection`; all query operations go
/// through [`Database::connection`] and `conn.call()`.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open (creating if necessary) the database at `path`, apply PRAGMAs,
    /// and run pending migrations.
    pub async fn open(path: &str, wal_mode: bool) -> Result<Self, HandoffError> {
        let conn = Connection::open(path)
            .await
            .map_err(|e| map_tr_err(tokio_rusqlite::Error::Error(e)))?;

        conn.call(move |conn| -> Result<(), rusqlite::Error> {
            if wal_mode {
                conn.pragma_update(None, "journal_mode", "WAL")?;
            }
            conn.pragma_update(None, "synchronous", "NORMAL")?;
            conn.pragma_update(None, "foreign_keys", "ON")?;
            conn.busy_timeout(Duration::from_secs(5))?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)?;

        let migration_result = conn
            .call(|conn| -> Result<Result<(), HandoffError>, rusqlite::Error> {
                Ok(crate::migrations::run_migrations(conn))
            })
            .await
            .map_err(map_tr_err)?;
        migration_result?;

        Ok(Self { conn })
    }

    /// Returns the underlying tokio-rusqlite connection.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Checkpoint the WAL and flush pending writes.
    pub async fn close(&self) -> Result<(), HandoffError> {
        self.conn
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)
    }
}
