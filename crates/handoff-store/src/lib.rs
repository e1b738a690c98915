// SPDX-FileCopyrightText: 2026 Handoff Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite persistence layer for the Handoff admin console.
//!
//! Provides WAL-mode SQLite storage with embedded migrations and a
//! single-writer concurrency model via `tokio-rusqlite`, implementing the
//! key-value [`DocumentStore`] contract from `handoff-core`: server-assigned
//! timestamps, shallow-merge writes, and ordered sub-collection queries.
//! An in-memory implementation backs higher-layer tests.
//!
//! [`DocumentStore`]: handoff_core::DocumentStore

pub mod database;
pub mod memory;
pub mod migrations;
pub mod sqlite;

pub use database::Database;
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;
