// SPDX-FileCopyrightText: 2026 Handoff Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared across adapter traits and the Handoff console.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Map;
use strum::{Display, EnumString};

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Adapter is fully operational.
    Healthy,
    /// Adapter is operational but experiencing issues.
    Degraded(String),
    /// Adapter is not operational.
    Unhealthy(String),
}

/// Identifies the type of adapter behind the console.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum AdapterType {
    Storage,
    Backend,
}

/// One document in the key-value store.
///
/// Timestamps are assigned by the store on write. They are optional in the
/// contract because documents written by external producers may carry
/// unparseable values; readers must treat absence as epoch zero when sorting.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Document key within its collection.
    pub key: String,
    /// Top-level JSON fields.
    pub fields: Map<String, serde_json::Value>,
    /// Store-assigned creation timestamp. Refreshed on every merge write.
    pub created_at: Option<DateTime<Utc>>,
    /// Store-assigned last-write timestamp.
    pub updated_at: Option<DateTime<Utc>>,
}

impl Document {
    /// Returns a string field, treating non-string values as absent.
    pub fn str_field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(|v| v.as_str())
    }

    /// Returns an integer field, treating non-numeric values as absent.
    pub fn i64_field(&self, name: &str) -> Option<i64> {
        self.fields.get(name).and_then(serde_json::Value::as_i64)
    }

    /// Returns a boolean field, treating non-boolean values as absent.
    pub fn bool_field(&self, name: &str) -> Option<bool> {
        self.fields.get(name).and_then(serde_json::Value::as_bool)
    }
}

/// Wire form of a message timestamp: a `{seconds, nanoseconds}` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireTimestamp {
    pub seconds: i64,
    pub nanoseconds: u32,
}

impl From<DateTime<Utc>> for WireTimestamp {
    fn from(t: DateTime<Utc>) -> Self {
        Self {
            seconds: t.timestamp(),
            nanoseconds: t.timestamp_subsec_nanos(),
        }
    }
}
