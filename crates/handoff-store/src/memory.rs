// SPDX-FileCopyrightText: 2026 Handoff Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory DocumentStore used by higher-layer tests and local experiments.
//!
//! Mirrors the SQLite store's merge and timestamp semantics so state-machine
//! tests do not need a database file.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Map;
use tokio::sync::Mutex;

use handoff_core::{
    Adapter, AdapterType, Document, DocumentStore, HandoffError, HealthStatus,
};

type Collections = HashMap<String, HashMap<String, Document>>;

/// Hash-map backed document store. Clone-cheap it is not; share via `Arc`.
#[derive(Default)]
pub struct MemoryStore {
    collections: Mutex<Collections>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Adapter for MemoryStore {
    fn name(&self) -> &str {
        "memory"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Storage
    }

    async fn health_check(&self) -> Result<HealthStatus, HandoffError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), HandoffError> {
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn get(
        &self,
        collection: &str,
        key: &str,
    ) -> Result<Option<Document>, HandoffError> {
        let collections = self.collections.lock().await;
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.get(key))
            .cloned())
    }

    async fn set_merge(
        &self,
        collection: &str,
        key: &str,
        fields: Map<String, serde_json::Value>,
    ) -> Result<(), HandoffError> {
        let now = Utc::now();
        let mut collections = self.collections.lock().await;
        let docs = collections.entry(collection.to_string()).or_default();
        let doc = docs.entry(key.to_string()).or_insert_with(|| Document {
            key: key.to_string(),
            fields: Map::new(),
            created_at: None,
            updated_at: None,
        });
        for (k, v) in fields {
            doc.fields.insert(k, v);
        }
        // Same quirk as the SQLite store: both timestamps refresh per write.
        doc.created_at = Some(now);
        doc.updated_at = Some(now);
        Ok(())
    }

    async fn delete(&self, collection: &str, key: &str) -> Result<(), HandoffError> {
        let mut collections = self.collections.lock().await;
        if let Some(docs) = collections.get_mut(collection) {
            docs.remove(key);
        }
        Ok(())
    }

    async fn list(&self, collection: &str) -> Result<Vec<Document>, HandoffError> {
        let collections = self.collections.lock().await;
        Ok(collections
            .get(collection)
            .map(|docs| docs.values().cloned().collect())
            .unwrap_or_default())
    }

    async fn query_desc(
        &self,
        collection: &str,
        order_by: &str,
        limit: i64,
    ) -> Result<Vec<Document>, HandoffError> {
        let collections = self.collections.lock().await;
        let mut docs: Vec<Document> = collections
            .get(collection)
            .map(|docs| docs.values().cloned().collect())
            .unwrap_or_default();
        // Missing order field sorts last, matching the SQLite NULL behavior.
        docs.sort_by(|a, b| {
            let a_val = a.str_field(order_by);
            let b_val = b.str_field(order_by);
            match (a_val, b_val) {
                (Some(a), Some(b)) => b.cmp(a),
                (Some(_), None) => std::cmp::Ordering::Less,
                (None, Some(_)) => std::cmp::Ordering::Greater,
                (None, None) => std::cmp::Ordering::Equal,
            }
        });
        docs.truncate(usize::try_from(limit).unwrap_or(0));
        Ok(docs)
    }
}
