// SPDX-FileCopyrightText: 2026 Handoff Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Document store trait: the key-value collaborator behind the console.

use async_trait::async_trait;
use serde_json::Map;

use crate::error::HandoffError;
use crate::traits::adapter::Adapter;
use crate::types::Document;

/// Key-value document store with server timestamps and partial-merge writes.
///
/// Collections are flat string namespaces; per-conversation sub-collections
/// are addressed with path-style names (`conversations/{key}/messages`).
///
/// There is no compare-and-swap: concurrent merges to one document race
/// last-write-wins per field set. Callers that need a consistent record must
/// write every complementary field explicitly (the snooze store does).
#[async_trait]
pub trait DocumentStore: Adapter {
    /// Fetch one document, `None` when it does not exist.
    async fn get(&self, collection: &str, key: &str)
        -> Result<Option<Document>, HandoffError>;

    /// Shallow-merge `fields` into the document, creating it if absent.
    ///
    /// Explicit JSON nulls overwrite existing values (they never delete the
    /// field). Both `created_at` and `updated_at` are refreshed on every
    /// call; re-writing a document resets its `created_at`, an accepted
    /// quirk of the merge strategy rather than a first-write timestamp.
    async fn set_merge(
        &self,
        collection: &str,
        key: &str,
        fields: Map<String, serde_json::Value>,
    ) -> Result<(), HandoffError>;

    /// Delete a document. Deleting a non-existent document is not an error.
    async fn delete(&self, collection: &str, key: &str) -> Result<(), HandoffError>;

    /// List every document in a collection, in unspecified order.
    async fn list(&self, collection: &str) -> Result<Vec<Document>, HandoffError>;

    /// List up to `limit` documents ordered by a string field, descending.
    ///
    /// Documents missing the order field sort last.
    async fn query_desc(
        &self,
        collection: &str,
        order_by: &str,
        limit: i64,
    ) -> Result<Vec<Document>, HandoffError>;
}
