// SPDX-FileCopyrightText: 2026 Handoff Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversation list aggregation.
//!
//! Joins the `conversations` collection with per-conversation snooze
//! status. Status lookups for all conversations run concurrently; the
//! first failure aborts the whole listing so the console never renders
//! a partially wrong moderation view.

use std::cmp::Reverse;
use std::sync::Arc;

use chrono::{DateTime, SecondsFormat, Utc};
use handoff_core::{
    DocumentStore, HandoffError,
    identity::{self, UNKNOWN_CHANNEL},
};
use handoff_snooze::{SnoozeInfo, SnoozeStore};
use serde::Serialize;

pub const CONVERSATIONS_COLLECTION: &str = "conversations";

/// One row of the console's conversation list.
#[derive(Debug, Clone, Serialize)]
pub struct ConversationSummary {
    pub key: String,
    pub channel: String,
    pub platform_id: Option<String>,
    pub normalized_address: String,
    pub updated_at: Option<String>,
    pub snooze: SnoozeInfo,
}

/// Lists up to `limit` conversations, most recently updated first.
///
/// Conversations without a parseable `updated_at` sort as epoch zero,
/// i.e. at the end of the list.
pub async fn list_conversations(
    store: &Arc<dyn DocumentStore>,
    snooze: &SnoozeStore,
    limit: i64,
) -> Result<Vec<ConversationSummary>, HandoffError> {
    let docs = store.list(CONVERSATIONS_COLLECTION).await?;

    let fetches = docs.into_iter().map(|doc| {
        let snooze = snooze.clone();
        async move {
            let resolved = identity::resolve(&doc.key);

            // Stored channel/platform fields win over the derived
            // identity, unless the stored channel is the unknown marker.
            let channel = doc
                .str_field("channel")
                .filter(|c| !c.is_empty() && *c != UNKNOWN_CHANNEL)
                .unwrap_or(&resolved.channel)
                .to_string();
            let platform_id = doc
                .str_field("platform_id")
                .map(str::to_string)
                .or_else(|| resolved.platform_id.clone());

            let info = snooze.status(&resolved.normalized_address, false).await?;

            let sort_key = doc.updated_at.map(|t| t.timestamp_millis()).unwrap_or(0);
            Ok::<_, HandoffError>((
                sort_key,
                ConversationSummary {
                    key: doc.key,
                    channel,
                    platform_id,
                    normalized_address: resolved.normalized_address,
                    updated_at: doc.updated_at.map(format_timestamp),
                    snooze: info,
                },
            ))
        }
    });

    let mut rows = futures::future::try_join_all(fetches).await?;
    rows.sort_by_key(|(sort_key, _)| Reverse(*sort_key));

    let mut summaries: Vec<ConversationSummary> =
        rows.into_iter().map(|(_, summary)| summary).collect();
    summaries.truncate(limit.max(0) as usize);
    Ok(summaries)
}

fn format_timestamp(t: DateTime<Utc>) -> String {
    t.to_rfc3339_opts(SecondsFormat::Millis, true)
}
