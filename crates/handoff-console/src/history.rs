// SPDX-FileCopyrightText: 2026 Handoff Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Single-conversation history reader.
//!
//! Fetches the newest messages from a conversation's message
//! sub-collection and returns them in chronological order together
//! with the conversation's snooze status. This is the one read path
//! that also garbage-collects an expired snooze record.

use std::sync::Arc;

use chrono::DateTime;
use handoff_core::{
    DocumentStore, HandoffError, Identity, WireTimestamp,
    identity,
};
use handoff_snooze::{SnoozeInfo, SnoozeStore};
use serde::Serialize;

pub const DEFAULT_SENDER: &str = "user";

#[derive(Debug, Clone, Serialize)]
pub struct HistoryMessage {
    pub text: String,
    pub sender: String,
    pub timestamp: Option<WireTimestamp>,
}

#[derive(Debug, Serialize)]
pub struct ConversationHistory {
    pub identity: Identity,
    pub messages: Vec<HistoryMessage>,
    pub snooze: SnoozeInfo,
}

fn messages_collection(conversation_key: &str) -> String {
    format!("conversations/{conversation_key}/messages")
}

/// Returns the last `limit` messages of a conversation, oldest first.
pub async fn conversation_history(
    store: &Arc<dyn DocumentStore>,
    snooze: &SnoozeStore,
    raw_id: &str,
    limit: i64,
) -> Result<ConversationHistory, HandoffError> {
    let resolved = identity::resolve(raw_id);
    if resolved.key.is_empty() {
        return Err(HandoffError::Validation(
            "conversation id must not be empty".into(),
        ));
    }

    // Newest-first fetch bounded by the limit, then reversed so the
    // response reads top to bottom like a transcript. A negative limit
    // clamps to zero; SQLite would treat it as unbounded.
    let mut docs = store
        .query_desc(
            &messages_collection(&resolved.key),
            "timestamp",
            limit.max(0),
        )
        .await?;
    docs.reverse();

    let messages = docs
        .into_iter()
        .map(|doc| HistoryMessage {
            text: doc.str_field("text").unwrap_or_default().to_string(),
            sender: doc
                .str_field("sender")
                .filter(|s| !s.is_empty())
                .unwrap_or(DEFAULT_SENDER)
                .to_string(),
            timestamp: doc
                .str_field("timestamp")
                .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
                .map(|t| WireTimestamp::from(t.to_utc())),
        })
        .collect();

    let info = snooze.status(&resolved.normalized_address, true).await?;

    Ok(ConversationHistory {
        identity: resolved,
        messages,
        snooze: info,
    })
}
