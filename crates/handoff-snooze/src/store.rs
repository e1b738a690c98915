// SPDX-FileCopyrightText: 2026 Handoff Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The snooze/handover authority: who may answer a conversation, the AI or a
//! human admin.
//!
//! One document per conversation key in the `snooze` collection. Absence of
//! the document is the distinct "never snoozed" state; a `manual` record
//! suspends the AI until explicitly cleared; a timed record carries an
//! `expires_at` the read path reconciles against wall-clock time.

use std::sync::Arc;

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use serde_json::{json, Map, Value};
use tracing::{debug, warn};

use handoff_core::{DocumentStore, HandoffError};

use crate::model::{ActivateOptions, SnoozeInfo, DEFAULT_SNOOZE_MINUTES, SNOOZE_COLLECTION};

/// Snooze state machine over a [`DocumentStore`].
///
/// All operations take a resolved conversation key (the identity's
/// normalized address), never a raw display address.
#[derive(Clone)]
pub struct SnoozeStore {
    store: Arc<dyn DocumentStore>,
}

impl SnoozeStore {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Suspend automated replies for `key`.
    ///
    /// Manual activation persists `{manual: true}` with the complementary
    /// duration fields explicitly nulled; timed activation clamps the
    /// duration to a positive value (fallback 60) and stamps `expires_at`.
    /// Writing every complementary field on each call is what keeps
    /// concurrent racing activations from leaving a half-merged record.
    pub async fn activate(&self, key: &str, opts: ActivateOptions) -> Result<(), HandoffError> {
        let mut fields = Map::new();
        if opts.manual {
            fields.insert("manual".into(), json!(true));
            fields.insert("duration_minutes".into(), Value::Null);
            fields.insert("expires_at".into(), Value::Null);
        } else {
            let minutes = opts
                .duration_minutes
                .filter(|m| *m > 0)
                .unwrap_or(DEFAULT_SNOOZE_MINUTES);
            let expires_at = Utc::now() + Duration::minutes(minutes);
            fields.insert("manual".into(), json!(false));
            fields.insert("duration_minutes".into(), json!(minutes));
            fields.insert(
                "expires_at".into(),
                json!(format_timestamp(expires_at)),
            );
        }
        fields.insert("reason".into(), json!(opts.reason));

        debug!(key, manual = opts.manual, "activating snooze");
        self.store.set_merge(SNOOZE_COLLECTION, key, fields).await
    }

    /// Re-enable automated replies by deleting the record. Idempotent.
    pub async fn deactivate(&self, key: &str) -> Result<(), HandoffError> {
        debug!(key, "deactivating snooze");
        self.store.delete(SNOOZE_COLLECTION, key).await
    }

    /// Read the snooze status for `key`, reconciled against the current time.
    ///
    /// With `clean_expired`, an expired non-manual record is deleted
    /// best-effort as a side effect; that cleanup never surfaces a failure.
    pub async fn status(&self, key: &str, clean_expired: bool) -> Result<SnoozeInfo, HandoffError> {
        self.status_at(key, Utc::now(), clean_expired).await
    }

    /// Like [`status`](Self::status) with an explicit `now`, so tests can
    /// advance the clock without sleeping.
    pub async fn status_at(
        &self,
        key: &str,
        now: DateTime<Utc>,
        clean_expired: bool,
    ) -> Result<SnoozeInfo, HandoffError> {
        let Some(doc) = self.store.get(SNOOZE_COLLECTION, key).await? else {
            return Ok(SnoozeInfo::inactive());
        };

        let manual = doc.bool_field("manual").unwrap_or(false);
        let duration_minutes = doc.i64_field("duration_minutes");
        let reason = doc.str_field("reason").map(str::to_string);
        // Unparseable expiry degrades to "no expiry", i.e. inactive.
        let expires_at = doc
            .str_field("expires_at")
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|t| t.with_timezone(&Utc));

        let active = manual || expires_at.is_some_and(|t| t > now);

        if !manual && !active && clean_expired {
            // Opportunistic cleanup: logged and discarded, never propagated.
            if let Err(e) = self.store.delete(SNOOZE_COLLECTION, key).await {
                warn!(key, error = %e, "failed to clean up expired snooze record");
            }
        }

        Ok(SnoozeInfo {
            active,
            manual,
            duration_minutes,
            expires_at: expires_at.map(format_timestamp),
            reason,
            created_at: doc.created_at.map(format_timestamp),
            updated_at: doc.updated_at.map(format_timestamp),
        })
    }
}

fn format_timestamp(t: DateTime<Utc>) -> String {
    t.to_rfc3339_opts(SecondsFormat::Millis, true)
}
