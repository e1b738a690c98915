// SPDX-FileCopyrightText: 2026 Handoff Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Snooze record field names and the read-path info shape.

use serde::{Deserialize, Serialize};

/// Collection holding one snooze document per conversation key.
pub const SNOOZE_COLLECTION: &str = "snooze";

/// Fallback snooze duration when the caller passes none or a non-positive one.
pub const DEFAULT_SNOOZE_MINUTES: i64 = 60;

/// Options for [`SnoozeStore::activate`].
///
/// [`SnoozeStore::activate`]: crate::SnoozeStore::activate
#[derive(Debug, Clone, Default)]
pub struct ActivateOptions {
    /// Snooze duration; ignored when `manual` is true. Non-positive or
    /// absent values fall back to [`DEFAULT_SNOOZE_MINUTES`].
    pub duration_minutes: Option<i64>,
    /// True disables the AI indefinitely until explicitly cleared.
    pub manual: bool,
    /// Free-text audit tag ("manual-toggle", "timed-toggle", ...).
    pub reason: Option<String>,
}

/// Read-path snooze status for one conversation key.
///
/// Absent fields serialize as nulls, never omitted; timestamps are RFC3339
/// strings. The all-false, all-null shape means "never snoozed".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnoozeInfo {
    /// Whether automated replies are currently suspended.
    pub active: bool,
    /// Whether the suspension has no automatic expiry.
    pub manual: bool,
    pub duration_minutes: Option<i64>,
    pub expires_at: Option<String>,
    pub reason: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl SnoozeInfo {
    /// The "never snoozed" shape returned when no record exists.
    pub fn inactive() -> Self {
        Self {
            active: false,
            manual: false,
            duration_minutes: None,
            expires_at: None,
            reason: None,
            created_at: None,
            updated_at: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inactive_shape_is_all_null() {
        let info = SnoozeInfo::inactive();
        assert!(!info.active);
        assert!(!info.manual);
        assert!(info.duration_minutes.is_none());
        assert!(info.expires_at.is_none());
        assert!(info.reason.is_none());
    }

    #[test]
    fn absent_fields_serialize_as_nulls_not_omitted() {
        let value = serde_json::to_value(SnoozeInfo::inactive()).unwrap();
        let obj = value.as_object().unwrap();
        for field in [
            "active",
            "manual",
            "duration_minutes",
            "expires_at",
            "reason",
            "created_at",
            "updated_at",
        ] {
            assert!(obj.contains_key(field), "missing field {field}");
        }
        assert!(obj["expires_at"].is_null());
        assert!(obj["created_at"].is_null());
    }
}
