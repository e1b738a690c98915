// SPDX-FileCopyrightText: 2026 Handoff Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Moderation mutations: toggling the AI on or off for a contact.

use handoff_core::{HandoffError, identity};
use handoff_snooze::{ActivateOptions, DEFAULT_SNOOZE_MINUTES, SnoozeInfo, SnoozeStore};

pub const MANUAL_REASON: &str = "manual-toggle";
pub const TIMED_REASON: &str = "timed-toggle";

/// Keeps only ASCII digits from a raw phone number, dropping `+`,
/// spaces, punctuation, and any channel decoration.
pub fn digits_only(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Enables or disables the AI for a contact and returns the fresh
/// snooze status after the mutation.
///
/// Disabling without a positive duration is a manual (indefinite)
/// handover; with one it is a timed handover that auto-expires.
pub async fn set_ai_state(
    snooze: &SnoozeStore,
    raw_number: &str,
    enabled: bool,
    duration_minutes: Option<i64>,
    reason: Option<String>,
) -> Result<SnoozeInfo, HandoffError> {
    let digits = digits_only(raw_number);
    if digits.is_empty() {
        return Err(HandoffError::Validation(
            "number must contain at least one digit".into(),
        ));
    }

    let key = identity::resolve(&digits).normalized_address;

    if enabled {
        snooze.deactivate(&key).await?;
    } else {
        let has_duration = duration_minutes.is_some_and(|m| m > 0);
        let manual = !has_duration;
        let reason = reason.or_else(|| {
            Some(if manual { MANUAL_REASON } else { TIMED_REASON }.to_string())
        });
        snooze
            .activate(
                &key,
                ActivateOptions {
                    duration_minutes: Some(duration_minutes.unwrap_or(DEFAULT_SNOOZE_MINUTES)),
                    manual,
                    reason,
                },
            )
            .await?;
    }

    snooze.status(&key, false).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use handoff_core::DocumentStore;
    use handoff_store::MemoryStore;

    fn snooze() -> SnoozeStore {
        let store: Arc<dyn DocumentStore> = Arc::new(MemoryStore::new());
        SnoozeStore::new(store)
    }

    #[test]
    fn digits_only_strips_decoration() {
        assert_eq!(digits_only("+55 (11) 99999-0000"), "5511999990000");
        assert_eq!(digits_only("5511999990000@c.us"), "5511999990000");
        assert_eq!(digits_only("no digits here"), "");
    }

    #[tokio::test]
    async fn disabling_without_duration_is_manual() {
        let snooze = snooze();
        let info = set_ai_state(&snooze, "+55 11 99999-0000", false, None, None)
            .await
            .unwrap();
        assert!(info.active);
        assert!(info.manual);
        assert!(info.expires_at.is_none());
        assert_eq!(info.reason.as_deref(), Some(MANUAL_REASON));
    }

    #[tokio::test]
    async fn disabling_with_duration_is_timed() {
        let snooze = snooze();
        let info = set_ai_state(&snooze, "5511999990000", false, Some(45), None)
            .await
            .unwrap();
        assert!(info.active);
        assert!(!info.manual);
        assert_eq!(info.duration_minutes, Some(45));
        assert!(info.expires_at.is_some());
        assert_eq!(info.reason.as_deref(), Some(TIMED_REASON));
    }

    #[tokio::test]
    async fn zero_duration_counts_as_manual() {
        let snooze = snooze();
        let info = set_ai_state(&snooze, "5511999990000", false, Some(0), None)
            .await
            .unwrap();
        assert!(info.manual);
    }

    #[tokio::test]
    async fn explicit_reason_wins_over_default() {
        let snooze = snooze();
        let info = set_ai_state(
            &snooze,
            "5511999990000",
            false,
            None,
            Some("escalated to supervisor".into()),
        )
        .await
        .unwrap();
        assert_eq!(info.reason.as_deref(), Some("escalated to supervisor"));
    }

    #[tokio::test]
    async fn enabling_clears_the_snooze() {
        let snooze = snooze();
        set_ai_state(&snooze, "5511999990000", false, None, None)
            .await
            .unwrap();
        let info = set_ai_state(&snooze, "5511999990000", true, None, None)
            .await
            .unwrap();
        assert!(!info.active);
    }

    #[tokio::test]
    async fn formatted_and_bare_numbers_target_the_same_record() {
        let snooze = snooze();
        set_ai_state(&snooze, "+55 (11) 99999-0000", false, None, None)
            .await
            .unwrap();
        let info = set_ai_state(&snooze, "5511999990000", true, None, None)
            .await
            .unwrap();
        assert!(!info.active);
    }

    #[tokio::test]
    async fn digitless_number_is_rejected() {
        let snooze = snooze();
        let err = set_ai_state(&snooze, "abc", false, None, None)
            .await
            .unwrap_err();
        assert!(matches!(err, HandoffError::Validation(_)));
    }
}
