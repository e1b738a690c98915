// SPDX-FileCopyrightText: 2026 Handoff Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Identity resolution: maps a raw conversation address to a stable document
//! key, a channel tag, and a platform-specific id.
//!
//! Pure function, no I/O, no failure modes. An empty key in the result is the
//! caller's signal to reject the input upstream.

use serde::Serialize;

/// Channel assumed when a raw address carries no explicit channel prefix.
pub const DEFAULT_CHANNEL: &str = "whatsapp";

/// Channel reported for empty/whitespace-only input.
pub const UNKNOWN_CHANNEL: &str = "unknown";

/// Canonical WhatsApp address suffix.
pub const WHATSAPP_SUFFIX: &str = "@c.us";

/// The identity derived from a raw conversation address. Never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identity {
    /// Stable document key for the conversation. Empty means "reject upstream".
    pub key: String,
    /// Channel tag ("whatsapp", "instagram", ...).
    pub channel: String,
    /// Platform-specific id, absent when it cannot be derived.
    pub platform_id: Option<String>,
    /// Channel-suffixed canonical address used for outbound delivery
    /// addressing and as the snooze key on both read and write paths.
    pub normalized_address: String,
}

impl Identity {
    fn unknown() -> Self {
        Self {
            key: String::new(),
            channel: UNKNOWN_CHANNEL.to_string(),
            platform_id: None,
            normalized_address: String::new(),
        }
    }
}

/// Resolve a raw channel address into an [`Identity`].
///
/// The WhatsApp suffix is stripped first if present. A `channel:id` prefix
/// takes precedence over the default channel; everything after the first
/// colon (later colons preserved) is the platform id. Addresses without a
/// channel prefix belong to the default channel and get the canonical suffix
/// appended in `normalized_address`.
pub fn resolve(raw: &str) -> Identity {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Identity::unknown();
    }

    let base = trimmed.strip_suffix(WHATSAPP_SUFFIX).unwrap_or(trimmed);

    if let Some((channel, rest)) = base.split_once(':') {
        let platform_id = if rest.is_empty() {
            None
        } else {
            Some(rest.to_string())
        };
        let normalized_address = if channel == DEFAULT_CHANNEL {
            format!("{base}{WHATSAPP_SUFFIX}")
        } else {
            base.to_string()
        };
        Identity {
            key: base.to_string(),
            channel: channel.to_string(),
            platform_id,
            normalized_address,
        }
    } else {
        Identity {
            key: base.to_string(),
            channel: DEFAULT_CHANNEL.to_string(),
            platform_id: Some(base.to_string()),
            normalized_address: format!("{base}{WHATSAPP_SUFFIX}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn whatsapp_address_with_suffix() {
        let id = resolve("6281234@c.us");
        assert_eq!(id.key, "6281234");
        assert_eq!(id.channel, "whatsapp");
        assert_eq!(id.platform_id.as_deref(), Some("6281234"));
        assert_eq!(id.normalized_address, "6281234@c.us");
    }

    #[test]
    fn bare_number_defaults_to_whatsapp() {
        let id = resolve("6281234");
        assert_eq!(id.key, "6281234");
        assert_eq!(id.channel, "whatsapp");
        assert_eq!(id.normalized_address, "6281234@c.us");
    }

    #[test]
    fn channel_prefixed_address() {
        let id = resolve("instagram:abc123");
        assert_eq!(id.key, "instagram:abc123");
        assert_eq!(id.channel, "instagram");
        assert_eq!(id.platform_id.as_deref(), Some("abc123"));
        assert_eq!(id.normalized_address, "instagram:abc123");
    }

    #[test]
    fn later_colons_are_preserved_in_platform_id() {
        let id = resolve("messenger:page:12345");
        assert_eq!(id.channel, "messenger");
        assert_eq!(id.platform_id.as_deref(), Some("page:12345"));
        assert_eq!(id.key, "messenger:page:12345");
    }

    #[test]
    fn trailing_colon_yields_absent_platform_id() {
        let id = resolve("instagram:");
        assert_eq!(id.channel, "instagram");
        assert_eq!(id.platform_id, None);
        assert_eq!(id.key, "instagram:");
    }

    #[test]
    fn empty_input_yields_unknown_identity() {
        let id = resolve("");
        assert_eq!(id.key, "");
        assert_eq!(id.channel, "unknown");
        assert_eq!(id.platform_id, None);
        assert_eq!(id.normalized_address, "");
    }

    #[test]
    fn whitespace_only_input_yields_unknown_identity() {
        assert_eq!(resolve("   "), resolve(""));
    }

    #[test]
    fn suffix_stripped_before_prefix_parse() {
        let id = resolve("instagram:abc@c.us");
        assert_eq!(id.channel, "instagram");
        assert_eq!(id.platform_id.as_deref(), Some("abc"));
        assert_eq!(id.normalized_address, "instagram:abc");
    }

    proptest! {
        #[test]
        fn resolve_never_panics(raw in "\\PC{0,64}") {
            let _ = resolve(&raw);
        }

        #[test]
        fn key_is_empty_only_for_blank_input(raw in "\\PC{0,64}") {
            let id = resolve(&raw);
            prop_assert_eq!(id.key.is_empty(), raw.trim().is_empty());
        }

        #[test]
        fn default_channel_normalized_carries_suffix(digits in "[0-9]{1,15}") {
            let id = resolve(&digits);
            prop_assert_eq!(id.channel, DEFAULT_CHANNEL);
            prop_assert!(id.normalized_address.ends_with(WHATSAPP_SUFFIX));
        }
    }
}
