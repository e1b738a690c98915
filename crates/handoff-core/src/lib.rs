// SPDX-FileCopyrightText: 2026 Handoff Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Handoff admin console.
//!
//! This crate provides the foundational trait definitions, error types,
//! common types, and the pure identity resolver used throughout the Handoff
//! workspace. The document store and messaging backend collaborators
//! implement traits defined here.

pub mod error;
pub mod identity;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::HandoffError;
pub use identity::{resolve, Identity};
pub use types::{AdapterType, Document, HealthStatus, WireTimestamp};

// Re-export all adapter traits at crate root.
pub use traits::{Adapter, DocumentStore, MessagingBackend};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handoff_error_has_all_variants() {
        // Verify all 6 error variants exist and can be constructed.
        let _config = HandoffError::Config("test".into());
        let _validation = HandoffError::Validation("test".into());
        let _storage = HandoffError::Storage {
            source: Box::new(std::io::Error::other("test")),
        };
        let _channel = HandoffError::Channel {
            message: "test".into(),
            source: None,
        };
        let _upstream = HandoffError::Upstream {
            status: 502,
            message: "test".into(),
        };
        let _internal = HandoffError::Internal("test".into());
    }

    #[test]
    fn only_validation_is_client_fault() {
        assert!(HandoffError::Validation("x".into()).is_client_fault());
        assert!(!HandoffError::Config("x".into()).is_client_fault());
        assert!(!HandoffError::Internal("x".into()).is_client_fault());
    }

    #[test]
    fn adapter_type_round_trips() {
        use std::str::FromStr;

        for variant in [AdapterType::Storage, AdapterType::Backend] {
            let s = variant.to_string();
            let parsed = AdapterType::from_str(&s).expect("should parse back");
            assert_eq!(variant, parsed);
        }
    }

    #[test]
    fn wire_timestamp_from_datetime() {
        let t = chrono::DateTime::parse_from_rfc3339("2026-01-01T00:00:01.500Z")
            .unwrap()
            .with_timezone(&chrono::Utc);
        let wire = WireTimestamp::from(t);
        assert_eq!(wire.seconds, t.timestamp());
        assert_eq!(wire.nanoseconds, 500_000_000);
    }

    #[test]
    fn document_field_accessors_ignore_wrong_types() {
        let mut fields = serde_json::Map::new();
        fields.insert("s".into(), serde_json::json!("text"));
        fields.insert("n".into(), serde_json::json!(42));
        fields.insert("b".into(), serde_json::json!(true));
        let doc = Document {
            key: "k".into(),
            fields,
            created_at: None,
            updated_at: None,
        };
        assert_eq!(doc.str_field("s"), Some("text"));
        assert_eq!(doc.str_field("n"), None);
        assert_eq!(doc.i64_field("n"), Some(42));
        assert_eq!(doc.i64_field("b"), None);
        assert_eq!(doc.bool_field("b"), Some(true));
        assert_eq!(doc.bool_field("missing"), None);
    }

    #[test]
    fn all_trait_modules_are_exported() {
        fn _assert_adapter<T: Adapter>() {}
        fn _assert_store<T: DocumentStore>() {}
        fn _assert_backend<T: MessagingBackend>() {}
    }
}
