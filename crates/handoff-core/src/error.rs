// SPDX-FileCopyrightText: 2026 Handoff Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Handoff admin console.

use thiserror::Error;

/// The primary error type used across all Handoff adapter traits and core operations.
#[derive(Debug, Error)]
pub enum HandoffError {
    /// Configuration errors (invalid TOML, missing required fields, unconfigured relay).
    #[error("configuration error: {0}")]
    Config(String),

    /// Client-fault validation errors (empty conversation key, missing mutation fields).
    #[error("validation error: {0}")]
    Validation(String),

    /// Document store errors (connectivity, query failure, serialization).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Transport-level errors reaching the messaging backend (DNS, connect, timeout).
    #[error("channel error: {message}")]
    Channel {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Structured error forwarded from the messaging backend with its HTTP status.
    #[error("upstream error ({status}): {message}")]
    Upstream { status: u16, message: String },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl HandoffError {
    /// True when the error is the caller's fault rather than a server fault.
    pub fn is_client_fault(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
