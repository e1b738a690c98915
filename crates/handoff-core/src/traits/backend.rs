// SPDX-FileCopyrightText: 2026 Handoff Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Messaging backend trait: the upstream service that actually delivers
//! messages to end users.

use async_trait::async_trait;

use crate::error::HandoffError;
use crate::traits::adapter::Adapter;

/// Client for the external messaging backend's send endpoint.
///
/// The console never talks to messaging platforms directly; it proxies
/// outbound sends to this backend and forwards its success payload or
/// structured error verbatim.
#[async_trait]
pub trait MessagingBackend: Adapter {
    /// Send a text message to a delivery address.
    ///
    /// Returns the backend's success payload. Upstream failures surface as
    /// [`HandoffError::Upstream`] carrying the backend's HTTP status and
    /// error body; transport failures as [`HandoffError::Channel`].
    ///
    /// [`HandoffError::Upstream`]: crate::error::HandoffError::Upstream
    /// [`HandoffError::Channel`]: crate::error::HandoffError::Channel
    async fn send_text(
        &self,
        number: &str,
        message: &str,
    ) -> Result<serde_json::Value, HandoffError>;
}
