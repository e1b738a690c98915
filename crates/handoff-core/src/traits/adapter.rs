// SPDX-FileCopyrightText: 2026 Handoff Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Base adapter trait implemented by every external collaborator.

use async_trait::async_trait;

use crate::error::HandoffError;
use crate::types::{AdapterType, HealthStatus};

/// The base trait for Handoff collaborator adapters.
///
/// Both the document store and the messaging backend client implement this
/// trait, which provides identity, lifecycle, and health check capabilities.
#[async_trait]
pub trait Adapter: Send + Sync + 'static {
    /// Returns the human-readable name of this adapter instance.
    fn name(&self) -> &str;

    /// Returns the semantic version of this adapter.
    fn version(&self) -> semver::Version;

    /// Returns the type of adapter (storage or backend).
    fn adapter_type(&self) -> AdapterType;

    /// Performs a health check and returns the adapter's current status.
    async fn health_check(&self) -> Result<HealthStatus, HandoffError>;

    /// Gracefully shuts down the adapter, releasing any held resources.
    async fn shutdown(&self) -> Result<(), HandoffError>;
}
