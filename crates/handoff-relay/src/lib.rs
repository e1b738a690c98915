// SPDX-FileCopyrightText: 2026 Handoff Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the external messaging backend.
//!
//! The console never talks to messaging platforms itself; outbound sends are
//! proxied to the backend's send endpoint, and its success payload or error
//! body is forwarded verbatim.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::debug;

use handoff_core::{Adapter, AdapterType, HandoffError, HealthStatus, MessagingBackend};

/// Path of the backend's send endpoint, relative to the base URL.
pub const SEND_PATH: &str = "/send-message";

/// Relay client configuration.
///
/// Mirrors `RelayConfig` from `handoff-config` to avoid a dependency on the
/// config crate from this crate.
#[derive(Debug, Clone)]
pub struct RelayClientConfig {
    /// Base URL of the messaging backend. `None` means sends fail with a
    /// configuration error.
    pub base_url: Option<String>,
    /// Request timeout for backend calls.
    pub timeout: Duration,
}

/// Reqwest-backed [`MessagingBackend`] implementation.
pub struct RelayClient {
    config: RelayClientConfig,
    http: reqwest::Client,
}

impl RelayClient {
    /// Build a relay client. Fails only if the underlying HTTP client
    /// cannot be constructed.
    pub fn new(config: RelayClientConfig) -> Result<Self, HandoffError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| HandoffError::Config(format!("failed to build relay client: {e}")))?;
        Ok(Self { config, http })
    }

    fn send_url(&self) -> Result<String, HandoffError> {
        let base = self
            .config
            .base_url
            .as_deref()
            .ok_or_else(|| HandoffError::Config("relay.base_url is not configured".into()))?;
        Ok(format!("{}{SEND_PATH}", base.trim_end_matches('/')))
    }
}

#[async_trait]
impl Adapter for RelayClient {
    fn name(&self) -> &str {
        "relay"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Backend
    }

    async fn health_check(&self) -> Result<HealthStatus, HandoffError> {
        if self.config.base_url.is_some() {
            Ok(HealthStatus::Healthy)
        } else {
            Ok(HealthStatus::Unhealthy(
                "relay.base_url not configured".to_string(),
            ))
        }
    }

    async fn shutdown(&self) -> Result<(), HandoffError> {
        Ok(())
    }
}

#[async_trait]
impl MessagingBackend for RelayClient {
    async fn send_text(
        &self,
        number: &str,
        message: &str,
    ) -> Result<Value, HandoffError> {
        let url = self.send_url()?;
        debug!(number, "forwarding send to messaging backend");

        let response = self
            .http
            .post(&url)
            .json(&json!({ "number": number, "message": message }))
            .send()
            .await
            .map_err(|e| HandoffError::Channel {
                message: format!("messaging backend unreachable: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        if status.is_success() {
            return response.json::<Value>().await.map_err(|e| HandoffError::Channel {
                message: format!("malformed backend response: {e}"),
                source: Some(Box::new(e)),
            });
        }

        // Forward the backend's error body verbatim; prefer its structured
        // `error` field, fall back to the raw body, then the status reason.
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<Value>(&body)
            .ok()
            .and_then(|v| v.get("error").and_then(Value::as_str).map(str::to_string))
            .unwrap_or_else(|| {
                if body.is_empty() {
                    status
                        .canonical_reason()
                        .unwrap_or("upstream error")
                        .to_string()
                } else {
                    body
                }
            });
        Err(HandoffError::Upstream {
            status: status.as_u16(),
            message,
        })
    }
}
