// SPDX-FileCopyrightText: 2026 Handoff Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Handoff admin console.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Handoff configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable
/// overrides. All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct HandoffConfig {
    /// Console HTTP server settings.
    #[serde(default)]
    pub console: ConsoleConfig,

    /// Document store settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Messaging backend relay settings.
    #[serde(default)]
    pub relay: RelayConfig,
}

/// Console HTTP server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ConsoleConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Bearer token for admin API auth. When unset, the `/v1` surface
    /// rejects every request (fail-closed).
    #[serde(default)]
    pub bearer_token: Option<String>,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Default conversation list page size.
    #[serde(default = "default_list_limit")]
    pub list_limit: i64,

    /// Default per-conversation history page size.
    #[serde(default = "default_history_limit")]
    pub history_limit: i64,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            bearer_token: None,
            log_level: default_log_level(),
            list_limit: default_list_limit(),
            history_limit: default_history_limit(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8787
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_list_limit() -> i64 {
    100
}

fn default_history_limit() -> i64 {
    200
}

/// Document store configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Enable WAL journal mode.
    #[serde(default = "default_wal_mode")]
    pub wal_mode: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            wal_mode: default_wal_mode(),
        }
    }
}

fn default_database_path() -> String {
    "handoff.db".to_string()
}

fn default_wal_mode() -> bool {
    true
}

/// Messaging backend relay configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RelayConfig {
    /// Base URL of the messaging backend. When unset, message sends fail
    /// with a configuration error.
    #[serde(default)]
    pub base_url: Option<String>,

    /// Request timeout in seconds for backend calls.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    30
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sensible() {
        let config = HandoffConfig::default();
        assert_eq!(config.console.host, "127.0.0.1");
        assert_eq!(config.console.port, 8787);
        assert!(config.console.bearer_token.is_none());
        assert_eq!(config.console.log_level, "info");
        assert_eq!(config.console.list_limit, 100);
        assert_eq!(config.console.history_limit, 200);
        assert_eq!(config.storage.database_path, "handoff.db");
        assert!(config.storage.wal_mode);
        assert!(config.relay.base_url.is_none());
        assert_eq!(config.relay.timeout_secs, 30);
    }

    #[test]
    fn config_round_trips_through_toml() {
        let config = HandoffConfig::default();
        let toml = toml::to_string(&config).unwrap();
        let parsed: HandoffConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed.console.port, config.console.port);
        assert_eq!(parsed.storage.database_path, config.storage.database_path);
    }
}
