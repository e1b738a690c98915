// SPDX-FileCopyrightText: 2026 Handoff Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./handoff.toml` > `~/.config/handoff/handoff.toml`
//! > `/etc/handoff/handoff.toml` with environment variable overrides via the
//! `HANDOFF_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::HandoffConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/handoff/handoff.toml` (system-wide)
/// 3. `~/.config/handoff/handoff.toml` (user XDG config)
/// 4. `./handoff.toml` (local directory)
/// 5. `HANDOFF_*` environment variables
pub fn load_config() -> Result<HandoffConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(HandoffConfig::default()))
        .merge(Toml::file("/etc/handoff/handoff.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("handoff/handoff.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("handoff.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
///
/// Used for testing and explicit config specification.
pub fn load_config_from_str(toml_content: &str) -> Result<HandoffConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(HandoffConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<HandoffConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(HandoffConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `HANDOFF_CONSOLE_BEARER_TOKEN` must map
/// to `console.bearer_token`, not `console.bearer.token`.
fn env_provider() -> Env {
    Env::prefixed("HANDOFF_").map(|key| {
        // `key` is the env var name with prefix stripped, still in its
        // original (upper) case: figment applies `map` before lowercasing.
        // Example: HANDOFF_CONSOLE_BEARER_TOKEN -> "CONSOLE_BEARER_TOKEN"
        let key_str = key.as_str().to_ascii_lowercase();
        let mapped = key_str
            .replacen("console_", "console.", 1)
            .replacen("storage_", "storage.", 1)
            .replacen("relay_", "relay.", 1);
        mapped.into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_string_yields_defaults() {
        let config = load_config_from_str("").unwrap();
        assert_eq!(config.console.port, 8787);
    }

    #[test]
    fn toml_values_override_defaults() {
        let config = load_config_from_str(
            r#"
[console]
port = 9000
bearer_token = "secret"

[relay]
base_url = "http://localhost:5000"
"#,
        )
        .unwrap();
        assert_eq!(config.console.port, 9000);
        assert_eq!(config.console.bearer_token.as_deref(), Some("secret"));
        assert_eq!(
            config.relay.base_url.as_deref(),
            Some("http://localhost:5000")
        );
        // Untouched sections keep their defaults.
        assert_eq!(config.storage.database_path, "handoff.db");
    }

    #[test]
    fn env_vars_override_toml() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("handoff.toml", "[console]\nport = 9000\n")?;
            jail.set_env("HANDOFF_CONSOLE_PORT", "9100");
            jail.set_env("HANDOFF_CONSOLE_BEARER_TOKEN", "from-env");
            let config = load_config().expect("config should load");
            assert_eq!(config.console.port, 9100);
            assert_eq!(config.console.bearer_token.as_deref(), Some("from-env"));
            Ok(())
        });
    }
}
