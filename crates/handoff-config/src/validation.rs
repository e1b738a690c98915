// SPDX-FileCopyrightText: 2026 Handoff Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as valid bind addresses, non-empty paths, and positive
//! page limits.

use crate::diagnostic::ConfigError;
use crate::model::HandoffConfig;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &HandoffConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    let host = config.console.host.trim();
    if host.is_empty() {
        errors.push(ConfigError::Validation {
            message: "console.host must not be empty".to_string(),
        });
    } else {
        let is_valid_ip = host.parse::<std::net::IpAddr>().is_ok();
        let is_valid_hostname = host
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-' || c == ':');
        if !is_valid_ip && !is_valid_hostname {
            errors.push(ConfigError::Validation {
                message: format!("console.host `{host}` is not a valid IP address or hostname"),
            });
        }
    }

    if !LOG_LEVELS.contains(&config.console.log_level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "console.log_level must be one of {}, got `{}`",
                LOG_LEVELS.join(", "),
                config.console.log_level
            ),
        });
    }

    if config.console.list_limit <= 0 {
        errors.push(ConfigError::Validation {
            message: format!(
                "console.list_limit must be positive, got {}",
                config.console.list_limit
            ),
        });
    }

    if config.console.history_limit <= 0 {
        errors.push(ConfigError::Validation {
            message: format!(
                "console.history_limit must be positive, got {}",
                config.console.history_limit
            ),
        });
    }

    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.database_path must not be empty".to_string(),
        });
    }

    if let Some(base_url) = &config.relay.base_url
        && !(base_url.starts_with("http://") || base_url.starts_with("https://"))
    {
        errors.push(ConfigError::Validation {
            message: format!("relay.base_url must be an http(s) URL, got `{base_url}`"),
        });
    }

    if config.relay.timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "relay.timeout_secs must be positive".to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(validate_config(&HandoffConfig::default()).is_ok());
    }

    #[test]
    fn empty_host_is_rejected() {
        let mut config = HandoffConfig::default();
        config.console.host = "  ".into();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(|e| format!("{e}").contains("console.host")));
    }

    #[test]
    fn bad_log_level_is_rejected() {
        let mut config = HandoffConfig::default();
        config.console.log_level = "verbose".into();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn errors_are_collected_not_fail_fast() {
        let mut config = HandoffConfig::default();
        config.console.list_limit = 0;
        config.console.history_limit = -1;
        config.storage.database_path = "".into();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn non_http_relay_url_is_rejected() {
        let mut config = HandoffConfig::default();
        config.relay.base_url = Some("ftp://backend".into());
        assert!(validate_config(&config).is_err());
    }
}
