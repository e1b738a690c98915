// SPDX-FileCopyrightText: 2026 Handoff Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `handoff config show` command implementation.

use handoff_config::model::HandoffConfig;
use handoff_core::HandoffError;

const REDACTED: &str = "<redacted>";

/// Prints the merged configuration as TOML with secrets blanked out.
pub fn run_show(config: &HandoffConfig) -> Result<(), HandoffError> {
    println!("{}", render(config)?);
    Ok(())
}

fn render(config: &HandoffConfig) -> Result<String, HandoffError> {
    let mut shown = config.clone();
    if shown.console.bearer_token.is_some() {
        shown.console.bearer_token = Some(REDACTED.to_string());
    }
    toml::to_string_pretty(&shown)
        .map_err(|e| HandoffError::Internal(format!("cannot render config: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redacts_bearer_token() {
        let mut config = HandoffConfig::default();
        config.console.bearer_token = Some("super-secret".into());

        let rendered = render(&config).unwrap();
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains(REDACTED));
    }

    #[test]
    fn keeps_absent_token_absent() {
        let config = HandoffConfig::default();
        let rendered = render(&config).unwrap();
        assert!(!rendered.contains("bearer_token"));
        assert!(rendered.contains("[console]"));
        assert!(rendered.contains("[storage]"));
    }
}
