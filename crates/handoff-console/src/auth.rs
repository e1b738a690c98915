// SPDX-FileCopyrightText: 2026 Handoff Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Bearer-token authentication middleware.
//!
//! Every `/v1` route passes through [`require_bearer`]. The check is
//! fail-closed: when no token is configured the console refuses all
//! authenticated requests rather than silently running open.

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Auth settings shared with the router via [`crate::server::ConsoleState`].
#[derive(Clone)]
pub struct AuthConfig {
    pub bearer_token: Option<String>,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("bearer_token", &self.bearer_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl AuthConfig {
    fn accepts(&self, presented: &str) -> bool {
        match &self.bearer_token {
            Some(expected) => presented == expected,
            None => false,
        }
    }
}

pub async fn require_bearer(
    State(auth): State<AuthConfig>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let presented = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));

    match presented {
        Some(token) if auth.accepts(token) => next.run(request).await,
        _ => (
            StatusCode::UNAUTHORIZED,
            axum::Json(json!({ "error": "unauthorized" })),
        )
            .into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_matching_token() {
        let auth = AuthConfig {
            bearer_token: Some("secret".into()),
        };
        assert!(auth.accepts("secret"));
        assert!(!auth.accepts("wrong"));
    }

    #[test]
    fn fails_closed_without_configured_token() {
        let auth = AuthConfig { bearer_token: None };
        assert!(!auth.accepts("anything"));
        assert!(!auth.accepts(""));
    }

    #[test]
    fn debug_redacts_token() {
        let auth = AuthConfig {
            bearer_token: Some("secret".into()),
        };
        let rendered = format!("{auth:?}");
        assert!(!rendered.contains("secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
