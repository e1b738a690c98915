// SPDX-FileCopyrightText: 2026 Handoff Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP handlers and the error-to-status mapping.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use handoff_core::HandoffError;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::admin;
use crate::aggregator;
use crate::history;
use crate::server::ConsoleState;

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub limit: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct AiStateRequest {
    pub number: String,
    pub enabled: bool,
    #[serde(default)]
    pub duration_minutes: Option<i64>,
    #[serde(default)]
    pub reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    pub number: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub storage: String,
    pub backend: String,
}

fn render_health(result: Result<handoff_core::HealthStatus, HandoffError>) -> String {
    use handoff_core::HealthStatus;
    match result {
        Ok(HealthStatus::Healthy) => "healthy".into(),
        Ok(HealthStatus::Degraded(msg)) => format!("degraded: {msg}"),
        Ok(HealthStatus::Unhealthy(msg)) => format!("unhealthy: {msg}"),
        Err(e) => format!("error: {e}"),
    }
}

pub async fn get_health(State(state): State<ConsoleState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".into(),
        version: env!("CARGO_PKG_VERSION").into(),
        storage: render_health(state.store.health_check().await),
        backend: render_health(state.backend.health_check().await),
    })
}

pub async fn get_conversations(
    State(state): State<ConsoleState>,
    Query(page): Query<PageQuery>,
) -> Response {
    let limit = page.limit.unwrap_or(state.limits.list);
    match aggregator::list_conversations(&state.store, &state.snooze, limit).await {
        Ok(rows) => Json(rows).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn get_history(
    State(state): State<ConsoleState>,
    Path(id): Path<String>,
    Query(page): Query<PageQuery>,
) -> Response {
    let limit = page.limit.unwrap_or(state.limits.history);
    match history::conversation_history(&state.store, &state.snooze, &id, limit).await {
        Ok(history) => Json(history).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn post_ai_state(
    State(state): State<ConsoleState>,
    Json(body): Json<AiStateRequest>,
) -> Response {
    match admin::set_ai_state(
        &state.snooze,
        &body.number,
        body.enabled,
        body.duration_minutes,
        body.reason,
    )
    .await
    {
        Ok(info) => Json(info).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn post_message(
    State(state): State<ConsoleState>,
    Json(body): Json<SendMessageRequest>,
) -> Response {
    if body.number.trim().is_empty() || body.message.trim().is_empty() {
        return error_response(HandoffError::Validation(
            "number and message must not be empty".into(),
        ));
    }
    match state.backend.send_text(&body.number, &body.message).await {
        Ok(payload) => Json(payload).into_response(),
        Err(e) => error_response(e),
    }
}

/// Maps domain errors onto HTTP statuses. Upstream failures keep the
/// backend's own status and message so the console shows what the
/// channel actually said.
pub fn error_response(err: HandoffError) -> Response {
    let (status, message) = match &err {
        HandoffError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
        HandoffError::Config(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg.clone()),
        HandoffError::Upstream { status, message } => (
            StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY),
            message.clone(),
        ),
        HandoffError::Channel { .. } => (StatusCode::BAD_GATEWAY, err.to_string()),
        HandoffError::Storage { .. } | HandoffError::Internal(_) => {
            (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
        }
    };

    if status.is_server_error() {
        tracing::error!(%status, error = %err, "request failed");
    } else {
        tracing::debug!(%status, error = %err, "request rejected");
    }

    (status, Json(json!({ "error": message }))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ai_state_request_defaults_optional_fields() {
        let req: AiStateRequest =
            serde_json::from_str(r#"{"number": "5511999990000", "enabled": false}"#).unwrap();
        assert_eq!(req.number, "5511999990000");
        assert!(!req.enabled);
        assert!(req.duration_minutes.is_none());
        assert!(req.reason.is_none());
    }

    #[test]
    fn send_message_request_requires_both_fields() {
        let err = serde_json::from_str::<SendMessageRequest>(r#"{"number": "123"}"#);
        assert!(err.is_err());
    }

    #[test]
    fn validation_maps_to_bad_request() {
        let resp = error_response(HandoffError::Validation("nope".into()));
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn upstream_status_is_forwarded() {
        let resp = error_response(HandoffError::Upstream {
            status: 422,
            message: "invalid number".into(),
        });
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn bogus_upstream_status_falls_back_to_bad_gateway() {
        let resp = error_response(HandoffError::Upstream {
            status: 42,
            message: "weird".into(),
        });
        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn channel_failure_maps_to_bad_gateway() {
        let resp = error_response(HandoffError::Channel {
            message: "connection refused".into(),
            source: None,
        });
        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn config_failure_maps_to_service_unavailable() {
        let resp = error_response(HandoffError::Config("relay not configured".into()));
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
