// SPDX-FileCopyrightText: 2026 Handoff Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Router assembly and the HTTP listener.

use std::sync::Arc;

use axum::{
    Router,
    middleware,
    routing::{get, post},
};
use handoff_core::{DocumentStore, HandoffError, MessagingBackend};
use handoff_snooze::SnoozeStore;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::auth::{AuthConfig, require_bearer};
use crate::handlers;

/// Page-size defaults applied when a request carries no `limit`.
#[derive(Debug, Clone, Copy)]
pub struct PageLimits {
    pub list: i64,
    pub history: i64,
}

/// Shared state behind every handler.
#[derive(Clone)]
pub struct ConsoleState {
    pub store: Arc<dyn DocumentStore>,
    pub snooze: SnoozeStore,
    pub backend: Arc<dyn MessagingBackend>,
    pub auth: AuthConfig,
    pub limits: PageLimits,
}

/// Builds the console router. `/health` is public; everything under
/// `/v1` requires the bearer token.
pub fn router(state: ConsoleState) -> Router {
    let authed = Router::new()
        .route("/v1/conversations", get(handlers::get_conversations))
        .route(
            "/v1/conversations/{id}/history",
            get(handlers::get_history),
        )
        .route("/v1/conversations/ai-state", post(handlers::post_ai_state))
        .route("/v1/messages", post(handlers::post_message))
        .layer(middleware::from_fn_with_state(
            state.auth.clone(),
            require_bearer,
        ));

    Router::new()
        .route("/health", get(handlers::get_health))
        .merge(authed)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Binds the listener and serves until `shutdown` resolves. `host` may
/// be an IP address or a hostname.
pub async fn serve(
    host: &str,
    port: u16,
    state: ConsoleState,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(), HandoffError> {
    let listener = tokio::net::TcpListener::bind((host, port))
        .await
        .map_err(|e| HandoffError::Config(format!("cannot bind {host}:{port}: {e}")))?;
    let addr = listener
        .local_addr()
        .map_err(|e| HandoffError::Internal(format!("listener address unavailable: {e}")))?;
    info!(%addr, "console listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| HandoffError::Internal(format!("server error: {e}")))
}
