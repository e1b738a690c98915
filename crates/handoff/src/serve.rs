// SPDX-FileCopyrightText: 2026 Handoff Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `handoff serve` command implementation.
//!
//! Wires the configured adapters (SQLite document store, relay messaging
//! backend) into the console HTTP server and runs it until a shutdown
//! signal arrives.

use std::sync::Arc;
use std::time::Duration;

use handoff_config::model::HandoffConfig;
use handoff_console::{AuthConfig, ConsoleState, PageLimits};
use handoff_core::{Adapter, DocumentStore, HandoffError};
use handoff_relay::{RelayClient, RelayClientConfig};
use handoff_snooze::SnoozeStore;
use handoff_store::SqliteStore;
use tracing::{info, warn};

/// Runs the `handoff serve` command.
pub async fn run_serve(config: HandoffConfig) -> Result<(), HandoffError> {
    init_tracing(&config.console.log_level);

    info!("starting handoff serve");

    let storage = Arc::new(SqliteStore::new(config.storage.clone()));
    storage.initialize().await?;
    info!(path = %config.storage.database_path, "storage initialized");

    let store: Arc<dyn DocumentStore> = storage.clone();
    let snooze = SnoozeStore::new(store.clone());

    let relay = Arc::new(RelayClient::new(RelayClientConfig {
        base_url: config.relay.base_url.clone(),
        timeout: Duration::from_secs(config.relay.timeout_secs),
    })?);
    match config.relay.base_url.as_deref() {
        Some(url) => info!(%url, "relay backend configured"),
        None => warn!("relay backend not configured, message sends will fail"),
    }

    if config.console.bearer_token.is_none() {
        warn!("no bearer token configured, all /v1 requests will be rejected");
    }

    let state = ConsoleState {
        store,
        snooze,
        backend: relay,
        auth: AuthConfig {
            bearer_token: config.console.bearer_token.clone(),
        },
        limits: PageLimits {
            list: config.console.list_limit,
            history: config.console.history_limit,
        },
    };

    handoff_console::serve(
        &config.console.host,
        config.console.port,
        state,
        shutdown_signal(),
    )
    .await?;

    // Checkpoint and close the database before exiting.
    if let Err(e) = storage.shutdown().await {
        warn!(error = %e, "storage shutdown failed");
    }
    info!("handoff serve shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
        return;
    }
    info!("shutdown signal received");
}

fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("handoff={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
