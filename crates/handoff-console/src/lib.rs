// SPDX-FileCopyrightText: 2026 Handoff Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP admin console for monitoring and moderating AI-handled
//! conversations.
//!
//! The console exposes a small authenticated API: a conversation list
//! joined with snooze status, per-conversation history, an AI on/off
//! toggle, and a proxy for sending messages through the upstream
//! backend. Route assembly lives in [`server`], the per-endpoint logic
//! in [`aggregator`], [`history`], and [`admin`].

pub mod admin;
pub mod aggregator;
pub mod auth;
pub mod handlers;
pub mod history;
pub mod server;

pub use auth::AuthConfig;
pub use server::{ConsoleState, PageLimits, router, serve};
