// SPDX-FileCopyrightText: 2026 Handoff Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Snooze/handover state machine for the Handoff admin console.
//!
//! Decides, per conversation, whether the automated AI agent or a human
//! admin is authorized to respond: activation (manual or timed), timed
//! auto-expiry reconciled at read time, and explicit resumption.

pub mod model;
pub mod store;

pub use model::{ActivateOptions, SnoozeInfo, DEFAULT_SNOOZE_MINUTES, SNOOZE_COLLECTION};
pub use store::SnoozeStore;
