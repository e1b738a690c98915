// SPDX-FileCopyrightText: 2026 Handoff Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Collaborator trait definitions for the Handoff console.
//!
//! All adapters extend the [`Adapter`] base trait and use `#[async_trait]`
//! for dynamic dispatch compatibility.

pub mod adapter;
pub mod backend;
pub mod store;

pub use adapter::Adapter;
pub use backend::MessagingBackend;
pub use store::DocumentStore;
