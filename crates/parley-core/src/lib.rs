// SPDX-FileCopyrightText: 2026 Parley Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for Parley.
//!
//! This crate provides the error type, the conversation and model value types,
//! and the provider contract shared by the router, cost, and test-utility
//! crates.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::ParleyError;
pub use traits::ChatProvider;
pub use types::{
    ChatCompletion, CompletionRequest, ConversationContext, Message, ModelDescriptor,
    ProviderKind, Role, RoutingStrategy, TokenUsage,
};
