// SPDX-FileCopyrightText: 2026 Parley Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Parley routing core.

use thiserror::Error;

use crate::types::ProviderKind;

/// The primary error type returned by classifiers, the model selector,
/// the cost estimator, and provider implementations.
///
/// None of the routing/pricing variants involve I/O and none are retryable.
#[derive(Debug, Error)]
pub enum ParleyError {
    /// The conversation context holds no `user` turn, so there is nothing to classify.
    #[error("conversation context contains no user message")]
    NoUserMessage,

    /// No provider/model is usable at all for the requested tier.
    #[error("no provider configured (requested tier: {tier})")]
    NoProviderConfigured { tier: String },

    /// Cost lookup for a model that has no entry in the price table.
    #[error("no price entry for model `{model}`")]
    UnknownModelPrice { model: String },

    /// A routing strategy name that is not one of the three supported strategies.
    #[error("unknown routing strategy `{0}` (expected cost_optimized, balanced, quality_optimized)")]
    UnknownStrategy(String),

    /// A provider name that is not one of the supported providers.
    #[error("unknown provider `{0}` (expected openai, anthropic, gemini, grok)")]
    UnknownProvider(String),

    /// Invalid configuration that reached the core.
    #[error("configuration error: {0}")]
    Config(String),

    /// LLM provider errors (API failure, missing credentials, malformed response).
    #[error("[{provider}] {message}")]
    Provider {
        provider: ProviderKind,
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}
