// SPDX-FileCopyrightText: 2026 Parley Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Provider trait for LLM provider integrations (OpenAI, Anthropic, Gemini, Grok).

use async_trait::async_trait;

use crate::error::ParleyError;
use crate::types::{ChatCompletion, CompletionRequest, ProviderKind};

/// Uniform "send messages, receive text and token counts" contract.
///
/// The routing core never calls providers itself; it only consumes the
/// [`TokenUsage`](crate::TokenUsage) carried by the returned completion.
#[async_trait]
pub trait ChatProvider: Send + Sync + 'static {
    /// Which provider this adapter talks to.
    fn kind(&self) -> ProviderKind;

    /// Model identifier requests are sent to.
    fn model(&self) -> &str;

    /// Sends a chat completion request and returns the full response.
    async fn chat_completion(
        &self,
        request: CompletionRequest,
    ) -> Result<ChatCompletion, ParleyError>;
}
