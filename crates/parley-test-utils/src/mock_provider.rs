// SPDX-FileCopyrightText: 2026 Parley Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock chat provider for deterministic testing.
//!
//! `MockProvider` implements `ChatProvider` with pre-configured responses,
//! enabling fast, CI-runnable tests without external API calls.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use parley_core::{
    ChatCompletion, ChatProvider, CompletionRequest, ModelDescriptor, ParleyError, ProviderKind,
    TokenUsage,
};

/// A queued reply: text, or a provider failure message.
type Reply = Result<String, String>;

/// A mock chat provider that returns pre-configured responses.
///
/// Responses are popped from a FIFO queue. When the queue is empty,
/// a default "mock response" text is returned. Every request is recorded.
#[derive(Clone)]
pub struct MockProvider {
    kind: ProviderKind,
    model: String,
    usage: TokenUsage,
    responses: Arc<Mutex<VecDeque<Reply>>>,
    requests: Arc<Mutex<Vec<CompletionRequest>>>,
}

impl MockProvider {
    /// Create a mock `openai/gpt-4o-mini` provider with an empty response queue.
    pub fn new() -> Self {
        Self {
            kind: ProviderKind::OpenAi,
            model: "gpt-4o-mini".to_string(),
            usage: TokenUsage::new(10, 20),
            responses: Arc::new(Mutex::new(VecDeque::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a mock provider pre-loaded with the given responses.
    pub fn with_responses(responses: Vec<String>) -> Self {
        let provider = Self::new();
        Self {
            responses: Arc::new(Mutex::new(responses.into_iter().map(Ok).collect())),
            ..provider
        }
    }

    /// Token usage reported for every completion.
    pub fn with_usage(mut self, usage: TokenUsage) -> Self {
        self.usage = usage;
        self
    }

    /// The same queues, answering as `model`.
    pub fn for_model(&self, model: &ModelDescriptor) -> Self {
        Self {
            kind: model.provider,
            model: model.model_id.clone(),
            ..self.clone()
        }
    }

    /// Add a response to the end of the queue.
    pub async fn add_response(&self, text: impl Into<String>) {
        self.responses.lock().await.push_back(Ok(text.into()));
    }

    /// Make the next queued call fail with a provider error.
    pub async fn add_failure(&self, message: impl Into<String>) {
        self.responses.lock().await.push_back(Err(message.into()));
    }

    /// Requests received so far, oldest first.
    pub async fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().await.clone()
    }

    async fn next_reply(&self) -> Reply {
        self.responses
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Ok("mock response".to_string()))
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChatProvider for MockProvider {
    fn kind(&self) -> ProviderKind {
        self.kind
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn chat_completion(
        &self,
        request: CompletionRequest,
    ) -> Result<ChatCompletion, ParleyError> {
        self.requests.lock().await.push(request);
        match self.next_reply().await {
            Ok(content) => Ok(ChatCompletion {
                content,
                model: self.model.clone(),
                usage: self.usage,
            }),
            Err(message) => Err(ParleyError::Provider {
                provider: self.kind,
                message,
                source: None,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use parley_core::Message;

    use super::*;

    fn request(text: &str) -> CompletionRequest {
        CompletionRequest::new(vec![Message::user(text)])
    }

    #[tokio::test]
    async fn default_response_when_queue_empty() {
        let provider = MockProvider::new();
        let resp = provider.chat_completion(request("hi")).await.unwrap();
        assert_eq!(resp.content, "mock response");
        assert_eq!(resp.model, "gpt-4o-mini");
        assert_eq!(resp.usage, TokenUsage::new(10, 20));
    }

    #[tokio::test]
    async fn queued_responses_returned_in_order() {
        let provider =
            MockProvider::with_responses(vec!["first".to_string(), "second".to_string()]);
        provider.add_response("third").await;
        for expected in ["first", "second", "third", "mock response"] {
            let resp = provider.chat_completion(request("x")).await.unwrap();
            assert_eq!(resp.content, expected);
        }
    }

    #[tokio::test]
    async fn failures_surface_as_provider_errors() {
        let provider = MockProvider::new();
        provider.add_failure("rate limited").await;
        let err = provider.chat_completion(request("x")).await.unwrap_err();
        assert_eq!(err.to_string(), "[openai] rate limited");
    }

    #[tokio::test]
    async fn for_model_shares_queues() {
        let provider = MockProvider::with_responses(vec!["shared".to_string()]);
        let grok = provider.for_model(&ModelDescriptor::new(ProviderKind::Grok, "grok-beta"));
        let resp = grok.chat_completion(request("hello")).await.unwrap();
        assert_eq!(resp.content, "shared");
        assert_eq!(resp.model, "grok-beta");
        assert_eq!(grok.kind(), ProviderKind::Grok);
        assert_eq!(provider.requests().await.len(), 1);
    }
}
