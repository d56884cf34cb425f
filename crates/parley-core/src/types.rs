// SPDX-FileCopyrightText: 2026 Parley Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Value types shared by the classifiers, the selector, and provider adapters.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::error::ParleyError;

/// Author of a conversation turn.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// A single conversation turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }
}

/// Conversation handed to the classifiers.
///
/// Messages are in chronological order. Classifiers only ever inspect the most
/// recent `user` turn; system and assistant turns are carried along for the
/// caller (and reported through [`has_system_prompt`](Self::has_system_prompt)).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationContext {
    /// Conversation history, oldest first.
    pub messages: Vec<Message>,
    /// Tenant identifier for multi-tenant deployments.
    #[serde(default)]
    pub tenant_id: Option<String>,
    /// End-user identifier.
    #[serde(default)]
    pub user_id: Option<String>,
    /// Channel the message arrived on (web, whatsapp, telegram, ...).
    #[serde(default = "default_channel")]
    pub channel: String,
}

fn default_channel() -> String {
    "web".to_string()
}

impl ConversationContext {
    pub fn new(messages: Vec<Message>) -> Self {
        Self {
            messages,
            tenant_id: None,
            user_id: None,
            channel: default_channel(),
        }
    }

    /// Shorthand for a context holding a single user turn.
    pub fn from_user(content: impl Into<String>) -> Self {
        Self::new(vec![Message::user(content)])
    }

    pub fn with_tenant(mut self, tenant_id: impl Into<String>) -> Self {
        self.tenant_id = Some(tenant_id.into());
        self
    }

    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    pub fn with_channel(mut self, channel: impl Into<String>) -> Self {
        self.channel = channel.into();
        self
    }

    /// Content of the most recent `user` turn, if any.
    pub fn last_user_message(&self) -> Option<&str> {
        self.messages
            .iter()
            .rev()
            .find(|m| m.role == Role::User)
            .map(|m| m.content.as_str())
    }

    /// Content of the most recent `user` turn, or [`ParleyError::NoUserMessage`].
    pub fn require_user_message(&self) -> Result<&str, ParleyError> {
        self.last_user_message().ok_or(ParleyError::NoUserMessage)
    }

    pub fn conversation_length(&self) -> usize {
        self.messages.len()
    }

    pub fn has_system_prompt(&self) -> bool {
        self.messages.iter().any(|m| m.role == Role::System)
    }
}

/// Backend model providers known to the router.
///
/// Declaration order is the fallback order used when neither the strategy's
/// choice nor the default model is available.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    EnumString,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    OpenAi,
    Anthropic,
    Gemini,
    Grok,
}

impl ProviderKind {
    /// Parse a provider name, case-insensitively.
    pub fn parse(name: &str) -> Result<Self, ParleyError> {
        name.trim()
            .parse()
            .map_err(|_| ParleyError::UnknownProvider(name.to_string()))
    }

    /// Conventional environment variable holding this provider's API key.
    pub fn api_key_env(&self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "OPENAI_API_KEY",
            ProviderKind::Anthropic => "ANTHROPIC_API_KEY",
            ProviderKind::Gemini => "GOOGLE_API_KEY",
            ProviderKind::Grok => "XAI_API_KEY",
        }
    }
}

/// Policy mapping a complexity tier to a model choice.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[serde(rename_all = "snake_case")]
pub enum RoutingStrategy {
    /// Always the cheapest available model.
    CostOptimized,
    /// Cheap models for simple messages, premium models for demanding ones.
    #[default]
    Balanced,
    /// Always the highest-quality available model.
    QualityOptimized,
}

impl RoutingStrategy {
    /// Parse a strategy name such as `cost_optimized`, case-insensitively.
    pub fn parse(name: &str) -> Result<Self, ParleyError> {
        name.trim()
            .parse()
            .map_err(|_| ParleyError::UnknownStrategy(name.to_string()))
    }
}

/// A concrete backend model: which provider serves it and under what id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModelDescriptor {
    pub provider: ProviderKind,
    pub model_id: String,
}

impl ModelDescriptor {
    pub fn new(provider: ProviderKind, model_id: impl Into<String>) -> Self {
        Self {
            provider,
            model_id: model_id.into(),
        }
    }
}

impl std::fmt::Display for ModelDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.provider, self.model_id)
    }
}

/// Token counts reported by a provider for one call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

impl TokenUsage {
    pub fn new(input_tokens: u32, output_tokens: u32) -> Self {
        Self {
            input_tokens,
            output_tokens,
        }
    }

    pub fn total(&self) -> u64 {
        u64::from(self.input_tokens) + u64::from(self.output_tokens)
    }
}

/// A chat completion request handed to a [`ChatProvider`](crate::ChatProvider).
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub messages: Vec<Message>,
    /// Sampling temperature; `None` uses the provider default.
    pub temperature: Option<f32>,
    /// Maximum tokens to generate; `None` uses the model default.
    pub max_tokens: Option<u32>,
}

impl CompletionRequest {
    pub fn new(messages: Vec<Message>) -> Self {
        Self {
            messages,
            temperature: None,
            max_tokens: None,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }
}

/// A provider's answer to a [`CompletionRequest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatCompletion {
    pub content: String,
    /// Model that actually served the request.
    pub model: String,
    pub usage: TokenUsage,
}
