// SPDX-FileCopyrightText: 2026 Parley Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for end-to-end routing tests.
//!
//! `TestHarness` assembles a router, a cost estimator and a mock provider
//! from a configuration. `send_message()` drives the full pipeline:
//! route, call the provider, price the call.

use parley_config::model::ParleyConfig;
use parley_core::{
    ChatCompletion, ChatProvider, CompletionRequest, ConversationContext, ParleyError,
    ProviderKind, RoutingStrategy, TokenUsage,
};
use parley_cost::CostEstimator;
use parley_router::{RouteOptions, RouterHandle, RoutingDecision, SmartRouter};
use rust_decimal::Decimal;
use tracing::debug;

use crate::mock_provider::MockProvider;

/// Builder for creating test environments with configurable options.
pub struct TestHarnessBuilder {
    config: ParleyConfig,
    responses: Vec<String>,
    usage: Option<TokenUsage>,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        Self {
            config: ParleyConfig::default(),
            responses: Vec::new(),
            usage: None,
        }
    }

    /// Start from an explicit configuration instead of the defaults.
    pub fn with_config(mut self, config: ParleyConfig) -> Self {
        self.config = config;
        self
    }

    /// Mark providers as available by giving them a dummy API key.
    pub fn with_providers(mut self, kinds: &[ProviderKind]) -> Self {
        for kind in kinds {
            self.config.providers.get_mut(*kind).api_key = Some(format!("test-{kind}-key"));
        }
        self
    }

    pub fn with_strategy(mut self, strategy: RoutingStrategy) -> Self {
        self.config.routing.strategy = strategy;
        self
    }

    /// Set mock provider responses.
    pub fn with_mock_responses(mut self, responses: Vec<String>) -> Self {
        self.responses = responses;
        self
    }

    /// Token usage the mock provider reports for every call.
    pub fn with_usage(mut self, usage: TokenUsage) -> Self {
        self.usage = Some(usage);
        self
    }

    pub fn build(self) -> TestHarness {
        let mut provider = MockProvider::with_responses(self.responses);
        if let Some(usage) = self.usage {
            provider = provider.with_usage(usage);
        }

        TestHarness {
            router: RouterHandle::new(SmartRouter::from_config(&self.config)),
            estimator: CostEstimator::from_config(&self.config.pricing),
            provider,
            config: self.config,
        }
    }
}

/// One routed, answered and priced turn.
#[derive(Debug, Clone)]
pub struct Turn {
    pub decision: RoutingDecision,
    pub completion: ChatCompletion,
    /// Cost of the call in USD.
    pub cost: Decimal,
}

/// Router + mock provider + cost estimator wired together.
pub struct TestHarness {
    pub router: RouterHandle,
    pub estimator: CostEstimator,
    pub provider: MockProvider,
    pub config: ParleyConfig,
}

impl TestHarness {
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }

    /// Route `context`, call the mock provider as the routed model, and price the call.
    pub async fn send_message(
        &self,
        context: &ConversationContext,
        options: &RouteOptions,
    ) -> Result<Turn, ParleyError> {
        let decision = self.router.route(context, options)?;
        let provider = self.provider.for_model(&decision.model);
        let completion = provider
            .chat_completion(CompletionRequest::new(context.messages.clone()))
            .await?;
        let cost = self
            .estimator
            .calculate_usage(&decision.model.model_id, &completion.usage)?;
        debug!(model = %decision.model, cost = %cost, "turn completed");

        Ok(Turn {
            decision,
            completion,
            cost,
        })
    }

    /// Shorthand for a single user message with no overrides.
    pub async fn send_text(&self, text: &str) -> Result<Turn, ParleyError> {
        self.send_message(&ConversationContext::from_user(text), &RouteOptions::new())
            .await
    }
}
