// SPDX-FileCopyrightText: 2026 Parley Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Model routing with per-request and global overrides.
//!
//! Orchestrates selection: per-request force > global force > classify + select.

use std::sync::Arc;

use arc_swap::ArcSwap;
use parley_config::model::ParleyConfig;
use parley_core::{ConversationContext, ModelDescriptor, ParleyError, ProviderKind, RoutingStrategy};
use serde::Serialize;
use tracing::{debug, warn};

use crate::agent::{AgentClassifier, AgentKind};
use crate::catalog::ModelCatalog;
use crate::classifier::{ComplexityClassifier, ComplexityTier};
use crate::selector::{ModelSelector, SelectionSource};

/// Per-request overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteOptions {
    /// Use this model, bypassing selection.
    pub force_model: Option<String>,
    /// Provider for `force_model`. Defaults to the catalog's default provider.
    pub force_provider: Option<ProviderKind>,
    /// Preferred provider for balanced routing on this request only.
    pub preferred_provider: Option<ProviderKind>,
}

impl RouteOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn force_model(mut self, model: impl Into<String>) -> Self {
        self.force_model = Some(model.into());
        self
    }

    pub fn force_provider(mut self, provider: ProviderKind) -> Self {
        self.force_provider = Some(provider);
        self
    }

    pub fn preferred_provider(mut self, provider: ProviderKind) -> Self {
        self.preferred_provider = Some(provider);
        self
    }
}

/// Outcome of routing one conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoutingDecision {
    pub agent: AgentKind,
    /// Classified complexity tier, reported even when the model is forced.
    pub tier: ComplexityTier,
    pub model: ModelDescriptor,
    pub strategy: RoutingStrategy,
    /// Whether the model came from a force override rather than selection.
    pub forced: bool,
    /// Human-readable reason for the routing decision.
    pub reason: String,
}

/// Composes the agent classifier, complexity classifier and model selector.
#[derive(Debug, Clone)]
pub struct SmartRouter {
    agents: AgentClassifier,
    complexity: ComplexityClassifier,
    selector: ModelSelector,
    strategy: RoutingStrategy,
    /// Global `routing.force_model`, resolved to a provider.
    forced: Option<ModelDescriptor>,
}

impl SmartRouter {
    pub fn new(
        agents: AgentClassifier,
        complexity: ComplexityClassifier,
        selector: ModelSelector,
        strategy: RoutingStrategy,
    ) -> Self {
        Self {
            agents,
            complexity,
            selector,
            strategy,
            forced: None,
        }
    }

    /// Build every component from configuration.
    pub fn from_config(config: &ParleyConfig) -> Self {
        let routing = &config.routing;
        let forced = routing
            .force_model
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .map(|m| {
                ModelDescriptor::new(
                    routing.force_provider.unwrap_or(routing.default_provider),
                    m,
                )
            });

        Self {
            agents: AgentClassifier::from_config(&config.classifier),
            complexity: ComplexityClassifier::from_config(&config.classifier),
            selector: ModelSelector::new(ModelCatalog::from_config(config)),
            strategy: routing.strategy,
            forced,
        }
    }

    /// Replace the configured strategy.
    pub fn with_strategy(mut self, strategy: RoutingStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Force every request to `model`, as `routing.force_model` does.
    pub fn with_forced_model(mut self, model: ModelDescriptor) -> Self {
        self.forced = Some(model);
        self
    }

    pub fn strategy(&self) -> RoutingStrategy {
        self.strategy
    }

    pub fn agents(&self) -> &AgentClassifier {
        &self.agents
    }

    pub fn complexity(&self) -> &ComplexityClassifier {
        &self.complexity
    }

    pub fn selector(&self) -> &ModelSelector {
        &self.selector
    }

    /// Route a conversation to an agent kind and a model.
    ///
    /// Priority order:
    /// 1. Per-request `force_model`
    /// 2. Global `routing.force_model`
    /// 3. Complexity classification + strategy selection
    pub fn route(
        &self,
        context: &ConversationContext,
        options: &RouteOptions,
    ) -> Result<RoutingDecision, ParleyError> {
        let agent = self.agents.select_agent_kind(context)?;
        let complexity = self.complexity.classify(context)?;

        let decision = |model, forced, reason: String| RoutingDecision {
            agent,
            tier: complexity.tier,
            model,
            strategy: self.strategy,
            forced,
            reason,
        };

        // 1. Per-request override
        if let Some(model) = options
            .force_model
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
        {
            let provider = options
                .force_provider
                .unwrap_or(self.selector.catalog().default_model().provider);
            let model = ModelDescriptor::new(provider, model);
            self.warn_if_unavailable(&model);
            return Ok(decision(model, true, "forced model".to_string()));
        }

        // 2. Global force_model config
        if let Some(model) = &self.forced {
            self.warn_if_unavailable(model);
            return Ok(decision(
                model.clone(),
                true,
                "global force_model config".to_string(),
            ));
        }

        // 3. Classify and select
        let preferred = options
            .preferred_provider
            .unwrap_or(self.selector.catalog().preferred_provider());
        let selection = self
            .selector
            .select(complexity.tier, self.strategy, preferred)?;

        let reason = match selection.source {
            SelectionSource::Strategy => format!("{} ({})", complexity.reason, self.strategy),
            source => format!("{} ({}, fallback: {source})", complexity.reason, self.strategy),
        };

        let routed = decision(selection.model, false, reason);
        debug!(
            agent = %routed.agent,
            tier = %routed.tier,
            model = %routed.model,
            reason = routed.reason.as_str(),
            "routed"
        );
        Ok(routed)
    }

    fn warn_if_unavailable(&self, model: &ModelDescriptor) {
        if !self.selector.catalog().is_available(model.provider) {
            warn!(
                model = %model,
                "forced model targets a provider without an API key"
            );
        }
    }
}

/// A [`SmartRouter`] that can be replaced atomically while readers stay lock-free.
#[derive(Debug)]
pub struct RouterHandle {
    inner: ArcSwap<SmartRouter>,
}

impl RouterHandle {
    pub fn new(router: SmartRouter) -> Self {
        Self {
            inner: ArcSwap::from_pointee(router),
        }
    }

    /// Snapshot of the current router.
    pub fn load(&self) -> Arc<SmartRouter> {
        self.inner.load_full()
    }

    /// Swap in a new router, returning the previous one.
    pub fn replace(&self, router: SmartRouter) -> Arc<SmartRouter> {
        let previous = self.inner.swap(Arc::new(router));
        debug!(strategy = %self.inner.load().strategy(), "router replaced");
        previous
    }

    /// Route with whichever router is current.
    pub fn route(
        &self,
        context: &ConversationContext,
        options: &RouteOptions,
    ) -> Result<RoutingDecision, ParleyError> {
        self.inner.load().route(context, options)
    }
}
