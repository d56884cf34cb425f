// SPDX-FileCopyrightText: 2026 Parley Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Strategy-driven model selection with fallback to configured models.
//!
//! BALANCED uses the preferred provider's nearest configured slot when the
//! exact tier slot is empty. Fallback order when the preferred provider is
//! unavailable or has no slots, or when the ranking has no available entry:
//! 1. the default model, when its provider is available;
//! 2. the nearest slot of the first available provider with any slot;
//! 3. [`ParleyError::NoProviderConfigured`].
//!
//! Both fallbacks pick one provider for every tier, so BALANCED ranks never
//! decrease as the tier rises.

use parley_core::{ModelDescriptor, ParleyError, ProviderKind, RoutingStrategy};
use serde::Serialize;
use strum::Display;
use tracing::{debug, info};

use crate::catalog::{ModelCatalog, ProviderEntry};
use crate::classifier::ComplexityTier;

/// Where a selected model came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum SelectionSource {
    /// The strategy's own choice.
    Strategy,
    /// Another slot of the preferred provider; the tier's own slot is empty.
    NearestSlot,
    /// The process-wide default model.
    DefaultModel,
    /// The first available provider in declaration order.
    FirstAvailable,
}

/// A selected model and how it was reached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Selection {
    pub model: ModelDescriptor,
    pub source: SelectionSource,
}

/// Maps a complexity tier and strategy to a concrete model.
#[derive(Debug, Clone)]
pub struct ModelSelector {
    catalog: ModelCatalog,
}

impl ModelSelector {
    pub fn new(catalog: ModelCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &ModelCatalog {
        &self.catalog
    }

    /// Model for `tier` under `strategy`, using the catalog's preferred provider.
    pub fn select_model(
        &self,
        tier: ComplexityTier,
        strategy: RoutingStrategy,
    ) -> Result<ModelDescriptor, ParleyError> {
        self.select(tier, strategy, self.catalog.preferred_provider())
            .map(|s| s.model)
    }

    /// Like [`select_model`](Self::select_model) with a per-call preferred provider.
    pub fn select_model_for(
        &self,
        tier: ComplexityTier,
        strategy: RoutingStrategy,
        preferred_provider: ProviderKind,
    ) -> Result<ModelDescriptor, ParleyError> {
        self.select(tier, strategy, preferred_provider)
            .map(|s| s.model)
    }

    /// Full selection, reporting whether a fallback was used.
    pub fn select(
        &self,
        tier: ComplexityTier,
        strategy: RoutingStrategy,
        preferred_provider: ProviderKind,
    ) -> Result<Selection, ParleyError> {
        let chosen = match strategy {
            RoutingStrategy::CostOptimized => self.ranked_available().next().map(strategy_pick),
            RoutingStrategy::QualityOptimized => {
                self.ranked_available().next_back().map(strategy_pick)
            }
            RoutingStrategy::Balanced => self
                .catalog
                .provider(preferred_provider)
                .filter(|p| p.available)
                .and_then(|p| balanced_pick(p, tier)),
        };

        let selection = match chosen {
            Some(selection) if selection.source == SelectionSource::Strategy => {
                debug!(
                    %tier,
                    %strategy,
                    model = %selection.model,
                    "model selected"
                );
                return Ok(selection);
            }
            Some(selection) => selection,
            None => self.fallback(effective_tier(tier, strategy))?,
        };
        info!(
            %tier,
            %strategy,
            model = %selection.model,
            source = %selection.source,
            "strategy choice unconfigured, using fallback model"
        );
        Ok(selection)
    }

    /// Rank of `model` in the catalog's quality ranking.
    pub fn rank_of(&self, model: &ModelDescriptor) -> Option<usize> {
        self.catalog.rank_of(model)
    }

    fn ranked_available(&self) -> impl DoubleEndedIterator<Item = ModelDescriptor> + '_ {
        self.catalog
            .ranking()
            .iter()
            .filter(|m| self.catalog.is_available(m.provider))
            .cloned()
    }

    fn fallback(&self, tier: ComplexityTier) -> Result<Selection, ParleyError> {
        let default = self.catalog.default_model();
        if !default.model_id.is_empty() && self.catalog.is_available(default.provider) {
            return Ok(Selection {
                model: default.clone(),
                source: SelectionSource::DefaultModel,
            });
        }

        self.catalog
            .available_providers()
            .find_map(|p| nearest_slot(p, tier).map(|m| ModelDescriptor::new(p.kind, m)))
            .map(|model| Selection {
                model,
                source: SelectionSource::FirstAvailable,
            })
            .ok_or_else(|| ParleyError::NoProviderConfigured {
                tier: tier.to_string(),
            })
    }
}

fn strategy_pick(model: ModelDescriptor) -> Selection {
    Selection {
        model,
        source: SelectionSource::Strategy,
    }
}

/// The provider's slot for `tier`, else its nearest configured slot.
fn balanced_pick(provider: &ProviderEntry, tier: ComplexityTier) -> Option<Selection> {
    let (model, source) = match provider.slot(tier) {
        Some(model) => (model, SelectionSource::Strategy),
        None => (nearest_slot(provider, tier)?, SelectionSource::NearestSlot),
    };
    Some(Selection {
        model: ModelDescriptor::new(provider.kind, model),
        source,
    })
}

/// Tier a strategy effectively asks for; tier-blind strategies stay tier-blind in fallback.
fn effective_tier(tier: ComplexityTier, strategy: RoutingStrategy) -> ComplexityTier {
    match strategy {
        RoutingStrategy::CostOptimized => ComplexityTier::Low,
        RoutingStrategy::QualityOptimized => ComplexityTier::High,
        RoutingStrategy::Balanced => tier,
    }
}

/// Closest configured slot to `tier`, preferring cheaper slots on ties.
fn nearest_slot(provider: &ProviderEntry, tier: ComplexityTier) -> Option<&str> {
    let order: [ComplexityTier; 3] = match tier {
        ComplexityTier::Low => [ComplexityTier::Low, ComplexityTier::Medium, ComplexityTier::High],
        ComplexityTier::Medium => {
            [ComplexityTier::Medium, ComplexityTier::Low, ComplexityTier::High]
        }
        ComplexityTier::High => [ComplexityTier::High, ComplexityTier::Medium, ComplexityTier::Low],
    };
    order.into_iter().find_map(|t| provider.slot(t))
}
