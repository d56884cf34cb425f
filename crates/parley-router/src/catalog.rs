// SPDX-FileCopyrightText: 2026 Parley Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Static model catalog built once from configuration.

use parley_config::model::{ParleyConfig, ProvidersConfig, RoutingConfig};
use parley_core::{ModelDescriptor, ProviderKind};
use strum::IntoEnumIterator;

use crate::classifier::ComplexityTier;

/// One provider's availability and its low/medium/high model slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderEntry {
    pub kind: ProviderKind,
    /// An API key is configured.
    pub available: bool,
    slots: [Option<String>; 3],
}

impl ProviderEntry {
    pub fn new(kind: ProviderKind, available: bool, slots: [Option<&str>; 3]) -> Self {
        Self {
            kind,
            available,
            slots: slots.map(|slot| slot.map(str::to_string)),
        }
    }

    /// Model configured for `tier`, if any.
    pub fn slot(&self, tier: ComplexityTier) -> Option<&str> {
        self.slots[tier.index()].as_deref()
    }

    pub fn has_any_slot(&self) -> bool {
        self.slots.iter().any(Option::is_some)
    }
}

/// Providers, quality ranking, default model and preferred provider.
#[derive(Debug, Clone)]
pub struct ModelCatalog {
    /// In [`ProviderKind`] declaration order.
    providers: Vec<ProviderEntry>,
    /// Cheapest/lowest quality first; position is rank.
    ranking: Vec<ModelDescriptor>,
    default_model: ModelDescriptor,
    preferred_provider: ProviderKind,
}

impl ModelCatalog {
    pub fn from_config(config: &ParleyConfig) -> Self {
        Self::from_parts(&config.routing, &config.providers)
    }

    pub fn from_parts(routing: &RoutingConfig, providers: &ProvidersConfig) -> Self {
        let providers = ProviderKind::iter()
            .map(|kind| {
                let provider = providers.get(kind);
                ProviderEntry::new(kind, provider.is_available(), provider.slots())
            })
            .collect();

        let ranking = routing
            .ranking
            .iter()
            .filter(|entry| !entry.model.trim().is_empty())
            .map(|entry| ModelDescriptor::new(entry.provider, entry.model.trim()))
            .collect();

        Self {
            providers,
            ranking,
            default_model: ModelDescriptor::new(
                routing.default_provider,
                routing.default_model.trim(),
            ),
            preferred_provider: routing.preferred_provider,
        }
    }

    pub fn provider(&self, kind: ProviderKind) -> Option<&ProviderEntry> {
        self.providers.iter().find(|p| p.kind == kind)
    }

    pub fn providers(&self) -> &[ProviderEntry] {
        &self.providers
    }

    pub fn is_available(&self, kind: ProviderKind) -> bool {
        self.provider(kind).is_some_and(|p| p.available)
    }

    /// Available providers in declaration order.
    pub fn available_providers(&self) -> impl Iterator<Item = &ProviderEntry> {
        self.providers.iter().filter(|p| p.available)
    }

    pub fn ranking(&self) -> &[ModelDescriptor] {
        &self.ranking
    }

    /// Position of `model` in the quality ranking.
    pub fn rank_of(&self, model: &ModelDescriptor) -> Option<usize> {
        self.ranking.iter().position(|m| m == model)
    }

    pub fn default_model(&self) -> &ModelDescriptor {
        &self.default_model
    }

    pub fn preferred_provider(&self) -> ProviderKind {
        self.preferred_provider
    }
}
