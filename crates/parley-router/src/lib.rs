// SPDX-FileCopyrightText: 2026 Parley Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Deterministic message classification and model routing for Parley.
//!
//! This crate provides:
//! - [`AgentClassifier`]: keyword rules picking SMALLTALK/SALES/SUPPORT/FAQ/GENERAL
//! - [`ComplexityClassifier`]: keyword and length heuristics for LOW/MEDIUM/HIGH
//! - [`ModelSelector`]: strategy-driven model choice over a [`ModelCatalog`]
//! - [`SmartRouter`] and [`RouterHandle`]: the composed router and its hot-swappable handle
//!
//! Nothing here calls a model or touches the network.

pub mod agent;
pub mod catalog;
pub mod classifier;
pub mod matcher;
pub mod router;
pub mod rules;
pub mod selector;

pub use agent::{AgentClassifier, AgentInfo, AgentKind, AgentMatch, AgentPriority};
pub use catalog::{ModelCatalog, ProviderEntry};
pub use classifier::{ComplexityClassifier, ComplexityResult, ComplexityTier};
pub use router::{RouteOptions, RouterHandle, RoutingDecision, SmartRouter};
pub use rules::{KeywordSet, Rule, RuleTable};
pub use selector::{ModelSelector, Selection, SelectionSource};
