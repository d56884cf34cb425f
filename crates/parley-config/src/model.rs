// SPDX-FileCopyrightText: 2026 Parley Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for Parley.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use std::collections::BTreeMap;

use parley_core::{ProviderKind, RoutingStrategy};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Top-level Parley configuration.
///
/// Loaded from TOML files following the XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ParleyConfig {
    /// Logging settings.
    #[serde(default)]
    pub log: LogConfig,

    /// Model routing settings.
    #[serde(default)]
    pub routing: RoutingConfig,

    /// Per-provider credentials and tier slots.
    #[serde(default)]
    pub providers: ProvidersConfig,

    /// Classifier thresholds and keyword extensions.
    #[serde(default)]
    pub classifier: ClassifierConfig,

    /// Price table overrides.
    #[serde(default)]
    pub pricing: PricingConfig,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LogConfig {
    /// Logging level (trace, debug, info, warn, error). `RUST_LOG` takes precedence.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// A `{provider, model}` pair as written in configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ModelRef {
    pub provider: ProviderKind,
    pub model: String,
}

impl ModelRef {
    pub fn new(provider: ProviderKind, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
        }
    }
}

/// Model routing configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RoutingConfig {
    /// Strategy mapping complexity tiers to models.
    #[serde(default)]
    pub strategy: RoutingStrategy,

    /// Provider whose tier slots are used by the balanced strategy.
    #[serde(default = "default_provider")]
    pub preferred_provider: ProviderKind,

    /// Provider of the process-wide fallback model.
    #[serde(default = "default_provider")]
    pub default_provider: ProviderKind,

    /// Process-wide fallback model, used when the strategy's choice is unconfigured.
    #[serde(default = "default_model")]
    pub default_model: String,

    /// Force all messages to a specific model, bypassing selection.
    /// Example: "gpt-4o"
    #[serde(default)]
    pub force_model: Option<String>,

    /// Provider for `force_model`. Defaults to `default_provider`.
    #[serde(default)]
    pub force_provider: Option<ProviderKind>,

    /// Known models ordered from cheapest/lowest quality to most capable.
    /// Position in this list is the model's rank.
    #[serde(default = "default_ranking")]
    pub ranking: Vec<ModelRef>,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            strategy: RoutingStrategy::default(),
            preferred_provider: default_provider(),
            default_provider: default_provider(),
            default_model: default_model(),
            force_model: None,
            force_provider: None,
            ranking: default_ranking(),
        }
    }
}

fn default_provider() -> ProviderKind {
    ProviderKind::OpenAi
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_ranking() -> Vec<ModelRef> {
    vec![
        ModelRef::new(ProviderKind::Gemini, "gemini-1.5-flash"),
        ModelRef::new(ProviderKind::OpenAi, "gpt-4o-mini"),
        ModelRef::new(ProviderKind::Anthropic, "claude-3-5-haiku-20241022"),
        ModelRef::new(ProviderKind::Gemini, "gemini-1.5-pro"),
        ModelRef::new(ProviderKind::Grok, "grok-beta"),
        ModelRef::new(ProviderKind::Grok, "grok-2-latest"),
        ModelRef::new(ProviderKind::OpenAi, "gpt-4o"),
        ModelRef::new(ProviderKind::Anthropic, "claude-3-5-sonnet-20241022"),
        ModelRef::new(ProviderKind::Anthropic, "claude-sonnet-4-20250514"),
    ]
}

/// Credentials presence and tier slots for every provider.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ProvidersConfig {
    #[serde(default = "default_openai")]
    pub openai: ProviderConfig,

    #[serde(default = "default_anthropic")]
    pub anthropic: ProviderConfig,

    #[serde(default = "default_gemini")]
    pub gemini: ProviderConfig,

    #[serde(default = "default_grok")]
    pub grok: ProviderConfig,
}

impl ProvidersConfig {
    pub fn get(&self, kind: ProviderKind) -> &ProviderConfig {
        match kind {
            ProviderKind::OpenAi => &self.openai,
            ProviderKind::Anthropic => &self.anthropic,
            ProviderKind::Gemini => &self.gemini,
            ProviderKind::Grok => &self.grok,
        }
    }

    pub fn get_mut(&mut self, kind: ProviderKind) -> &mut ProviderConfig {
        match kind {
            ProviderKind::OpenAi => &mut self.openai,
            ProviderKind::Anthropic => &mut self.anthropic,
            ProviderKind::Gemini => &mut self.gemini,
            ProviderKind::Grok => &mut self.grok,
        }
    }
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            openai: default_openai(),
            anthropic: default_anthropic(),
            gemini: default_gemini(),
            grok: default_grok(),
        }
    }
}

/// One provider's configuration.
///
/// The API key is only inspected for presence: a provider without a key is
/// treated as unconfigured and never selected.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ProviderConfig {
    /// API key. `None` (or blank) marks the provider unavailable.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Model for low-complexity messages.
    #[serde(default)]
    pub low_model: Option<String>,

    /// Model for medium-complexity messages.
    #[serde(default)]
    pub medium_model: Option<String>,

    /// Model for high-complexity messages.
    #[serde(default)]
    pub high_model: Option<String>,
}

impl ProviderConfig {
    fn with_slots(low: &str, medium: &str, high: &str) -> Self {
        Self {
            api_key: None,
            low_model: Some(low.to_string()),
            medium_model: Some(medium.to_string()),
            high_model: Some(high.to_string()),
        }
    }

    /// Whether an API key is present.
    pub fn is_available(&self) -> bool {
        self.api_key
            .as_deref()
            .is_some_and(|key| !key.trim().is_empty())
    }

    /// Non-blank tier slots in low, medium, high order.
    pub fn slots(&self) -> [Option<&str>; 3] {
        [&self.low_model, &self.medium_model, &self.high_model].map(|slot| {
            slot.as_deref()
                .map(str::trim)
                .filter(|model| !model.is_empty())
        })
    }
}

fn default_openai() -> ProviderConfig {
    ProviderConfig::with_slots("gpt-4o-mini", "gpt-4o-mini", "gpt-4o")
}

fn default_anthropic() -> ProviderConfig {
    ProviderConfig::with_slots(
        "claude-3-5-haiku-20241022",
        "claude-3-5-sonnet-20241022",
        "claude-sonnet-4-20250514",
    )
}

fn default_gemini() -> ProviderConfig {
    ProviderConfig::with_slots("gemini-1.5-flash", "gemini-1.5-flash", "gemini-1.5-pro")
}

fn default_grok() -> ProviderConfig {
    ProviderConfig::with_slots("grok-beta", "grok-2-latest", "grok-2-latest")
}

/// Classifier thresholds and keyword extensions.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ClassifierConfig {
    /// Messages with at most this many words and a greeting are smalltalk.
    #[serde(default = "default_smalltalk_max_words")]
    pub smalltalk_max_words: usize,

    /// Messages with more words than this are high complexity.
    #[serde(default = "default_high_word_threshold")]
    pub high_word_threshold: usize,

    /// Transactional messages with at most this many words are low complexity.
    #[serde(default = "default_low_word_threshold")]
    pub low_word_threshold: usize,

    /// Keywords appended to the built-in rule tables.
    #[serde(default)]
    pub extra_keywords: ExtraKeywords,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            smalltalk_max_words: default_smalltalk_max_words(),
            high_word_threshold: default_high_word_threshold(),
            low_word_threshold: default_low_word_threshold(),
            extra_keywords: ExtraKeywords::default(),
        }
    }
}

fn default_smalltalk_max_words() -> usize {
    3
}

fn default_high_word_threshold() -> usize {
    40
}

fn default_low_word_threshold() -> usize {
    10
}

/// Extra keywords per built-in rule. Matching is case-insensitive substring.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ExtraKeywords {
    #[serde(default)]
    pub greetings: Vec<String>,
    #[serde(default)]
    pub sales: Vec<String>,
    #[serde(default)]
    pub support: Vec<String>,
    #[serde(default)]
    pub faq: Vec<String>,
    #[serde(default)]
    pub complexity_high: Vec<String>,
    #[serde(default)]
    pub complexity_medium: Vec<String>,
    #[serde(default)]
    pub complexity_low: Vec<String>,
}

/// Price table configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PricingConfig {
    /// Start from the built-in price table. When false only `models` is used.
    #[serde(default = "default_include_builtin")]
    pub include_builtin: bool,

    /// Per-model prices in USD per 1K tokens; replaces built-in entries of the same name.
    #[serde(default)]
    pub models: BTreeMap<String, PriceConfig>,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            include_builtin: default_include_builtin(),
            models: BTreeMap::new(),
        }
    }
}

fn default_include_builtin() -> bool {
    true
}

/// Price of one model in USD per 1K tokens.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PriceConfig {
    pub input_per_1k: Decimal,
    pub output_per_1k: Decimal,
}
