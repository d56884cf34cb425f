// SPDX-FileCopyrightText: 2026 Parley Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Heuristic message complexity classification.
//!
//! Classifies the latest user message into LOW/MEDIUM/HIGH tiers using
//! keyword and length rules. No model pre-call, no network, no latency.

use parley_config::model::ClassifierConfig;
use parley_core::{ConversationContext, ParleyError};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};
use tracing::debug;

use crate::matcher::{fold, word_count};
use crate::rules::{
    COMPLEXITY_HIGH_KEYWORDS, COMPLEXITY_LOW_KEYWORDS, COMPLEXITY_MEDIUM_KEYWORDS, KeywordSet,
    RuleTable,
};

/// Message complexity tiers, ordered `Low < Medium < High`.
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
pub enum ComplexityTier {
    /// Greetings, quick facts, short transactional requests.
    Low,
    /// Explanations and everything unclassified.
    Medium,
    /// Analysis, strategy, professional domains, long messages.
    High,
}

impl ComplexityTier {
    /// Index into low/medium/high slot arrays.
    pub fn index(self) -> usize {
        match self {
            ComplexityTier::Low => 0,
            ComplexityTier::Medium => 1,
            ComplexityTier::High => 2,
        }
    }
}

/// Result of classifying a message's complexity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComplexityResult {
    pub tier: ComplexityTier,
    /// Human-readable reason for the classification.
    pub reason: &'static str,
    /// Keyword that decided the tier, if any.
    pub matched_keyword: Option<String>,
    pub word_count: usize,
}

/// Keyword and length based complexity classifier.
#[derive(Debug, Clone)]
pub struct ComplexityClassifier {
    rules: RuleTable<ComplexityTier>,
    high_word_threshold: usize,
    low_word_threshold: usize,
}

impl Default for ComplexityClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl ComplexityClassifier {
    /// Classifier with the built-in vocabularies and default thresholds.
    pub fn new() -> Self {
        Self::from_config(&ClassifierConfig::default())
    }

    pub fn from_config(config: &ClassifierConfig) -> Self {
        let extra = &config.extra_keywords;

        let mut high = KeywordSet::new("complexity_high", COMPLEXITY_HIGH_KEYWORDS);
        high.extend(&extra.complexity_high);
        let mut medium = KeywordSet::new("complexity_medium", COMPLEXITY_MEDIUM_KEYWORDS);
        medium.extend(&extra.complexity_medium);
        let mut low = KeywordSet::new("complexity_low", COMPLEXITY_LOW_KEYWORDS);
        low.extend(&extra.complexity_low);

        Self {
            rules: RuleTable::new()
                .with_rule(ComplexityTier::High, high)
                .with_rule(ComplexityTier::Medium, medium)
                .with_rule(ComplexityTier::Low, low),
            high_word_threshold: config.high_word_threshold,
            low_word_threshold: config.low_word_threshold,
        }
    }

    pub fn rules(&self) -> &RuleTable<ComplexityTier> {
        &self.rules
    }

    /// Classify the latest user message of `context`.
    pub fn classify(&self, context: &ConversationContext) -> Result<ComplexityResult, ParleyError> {
        let text = context.require_user_message()?;
        let result = self.classify_text(text);
        debug!(
            tier = %result.tier,
            reason = result.reason,
            words = result.word_count,
            "complexity classified"
        );
        Ok(result)
    }

    /// Classify raw text.
    ///
    /// HIGH keywords are checked first, so they override short length.
    pub fn classify_text(&self, text: &str) -> ComplexityResult {
        let folded = fold(text);
        let words = word_count(&folded);
        let result = |tier, reason, keyword: Option<&str>| ComplexityResult {
            tier,
            reason,
            matched_keyword: keyword.map(str::to_string),
            word_count: words,
        };

        if folded.is_empty() {
            return result(ComplexityTier::Low, "empty message", None);
        }

        if let Some(keyword) = self.find(ComplexityTier::High, &folded) {
            return result(ComplexityTier::High, "high complexity keyword", Some(keyword));
        }
        if words > self.high_word_threshold {
            return result(ComplexityTier::High, "long message", None);
        }

        if words <= self.low_word_threshold
            && let Some(keyword) = self.find(ComplexityTier::Low, &folded)
        {
            return result(ComplexityTier::Low, "short simple request", Some(keyword));
        }

        match self.find(ComplexityTier::Medium, &folded) {
            Some(keyword) => result(ComplexityTier::Medium, "explanatory keyword", Some(keyword)),
            None => result(ComplexityTier::Medium, "no strong signal", None),
        }
    }

    fn find(&self, tier: ComplexityTier, folded: &str) -> Option<&str> {
        self.rules.get(tier).and_then(|set| set.find_in(folded))
    }
}
