// SPDX-FileCopyrightText: 2026 Parley Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Rule-based agent classification.
//!
//! Picks which specialized agent should answer a message using keyword rules
//! only: no model call, no network, fully deterministic.

use parley_config::model::ClassifierConfig;
use parley_core::{ConversationContext, ParleyError};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};
use tracing::debug;

use crate::matcher::{fold, word_count};
use crate::rules::{
    FAQ_KEYWORDS, GREETING_KEYWORDS, KeywordSet, RuleTable, SALES_KEYWORDS, SMALLTALK_PHRASES,
    SUPPORT_KEYWORDS,
};

/// Phrases longer than this are never whole-message smalltalk.
const MAX_PHRASE_WORDS: usize = 4;

/// The agent that should handle a message.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AgentKind {
    /// Greetings, thanks, farewells and emoji-only messages.
    Smalltalk,
    Sales,
    Support,
    Faq,
    /// Default when no rule matches.
    General,
}

/// Relative handling priority of an agent kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AgentPriority {
    Low,
    Medium,
    High,
}

/// Static description of an agent kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AgentInfo {
    pub description: &'static str,
    pub priority: AgentPriority,
    pub typical_intents: &'static [&'static str],
}

impl AgentKind {
    pub fn info(&self) -> AgentInfo {
        match self {
            AgentKind::Sales => AgentInfo {
                description: "Handles pricing, plans, and purchase inquiries",
                priority: AgentPriority::High,
                typical_intents: &["pricing", "purchase", "upgrade"],
            },
            AgentKind::Support => AgentInfo {
                description: "Handles technical issues and help requests",
                priority: AgentPriority::High,
                typical_intents: &["error", "help", "configuration"],
            },
            AgentKind::Faq => AgentInfo {
                description: "Handles frequently asked questions",
                priority: AgentPriority::Medium,
                typical_intents: &["information", "how-to", "capabilities"],
            },
            AgentKind::Smalltalk => AgentInfo {
                description: "Handles greetings and casual conversation",
                priority: AgentPriority::Low,
                typical_intents: &["greeting", "farewell", "acknowledgment"],
            },
            AgentKind::General => AgentInfo {
                description: "Default handler for unclassified queries",
                priority: AgentPriority::Medium,
                typical_intents: &["general", "unclassified"],
            },
        }
    }
}

/// Why a message was assigned its agent kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgentMatch {
    pub kind: AgentKind,
    pub reason: &'static str,
    /// Keyword or phrase that triggered the rule, if any.
    pub matched_keyword: Option<String>,
}

impl AgentMatch {
    fn new(kind: AgentKind, reason: &'static str, keyword: Option<&str>) -> Self {
        Self {
            kind,
            reason,
            matched_keyword: keyword.map(str::to_string),
        }
    }
}

/// Deterministic keyword classifier over the latest user message.
///
/// Rules are evaluated in a fixed order and the first match wins:
/// SMALLTALK, SALES, SUPPORT, FAQ, then GENERAL.
#[derive(Debug, Clone)]
pub struct AgentClassifier {
    /// SALES, SUPPORT and FAQ in priority order.
    rules: RuleTable<AgentKind>,
    greetings: KeywordSet,
    phrases: KeywordSet,
    smalltalk_max_words: usize,
}

impl Default for AgentClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl AgentClassifier {
    /// Classifier with the built-in vocabularies and default thresholds.
    pub fn new() -> Self {
        Self::from_config(&ClassifierConfig::default())
    }

    /// Built-in vocabularies extended with `[classifier.extra_keywords]`.
    pub fn from_config(config: &ClassifierConfig) -> Self {
        let extra = &config.extra_keywords;

        let mut sales = KeywordSet::new("sales", SALES_KEYWORDS);
        sales.extend(&extra.sales);
        let mut support = KeywordSet::new("support", SUPPORT_KEYWORDS);
        support.extend(&extra.support);
        let mut faq = KeywordSet::new("faq", FAQ_KEYWORDS);
        faq.extend(&extra.faq);
        let mut greetings = KeywordSet::new("greetings", GREETING_KEYWORDS);
        greetings.extend(&extra.greetings);

        Self {
            rules: RuleTable::new()
                .with_rule(AgentKind::Sales, sales)
                .with_rule(AgentKind::Support, support)
                .with_rule(AgentKind::Faq, faq),
            greetings,
            phrases: KeywordSet::new("smalltalk_phrases", SMALLTALK_PHRASES),
            smalltalk_max_words: config.smalltalk_max_words,
        }
    }

    pub fn rules(&self) -> &RuleTable<AgentKind> {
        &self.rules
    }

    /// Agent kind for the latest user message of `context`.
    pub fn select_agent_kind(&self, context: &ConversationContext) -> Result<AgentKind, ParleyError> {
        let text = context.require_user_message()?;
        let outcome = self.explain(text);
        debug!(
            kind = %outcome.kind,
            reason = outcome.reason,
            keyword = outcome.matched_keyword.as_deref().unwrap_or("-"),
            "agent classified"
        );
        Ok(outcome.kind)
    }

    /// Like [`select_agent_kind`](Self::select_agent_kind), restricted to `allowed` kinds.
    ///
    /// A suggestion outside a non-empty `allowed` set becomes GENERAL. An empty
    /// set means no restriction.
    pub fn select_agent_kind_gated(
        &self,
        context: &ConversationContext,
        allowed: &[AgentKind],
    ) -> Result<AgentKind, ParleyError> {
        let suggested = self.select_agent_kind(context)?;
        if allowed.is_empty() || allowed.contains(&suggested) {
            return Ok(suggested);
        }
        debug!(suggested = %suggested, "agent kind not allowed, using GENERAL");
        Ok(AgentKind::General)
    }

    /// Agent kind for raw text.
    pub fn classify_text(&self, text: &str) -> AgentKind {
        self.explain(text).kind
    }

    /// Agent kind for raw text along with the rule and keyword that decided it.
    pub fn explain(&self, text: &str) -> AgentMatch {
        let folded = fold(text);
        let signal = self.rules.first_match(&folded);

        if let Some(outcome) = self.smalltalk(&folded, signal.is_some()) {
            return outcome;
        }

        match signal {
            Some((kind, keyword)) => AgentMatch::new(kind, rule_reason(kind), Some(keyword)),
            None => AgentMatch::new(AgentKind::General, "no rule matched", None),
        }
    }

    fn smalltalk(&self, folded: &str, has_signal: bool) -> Option<AgentMatch> {
        let bare = folded.trim_matches(|c: char| !c.is_alphanumeric());
        if !bare.is_empty()
            && word_count(bare) <= MAX_PHRASE_WORDS
            && self.phrases.contains_exact(bare)
        {
            return Some(AgentMatch::new(
                AgentKind::Smalltalk,
                "smalltalk phrase",
                Some(bare),
            ));
        }

        if has_signal {
            return None;
        }

        let visible = folded.chars().filter(|c| !c.is_whitespace()).count();
        let alphanumeric = folded.chars().filter(|c| c.is_alphanumeric()).count();
        if visible > 0 && alphanumeric * 2 < visible {
            return Some(AgentMatch::new(
                AgentKind::Smalltalk,
                "mostly punctuation or emoji",
                None,
            ));
        }

        if word_count(folded) <= self.smalltalk_max_words
            && let Some(greeting) = self.greetings.find_in(folded)
        {
            return Some(AgentMatch::new(
                AgentKind::Smalltalk,
                "short greeting",
                Some(greeting),
            ));
        }

        None
    }
}

fn rule_reason(kind: AgentKind) -> &'static str {
    match kind {
        AgentKind::Sales => "sales keyword",
        AgentKind::Support => "support keyword",
        AgentKind::Faq => "faq keyword",
        AgentKind::Smalltalk | AgentKind::General => "no rule matched",
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use parley_core::Message;
    use strum::IntoEnumIterator;

    use super::*;

    fn classify(text: &str) -> AgentKind {
        AgentClassifier::new().classify_text(text)
    }

    #[test]
    fn greetings_and_farewells_are_smalltalk() {
        for text in ["Hola", "¡Buenos días!", "gracias", "ok!", "Hasta luego", "See you"] {
            assert_eq!(classify(text), AgentKind::Smalltalk, "{text}");
        }
    }

    #[test]
    fn emoji_only_is_smalltalk() {
        assert_eq!(classify("👍"), AgentKind::Smalltalk);
        assert_eq!(classify("🙂🙂 !!"), AgentKind::Smalltalk);
    }

    #[test]
    fn short_greeting_with_name_is_smalltalk() {
        let outcome = AgentClassifier::new().explain("hola Marta!");
        assert_eq!(outcome.kind, AgentKind::Smalltalk);
        assert_eq!(outcome.reason, "short greeting");
        assert_eq!(outcome.matched_keyword.as_deref(), Some("hola"));
    }

    #[test]
    fn greeting_with_price_question_is_sales() {
        assert_eq!(classify("Hola, cuál es el precio?"), AgentKind::Sales);
        assert_eq!(classify("hi, pricing?"), AgentKind::Sales);
    }

    #[test]
    fn sales_vocabulary() {
        assert_eq!(classify("Quiero contratar el plan Pro"), AgentKind::Sales);
        assert_eq!(classify("Do you offer a free trial?"), AgentKind::Sales);
        assert_eq!(classify("¿Aceptan transferencia bancaria?"), AgentKind::Sales);
    }

    #[test]
    fn bare_cuesta_is_sales() {
        assert_eq!(classify("¿Esto cuesta mucho al mes?"), AgentKind::Sales);
        assert_eq!(
            classify("Lo que cuesta el servicio me interesa saberlo"),
            AgentKind::Sales
        );
    }

    #[test]
    fn feature_and_payment_words_are_sales() {
        assert_eq!(classify("¿Tiene integración con WhatsApp?"), AgentKind::Sales);
        assert_eq!(classify("Can I pay by card?"), AgentKind::Sales);
        assert_eq!(classify("Starter vs Pro"), AgentKind::Sales);
    }

    #[test]
    fn support_vocabulary() {
        assert_eq!(classify("El widget no funciona en mi sitio"), AgentKind::Support);
        assert_eq!(classify("I forgot my password"), AgentKind::Support);
    }

    #[test]
    fn faq_vocabulary() {
        assert_eq!(classify("¿Qué es un webhook?"), AgentKind::Support);
        assert_eq!(classify("¿Qué es Parley?"), AgentKind::Faq);
        assert_eq!(classify("What are your opening hours?"), AgentKind::Faq);
    }

    #[test]
    fn unmatched_text_is_general() {
        let outcome = AgentClassifier::new().explain("Me gustan los gatos grises");
        assert_eq!(outcome.kind, AgentKind::General);
        assert!(outcome.matched_keyword.is_none());
    }

    #[test]
    fn empty_text_is_general() {
        assert_eq!(classify(""), AgentKind::General);
        assert_eq!(classify("   "), AgentKind::General);
    }

    #[test]
    fn sales_beats_support_and_faq() {
        let outcome = AgentClassifier::new().explain("error al pagar la factura");
        assert_eq!(outcome.kind, AgentKind::Sales);
        assert_eq!(outcome.reason, "sales keyword");
    }

    #[test]
    fn extra_keywords_extend_rules() {
        let mut config = ClassifierConfig::default();
        config.extra_keywords.faq = vec!["Menú del día".to_string()];
        config.extra_keywords.greetings = vec!["aloha".to_string()];
        let classifier = AgentClassifier::from_config(&config);
        assert_eq!(classifier.classify_text("¿Cuál es el menú del día?"), AgentKind::Faq);
        assert_eq!(classifier.classify_text("aloha amigos"), AgentKind::Smalltalk);
    }

    #[test]
    fn uses_latest_user_message() {
        let ctx = ConversationContext::new(vec![
            Message::system("You are a sales assistant"),
            Message::user("¿Cuánto cuesta?"),
            Message::assistant("$10 al mes"),
            Message::user("gracias"),
        ]);
        let kind = AgentClassifier::new().select_agent_kind(&ctx).unwrap();
        assert_eq!(kind, AgentKind::Smalltalk);
    }

    #[test]
    fn missing_user_message_errors() {
        let ctx = ConversationContext::new(vec![Message::system("only system")]);
        assert!(matches!(
            AgentClassifier::new().select_agent_kind(&ctx),
            Err(ParleyError::NoUserMessage)
        ));
    }

    #[test]
    fn gating_falls_back_to_general() {
        let classifier = AgentClassifier::new();
        let ctx = ConversationContext::from_user("Quiero comprar una licencia");
        let gated = classifier
            .select_agent_kind_gated(&ctx, &[AgentKind::Faq, AgentKind::General])
            .unwrap();
        assert_eq!(gated, AgentKind::General);
        let allowed = classifier
            .select_agent_kind_gated(&ctx, &[AgentKind::Sales])
            .unwrap();
        assert_eq!(allowed, AgentKind::Sales);
        let ungated = classifier.select_agent_kind_gated(&ctx, &[]).unwrap();
        assert_eq!(ungated, AgentKind::Sales);
    }

    #[test]
    fn kinds_render_screaming_case() {
        assert_eq!(AgentKind::Smalltalk.to_string(), "SMALLTALK");
        assert_eq!(AgentKind::from_str("faq").unwrap(), AgentKind::Faq);
        assert_eq!(
            serde_json::to_string(&AgentKind::General).unwrap(),
            "\"GENERAL\""
        );
    }

    #[test]
    fn every_kind_has_info() {
        for kind in AgentKind::iter() {
            let info = kind.info();
            assert!(!info.description.is_empty());
            assert!(!info.typical_intents.is_empty());
        }
        assert_eq!(AgentKind::Sales.info().priority, AgentPriority::High);
        assert_eq!(AgentKind::Smalltalk.info().priority.to_string(), "low");
    }
}
