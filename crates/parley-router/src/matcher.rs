// SPDX-FileCopyrightText: 2026 Parley Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Case-insensitive substring matching against keyword sets.
//!
//! Matching is deliberately permissive: no tokenization, no stemming and no
//! word boundaries, so `"hi"` matches inside `"this"`.

use crate::rules::{KeywordSet, RuleTable};

/// Trim and lower-case `text`.
pub fn fold(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Whether any keyword of `set` occurs in `text`.
pub fn matches(text: &str, set: &KeywordSet) -> bool {
    first_match(text, set).is_some()
}

/// The first keyword of `set` (in declaration order) that occurs in `text`.
pub fn first_match<'a>(text: &str, set: &'a KeywordSet) -> Option<&'a str> {
    set.find_in(&fold(text))
}

/// Every category of `table` whose keyword set matches `text`, in table order.
pub fn matching_categories<C: Copy>(text: &str, table: &RuleTable<C>) -> Vec<C> {
    let folded = fold(text);
    table
        .rules()
        .iter()
        .filter(|rule| rule.keywords.find_in(&folded).is_some())
        .map(|rule| rule.category)
        .collect()
}

/// Number of whitespace-separated words.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(keywords: &[&str]) -> KeywordSet {
        KeywordSet::new("test", keywords.iter().copied())
    }

    #[test]
    fn fold_trims_and_lowercases() {
        assert_eq!(fold("  ¿Cuánto CUESTA?  "), "¿cuánto cuesta?");
    }

    #[test]
    fn matches_is_case_insensitive_substring() {
        let prices = set(&["precio", "how much"]);
        assert!(matches("PRECIO del plan", &prices));
        assert!(matches("So, How Much is it?", &prices));
        assert!(!matches("nada que ver", &prices));
    }

    #[test]
    fn matches_inside_words() {
        let greetings = set(&["hi"]);
        assert!(matches("this is fine", &greetings));
    }

    #[test]
    fn first_match_follows_declaration_order() {
        let keywords = set(&["cost", "costo"]);
        assert_eq!(first_match("el costo total", &keywords), Some("cost"));
        assert_eq!(first_match("gratis", &keywords), None);
    }

    #[test]
    fn matching_categories_keeps_table_order() {
        let table = RuleTable::new()
            .with_rule('a', set(&["alpha"]))
            .with_rule('b', set(&["beta"]))
            .with_rule('c', set(&["gamma"]));
        assert_eq!(matching_categories("gamma then alpha", &table), vec!['a', 'c']);
        assert!(matching_categories("delta", &table).is_empty());
    }

    #[test]
    fn matching_categories_needs_only_copy() {
        #[derive(Debug, Clone, Copy)]
        enum Topic {
            Billing,
            Shipping,
        }

        let table = RuleTable::new()
            .with_rule(Topic::Billing, set(&["invoice"]))
            .with_rule(Topic::Shipping, set(&["parcel"]));
        let hits = matching_categories("Where is the parcel?", &table);
        assert!(matches!(hits.as_slice(), [Topic::Shipping]));
    }

    #[test]
    fn word_count_splits_on_any_whitespace() {
        assert_eq!(word_count(""), 0);
        assert_eq!(word_count("   "), 0);
        assert_eq!(word_count("uno\tdos\n tres"), 3);
    }
}
