// SPDX-FileCopyrightText: 2026 Parley Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde attributes,
//! such as threshold ordering, ranking consistency, and non-negative prices.

use std::collections::HashMap;

use parley_core::ProviderKind;
use rust_decimal::Decimal;
use strum::IntoEnumIterator;

use crate::diagnostic::ConfigError;
use crate::model::ParleyConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &ParleyConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    let level = config.log.level.trim().to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ConfigError::validation(format!(
            "log.level `{}` must be one of {}",
            config.log.level,
            LOG_LEVELS.join(", ")
        )));
    }

    validate_routing(config, &mut errors);
    validate_classifier(config, &mut errors);
    validate_pricing(config, &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_routing(config: &ParleyConfig, errors: &mut Vec<ConfigError>) {
    let routing = &config.routing;

    if routing.default_model.trim().is_empty() {
        errors.push(ConfigError::validation(
            "routing.default_model must not be empty",
        ));
    }

    match routing.force_model.as_deref() {
        Some(model) if model.trim().is_empty() => errors.push(ConfigError::validation(
            "routing.force_model must not be empty when set",
        )),
        None if routing.force_provider.is_some() => errors.push(ConfigError::validation(
            "routing.force_provider requires routing.force_model",
        )),
        _ => {}
    }

    let mut ranks: HashMap<(ProviderKind, &str), usize> = HashMap::new();
    for (i, entry) in routing.ranking.iter().enumerate() {
        let model = entry.model.trim();
        if model.is_empty() {
            errors.push(ConfigError::validation(format!(
                "routing.ranking[{i}].model must not be empty"
            )));
            continue;
        }
        if ranks.insert((entry.provider, model), i).is_some() {
            errors.push(ConfigError::validation(format!(
                "duplicate model `{}/{model}` in routing.ranking",
                entry.provider
            )));
        }
    }

    // Tier slots that appear in the ranking must not get cheaper as the tier rises.
    for kind in ProviderKind::iter() {
        let ranked: Vec<(usize, usize)> = config
            .providers
            .get(kind)
            .slots()
            .iter()
            .enumerate()
            .filter_map(|(slot, model)| {
                model.and_then(|m| ranks.get(&(kind, m)).map(|rank| (slot, *rank)))
            })
            .collect();
        for pair in ranked.windows(2) {
            let ((lower_slot, lower_rank), (upper_slot, upper_rank)) = (pair[0], pair[1]);
            if upper_rank < lower_rank {
                errors.push(ConfigError::validation(format!(
                    "providers.{kind}.{}_model ranks below providers.{kind}.{}_model in routing.ranking",
                    SLOT_NAMES[upper_slot], SLOT_NAMES[lower_slot]
                )));
            }
        }
    }
}

const SLOT_NAMES: [&str; 3] = ["low", "medium", "high"];

fn validate_classifier(config: &ParleyConfig, errors: &mut Vec<ConfigError>) {
    let classifier = &config.classifier;

    if classifier.low_word_threshold >= classifier.high_word_threshold {
        errors.push(ConfigError::validation(format!(
            "classifier.low_word_threshold ({}) must be below classifier.high_word_threshold ({})",
            classifier.low_word_threshold, classifier.high_word_threshold
        )));
    }

    let extra = &classifier.extra_keywords;
    let lists = [
        ("greetings", &extra.greetings),
        ("sales", &extra.sales),
        ("support", &extra.support),
        ("faq", &extra.faq),
        ("complexity_high", &extra.complexity_high),
        ("complexity_medium", &extra.complexity_medium),
        ("complexity_low", &extra.complexity_low),
    ];
    for (name, keywords) in lists {
        if keywords.iter().any(|k| k.trim().is_empty()) {
            errors.push(ConfigError::validation(format!(
                "classifier.extra_keywords.{name} must not contain blank keywords"
            )));
        }
    }
}

fn validate_pricing(config: &ParleyConfig, errors: &mut Vec<ConfigError>) {
    for (model, price) in &config.pricing.models {
        if model.trim().is_empty() {
            errors.push(ConfigError::validation(
                "pricing.models keys must not be empty",
            ));
        }
        if price.input_per_1k < Decimal::ZERO || price.output_per_1k < Decimal::ZERO {
            errors.push(ConfigError::validation(format!(
                "pricing.models.{model} prices must be non-negative"
            )));
        }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;
    use crate::model::{ModelRef, PriceConfig};

    fn has_error(errors: &[ConfigError], needle: &str) -> bool {
        errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains(needle)))
    }

    #[test]
    fn default_config_validates() {
        let config = ParleyConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn empty_default_model_fails_validation() {
        let mut config = ParleyConfig::default();
        config.routing.default_model = "  ".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(has_error(&errors, "default_model"));
    }

    #[test]
    fn inverted_thresholds_fail_validation() {
        let mut config = ParleyConfig::default();
        config.classifier.low_word_threshold = 50;
        let errors = validate_config(&config).unwrap_err();
        assert!(has_error(&errors, "low_word_threshold"));
    }

    #[test]
    fn unknown_log_level_fails_validation() {
        let mut config = ParleyConfig::default();
        config.log.level = "verbose".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(has_error(&errors, "log.level"));
    }

    #[test]
    fn force_provider_without_model_fails() {
        let mut config = ParleyConfig::default();
        config.routing.force_provider = Some(ProviderKind::Grok);
        let errors = validate_config(&config).unwrap_err();
        assert!(has_error(&errors, "force_provider requires"));
    }

    #[test]
    fn duplicate_ranking_entry_fails() {
        let mut config = ParleyConfig::default();
        config
            .routing
            .ranking
            .push(ModelRef::new(ProviderKind::OpenAi, "gpt-4o"));
        let errors = validate_config(&config).unwrap_err();
        assert!(has_error(&errors, "duplicate model `openai/gpt-4o`"));
    }

    #[test]
    fn slot_ranked_below_lower_tier_fails() {
        let mut config = ParleyConfig::default();
        config.providers.openai.high_model = Some("gemini-1.5-flash".to_string());
        // gemini-1.5-flash is ranked for gemini, not openai, so it is ignored.
        assert!(validate_config(&config).is_ok());

        config.providers.openai.low_model = Some("gpt-4o".to_string());
        config.providers.openai.high_model = Some("gpt-4o-mini".to_string());
        let errors = validate_config(&config).unwrap_err();
        assert!(has_error(
            &errors,
            "providers.openai.medium_model ranks below providers.openai.low_model"
        ));
    }

    #[test]
    fn collects_all_errors_without_failing_fast() {
        let mut config = ParleyConfig::default();
        config.routing.default_model = String::new();
        config.classifier.low_word_threshold = 100;
        config.pricing.models.insert(
            "gpt-4o".to_string(),
            PriceConfig {
                input_per_1k: dec!(-0.1),
                output_per_1k: dec!(0.1),
            },
        );
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(has_error(&errors, "pricing.models.gpt-4o"));
    }

    #[test]
    fn blank_extra_keyword_fails() {
        let mut config = ParleyConfig::default();
        config.classifier.extra_keywords.sales = vec!["licencia anual".into(), " ".into()];
        let errors = validate_config(&config).unwrap_err();
        assert!(has_error(&errors, "extra_keywords.sales"));
    }
}
