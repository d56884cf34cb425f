// SPDX-FileCopyrightText: 2026 Parley Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the Parley configuration system.

use parley_config::diagnostic::{ConfigError, suggest_key};
use parley_config::model::ParleyConfig;
use parley_config::{load_and_validate_str, load_config_from_str};
use parley_core::{ProviderKind, RoutingStrategy};
use rust_decimal_macros::dec;

/// Valid TOML with all known sections deserializes successfully.
#[test]
fn valid_toml_deserializes_into_parley_config() {
    let toml = r#"
[log]
level = "debug"

[routing]
strategy = "cost_optimized"
preferred_provider = "anthropic"
default_provider = "gemini"
default_model = "gemini-1.5-flash"

[providers.openai]
api_key = "sk-123"
high_model = "gpt-4-turbo"

[providers.grok]
api_key = "xai-123"

[classifier]
smalltalk_max_words = 4
high_word_threshold = 60
low_word_threshold = 8

[classifier.extra_keywords]
sales = ["licencia anual"]
complexity_high = ["due diligence"]

[pricing]
include_builtin = false

[pricing.models."house-model"]
input_per_1k = 0.001
output_per_1k = 0.002
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.log.level, "debug");
    assert_eq!(config.routing.strategy, RoutingStrategy::CostOptimized);
    assert_eq!(config.routing.preferred_provider, ProviderKind::Anthropic);
    assert_eq!(config.routing.default_provider, ProviderKind::Gemini);
    assert_eq!(config.routing.default_model, "gemini-1.5-flash");
    assert!(config.providers.openai.is_available());
    assert_eq!(
        config.providers.openai.high_model.as_deref(),
        Some("gpt-4-turbo")
    );
    // Untouched slots keep their defaults.
    assert_eq!(
        config.providers.openai.low_model.as_deref(),
        Some("gpt-4o-mini")
    );
    assert!(config.providers.grok.is_available());
    assert!(!config.providers.gemini.is_available());
    assert_eq!(config.classifier.smalltalk_max_words, 4);
    assert_eq!(config.classifier.high_word_threshold, 60);
    assert_eq!(config.classifier.low_word_threshold, 8);
    assert_eq!(config.classifier.extra_keywords.sales, vec!["licencia anual"]);
    assert!(!config.pricing.include_builtin);
    let house = &config.pricing.models["house-model"];
    assert_eq!(house.input_per_1k, dec!(0.001));
    assert_eq!(house.output_per_1k, dec!(0.002));
}

/// Missing optional sections use defaults without error.
#[test]
fn missing_optional_sections_use_defaults() {
    let config = load_config_from_str("").expect("empty TOML should use defaults");

    assert_eq!(config.log.level, "info");
    assert_eq!(config.routing.strategy, RoutingStrategy::Balanced);
    assert_eq!(config.routing.preferred_provider, ProviderKind::OpenAi);
    assert_eq!(config.routing.default_model, "gpt-4o-mini");
    assert!(config.routing.force_model.is_none());
    assert_eq!(config.routing.ranking.len(), 9);
    assert!(!config.providers.openai.is_available());
    assert_eq!(config.classifier.smalltalk_max_words, 3);
    assert_eq!(config.classifier.high_word_threshold, 40);
    assert_eq!(config.classifier.low_word_threshold, 10);
    assert!(config.pricing.include_builtin);
    assert!(config.pricing.models.is_empty());
}

/// Unknown field in [routing] produces an UnknownField error.
#[test]
fn unknown_field_in_routing_produces_error() {
    let toml = r#"
[routing]
stratgy = "balanced"
"#;

    let err = load_config_from_str(toml).expect_err("should reject unknown field");
    let err_str = format!("{err}");
    assert!(
        err_str.contains("unknown field") || err_str.contains("stratgy"),
        "error should mention unknown field or the bad key, got: {err_str}"
    );
}

/// Unknown top-level sections are rejected too.
#[test]
fn deny_unknown_fields_at_top_level() {
    let toml = r#"
[budget]
daily_usd = 5.0
"#;
    assert!(load_config_from_str(toml).is_err());
}

#[test]
fn diagnostic_stratgy_suggests_strategy() {
    let toml = r#"
[routing]
stratgy = "balanced"
"#;
    let errors = load_and_validate_str(toml).expect_err("should fail");
    assert!(errors.iter().any(|e| matches!(
        e,
        ConfigError::UnknownKey { key, suggestion, valid_keys, .. } if {
            key == "stratgy"
                && suggestion.as_deref() == Some("strategy")
                && valid_keys.contains("default_model")
        }
    )));
}

#[test]
fn diagnostic_no_suggestion_for_distant_typo() {
    let valid = &["api_key", "low_model", "medium_model", "high_model"];
    assert_eq!(suggest_key("xyzzy", valid), None);
    assert_eq!(suggest_key("api_kye", valid), Some("api_key".to_string()));
}

#[test]
fn diagnostic_unknown_strategy_lists_variants() {
    let toml = r#"
[routing]
strategy = "cheapest"
"#;
    let errors = load_and_validate_str(toml).expect_err("should fail");
    assert!(errors.iter().any(|e| matches!(
        e,
        ConfigError::InvalidValue { expected, .. } if expected.contains("cost_optimized")
    )));
}

#[test]
fn diagnostic_invalid_type_message() {
    let toml = r#"
[classifier]
high_word_threshold = "many"
"#;
    let errors = load_and_validate_str(toml).expect_err("should fail");
    assert!(
        errors
            .iter()
            .any(|e| matches!(e, ConfigError::InvalidValue { .. })),
        "expected InvalidValue, got: {errors:?}"
    );
}

/// ConfigError can be rendered using miette's graphical handler.
#[test]
fn config_error_renders_with_miette() {
    use miette::{GraphicalReportHandler, NamedSource, SourceSpan};

    let src = "[routing]\nstratgy = \"balanced\"\n";
    let error = ConfigError::UnknownKey {
        key: "stratgy".to_string(),
        suggestion: Some("strategy".to_string()),
        valid_keys: "strategy, default_model".to_string(),
        span: Some(SourceSpan::new(10.into(), 7)),
        src: Some(NamedSource::new("parley.toml", src.to_string())),
    };

    let mut buf = String::new();
    GraphicalReportHandler::new()
        .render_report(&mut buf, &error)
        .expect("render should succeed");
    assert!(buf.contains("stratgy"));
    assert!(buf.contains("strategy"));
}

#[test]
fn load_and_validate_defaults() {
    let config = load_and_validate_str("").expect("defaults should validate");
    assert_eq!(config.routing.default_provider, ProviderKind::OpenAi);
}

#[test]
fn validation_catches_negative_price() {
    let toml = r#"
[pricing.models."gpt-4o"]
input_per_1k = -0.005
output_per_1k = 0.015
"#;
    let errors = load_and_validate_str(toml).expect_err("should fail validation");
    assert!(errors.iter().any(|e| matches!(
        e,
        ConfigError::Validation { message } if message.contains("non-negative")
    )));
}

#[test]
fn validation_catches_inverted_thresholds() {
    let toml = r#"
[classifier]
low_word_threshold = 40
high_word_threshold = 20
"#;
    let errors = load_and_validate_str(toml).expect_err("should fail validation");
    assert_eq!(errors.len(), 1);
}

#[test]
fn force_model_with_provider_validates() {
    let toml = r#"
[routing]
force_model = "claude-3-opus-20240229"
force_provider = "anthropic"
"#;
    let config = load_and_validate_str(toml).expect("should validate");
    assert_eq!(
        config.routing.force_model.as_deref(),
        Some("claude-3-opus-20240229")
    );
    assert_eq!(config.routing.force_provider, Some(ProviderKind::Anthropic));
}

/// Serialized defaults use the wire names of each section.
#[test]
fn serialized_defaults_are_sensible() {
    let defaults = ParleyConfig::default();
    let json = serde_json::to_value(&defaults).expect("defaults serialize");
    assert_eq!(json["routing"]["strategy"], "balanced");
    assert_eq!(json["providers"]["anthropic"]["low_model"], "claude-3-5-haiku-20241022");
    assert_eq!(json["routing"]["ranking"][0]["provider"], "gemini");
}
