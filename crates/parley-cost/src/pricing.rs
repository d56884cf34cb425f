// SPDX-FileCopyrightText: 2026 Parley Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Model price table in USD per 1K tokens.
//!
//! Lookup is by exact model id. Unknown models are an error, never priced
//! at zero or at a guessed default.

use std::collections::BTreeMap;

use parley_config::model::PricingConfig;
use parley_core::ParleyError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

/// Price of one model in USD per 1K tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PriceEntry {
    pub input_per_1k: Decimal,
    pub output_per_1k: Decimal,
}

impl PriceEntry {
    pub fn new(input_per_1k: Decimal, output_per_1k: Decimal) -> Self {
        Self {
            input_per_1k,
            output_per_1k,
        }
    }
}

/// Built-in prices (USD per 1K tokens, input/output).
const BUILTIN_PRICES: &[(&str, Decimal, Decimal)] = &[
    // OpenAI
    ("gpt-4o", dec!(0.005), dec!(0.015)),
    ("gpt-4o-mini", dec!(0.00015), dec!(0.0006)),
    ("gpt-4-turbo", dec!(0.01), dec!(0.03)),
    ("gpt-3.5-turbo", dec!(0.0005), dec!(0.0015)),
    // Anthropic
    ("claude-sonnet-4-20250514", dec!(0.003), dec!(0.015)),
    ("claude-3-5-sonnet-20241022", dec!(0.003), dec!(0.015)),
    ("claude-3-5-haiku-20241022", dec!(0.0008), dec!(0.004)),
    ("claude-3-opus-20240229", dec!(0.015), dec!(0.075)),
    // Google Gemini
    ("gemini-1.5-flash", dec!(0.000075), dec!(0.0003)),
    ("gemini-1.5-pro", dec!(0.00125), dec!(0.005)),
    ("gemini-2.0-flash", dec!(0.0001), dec!(0.0004)),
    // xAI Grok
    ("grok-beta", dec!(0.005), dec!(0.015)),
    ("grok-2-latest", dec!(0.005), dec!(0.015)),
];

/// Exact-id price lookup table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PriceTable {
    entries: BTreeMap<String, PriceEntry>,
}

impl PriceTable {
    /// Table with no entries.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The built-in price table.
    pub fn builtin() -> Self {
        Self {
            entries: BUILTIN_PRICES
                .iter()
                .map(|(model, input, output)| (model.to_string(), PriceEntry::new(*input, *output)))
                .collect(),
        }
    }

    /// Replace or add entries.
    pub fn with_overrides<I, S>(mut self, overrides: I) -> Self
    where
        I: IntoIterator<Item = (S, PriceEntry)>,
        S: Into<String>,
    {
        for (model, entry) in overrides {
            self.insert(model, entry);
        }
        self
    }

    /// Built-in table (unless `include_builtin = false`) plus `[pricing.models]`.
    pub fn from_config(config: &PricingConfig) -> Self {
        let base = if config.include_builtin {
            Self::builtin()
        } else {
            Self::empty()
        };
        base.with_overrides(config.models.iter().map(|(model, price)| {
            (
                model.clone(),
                PriceEntry::new(price.input_per_1k, price.output_per_1k),
            )
        }))
    }

    pub fn insert(&mut self, model: impl Into<String>, entry: PriceEntry) {
        self.entries.insert(model.into(), entry);
    }

    pub fn get(&self, model: &str) -> Option<&PriceEntry> {
        self.entries.get(model)
    }

    /// Like [`get`](Self::get), failing with [`ParleyError::UnknownModelPrice`].
    pub fn lookup(&self, model: &str) -> Result<&PriceEntry, ParleyError> {
        self.get(model).ok_or_else(|| ParleyError::UnknownModelPrice {
            model: model.to_string(),
        })
    }

    /// Model ids in lexical order.
    pub fn models(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use parley_config::model::PriceConfig;

    use super::*;

    #[test]
    fn builtin_has_every_model() {
        let table = PriceTable::builtin();
        assert_eq!(table.len(), 13);
        let mini = table.get("gpt-4o-mini").unwrap();
        assert_eq!(mini.input_per_1k, dec!(0.00015));
        assert_eq!(mini.output_per_1k, dec!(0.0006));
        let opus = table.get("claude-3-opus-20240229").unwrap();
        assert_eq!(opus.output_per_1k, dec!(0.075));
    }

    #[test]
    fn lookup_is_exact() {
        let table = PriceTable::builtin();
        assert!(table.lookup("gpt-4o").is_ok());
        assert!(matches!(
            table.lookup("GPT-4o"),
            Err(ParleyError::UnknownModelPrice { model }) if model == "GPT-4o"
        ));
        assert!(table.lookup("gpt-4o-2024").is_err());
    }

    #[test]
    fn overrides_replace_and_extend() {
        let table = PriceTable::builtin().with_overrides([
            ("gpt-4o", PriceEntry::new(dec!(0.0025), dec!(0.01))),
            ("house-model", PriceEntry::new(dec!(0), dec!(0))),
        ]);
        assert_eq!(table.len(), 14);
        assert_eq!(table.get("gpt-4o").unwrap().input_per_1k, dec!(0.0025));
        assert_eq!(table.get("house-model").unwrap().output_per_1k, Decimal::ZERO);
    }

    #[test]
    fn config_without_builtin_uses_only_custom_prices() {
        let mut config = PricingConfig {
            include_builtin: false,
            ..PricingConfig::default()
        };
        config.models.insert(
            "house-model".to_string(),
            PriceConfig {
                input_per_1k: dec!(0.001),
                output_per_1k: dec!(0.002),
            },
        );
        let table = PriceTable::from_config(&config);
        assert_eq!(table.models().collect::<Vec<_>>(), vec!["house-model"]);

        config.include_builtin = true;
        assert_eq!(PriceTable::from_config(&config).len(), 14);
    }
}
