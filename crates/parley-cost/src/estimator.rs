// SPDX-FileCopyrightText: 2026 Parley Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Cost estimation from token counts.

use parley_config::model::PricingConfig;
use parley_core::{ParleyError, TokenUsage};
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use tracing::debug;

use crate::pricing::{PriceEntry, PriceTable};

const TOKENS_PER_UNIT: Decimal = dec!(1000);

/// Amounts below this are formatted with six decimals.
const SMALL_AMOUNT: Decimal = dec!(0.01);

/// Prices token counts against a [`PriceTable`].
#[derive(Debug, Clone, Default)]
pub struct CostEstimator {
    prices: PriceTable,
}

impl CostEstimator {
    pub fn new(prices: PriceTable) -> Self {
        Self { prices }
    }

    /// Estimator over the built-in price table.
    pub fn builtin() -> Self {
        Self::new(PriceTable::builtin())
    }

    pub fn from_config(config: &PricingConfig) -> Self {
        Self::new(PriceTable::from_config(config))
    }

    pub fn prices(&self) -> &PriceTable {
        &self.prices
    }

    /// Cost in USD: `input/1000 * input_per_1k + output/1000 * output_per_1k`.
    pub fn calculate(
        &self,
        model: &str,
        input_tokens: u64,
        output_tokens: u64,
    ) -> Result<Decimal, ParleyError> {
        let price = self.prices.lookup(model)?;
        let cost = cost_of(price, input_tokens, output_tokens);
        debug!(model, input_tokens, output_tokens, cost = %cost, "cost calculated");
        Ok(cost)
    }

    pub fn calculate_usage(&self, model: &str, usage: &TokenUsage) -> Result<Decimal, ParleyError> {
        self.calculate(
            model,
            u64::from(usage.input_tokens),
            u64::from(usage.output_tokens),
        )
    }

    /// Cost when only a total is known, assuming 30% input and 70% output.
    ///
    /// Both shares are truncated, so up to one token of the total may go unpriced.
    pub fn calculate_total(&self, model: &str, total_tokens: u64) -> Result<Decimal, ParleyError> {
        let (input, output) = split_total(total_tokens);
        self.calculate(model, input, output)
    }

    /// Cost of the same token counts on each model, in the order given.
    pub fn compare_models<S: AsRef<str>>(
        &self,
        models: &[S],
        input_tokens: u64,
        output_tokens: u64,
    ) -> Vec<(String, Result<Decimal, ParleyError>)> {
        models
            .iter()
            .map(|model| {
                let model = model.as_ref();
                (
                    model.to_string(),
                    self.calculate(model, input_tokens, output_tokens),
                )
            })
            .collect()
    }
}

fn cost_of(price: &PriceEntry, input_tokens: u64, output_tokens: u64) -> Decimal {
    Decimal::from(input_tokens) / TOKENS_PER_UNIT * price.input_per_1k
        + Decimal::from(output_tokens) / TOKENS_PER_UNIT * price.output_per_1k
}

/// 30% input, 70% output, each rounded down. Never overflows.
fn split_total(total_tokens: u64) -> (u64, u64) {
    let share = |percent: u64| total_tokens / 10 * percent + total_tokens % 10 * percent / 10;
    (share(3), share(7))
}

/// Format a USD amount: six decimals below $0.01, two otherwise.
pub fn format_cost(amount: Decimal) -> String {
    if amount < SMALL_AMOUNT {
        let rounded = amount.round_dp_with_strategy(6, RoundingStrategy::MidpointAwayFromZero);
        format!("${rounded:.6}")
    } else {
        let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        format!("${rounded:.2}")
    }
}
