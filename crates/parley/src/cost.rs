// SPDX-FileCopyrightText: 2026 Parley Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `parley cost` and `parley compare` command implementations.

use parley_config::model::ParleyConfig;
use parley_core::ParleyError;
use parley_cost::{CostEstimator, format_cost};
use rust_decimal::Decimal;

use crate::CostArgs;

/// Run the `parley cost` command.
///
/// Token counts come either as an explicit input/output pair or as a total
/// that is split 30/70.
pub fn run_cost(config: &ParleyConfig, args: &CostArgs) -> Result<(), ParleyError> {
    let estimator = CostEstimator::from_config(&config.pricing);

    let (cost, tokens) = match (args.input, args.output, args.total) {
        (Some(input), Some(output), None) => (
            estimator.calculate(&args.model, input, output)?,
            format!("{input} input + {output} output tokens"),
        ),
        (None, None, Some(total)) => (
            estimator.calculate_total(&args.model, total)?,
            format!("{total} tokens, 30/70 split"),
        ),
        _ => {
            return Err(ParleyError::Internal(
                "pass --input and --output, or --total".to_string(),
            ));
        }
    };

    println!("{}: {} ({tokens})", args.model, format_cost(cost));
    Ok(())
}

/// Run the `parley compare` command.
///
/// With no models named, compares every model in the price table.
pub fn run_compare(
    config: &ParleyConfig,
    models: &[String],
    input: u64,
    output: u64,
) -> Result<(), ParleyError> {
    let estimator = CostEstimator::from_config(&config.pricing);
    let models: Vec<String> = if models.is_empty() {
        estimator.prices().models().map(str::to_string).collect()
    } else {
        models.to_vec()
    };

    println!("{input} input + {output} output tokens");
    for line in compare_lines(&estimator, &models, input, output) {
        println!("{line}");
    }
    Ok(())
}

/// One line per model, cheapest first; unpriced models last in the order given.
fn compare_lines(
    estimator: &CostEstimator,
    models: &[String],
    input: u64,
    output: u64,
) -> Vec<String> {
    let mut priced: Vec<(String, Decimal)> = Vec::new();
    let mut unpriced: Vec<String> = Vec::new();
    for (model, cost) in estimator.compare_models(models, input, output) {
        match cost {
            Ok(cost) => priced.push((model, cost)),
            Err(_) => unpriced.push(model),
        }
    }
    priced.sort_by(|a, b| a.1.cmp(&b.1));

    let width = models.iter().map(String::len).max().unwrap_or(0);
    priced
        .into_iter()
        .map(|(model, cost)| format!("  {model:<width$}  {}", format_cost(cost)))
        .chain(
            unpriced
                .into_iter()
                .map(|model| format!("  {model:<width$}  no price entry")),
        )
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compare_sorts_cheapest_first() {
        let estimator = CostEstimator::builtin();
        let models = vec![
            "gpt-4o".to_string(),
            "mystery-1".to_string(),
            "gpt-4o-mini".to_string(),
        ];
        let lines = compare_lines(&estimator, &models, 500, 200);
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("gpt-4o-mini") && lines[0].ends_with("$0.000195"));
        assert!(lines[1].contains("gpt-4o ") && lines[1].ends_with("$0.005500"));
        assert!(lines[2].contains("mystery-1") && lines[2].ends_with("no price entry"));
    }

    #[test]
    fn compare_with_no_models_is_empty() {
        let lines = compare_lines(&CostEstimator::builtin(), &[], 10, 10);
        assert!(lines.is_empty());
    }
}
