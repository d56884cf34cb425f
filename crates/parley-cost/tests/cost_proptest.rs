// SPDX-FileCopyrightText: 2026 Parley Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Property tests for decimal cost calculation.

use parley_cost::{CostEstimator, PriceTable};
use proptest::prelude::*;
use rust_decimal::Decimal;

fn model() -> impl Strategy<Value = String> {
    let models: Vec<String> = PriceTable::builtin().models().map(str::to_string).collect();
    prop::sample::select(models)
}

proptest! {
    #[test]
    fn cost_is_additive_in_tokens(
        model in model(),
        a in 0u64..5_000_000,
        b in 0u64..5_000_000,
        out in 0u64..5_000_000,
    ) {
        let estimator = CostEstimator::builtin();
        let whole = estimator.calculate(&model, a + b, out).unwrap();
        let parts = estimator.calculate(&model, a, out).unwrap()
            + estimator.calculate(&model, b, 0).unwrap();
        prop_assert_eq!(whole, parts);
    }

    #[test]
    fn cost_is_never_negative(model in model(), input in any::<u32>(), output in any::<u32>()) {
        let cost = CostEstimator::builtin()
            .calculate(&model, u64::from(input), u64::from(output))
            .unwrap();
        prop_assert!(cost >= Decimal::ZERO);
    }

    #[test]
    fn total_estimate_never_exceeds_output_priced_total(model in model(), total in 0u64..10_000_000) {
        let estimator = CostEstimator::builtin();
        let estimate = estimator.calculate_total(&model, total).unwrap();
        let upper = estimator.calculate(&model, total, total).unwrap();
        prop_assert!(estimate <= upper);
    }

    #[test]
    fn unpriced_models_always_fail(model in "[a-z]{3,12}-unpriced") {
        prop_assert!(CostEstimator::builtin().calculate(&model, 1, 1).is_err());
    }
}
