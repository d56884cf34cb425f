// SPDX-FileCopyrightText: 2026 Parley Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Pricing and cost estimation for the Parley model router.
//!
//! This crate provides:
//! - **Price table**: built-in USD per 1K token prices with configurable overrides
//! - **Cost estimator**: exact decimal cost from token counts, model comparison, display formatting

pub mod estimator;
pub mod pricing;

pub use estimator::{CostEstimator, format_cost};
pub use pricing::{PriceEntry, PriceTable};
