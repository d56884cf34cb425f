// SPDX-FileCopyrightText: 2026 Parley Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Parley integration tests.
//!
//! Provides a mock provider and a test harness for fast, deterministic,
//! CI-runnable tests without external services.
//!
//! # Components
//!
//! - [`MockProvider`] - Mock chat provider with pre-configured responses
//! - [`TestHarness`] - Router, mock provider and cost estimator wired together

pub mod harness;
pub mod mock_provider;

pub use harness::{TestHarness, TestHarnessBuilder, Turn};
pub use mock_provider::MockProvider;
