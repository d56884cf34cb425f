// SPDX-FileCopyrightText: 2026 Parley Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trait definitions for the collaborators the routing core consumes.

pub mod provider;

pub use provider::ChatProvider;
