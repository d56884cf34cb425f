// SPDX-FileCopyrightText: 2026 Parley Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `parley config` command implementation.

use parley_config::model::ParleyConfig;
use parley_core::{ParleyError, ProviderKind};
use strum::IntoEnumIterator;

const REDACTED: &str = "<redacted>";

/// Print the effective (merged and validated) configuration as TOML.
pub fn run_config(config: &ParleyConfig) -> Result<(), ParleyError> {
    print!("{}", render_config(config)?);
    Ok(())
}

fn render_config(config: &ParleyConfig) -> Result<String, ParleyError> {
    toml::to_string_pretty(&redacted(config))
        .map_err(|e| ParleyError::Config(format!("failed to render configuration: {e}")))
}

/// Copy of `config` with every present API key replaced.
fn redacted(config: &ParleyConfig) -> ParleyConfig {
    let mut config = config.clone();
    for kind in ProviderKind::iter() {
        let provider = config.providers.get_mut(kind);
        if provider.api_key.is_some() {
            provider.api_key = Some(REDACTED.to_string());
        }
    }
    config
}
