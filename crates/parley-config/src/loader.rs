// SPDX-FileCopyrightText: 2026 Parley Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./parley.toml` > `~/.config/parley/parley.toml` > `/etc/parley/parley.toml`
//! with environment variable overrides via the `PARLEY_` prefix and the
//! conventional provider key variables (`OPENAI_API_KEY`, ...).

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use parley_core::ProviderKind;
use strum::IntoEnumIterator;

use crate::model::ParleyConfig;

/// System-wide config file.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/parley/parley.toml";

/// Config file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "parley.toml";

/// `$XDG_CONFIG_HOME/parley/parley.toml`, if a config dir exists.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("parley").join(LOCAL_CONFIG_FILE))
}

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/parley/parley.toml` (system-wide)
/// 3. `~/.config/parley/parley.toml` (user XDG config)
/// 4. `./parley.toml` (local directory)
/// 5. `OPENAI_API_KEY`, `ANTHROPIC_API_KEY`, `GOOGLE_API_KEY`, `XAI_API_KEY`
/// 6. `PARLEY_*` environment variables
pub fn load_config() -> Result<ParleyConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env vars).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<ParleyConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(ParleyConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<ParleyConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(ParleyConfig::default()))
        .merge(Toml::file(path))
        .merge(provider_key_env())
        .merge(env_provider())
        .extract()
}

/// Build the Figment used internally for config loading (exposed for diagnostic use).
///
/// Returns the Figment before extraction so callers can inspect metadata.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(ParleyConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_PATH))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file(LOCAL_CONFIG_FILE))
        .merge(provider_key_env())
        .merge(env_provider())
}

/// Map the conventional, unprefixed provider key variables onto `providers.<name>.api_key`.
fn provider_key_env() -> Env {
    let keys: Vec<&str> = ProviderKind::iter().map(|kind| kind.api_key_env()).collect();
    Env::raw().only(&keys).map(|key| {
        ProviderKind::iter()
            .find(|kind| key.as_str().eq_ignore_ascii_case(kind.api_key_env()))
            .map(|kind| format!("providers.{kind}.api_key"))
            .unwrap_or_else(|| key.as_str().to_string())
            .into()
    })
}

/// Create the `PARLEY_` environment variable provider with explicit section mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` because key names contain
/// underscores: `PARLEY_ROUTING_DEFAULT_MODEL` must map to
/// `routing.default_model`, not `routing.default.model`.
fn env_provider() -> Env {
    Env::prefixed("PARLEY_").map(|key| map_env_key(key.as_str()).into())
}

/// Translate a prefix-stripped env key into a dotted config path.
pub(crate) fn map_env_key(key: &str) -> String {
    let key = key.to_ascii_lowercase();

    for provider in ["openai", "anthropic", "gemini", "grok"] {
        let section = format!("providers_{provider}_");
        if let Some(field) = key.strip_prefix(&section) {
            return format!("providers.{provider}.{field}");
        }
    }

    for section in ["log", "routing", "classifier", "pricing"] {
        if let Some(field) = key.strip_prefix(&format!("{section}_")) {
            return format!("{section}.{field}");
        }
    }

    key
}
