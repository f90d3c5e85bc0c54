// SPDX-FileCopyrightText: 2026 Ferry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./ferry.toml` > `~/.config/ferry/ferry.toml` > `/etc/ferry/ferry.toml`
//! with environment variable overrides via `FERRY_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::FerryConfig;

/// System-wide configuration file.
pub const SYSTEM_CONFIG: &str = "/etc/ferry/ferry.toml";

/// Configuration file looked up in the working directory.
pub const LOCAL_CONFIG: &str = "ferry.toml";

/// `<config_dir>/ferry/ferry.toml`, if the platform has a config directory.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("ferry").join("ferry.toml"))
}

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/ferry/ferry.toml` (system-wide)
/// 3. `~/.config/ferry/ferry.toml` (user XDG config)
/// 4. `./ferry.toml` (local directory)
/// 5. `FERRY_*` environment variables
pub fn load_config() -> Result<FerryConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no files, no env).
pub fn load_config_from_str(toml_content: &str) -> Result<FerryConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(FerryConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<FerryConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(FerryConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// The Figment behind [`load_config`], before extraction.
pub fn build_figment() -> Figment {
    let mut figment = Figment::new()
        .merge(Serialized::defaults(FerryConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG));
    if let Some(user) = user_config_path() {
        figment = figment.merge(Toml::file(user));
    }
    figment.merge(Toml::file(LOCAL_CONFIG)).merge(env_provider())
}

/// Environment provider mapping `FERRY_<SECTION>_<KEY>` onto `section.key`.
///
/// Uses `Env::map()` rather than `Env::split("_")` so that keys containing
/// underscores survive. `FERRY_PLUGINS_ENABLED_LOCAL` maps to
/// `plugins.enabled.local`. Keys reach the mapper in their original case.
pub(crate) fn env_provider() -> Env {
    Env::prefixed("FERRY_").map(|key| {
        let lowered = key.as_str().to_ascii_lowercase();
        let key_str = lowered.as_str();
        let mapped = if let Some(rest) = key_str.strip_prefix("plugins_enabled_") {
            format!("plugins.enabled.{rest}")
        } else if let Some(rest) = key_str.strip_prefix("plugins_") {
            format!("plugins.{rest}")
        } else if let Some(rest) = key_str.strip_prefix("log_") {
            format!("log.{rest}")
        } else {
            key_str.to_string()
        };
        mapped.into()
    })
}
