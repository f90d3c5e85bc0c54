// SPDX-FileCopyrightText: 2026 Ferry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Ferry transfer framework.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use std::collections::BTreeMap;

use ferry_core::FerryError;
use ferry_plugin::naming::{DEFAULT_FAMILY, DEFAULT_ROOT};
use ferry_plugin::{to_camel, BackendId, ComponentRegistry, NamingConvention};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Top-level Ferry configuration.
///
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FerryConfig {
    /// Logging settings.
    #[serde(default)]
    pub log: LogConfig,

    /// Backend naming and enablement.
    #[serde(default)]
    pub plugins: PluginsConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LogConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Where backends live and which of them are switched on.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PluginsConfig {
    /// First part of every backend namespace (e.g., `org.ferry`).
    #[serde(default = "default_root")]
    pub root: String,

    /// Namespace segment grouping backends below the root.
    #[serde(default = "default_family")]
    pub family: String,

    /// Per-backend overrides keyed by backend identifier or namespace
    /// segment, matched case-insensitively (`local = false` disables `Local`,
    /// `memory_storage = false` disables `MemoryStorage`).
    /// Backends not listed keep the status they registered with.
    #[serde(default)]
    pub enabled: BTreeMap<String, bool>,
}

impl Default for PluginsConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            family: default_family(),
            enabled: BTreeMap::new(),
        }
    }
}

impl PluginsConfig {
    /// Configured override for `backend`, if any.
    pub fn enabled_override(&self, backend: &str) -> Option<bool> {
        self.enabled
            .iter()
            .find(|(key, _)| to_camel(key).eq_ignore_ascii_case(backend))
            .map(|(_, enabled)| *enabled)
    }

    /// Naming convention for `<root>.<family>`.
    pub fn convention(&self) -> Result<NamingConvention, FerryError> {
        NamingConvention::new(&self.root, &self.family)
    }

    /// Apply the `enabled` overrides to every registered backend they name.
    ///
    /// Keys matching no registered backend are ignored.
    pub fn apply_overrides(&self, registry: &mut ComponentRegistry) -> Result<(), FerryError> {
        let ids: Vec<BackendId> = registry.list_all().iter().map(|e| e.id.clone()).collect();
        for id in ids {
            if let Some(enabled) = self.enabled_override(id.as_str()) {
                debug!(backend = %id, enabled, "applying config override");
                registry.set_enabled(&id, enabled)?;
            }
        }
        Ok(())
    }
}

fn default_root() -> String {
    DEFAULT_ROOT.to_string()
}

fn default_family() -> String {
    DEFAULT_FAMILY.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_naming_convention() {
        let config = FerryConfig::default();
        assert_eq!(config.log.level, "info");
        assert_eq!(config.plugins.root, "org.ferry");
        assert_eq!(config.plugins.family, "plugins");
        assert!(config.plugins.enabled.is_empty());
    }

    #[test]
    fn enabled_map_deserializes() {
        let toml_str = r#"
[plugins.enabled]
local = false
MemoryStorage = true
"#;
        let config: FerryConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.plugins.enabled_override("Local"), Some(false));
        assert_eq!(config.plugins.enabled_override("memorystorage"), Some(true));
        assert_eq!(config.plugins.enabled_override("FtpStorage"), None);
    }

    #[test]
    fn segment_keys_match_backend_ids() {
        let mut plugins = PluginsConfig::default();
        plugins.enabled.insert("memory_storage".to_string(), false);
        plugins.enabled.insert("ftp_storage".to_string(), true);
        assert_eq!(plugins.enabled_override("MemoryStorage"), Some(false));
        assert_eq!(plugins.enabled_override("FtpStorage"), Some(true));
        assert_eq!(plugins.enabled_override("Ftp"), None);
    }

    #[test]
    fn convention_follows_prefix() {
        let mut plugins = PluginsConfig::default();
        assert_eq!(plugins.convention().unwrap().prefix(), "org.ferry.plugins");
        plugins.root = "org.pkg".to_string();
        assert_eq!(plugins.convention().unwrap().prefix(), "org.pkg.plugins");
        plugins.family = "bad family".to_string();
        assert!(plugins.convention().is_err());
    }

    #[test]
    fn overrides_on_empty_registry_are_ignored() {
        let mut plugins = PluginsConfig::default();
        plugins.enabled.insert("Ghost".to_string(), false);
        let mut registry = ComponentRegistry::new();
        assert!(plugins.apply_overrides(&mut registry).is_ok());
    }

    #[test]
    fn plugins_deny_unknown_fields() {
        let toml_str = r#"
[plugins]
roots = "org.pkg"
"#;
        assert!(toml::from_str::<FerryConfig>(toml_str).is_err());
    }
}
