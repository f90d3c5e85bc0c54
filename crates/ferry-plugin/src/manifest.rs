// SPDX-FileCopyrightText: 2026 Ferry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugin manifest parsing from `plugin.toml` files.
//!
//! Every backend crate ships a manifest naming its backend identifier, from
//! which the registry derives the names of the three components.

use ferry_core::FerryError;
use serde::{Deserialize, Serialize};

use crate::naming::BackendId;

/// Parsed manifest describing one transfer backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginManifest {
    /// Short machine identifier (e.g., "local", "ftp").
    pub id: String,
    /// Human-readable name.
    pub name: String,
    pub version: semver::Version,
    pub description: String,
    /// Capitalized backend identifier (e.g., "FtpStorage").
    pub backend: String,
    pub author: Option<String>,
    /// Settings fields a user must fill in (e.g., ["path"]).
    pub config_keys: Vec<String>,
}

/// Intermediate TOML deserialization struct for `plugin.toml`.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PluginManifestFile {
    plugin: PluginSection,
}

/// The `[plugin]` section of a `plugin.toml` file.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PluginSection {
    id: String,
    name: String,
    version: String,
    #[serde(default)]
    description: String,
    backend: String,
    author: Option<String>,
    #[serde(default)]
    config_keys: Vec<String>,
}

/// Parse a plugin manifest from TOML content.
///
/// Rejects empty id, name or version, a version that is not semver, and a
/// backend identifier that cannot carry the naming convention.
pub fn parse_plugin_manifest(toml_content: &str) -> Result<PluginManifest, FerryError> {
    let file: PluginManifestFile = toml::from_str(toml_content)
        .map_err(|e| FerryError::Config(format!("invalid plugin manifest: {e}")))?;

    let section = file.plugin;

    for (field, value) in [
        ("id", &section.id),
        ("name", &section.name),
        ("version", &section.version),
    ] {
        if value.trim().is_empty() {
            return Err(FerryError::Config(format!(
                "plugin manifest: {field} must not be empty"
            )));
        }
    }

    let version = semver::Version::parse(&section.version).map_err(|e| {
        FerryError::Config(format!(
            "plugin manifest: invalid version '{}': {e}",
            section.version
        ))
    })?;

    BackendId::new(section.backend.clone()).map_err(|_| {
        FerryError::Config(format!(
            "plugin manifest: invalid backend '{}'. Expected a capitalized identifier such as FtpStorage",
            section.backend
        ))
    })?;

    Ok(PluginManifest {
        id: section.id,
        name: section.name,
        version,
        description: section.description,
        backend: section.backend,
        author: section.author,
        config_keys: section.config_keys,
    })
}
