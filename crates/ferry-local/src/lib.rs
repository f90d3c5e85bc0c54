// SPDX-FileCopyrightText: 2026 Ferry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Local directory transfer backend.
//!
//! Stores a repository in a directory on a local or mounted disk. The
//! backend identifier is `Local`, so its components live in namespace
//! `<root>.<family>.local`.

pub mod manager;
pub mod plugin;
pub mod settings;

use ferry_core::FerryError;
use ferry_plugin::{parse_plugin_manifest, BackendId, ComponentRegistry, PluginManifest};

pub use manager::LocalTransferManager;
pub use plugin::LocalTransferPlugin;
pub use settings::LocalTransferSettings;

const MANIFEST: &str = include_str!("../plugin.toml");

/// The manifest bundled with this crate.
pub fn manifest() -> Result<PluginManifest, FerryError> {
    parse_plugin_manifest(MANIFEST)
}

/// Register the `Local` backend's three components.
pub fn register(registry: &mut ComponentRegistry) -> Result<BackendId, FerryError> {
    registry.register_backend::<LocalTransferPlugin, LocalTransferSettings, LocalTransferManager>(
        manifest()?,
    )
}
