// SPDX-FileCopyrightText: 2026 Ferry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Registry assembly for the compiled-in backends.

use ferry_config::FerryConfig;
use ferry_core::FerryError;
use ferry_plugin::ComponentRegistry;
use tracing::info;

/// Register every compiled-in backend under the configured naming
/// convention, then apply the config's enabled overrides.
pub fn build_registry(config: &FerryConfig) -> Result<ComponentRegistry, FerryError> {
    #[allow(unused_mut)] // no backends are registered with every feature off
    let mut registry = ComponentRegistry::with_convention(config.plugins.convention()?);

    #[cfg(feature = "local")]
    ferry_local::register(&mut registry)?;

    config.plugins.apply_overrides(&mut registry)?;

    info!(
        count = registry.len(),
        prefix = registry.convention().prefix(),
        "backend registry initialized"
    );
    Ok(registry)
}
