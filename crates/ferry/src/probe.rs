// SPDX-FileCopyrightText: 2026 Ferry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `ferry probe` command implementation.
//!
//! Starts from a backend's plugin name and reaches its settings and manager
//! through the binder only, then tests the storage target.

use std::io::IsTerminal;

use ferry_core::{FerryError, Role, StorageTestResult};
use ferry_plugin::{BackendId, ComponentRegistry, PluginStatus};
use tracing::{debug, info};

/// Split `key=value` arguments.
pub fn parse_assignments(pairs: &[String]) -> Result<Vec<(String, String)>, FerryError> {
    pairs
        .iter()
        .map(|pair| match pair.split_once('=') {
            Some((key, value)) if !key.trim().is_empty() => {
                Ok((key.trim().to_string(), value.to_string()))
            }
            _ => Err(FerryError::Config(format!(
                "invalid setting `{pair}`: expected KEY=VALUE"
            ))),
        })
        .collect()
}

/// Bind the backend, fill its settings, connect, and test the target.
pub async fn probe_backend(
    registry: &ComponentRegistry,
    backend: &str,
    assignments: &[(String, String)],
    create_target: bool,
) -> Result<StorageTestResult, FerryError> {
    let id = BackendId::new(backend)?;
    let entry = registry
        .get(&id)
        .ok_or_else(|| FerryError::BackendNotFound { id: id.to_string() })?;
    if entry.status == PluginStatus::Disabled {
        return Err(FerryError::Config(format!(
            "backend {id} is disabled in the configuration"
        )));
    }

    let binder = registry.binder();
    let plugin_name = binder.sibling_name(&id, Role::Plugin);
    let plugin = binder.resolve_plugin(&plugin_name)?.create();
    debug!(backend = %id, plugin = plugin.id(), version = %plugin.version(), "probing backend");

    let mut settings = binder.settings_for_plugin(&plugin_name)?.create();
    for (key, value) in assignments {
        settings.set_field(key, value)?;
    }
    settings.validate()?;

    let mut manager = binder.manager_for_plugin(&plugin_name)?.create(settings)?;
    manager.connect().await?;
    let result = manager.test(create_target).await;
    manager.disconnect().await?;

    let result = result?;
    info!(backend = %id, usable = result.is_usable_repo(), "probe finished");
    Ok(result)
}

/// Human-readable report of a probe.
pub fn render_result(backend: &str, result: &StorageTestResult, use_color: bool) -> String {
    let checks = [
        ("target exists", result.target_exists),
        ("target writable", result.target_can_write),
        ("target creatable", result.target_can_create),
        ("repository found", result.repo_file_exists),
    ];

    let mut out = format!("\n  ferry probe {backend}\n  {}\n", "-".repeat(40));
    for (label, ok) in checks {
        let mark = match (use_color, ok) {
            (true, true) => {
                use colored::Colorize;
                "✓".green().to_string()
            }
            (true, false) => {
                use colored::Colorize;
                "✗".red().to_string()
            }
            (false, true) => "[OK]".to_string(),
            (false, false) => "[NO]".to_string(),
        };
        out.push_str(&format!("    {mark} {label}\n"));
    }
    out
}

pub async fn run_probe(
    registry: &ComponentRegistry,
    backend: &str,
    pairs: &[String],
    create_target: bool,
) -> Result<(), FerryError> {
    let assignments = parse_assignments(pairs)?;
    let result = probe_backend(registry, backend, &assignments, create_target).await?;
    print!(
        "{}",
        render_result(backend, &result, std::io::stdout().is_terminal())
    );
    Ok(())
}
