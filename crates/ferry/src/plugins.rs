// SPDX-FileCopyrightText: 2026 Ferry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `ferry plugins` command implementation.
//!
//! Lists and searches registered backends and resolves component siblings
//! through the binder.

use std::io::IsTerminal;

use colored::Colorize;
use ferry_core::{FerryError, QualifiedName, Role};
use ferry_plugin::{search_catalog, BackendEntry, ComponentRegistry, PluginStatus};
use serde::Serialize;

/// One backend as printed by `plugins list --json`.
#[derive(Debug, Serialize)]
pub struct BackendRow {
    pub backend: String,
    pub id: String,
    pub name: String,
    pub version: String,
    pub status: String,
    pub description: String,
    pub plugin: String,
    pub settings: String,
    pub manager: String,
}

impl BackendRow {
    fn new(registry: &ComponentRegistry, entry: &BackendEntry) -> Self {
        let convention = registry.convention();
        Self {
            backend: entry.id.to_string(),
            id: entry.manifest.id.clone(),
            name: entry.manifest.name.clone(),
            version: entry.manifest.version.to_string(),
            status: entry.status.to_string(),
            description: entry.manifest.description.clone(),
            plugin: convention.synthesize(&entry.id, Role::Plugin).to_string(),
            settings: convention.synthesize(&entry.id, Role::Settings).to_string(),
            manager: convention.synthesize(&entry.id, Role::Manager).to_string(),
        }
    }
}

pub fn backend_rows(registry: &ComponentRegistry, entries: &[&BackendEntry]) -> Vec<BackendRow> {
    entries
        .iter()
        .map(|entry| BackendRow::new(registry, entry))
        .collect()
}

/// Render entries as an aligned table.
pub fn render_table(entries: &[&BackendEntry], use_color: bool) -> String {
    let mut out = String::new();
    for entry in entries {
        let status = entry.status.to_string();
        let status = match (use_color, entry.status) {
            (false, _) => status,
            (true, PluginStatus::Enabled) => status.green().to_string(),
            (true, PluginStatus::Disabled) => status.red().to_string(),
            (true, PluginStatus::NotConfigured) => status.yellow().to_string(),
        };
        out.push_str(&format!(
            "  {:<16} {:<10} {:<8} {:<14} {}\n",
            entry.id.as_str(),
            entry.manifest.id,
            entry.manifest.version,
            status,
            entry.manifest.description
        ));
    }
    out
}

pub fn run_list(registry: &ComponentRegistry, json: bool) -> Result<(), FerryError> {
    let entries = registry.list_all();
    if json {
        let rows = backend_rows(registry, &entries);
        let text = serde_json::to_string_pretty(&rows)
            .map_err(|e| FerryError::Internal(format!("cannot encode backend list: {e}")))?;
        println!("{text}");
        return Ok(());
    }

    if entries.is_empty() {
        println!("  no backends registered");
        return Ok(());
    }
    print!("{}", render_table(&entries, std::io::stdout().is_terminal()));
    Ok(())
}

pub fn run_search(registry: &ComponentRegistry, query: &str) -> Result<(), FerryError> {
    let hits = search_catalog(registry, query);
    if hits.is_empty() {
        println!("  no backends match `{query}`");
        return Ok(());
    }
    print!("{}", render_table(&hits, std::io::stdout().is_terminal()));
    Ok(())
}

/// Text printed for a successful resolution.
pub fn describe_resolution(
    registry: &ComponentRegistry,
    name: &str,
    role: Role,
) -> Result<String, FerryError> {
    let found = registry
        .binder()
        .resolve_sibling(&QualifiedName::parse(name), role)?;
    Ok(match found.type_name {
        Some(rust_type) => format!("{} ({role}, {rust_type})", found.name),
        None => format!("{} ({role})", found.name),
    })
}

pub fn run_resolve(registry: &ComponentRegistry, name: &str, role: Role) -> Result<(), FerryError> {
    println!("{}", describe_resolution(registry, name, role)?);
    Ok(())
}

#[cfg(all(test, feature = "local"))]
mod tests {
    use super::*;
    use ferry_core::BindError;

    fn registry() -> ComponentRegistry {
        let mut registry = ComponentRegistry::new();
        ferry_local::register(&mut registry).unwrap();
        registry
    }

    #[test]
    fn rows_carry_all_three_names() {
        let registry = registry();
        let rows = backend_rows(&registry, &registry.list_all());
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].backend, "Local");
        assert_eq!(rows[0].status, "enabled");
        assert_eq!(rows[0].settings, "org.ferry.plugins.local.LocalTransferSettings");
        assert_eq!(rows[0].manager, "org.ferry.plugins.local.LocalTransferManager");
    }

    #[test]
    fn plain_table_has_no_escape_codes() {
        let registry = registry();
        let table = render_table(&registry.list_all(), false);
        assert!(table.contains("Local"));
        assert!(table.contains("enabled"));
        assert!(!table.contains('\u{1b}'));
    }

    #[test]
    fn resolution_names_rust_type() {
        let registry = registry();
        let text = describe_resolution(
            &registry,
            "org.ferry.plugins.local.LocalTransferPlugin",
            Role::Manager,
        )
        .unwrap();
        assert!(text.starts_with("org.ferry.plugins.local.LocalTransferManager (Manager, "));
        assert!(text.contains("LocalTransferManager)"));
    }

    #[test]
    fn resolution_failures_are_bind_errors() {
        let registry = registry();
        let err = describe_resolution(&registry, "com.acme.Thing", Role::Settings).unwrap_err();
        assert!(matches!(
            err,
            FerryError::Bind(BindError::NoBackendIdentifier { .. })
        ));
    }
}
