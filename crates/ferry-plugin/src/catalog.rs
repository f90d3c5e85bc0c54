// SPDX-FileCopyrightText: 2026 Ferry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Search over the manifests of registered backends.

use crate::registry::{BackendEntry, ComponentRegistry};

/// Search registered backends by query string.
///
/// Matches entries whose id, name, or description contains the query
/// (case-insensitive). An empty query returns every entry. Results are
/// sorted by backend identifier.
pub fn search_catalog<'r>(registry: &'r ComponentRegistry, query: &str) -> Vec<&'r BackendEntry> {
    let query_lower = query.trim().to_lowercase();
    registry
        .list_all()
        .into_iter()
        .filter(|entry| {
            query_lower.is_empty()
                || entry.manifest.id.to_lowercase().contains(&query_lower)
                || entry.manifest.name.to_lowercase().contains(&query_lower)
                || entry.manifest.description.to_lowercase().contains(&query_lower)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{test_manifest, DummyManager, DummyPlugin, DummySettings};

    fn catalog() -> ComponentRegistry {
        let mut registry = ComponentRegistry::new();
        let mut ftp = test_manifest("ftp", "FtpStorage");
        ftp.description = "Plain FTP server storage".to_string();
        registry
            .register_backend::<DummyPlugin<1>, DummySettings<1>, DummyManager<1>>(ftp)
            .unwrap();
        let mut local = test_manifest("local", "Local");
        local.description = "Directory on a local or mounted disk".to_string();
        registry
            .register_backend::<DummyPlugin<2>, DummySettings<2>, DummyManager<2>>(local)
            .unwrap();
        registry
    }

    #[test]
    fn search_by_id() {
        let registry = catalog();
        let results = search_catalog(&registry, "ftp");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].manifest.id, "ftp");
    }

    #[test]
    fn search_is_case_insensitive() {
        let registry = catalog();
        let results = search_catalog(&registry, "LOCAL");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id.as_str(), "Local");
    }

    #[test]
    fn search_by_description() {
        let registry = catalog();
        let results = search_catalog(&registry, "mounted");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].manifest.id, "local");
    }

    #[test]
    fn search_empty_returns_all_sorted() {
        let registry = catalog();
        let ids: Vec<&str> = search_catalog(&registry, "")
            .iter()
            .map(|e| e.id.as_str())
            .collect();
        assert_eq!(ids, vec!["FtpStorage", "Local"]);
    }

    #[test]
    fn search_no_match() {
        let registry = catalog();
        assert!(search_catalog(&registry, "xyz_nonexistent").is_empty());
    }
}
