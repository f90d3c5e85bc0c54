// SPDX-FileCopyrightText: 2026 Ferry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for end-to-end binding tests.
//!
//! `TestHarness` assembles a registry with the in-memory and local backends,
//! a scratch directory for the local backend, and a shared memory store.
//! `bind_manager()` walks plugin -> settings -> manager through the binder
//! the same way the CLI does.

use std::path::{Path, PathBuf};

use ferry_config::FerryConfig;
use ferry_core::{FerryError, QualifiedName, Role, TransferManager, TransferSettings};
use ferry_plugin::{BackendId, ComponentRegistry, PluginStatus};
use tempfile::TempDir;

use crate::memory::{self, MemoryStorageTransferSettings, MemoryStore};

/// Builder for creating test environments with configurable options.
pub struct TestHarnessBuilder {
    config: FerryConfig,
    with_local: bool,
    with_memory: bool,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        Self {
            config: FerryConfig::default(),
            with_local: true,
            with_memory: true,
        }
    }

    /// Use `root` and `family` for the backend namespaces.
    pub fn with_prefix(mut self, root: &str, family: &str) -> Self {
        self.config.plugins.root = root.to_string();
        self.config.plugins.family = family.to_string();
        self
    }

    /// Apply an `enabled` override as if it came from the config file.
    pub fn with_enabled(mut self, backend: &str, enabled: bool) -> Self {
        self.config.plugins.enabled.insert(backend.to_string(), enabled);
        self
    }

    /// Leave the `Local` backend unregistered.
    pub fn without_local(mut self) -> Self {
        self.with_local = false;
        self
    }

    /// Leave the `MemoryStorage` backend unregistered.
    pub fn without_memory(mut self) -> Self {
        self.with_memory = false;
        self
    }

    /// Build the harness.
    pub fn build(self) -> Result<TestHarness, FerryError> {
        let temp_dir = TempDir::new().map_err(|e| FerryError::transfer("cannot create temp dir", e))?;

        let mut registry = ComponentRegistry::with_convention(self.config.plugins.convention()?);
        if self.with_memory {
            memory::register(&mut registry)?;
        }
        if self.with_local {
            ferry_local::register(&mut registry)?;
        }

        self.config.plugins.apply_overrides(&mut registry)?;

        Ok(TestHarness {
            registry,
            config: self.config,
            store: MemoryStore::new(),
            temp_dir,
        })
    }
}

/// A populated registry plus the storage the test backends write to.
pub struct TestHarness {
    pub registry: ComponentRegistry,
    pub config: FerryConfig,
    /// Store handed to every memory manager bound through this harness.
    pub store: MemoryStore,
    temp_dir: TempDir,
}

impl TestHarness {
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }

    /// Harness with both backends and default naming.
    pub fn new() -> Result<Self, FerryError> {
        Self::builder().build()
    }

    pub fn temp_path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Directory used as the `Local` backend's repository.
    pub fn local_repo(&self) -> PathBuf {
        self.temp_dir.path().join("repo")
    }

    /// Conventional plugin name of a backend.
    pub fn plugin_name(&self, backend: &str) -> Result<QualifiedName, FerryError> {
        let id = BackendId::new(backend)?;
        Ok(self.registry.convention().synthesize(&id, Role::Plugin))
    }

    /// Resolve settings and manager from a backend's plugin name, fill the
    /// settings, create and connect the manager.
    ///
    /// Memory settings get the harness store; local settings default to
    /// [`Self::local_repo`] unless `fields` sets `path`.
    pub async fn bind_manager(
        &self,
        backend: &str,
        fields: &[(&str, &str)],
    ) -> Result<Box<dyn TransferManager>, FerryError> {
        let binder = self.registry.binder();
        let plugin = self.plugin_name(backend)?;

        let mut settings: Box<dyn TransferSettings> = binder.settings_for_plugin(&plugin)?.create();
        if let Some(memory) = (*settings)
            .as_any_mut()
            .downcast_mut::<MemoryStorageTransferSettings>()
        {
            memory.store = self.store.clone();
        }
        if backend == "Local" && !fields.iter().any(|(k, _)| *k == "path") {
            let repo = self.local_repo();
            settings.set_field("path", &repo.display().to_string())?;
        }
        for (key, value) in fields {
            settings.set_field(key, value)?;
        }
        settings.validate()?;

        let mut manager = binder.manager_for_plugin(&plugin)?.create(settings)?;
        manager.connect().await?;
        Ok(manager)
    }

    /// Status of a registered backend.
    pub fn status(&self, backend: &str) -> Option<PluginStatus> {
        let id = BackendId::new(backend).ok()?;
        self.registry.get(&id).map(|entry| entry.status)
    }
}
