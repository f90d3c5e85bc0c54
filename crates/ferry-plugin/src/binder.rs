// SPDX-FileCopyrightText: 2026 Ferry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Resolution of a backend component's siblings by naming convention.
//!
//! Given any one component of a backend, the binder extracts the backend
//! identifier from the component's namespace, synthesizes the name of the
//! requested sibling, looks it up in the registry, and checks that the
//! component found serves the requested role.
//!
//! Nothing is cached; every call repeats all four steps.

use std::any::type_name;
use std::sync::Arc;

use ferry_core::{BindError, QualifiedName, Role};
use tracing::trace;

use crate::naming::BackendId;
use crate::registry::{
    ComponentRegistry, ManagerFactory, PluginFactory, RegisteredComponent, SettingsFactory,
};

/// Stateless view over a registry that resolves sibling components.
#[derive(Clone, Copy)]
pub struct Binder<'r> {
    registry: &'r ComponentRegistry,
}

impl<'r> Binder<'r> {
    pub fn new(registry: &'r ComponentRegistry) -> Self {
        Self { registry }
    }

    /// Backend identifier of the component named `name`, if its namespace
    /// follows the convention.
    pub fn backend_id(&self, name: &QualifiedName) -> Option<BackendId> {
        self.registry.convention().extract(name)
    }

    /// Name the `role` component of backend `id` must be registered under.
    pub fn sibling_name(&self, id: &BackendId, role: Role) -> QualifiedName {
        self.registry.convention().synthesize(id, role)
    }

    /// Resolve the `role` sibling of the component named `from`.
    pub fn resolve_sibling(
        &self,
        from: &QualifiedName,
        role: Role,
    ) -> Result<&'r RegisteredComponent, BindError> {
        self.narrow(from, role, |found| (found.component.role() == role).then_some(found))
    }

    /// Extraction, synthesis and lookup, then `pick` narrows the component
    /// found to the capability of `role`.
    fn narrow<T>(
        &self,
        from: &QualifiedName,
        role: Role,
        pick: impl FnOnce(&'r RegisteredComponent) -> Option<T>,
    ) -> Result<T, BindError> {
        let id = self
            .backend_id(from)
            .ok_or_else(|| BindError::NoBackendIdentifier {
                type_name: from.to_string(),
            })?;

        let expected = self.sibling_name(&id, role);
        let found =
            self.registry
                .component(&expected)
                .ok_or_else(|| BindError::SiblingNotFound {
                    from: from.to_string(),
                    role,
                    expected: expected.to_string(),
                })?;

        let narrowed = pick(found).ok_or_else(|| BindError::CapabilityMismatch {
            name: expected.to_string(),
            expected: role,
            actual: found.component.role(),
        })?;

        trace!(from = %from, backend = %id, role = %role, resolved = %found.name, "sibling resolved");
        Ok(narrowed)
    }

    /// Resolve the `role` sibling of a registered Rust type.
    ///
    /// A type the registry does not know has no namespace, so it fails with
    /// `NoBackendIdentifier`.
    pub fn resolve_sibling_of<T: 'static>(
        &self,
        role: Role,
    ) -> Result<&'r RegisteredComponent, BindError> {
        let name = self
            .registry
            .name_of::<T>()
            .ok_or_else(|| BindError::NoBackendIdentifier {
                type_name: type_name::<T>().to_string(),
            })?;
        self.resolve_sibling(name, role)
    }

    /// Resolve the plugin of the backend `from` belongs to.
    pub fn resolve_plugin(&self, from: &QualifiedName) -> Result<Arc<dyn PluginFactory>, BindError> {
        self.narrow(from, Role::Plugin, |found| found.component.as_plugin().cloned())
    }

    /// Resolve the settings type of the backend `from` belongs to.
    pub fn resolve_settings(
        &self,
        from: &QualifiedName,
    ) -> Result<Arc<dyn SettingsFactory>, BindError> {
        self.narrow(from, Role::Settings, |found| found.component.as_settings().cloned())
    }

    /// Resolve the manager of the backend `from` belongs to.
    pub fn resolve_manager(
        &self,
        from: &QualifiedName,
    ) -> Result<Arc<dyn ManagerFactory>, BindError> {
        self.narrow(from, Role::Manager, |found| found.component.as_manager().cloned())
    }

    /// Settings type for a plugin.
    pub fn settings_for_plugin(
        &self,
        plugin: &QualifiedName,
    ) -> Result<Arc<dyn SettingsFactory>, BindError> {
        self.resolve_settings(plugin)
    }

    /// Manager type for a plugin.
    pub fn manager_for_plugin(
        &self,
        plugin: &QualifiedName,
    ) -> Result<Arc<dyn ManagerFactory>, BindError> {
        self.resolve_manager(plugin)
    }

    /// Plugin type owning a settings type.
    pub fn plugin_for_settings(
        &self,
        settings: &QualifiedName,
    ) -> Result<Arc<dyn PluginFactory>, BindError> {
        self.resolve_plugin(settings)
    }
}
