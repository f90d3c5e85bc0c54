// SPDX-FileCopyrightText: 2026 Ferry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Convention-based binding of transfer backend components.
//!
//! Every backend consists of a plugin, a settings type and a manager, named
//! after the backend identifier and placed in the namespace
//! `<root>.<family>.<segment>`. Backends are registered once at startup in a
//! [`ComponentRegistry`]; a [`Binder`] then resolves any component's
//! siblings from its name alone.

pub mod binder;
pub mod catalog;
pub mod manifest;
pub mod naming;
pub mod registry;

#[cfg(test)]
mod fixtures;

pub use binder::Binder;
pub use catalog::search_catalog;
pub use manifest::{parse_plugin_manifest, PluginManifest};
pub use naming::{to_camel, to_snake, BackendId, NamingConvention};
pub use registry::{
    BackendEntry, Component, ComponentRegistry, ManagerFactory, PluginFactory, PluginStatus,
    RegisteredComponent, SettingsFactory, TypeFactory,
};
