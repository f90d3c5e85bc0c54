// SPDX-FileCopyrightText: 2026 Ferry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Component registry for compiled-in transfer backends.
//!
//! The `ComponentRegistry` maps qualified names to component factories and
//! plays the part of a type loader: the binder looks up synthesized names
//! here. Backends are registered explicitly at startup, one call per backend,
//! and each backend also gets a `BackendEntry` with its manifest and status.

use std::any::{type_name, TypeId};
use std::collections::{BTreeMap, HashMap};
use std::marker::PhantomData;
use std::sync::Arc;

use ferry_core::{
    FerryError, FromSettings, QualifiedName, Role, TransferManager, TransferPlugin,
    TransferSettings,
};
use tracing::{debug, info};

use crate::binder::Binder;
use crate::manifest::PluginManifest;
use crate::naming::{BackendId, NamingConvention};

/// Status of a backend in the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PluginStatus {
    /// Backend is active and may be used.
    Enabled,
    /// Backend is explicitly disabled by the user.
    Disabled,
    /// Backend is compiled in but missing required configuration.
    NotConfigured,
}

impl std::fmt::Display for PluginStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PluginStatus::Enabled => write!(f, "enabled"),
            PluginStatus::Disabled => write!(f, "disabled"),
            PluginStatus::NotConfigured => write!(f, "not-configured"),
        }
    }
}

/// Creates plugin descriptors.
pub trait PluginFactory: Send + Sync {
    fn create(&self) -> Box<dyn TransferPlugin>;
}

/// Creates empty settings objects.
pub trait SettingsFactory: Send + Sync {
    fn create(&self) -> Box<dyn TransferSettings>;
}

/// Creates managers bound to a settings object.
pub trait ManagerFactory: Send + Sync {
    /// Fails with `SettingsMismatch` when `settings` belongs to another backend.
    fn create(
        &self,
        settings: Box<dyn TransferSettings>,
    ) -> Result<Box<dyn TransferManager>, FerryError>;
}

/// Factory backed by a concrete Rust type.
///
/// Implements `PluginFactory` and `SettingsFactory` for `Default` types and
/// `ManagerFactory` for managers built with `FromSettings`.
pub struct TypeFactory<T>(PhantomData<fn() -> T>);

impl<T> TypeFactory<T> {
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Default for TypeFactory<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: TransferPlugin + Default> PluginFactory for TypeFactory<T> {
    fn create(&self) -> Box<dyn TransferPlugin> {
        Box::new(T::default())
    }
}

impl<T: TransferSettings + Default> SettingsFactory for TypeFactory<T> {
    fn create(&self) -> Box<dyn TransferSettings> {
        Box::new(T::default())
    }
}

impl<T> ManagerFactory for TypeFactory<T>
where
    T: TransferManager + FromSettings,
{
    fn create(
        &self,
        settings: Box<dyn TransferSettings>,
    ) -> Result<Box<dyn TransferManager>, FerryError> {
        let found = (*settings).concrete_type_name();
        let settings = settings
            .into_any()
            .downcast::<T::Settings>()
            .map_err(|_| FerryError::SettingsMismatch {
                manager: type_name::<T>().to_string(),
                found: found.to_string(),
            })?;
        Ok(Box::new(T::from_settings(*settings)?))
    }
}

/// A factory tagged with the role it serves.
#[derive(Clone)]
pub enum Component {
    Plugin(Arc<dyn PluginFactory>),
    Settings(Arc<dyn SettingsFactory>),
    Manager(Arc<dyn ManagerFactory>),
}

impl Component {
    /// The capability this component satisfies.
    pub fn role(&self) -> Role {
        match self {
            Component::Plugin(_) => Role::Plugin,
            Component::Settings(_) => Role::Settings,
            Component::Manager(_) => Role::Manager,
        }
    }

    pub fn as_plugin(&self) -> Option<&Arc<dyn PluginFactory>> {
        match self {
            Component::Plugin(factory) => Some(factory),
            _ => None,
        }
    }

    pub fn as_settings(&self) -> Option<&Arc<dyn SettingsFactory>> {
        match self {
            Component::Settings(factory) => Some(factory),
            _ => None,
        }
    }

    pub fn as_manager(&self) -> Option<&Arc<dyn ManagerFactory>> {
        match self {
            Component::Manager(factory) => Some(factory),
            _ => None,
        }
    }
}

impl std::fmt::Debug for Component {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Component").field(&self.role()).finish()
    }
}

/// A component registered under a qualified name.
#[derive(Debug, Clone)]
pub struct RegisteredComponent {
    pub name: QualifiedName,
    pub component: Component,
    /// Rust type behind the component, if registered from one.
    pub type_name: Option<&'static str>,
}

/// A registered backend with its manifest and status.
#[derive(Debug, Clone)]
pub struct BackendEntry {
    pub id: BackendId,
    pub manifest: PluginManifest,
    pub status: PluginStatus,
}

/// Registry of compiled-in backend components.
///
/// Stores components keyed by qualified name, a reverse index from Rust
/// types to names, and one entry per registered backend.
pub struct ComponentRegistry {
    convention: NamingConvention,
    components: HashMap<QualifiedName, RegisteredComponent>,
    types: HashMap<TypeId, QualifiedName>,
    backends: BTreeMap<BackendId, BackendEntry>,
}

impl ComponentRegistry {
    /// Create an empty registry using the default naming convention.
    pub fn new() -> Self {
        Self::with_convention(NamingConvention::default())
    }

    /// Create an empty registry using the given naming convention.
    pub fn with_convention(convention: NamingConvention) -> Self {
        Self {
            convention,
            components: HashMap::new(),
            types: HashMap::new(),
            backends: BTreeMap::new(),
        }
    }

    pub fn convention(&self) -> &NamingConvention {
        &self.convention
    }

    /// A binder resolving siblings against this registry.
    pub fn binder(&self) -> Binder<'_> {
        Binder::new(self)
    }

    /// Register a bare component under an explicit name.
    pub fn register_component(
        &mut self,
        name: QualifiedName,
        component: Component,
    ) -> Result<(), FerryError> {
        self.insert(name, component, None)
    }

    /// Register a plugin type under an explicit name.
    pub fn register_plugin_type<P>(&mut self, name: QualifiedName) -> Result<(), FerryError>
    where
        P: TransferPlugin + Default,
    {
        self.insert_typed::<P>(name, Component::Plugin(Arc::new(TypeFactory::<P>::new())))
    }

    /// Register a settings type under an explicit name.
    pub fn register_settings_type<S>(&mut self, name: QualifiedName) -> Result<(), FerryError>
    where
        S: TransferSettings + Default,
    {
        self.insert_typed::<S>(name, Component::Settings(Arc::new(TypeFactory::<S>::new())))
    }

    /// Register a manager type under an explicit name.
    pub fn register_manager_type<M>(&mut self, name: QualifiedName) -> Result<(), FerryError>
    where
        M: TransferManager + FromSettings,
    {
        self.insert_typed::<M>(name, Component::Manager(Arc::new(TypeFactory::<M>::new())))
    }

    /// Register a complete backend with default status `Enabled`.
    ///
    /// The three component names are synthesized from the manifest's backend
    /// identifier. Nothing is registered if any name is already taken.
    pub fn register_backend<P, S, M>(
        &mut self,
        manifest: PluginManifest,
    ) -> Result<BackendId, FerryError>
    where
        P: TransferPlugin + Default,
        S: TransferSettings + Default,
        M: TransferManager + FromSettings<Settings = S>,
    {
        self.register_backend_with_status::<P, S, M>(manifest, PluginStatus::Enabled)
    }

    /// Register a complete backend with an explicit status.
    pub fn register_backend_with_status<P, S, M>(
        &mut self,
        manifest: PluginManifest,
        status: PluginStatus,
    ) -> Result<BackendId, FerryError>
    where
        P: TransferPlugin + Default,
        S: TransferSettings + Default,
        M: TransferManager + FromSettings<Settings = S>,
    {
        let id = BackendId::new(manifest.backend.clone())?;
        if self.backends.contains_key(&id) {
            return Err(FerryError::DuplicateBackend { id: id.to_string() });
        }

        let plugin = self.convention.synthesize(&id, Role::Plugin);
        let settings = self.convention.synthesize(&id, Role::Settings);
        let manager = self.convention.synthesize(&id, Role::Manager);
        for name in [&plugin, &settings, &manager] {
            if self.components.contains_key(name) {
                return Err(FerryError::DuplicateComponent {
                    name: name.to_string(),
                });
            }
        }
        let mut seen = Vec::with_capacity(3);
        for (type_id, rust_type) in [
            (TypeId::of::<P>(), type_name::<P>()),
            (TypeId::of::<S>(), type_name::<S>()),
            (TypeId::of::<M>(), type_name::<M>()),
        ] {
            // One Rust type cannot fill two roles of the same backend either.
            if self.types.contains_key(&type_id) || seen.contains(&type_id) {
                return Err(FerryError::DuplicateComponent {
                    name: rust_type.to_string(),
                });
            }
            seen.push(type_id);
        }

        self.register_plugin_type::<P>(plugin)?;
        self.register_settings_type::<S>(settings)?;
        self.register_manager_type::<M>(manager)?;

        info!(backend = %id, plugin = %manifest.id, status = %status, "backend registered");
        self.backends.insert(
            id.clone(),
            BackendEntry {
                id: id.clone(),
                manifest,
                status,
            },
        );
        Ok(id)
    }

    /// Look up a component by exact name.
    pub fn component(&self, name: &QualifiedName) -> Option<&RegisteredComponent> {
        self.components.get(name)
    }

    /// The name a Rust type was registered under.
    pub fn name_of<T: 'static>(&self) -> Option<&QualifiedName> {
        self.types.get(&TypeId::of::<T>())
    }

    /// Get a backend entry by identifier.
    pub fn get(&self, id: &BackendId) -> Option<&BackendEntry> {
        self.backends.get(id)
    }

    /// Get all enabled backends, sorted by identifier.
    pub fn get_enabled(&self) -> Vec<&BackendEntry> {
        self.backends
            .values()
            .filter(|e| e.status == PluginStatus::Enabled)
            .collect()
    }

    /// List all backend entries, sorted by identifier.
    pub fn list_all(&self) -> Vec<&BackendEntry> {
        self.backends.values().collect()
    }

    /// Toggle a backend's enabled status.
    pub fn set_enabled(&mut self, id: &BackendId, enabled: bool) -> Result<(), FerryError> {
        let entry = self
            .backends
            .get_mut(id)
            .ok_or_else(|| FerryError::BackendNotFound { id: id.to_string() })?;
        entry.status = if enabled {
            PluginStatus::Enabled
        } else {
            PluginStatus::Disabled
        };
        Ok(())
    }

    /// Set an explicit status on a backend.
    pub fn set_status(&mut self, id: &BackendId, status: PluginStatus) -> Result<(), FerryError> {
        let entry = self
            .backends
            .get_mut(id)
            .ok_or_else(|| FerryError::BackendNotFound { id: id.to_string() })?;
        entry.status = status;
        Ok(())
    }

    /// Returns the number of registered backends.
    pub fn len(&self) -> usize {
        self.backends.len()
    }

    /// Returns true if no backends are registered.
    pub fn is_empty(&self) -> bool {
        self.backends.is_empty()
    }

    /// A Rust type backs at most one qualified name.
    fn insert_typed<T: 'static>(
        &mut self,
        name: QualifiedName,
        component: Component,
    ) -> Result<(), FerryError> {
        if self.types.contains_key(&TypeId::of::<T>()) {
            return Err(FerryError::DuplicateComponent {
                name: type_name::<T>().to_string(),
            });
        }
        self.insert(name.clone(), component, Some(type_name::<T>()))?;
        self.types.insert(TypeId::of::<T>(), name);
        Ok(())
    }

    fn insert(
        &mut self,
        name: QualifiedName,
        component: Component,
        type_name: Option<&'static str>,
    ) -> Result<(), FerryError> {
        if self.components.contains_key(&name) {
            return Err(FerryError::DuplicateComponent {
                name: name.to_string(),
            });
        }
        debug!(name = %name, role = %component.role(), "component registered");
        self.components.insert(
            name.clone(),
            RegisteredComponent {
                name,
                component,
                type_name,
            },
        );
        Ok(())
    }
}

impl Default for ComponentRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{
        dummy_registry, test_manifest, DummyManager, DummyPlugin, DummySettings, OtherSettings,
    };
    use tracing_test::traced_test;

    #[test]
    fn register_backend_synthesizes_three_names() {
        let registry = dummy_registry();
        for name in [
            "org.ferry.plugins.dummy_storage.DummyStorageTransferPlugin",
            "org.ferry.plugins.dummy_storage.DummyStorageTransferSettings",
            "org.ferry.plugins.dummy_storage.DummyStorageTransferManager",
        ] {
            assert!(registry.component(&QualifiedName::parse(name)).is_some(), "{name}");
        }
        assert_eq!(
            registry.name_of::<DummyManager>().map(ToString::to_string).as_deref(),
            Some("org.ferry.plugins.dummy_storage.DummyStorageTransferManager")
        );
    }

    #[test]
    fn register_and_get_roundtrip() {
        let registry = dummy_registry();
        let id = BackendId::new("DummyStorage").unwrap();
        let entry = registry.get(&id).unwrap();
        assert_eq!(entry.manifest.id, "dummy");
        assert_eq!(entry.status, PluginStatus::Enabled);
    }

    #[test]
    fn register_backend_rejects_duplicate_backend() {
        let mut registry = dummy_registry();
        let err = registry
            .register_backend::<DummyPlugin<1>, DummySettings<1>, DummyManager<1>>(
                test_manifest("dummy2", "DummyStorage"),
            )
            .unwrap_err();
        assert!(matches!(err, FerryError::DuplicateBackend { .. }));
    }

    #[test]
    fn register_backend_rejects_reused_types() {
        let mut registry = dummy_registry();
        let err = registry
            .register_backend::<DummyPlugin, DummySettings, DummyManager>(test_manifest(
                "again",
                "AgainStorage",
            ))
            .unwrap_err();
        assert!(matches!(err, FerryError::DuplicateComponent { .. }));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn register_backend_rejects_invalid_identifier() {
        let mut registry = ComponentRegistry::new();
        let err = registry
            .register_backend::<DummyPlugin, DummySettings, DummyManager>(test_manifest(
                "bad", "bad_id",
            ))
            .unwrap_err();
        assert!(matches!(err, FerryError::InvalidBackendId(_)));
        assert!(registry.is_empty());
    }

    #[test]
    fn register_backend_leaves_registry_untouched_on_name_clash() {
        let mut registry = ComponentRegistry::new();
        registry
            .register_settings_type::<OtherSettings>(QualifiedName::parse(
                "org.ferry.plugins.dummy_storage.DummyStorageTransferManager",
            ))
            .unwrap();

        let err = registry
            .register_backend::<DummyPlugin, DummySettings, DummyManager>(test_manifest(
                "dummy",
                "DummyStorage",
            ))
            .unwrap_err();
        assert!(matches!(err, FerryError::DuplicateComponent { .. }));
        assert!(registry.is_empty());
        assert!(registry.name_of::<DummyPlugin>().is_none());
        assert!(registry
            .component(&QualifiedName::parse(
                "org.ferry.plugins.dummy_storage.DummyStorageTransferPlugin"
            ))
            .is_none());
    }

    impl TransferPlugin for DummySettings<7> {
        fn id(&self) -> &str {
            "shared"
        }
        fn name(&self) -> &str {
            "Shared"
        }
        fn version(&self) -> semver::Version {
            semver::Version::new(0, 1, 0)
        }
    }

    #[test]
    fn register_backend_rejects_one_type_in_two_roles() {
        let mut registry = ComponentRegistry::new();
        let err = registry
            .register_backend::<DummySettings<7>, DummySettings<7>, DummyManager<7>>(
                test_manifest("shared", "SharedStorage"),
            )
            .unwrap_err();
        assert!(matches!(err, FerryError::DuplicateComponent { .. }));
        assert!(registry.is_empty());
        assert!(registry.name_of::<DummySettings<7>>().is_none());
        assert!(registry
            .component(&QualifiedName::parse(
                "org.ferry.plugins.shared_storage.SharedStorageTransferPlugin"
            ))
            .is_none());

        registry
            .register_backend::<DummyPlugin<7>, DummySettings<7>, DummyManager<7>>(test_manifest(
                "shared",
                "SharedStorage",
            ))
            .unwrap();
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn register_component_rejects_duplicate_name() {
        let mut registry = ComponentRegistry::new();
        let name = QualifiedName::parse("org.ferry.plugins.x.XTransferPlugin");
        let component = Component::Plugin(Arc::new(TypeFactory::<DummyPlugin>::new()));
        registry.register_component(name.clone(), component.clone()).unwrap();
        assert!(matches!(
            registry.register_component(name, component),
            Err(FerryError::DuplicateComponent { .. })
        ));
        // Bare components carry no Rust type.
        assert!(registry.name_of::<DummyPlugin>().is_none());
    }

    #[test]
    fn manager_factory_rejects_foreign_settings() {
        let factory = TypeFactory::<DummyManager>::new();
        let err = ManagerFactory::create(&factory, Box::new(OtherSettings))
            .err()
            .unwrap();
        match err {
            FerryError::SettingsMismatch { manager, found } => {
                assert!(manager.contains("DummyManager"));
                assert!(found.contains("OtherSettings"));
            }
            other => panic!("unexpected error: {other}"),
        }

        let settings = DummySettings::with_target("t");
        assert!(ManagerFactory::create(&factory, Box::new(settings)).is_ok());
    }

    #[test]
    fn get_enabled_filters_by_status() {
        let mut registry = dummy_registry();
        registry
            .register_backend_with_status::<DummyPlugin<1>, DummySettings<1>, DummyManager<1>>(
                test_manifest("other", "OtherStorage"),
                PluginStatus::Disabled,
            )
            .unwrap();

        let enabled = registry.get_enabled();
        assert_eq!(enabled.len(), 1);
        assert_eq!(enabled[0].id.as_str(), "DummyStorage");
    }

    #[test]
    fn set_enabled_toggles_status() {
        let mut registry = dummy_registry();
        let id = BackendId::new("DummyStorage").unwrap();

        registry.set_enabled(&id, false).unwrap();
        assert_eq!(registry.get(&id).unwrap().status, PluginStatus::Disabled);

        registry.set_enabled(&id, true).unwrap();
        assert_eq!(registry.get(&id).unwrap().status, PluginStatus::Enabled);

        registry.set_status(&id, PluginStatus::NotConfigured).unwrap();
        assert_eq!(registry.get(&id).unwrap().status, PluginStatus::NotConfigured);
    }

    #[test]
    fn set_enabled_returns_error_for_unknown_backend() {
        let mut registry = ComponentRegistry::new();
        let id = BackendId::new("Nonexistent").unwrap();
        assert!(matches!(
            registry.set_enabled(&id, true),
            Err(FerryError::BackendNotFound { .. })
        ));
    }

    #[test]
    fn list_all_returns_sorted() {
        let mut registry = ComponentRegistry::new();
        assert!(registry.is_empty());
        registry
            .register_backend::<DummyPlugin<1>, DummySettings<1>, DummyManager<1>>(
                test_manifest("z", "Zebra"),
            )
            .unwrap();
        registry
            .register_backend::<DummyPlugin<2>, DummySettings<2>, DummyManager<2>>(
                test_manifest("a", "Alpha"),
            )
            .unwrap();
        registry
            .register_backend::<DummyPlugin<3>, DummySettings<3>, DummyManager<3>>(
                test_manifest("m", "Middle"),
            )
            .unwrap();

        let all: Vec<&str> = registry.list_all().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(all, vec!["Alpha", "Middle", "Zebra"]);
        assert_eq!(registry.len(), 3);
    }

    #[test]
    #[traced_test]
    fn registration_is_logged() {
        let _registry = dummy_registry();
        assert!(logs_contain("backend registered"));
        assert!(logs_contain("DummyStorage"));
    }
}
