// SPDX-FileCopyrightText: 2026 Ferry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dummy backend components shared by unit tests.
//!
//! The const parameter stamps out distinct Rust types, since a type can only
//! be registered under one name.

use std::collections::BTreeMap;
use std::path::Path;

use async_trait::async_trait;
use ferry_core::{
    FerryError, FromSettings, RemoteFile, RemoteFileKind, TransferManager, TransferPlugin,
    TransferSettings,
};

use crate::manifest::PluginManifest;
use crate::registry::ComponentRegistry;

pub(crate) fn test_manifest(id: &str, backend: &str) -> PluginManifest {
    PluginManifest {
        id: id.to_string(),
        name: format!("{backend} backend"),
        version: semver::Version::new(0, 1, 0),
        description: format!("Test backend {id}"),
        backend: backend.to_string(),
        author: None,
        config_keys: vec![],
    }
}

/// Registry holding the `DummyStorage` backend built from the `0` types.
pub(crate) fn dummy_registry() -> ComponentRegistry {
    let mut registry = ComponentRegistry::new();
    registry
        .register_backend::<DummyPlugin, DummySettings, DummyManager>(test_manifest(
            "dummy",
            "DummyStorage",
        ))
        .unwrap();
    registry
}

#[derive(Default)]
pub(crate) struct DummyPlugin<const N: u8 = 0>;

impl<const N: u8> TransferPlugin for DummyPlugin<N> {
    fn id(&self) -> &str {
        "dummy"
    }
    fn name(&self) -> &str {
        "Dummy"
    }
    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }
}

#[derive(Debug, Default)]
pub(crate) struct DummySettings<const N: u8 = 0> {
    pub(crate) target: Option<String>,
}

impl DummySettings {
    pub(crate) fn with_target(target: &str) -> Self {
        Self {
            target: Some(target.to_string()),
        }
    }
}

impl<const N: u8> TransferSettings for DummySettings<N> {
    fn field_names(&self) -> &'static [&'static str] {
        &["target"]
    }
    fn get_field(&self, key: &str) -> Option<String> {
        (key == "target").then(|| self.target.clone()).flatten()
    }
    fn set_field(&mut self, key: &str, value: &str) -> Result<(), FerryError> {
        if key != "target" {
            return Err(FerryError::Config(format!("unknown field {key}")));
        }
        self.target = Some(value.to_string());
        Ok(())
    }
}

#[derive(Debug, Default)]
pub(crate) struct OtherSettings;

impl TransferSettings for OtherSettings {
    fn field_names(&self) -> &'static [&'static str] {
        &[]
    }
    fn get_field(&self, _key: &str) -> Option<String> {
        None
    }
    fn set_field(&mut self, key: &str, _value: &str) -> Result<(), FerryError> {
        Err(FerryError::Config(format!("unknown field {key}")))
    }
}

pub(crate) struct DummyManager<const N: u8 = 0> {
    pub(crate) target: Option<String>,
}

impl<const N: u8> FromSettings for DummyManager<N> {
    type Settings = DummySettings<N>;

    fn from_settings(settings: DummySettings<N>) -> Result<Self, FerryError> {
        Ok(Self {
            target: settings.target,
        })
    }
}

#[async_trait]
impl<const N: u8> TransferManager for DummyManager<N> {
    async fn connect(&mut self) -> Result<(), FerryError> {
        Ok(())
    }
    async fn disconnect(&mut self) -> Result<(), FerryError> {
        Ok(())
    }
    async fn init(&mut self, _create_if_required: bool) -> Result<(), FerryError> {
        Ok(())
    }
    async fn upload(&self, _local: &Path, _remote: &RemoteFile) -> Result<(), FerryError> {
        Ok(())
    }
    async fn download(&self, _remote: &RemoteFile, _local: &Path) -> Result<(), FerryError> {
        Ok(())
    }
    async fn move_file(&self, _s: &RemoteFile, _t: &RemoteFile) -> Result<(), FerryError> {
        Ok(())
    }
    async fn delete(&self, _remote: &RemoteFile) -> Result<bool, FerryError> {
        Ok(false)
    }
    async fn list(&self, _kind: RemoteFileKind) -> Result<BTreeMap<String, RemoteFile>, FerryError> {
        Ok(BTreeMap::new())
    }
    async fn test_target_exists(&self) -> Result<bool, FerryError> {
        Ok(self.target.is_some())
    }
    async fn test_target_can_write(&self) -> Result<bool, FerryError> {
        Ok(true)
    }
    async fn test_target_can_create(&self) -> Result<bool, FerryError> {
        Ok(true)
    }
    async fn test_repo_file_exists(&self) -> Result<bool, FerryError> {
        Ok(false)
    }
}
