// SPDX-FileCopyrightText: 2026 Ferry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory transfer backend for deterministic testing.
//!
//! The backend identifier is `MemoryStorage`, so its components register in
//! namespace `<root>.<family>.memory_storage`. Objects live in a
//! [`MemoryStore`] shared between the settings that created a manager and
//! the test that inspects it.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use ferry_core::{
    FerryError, FromSettings, RemoteFile, RemoteFileKind, TransferManager, TransferPlugin,
    TransferSettings,
};
use ferry_plugin::{BackendId, ComponentRegistry, PluginManifest};

/// Backend identifier of the in-memory backend.
pub const MEMORY_BACKEND: &str = "MemoryStorage";

/// Manifest of the in-memory backend.
pub fn manifest() -> PluginManifest {
    PluginManifest {
        id: "memory".to_string(),
        name: "Memory".to_string(),
        version: semver::Version::new(0, 1, 0),
        description: "Volatile in-process storage for tests".to_string(),
        backend: MEMORY_BACKEND.to_string(),
        author: Some("Ferry Contributors".to_string()),
        config_keys: vec!["bucket".to_string()],
    }
}

/// Register the `MemoryStorage` backend's three components.
pub fn register(registry: &mut ComponentRegistry) -> Result<BackendId, FerryError> {
    registry.register_backend::<
        MemoryStorageTransferPlugin,
        MemoryStorageTransferSettings,
        MemoryStorageTransferManager,
    >(manifest())
}

/// Shared object map standing in for a remote bucket.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<StoreState>>,
}

#[derive(Debug, Default)]
struct StoreState {
    created: bool,
    objects: BTreeMap<String, Vec<u8>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose bucket already exists.
    pub async fn created() -> Self {
        let store = Self::new();
        store.state.lock().await.created = true;
        store
    }

    pub async fn is_created(&self) -> bool {
        self.state.lock().await.created
    }

    /// Object bytes at a `/`-separated path relative to the bucket root.
    pub async fn object(&self, path: &str) -> Option<Vec<u8>> {
        self.state.lock().await.objects.get(path).cloned()
    }

    /// Paths of all stored objects, sorted.
    pub async fn paths(&self) -> Vec<String> {
        self.state.lock().await.objects.keys().cloned().collect()
    }
}

/// Plugin component of the `MemoryStorage` backend.
#[derive(Debug, Default)]
pub struct MemoryStorageTransferPlugin;

impl TransferPlugin for MemoryStorageTransferPlugin {
    fn id(&self) -> &str {
        "memory"
    }

    fn name(&self) -> &str {
        "Memory"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }
}

/// Settings component of the `MemoryStorage` backend.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorageTransferSettings {
    pub bucket: Option<String>,
    /// Rejects every write when set.
    pub read_only: bool,
    pub store: MemoryStore,
}

impl MemoryStorageTransferSettings {
    pub fn new(bucket: &str, store: MemoryStore) -> Self {
        Self {
            bucket: Some(bucket.to_string()),
            read_only: false,
            store,
        }
    }
}

impl TransferSettings for MemoryStorageTransferSettings {
    fn field_names(&self) -> &'static [&'static str] {
        &["bucket", "read_only"]
    }

    fn get_field(&self, key: &str) -> Option<String> {
        match key {
            "bucket" => self.bucket.clone(),
            "read_only" => Some(self.read_only.to_string()),
            _ => None,
        }
    }

    fn set_field(&mut self, key: &str, value: &str) -> Result<(), FerryError> {
        match key {
            "bucket" => self.bucket = Some(value.to_string()),
            "read_only" => {
                self.read_only = value.parse().map_err(|_| {
                    FerryError::Config(format!("memory: read_only must be true or false, got `{value}`"))
                })?;
            }
            other => {
                return Err(FerryError::Config(format!(
                    "memory: unknown setting `{other}`"
                )));
            }
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), FerryError> {
        match self.bucket.as_deref() {
            Some(bucket) if !bucket.is_empty() => Ok(()),
            _ => Err(FerryError::Config("memory: `bucket` is not set".to_string())),
        }
    }
}

/// Manager component of the `MemoryStorage` backend.
///
/// Object operations fail until [`TransferManager::connect`] has been called.
pub struct MemoryStorageTransferManager {
    bucket: String,
    read_only: bool,
    store: MemoryStore,
    connected: bool,
}

impl MemoryStorageTransferManager {
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    pub fn store(&self) -> &MemoryStore {
        &self.store
    }

    fn ensure_connected(&self) -> Result<(), FerryError> {
        if self.connected {
            Ok(())
        } else {
            Err(FerryError::Transfer {
                message: format!("memory bucket `{}` is not connected", self.bucket),
                source: None,
            })
        }
    }

    fn ensure_writable(&self) -> Result<(), FerryError> {
        self.ensure_connected()?;
        if self.read_only {
            return Err(FerryError::Transfer {
                message: format!("memory bucket `{}` is read-only", self.bucket),
                source: None,
            });
        }
        Ok(())
    }

    fn missing(&self, remote: &RemoteFile) -> FerryError {
        FerryError::StorageNotFound(format!("{} in bucket {}", remote.relative_path(), self.bucket))
    }
}

impl FromSettings for MemoryStorageTransferManager {
    type Settings = MemoryStorageTransferSettings;

    fn from_settings(settings: MemoryStorageTransferSettings) -> Result<Self, FerryError> {
        settings.validate()?;
        Ok(Self {
            bucket: settings.bucket.unwrap_or_default(),
            read_only: settings.read_only,
            store: settings.store,
            connected: false,
        })
    }
}

#[async_trait]
impl TransferManager for MemoryStorageTransferManager {
    async fn connect(&mut self) -> Result<(), FerryError> {
        self.connected = true;
        Ok(())
    }

    async fn disconnect(&mut self) -> Result<(), FerryError> {
        self.connected = false;
        Ok(())
    }

    async fn init(&mut self, create_if_required: bool) -> Result<(), FerryError> {
        self.ensure_connected()?;
        let mut state = self.store.state.lock().await;
        if !state.created {
            if !create_if_required || self.read_only {
                return Err(FerryError::StorageNotFound(format!(
                    "memory bucket `{}`",
                    self.bucket
                )));
            }
            state.created = true;
        }
        Ok(())
    }

    async fn upload(&self, local: &Path, remote: &RemoteFile) -> Result<(), FerryError> {
        self.ensure_writable()?;
        remote.check_name()?;
        let bytes = tokio::fs::read(local)
            .await
            .map_err(|e| FerryError::transfer(format!("cannot read {}", local.display()), e))?;
        self.store
            .state
            .lock()
            .await
            .objects
            .insert(remote.relative_path(), bytes);
        Ok(())
    }

    async fn download(&self, remote: &RemoteFile, local: &Path) -> Result<(), FerryError> {
        self.ensure_connected()?;
        let bytes = self
            .store
            .object(&remote.relative_path())
            .await
            .ok_or_else(|| self.missing(remote))?;
        tokio::fs::write(local, bytes)
            .await
            .map_err(|e| FerryError::transfer(format!("cannot write {}", local.display()), e))
    }

    async fn move_file(&self, source: &RemoteFile, target: &RemoteFile) -> Result<(), FerryError> {
        self.ensure_writable()?;
        target.check_name()?;
        let mut state = self.store.state.lock().await;
        let bytes = state
            .objects
            .remove(&source.relative_path())
            .ok_or_else(|| self.missing(source))?;
        state.objects.insert(target.relative_path(), bytes);
        Ok(())
    }

    async fn delete(&self, remote: &RemoteFile) -> Result<bool, FerryError> {
        self.ensure_writable()?;
        let mut state = self.store.state.lock().await;
        Ok(state.objects.remove(&remote.relative_path()).is_some())
    }

    async fn list(&self, kind: RemoteFileKind) -> Result<BTreeMap<String, RemoteFile>, FerryError> {
        self.ensure_connected()?;
        let state = self.store.state.lock().await;
        let files = state
            .objects
            .keys()
            .filter_map(|path| {
                let name = match kind.folder() {
                    Some(folder) => path.strip_prefix(folder)?.strip_prefix('/')?,
                    None => (Some(path.as_str()) == kind.fixed_name()).then_some(path.as_str())?,
                };
                Some((name.to_string(), RemoteFile::new(kind, name)))
            })
            .collect();
        Ok(files)
    }

    async fn test_target_exists(&self) -> Result<bool, FerryError> {
        Ok(self.store.is_created().await)
    }

    async fn test_target_can_write(&self) -> Result<bool, FerryError> {
        Ok(!self.read_only && self.store.is_created().await)
    }

    async fn test_target_can_create(&self) -> Result<bool, FerryError> {
        Ok(!self.read_only)
    }

    async fn test_repo_file_exists(&self) -> Result<bool, FerryError> {
        Ok(self.store.object(&RemoteFile::repo().relative_path()).await.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn connected(settings: MemoryStorageTransferSettings) -> MemoryStorageTransferManager {
        let mut manager = MemoryStorageTransferManager::from_settings(settings).unwrap();
        manager.connect().await.unwrap();
        manager
    }

    #[tokio::test]
    async fn operations_require_connection() {
        let manager = MemoryStorageTransferManager::from_settings(
            MemoryStorageTransferSettings::new("b", MemoryStore::created().await),
        )
        .unwrap();
        assert!(matches!(
            manager.list(RemoteFileKind::Database).await,
            Err(FerryError::Transfer { .. })
        ));
    }

    #[tokio::test]
    async fn init_creates_bucket_only_when_asked() {
        let store = MemoryStore::new();
        let mut manager = connected(MemoryStorageTransferSettings::new("b", store.clone())).await;
        assert!(matches!(
            manager.init(false).await,
            Err(FerryError::StorageNotFound(_))
        ));
        manager.init(true).await.unwrap();
        assert!(store.is_created().await);
    }

    #[tokio::test]
    async fn read_only_bucket_rejects_writes() {
        let mut settings = MemoryStorageTransferSettings::new("b", MemoryStore::created().await);
        settings.set_field("read_only", "true").unwrap();
        let manager = connected(settings).await;
        assert!(manager.delete(&RemoteFile::repo()).await.is_err());

        let result = manager.test(true).await.unwrap();
        assert!(result.target_exists);
        assert!(!result.target_can_write);
    }

    #[tokio::test]
    async fn list_filters_by_kind() {
        let store = MemoryStore::created().await;
        {
            let mut state = store.state.lock().await;
            state.objects.insert("repo".to_string(), vec![1]);
            state.objects.insert("databases/db-1".to_string(), vec![2]);
            state.objects.insert("actions/a-1".to_string(), vec![3]);
        }
        let manager = connected(MemoryStorageTransferSettings::new("b", store)).await;

        let dbs = manager.list(RemoteFileKind::Database).await.unwrap();
        assert_eq!(dbs.keys().collect::<Vec<_>>(), vec!["db-1"]);
        let repo = manager.list(RemoteFileKind::Repo).await.unwrap();
        assert!(repo.contains_key("repo"));
        assert!(manager.list(RemoteFileKind::Master).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn nested_object_names_are_rejected() {
        let store = MemoryStore::created().await;
        store
            .state
            .lock()
            .await
            .objects
            .insert("databases/db-1".to_string(), vec![2]);
        let manager = connected(MemoryStorageTransferSettings::new("b", store.clone())).await;

        let err = manager
            .move_file(
                &RemoteFile::new(RemoteFileKind::Database, "db-1"),
                &RemoteFile::new(RemoteFileKind::Database, "../repo"),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, FerryError::InvalidObjectName(_)));
        assert_eq!(store.paths().await, vec!["databases/db-1"]);
    }

    #[test]
    fn settings_fields() {
        let mut settings = MemoryStorageTransferSettings::default();
        assert!(settings.validate().is_err());
        settings.set_field("bucket", "photos").unwrap();
        assert_eq!(settings.get_field("bucket").as_deref(), Some("photos"));
        assert_eq!(settings.get_field("read_only").as_deref(), Some("false"));
        assert!(settings.set_field("read_only", "maybe").is_err());
        assert!(settings.set_field("region", "eu").is_err());
    }
}
