// SPDX-FileCopyrightText: 2026 Ferry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Manager role: transfer operations against a backend.

use std::collections::BTreeMap;
use std::path::Path;

use async_trait::async_trait;

use crate::error::FerryError;
use crate::traits::settings::TransferSettings;
use crate::types::{RemoteFile, RemoteFileKind, StorageTestResult};

/// Performs uploads, downloads, and listings against a backend's storage.
///
/// A manager is created from its backend's settings and owns any connection
/// state. Paths passed to `upload`/`download` are local filesystem paths.
#[async_trait]
pub trait TransferManager: Send + Sync + 'static {
    /// Opens the connection to the storage target.
    async fn connect(&mut self) -> Result<(), FerryError>;

    /// Closes the connection. Calling it twice is a no-op.
    async fn disconnect(&mut self) -> Result<(), FerryError>;

    /// Prepares the repository layout, creating the target first if
    /// `create_if_required` is set.
    async fn init(&mut self, create_if_required: bool) -> Result<(), FerryError>;

    /// Copies a local file to the backend.
    async fn upload(&self, local: &Path, remote: &RemoteFile) -> Result<(), FerryError>;

    /// Copies a backend object to a local file.
    async fn download(&self, remote: &RemoteFile, local: &Path) -> Result<(), FerryError>;

    /// Renames an object on the backend.
    async fn move_file(&self, source: &RemoteFile, target: &RemoteFile) -> Result<(), FerryError>;

    /// Deletes an object. Returns `false` if it did not exist.
    async fn delete(&self, remote: &RemoteFile) -> Result<bool, FerryError>;

    /// Lists all objects of one kind, keyed by name.
    async fn list(&self, kind: RemoteFileKind) -> Result<BTreeMap<String, RemoteFile>, FerryError>;

    async fn test_target_exists(&self) -> Result<bool, FerryError>;

    async fn test_target_can_write(&self) -> Result<bool, FerryError>;

    async fn test_target_can_create(&self) -> Result<bool, FerryError>;

    async fn test_repo_file_exists(&self) -> Result<bool, FerryError>;

    /// Probes the storage target. Creation is only checked when the target
    /// is missing and `create_target` is set.
    async fn test(&self, create_target: bool) -> Result<StorageTestResult, FerryError> {
        let target_exists = self.test_target_exists().await?;
        let target_can_write = target_exists && self.test_target_can_write().await?;
        let target_can_create = if target_exists {
            true
        } else {
            create_target && self.test_target_can_create().await?
        };
        let repo_file_exists = target_exists && self.test_repo_file_exists().await?;

        Ok(StorageTestResult {
            target_exists,
            target_can_write,
            target_can_create,
            repo_file_exists,
        })
    }
}

/// Construction of a manager from its backend's concrete settings type.
///
/// The associated type ties a manager to exactly one settings type, which
/// the registry relies on when binding the two.
pub trait FromSettings: Sized {
    type Settings: TransferSettings;

    fn from_settings(settings: Self::Settings) -> Result<Self, FerryError>;
}
