// SPDX-FileCopyrightText: 2026 Ferry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Manager of the `Local` backend.
//!
//! Objects are plain files below the repository directory, one folder per
//! [`RemoteFileKind`]. Uploads are written to the `temporary` folder first and
//! renamed into place so readers never see partial files.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use ferry_core::{
    FerryError, FromSettings, RemoteFile, RemoteFileKind, TransferManager, TransferSettings,
};
use tokio::fs;
use tracing::{debug, warn};

use crate::settings::LocalTransferSettings;

const WRITE_PROBE: &str = ".ferry-write-test";

pub struct LocalTransferManager {
    root: PathBuf,
    connected: bool,
}

impl LocalTransferManager {
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    fn path_of(&self, remote: &RemoteFile) -> Result<PathBuf, FerryError> {
        remote.check_name()?;
        Ok(match remote.kind.folder() {
            Some(folder) => self.root.join(folder).join(&remote.name),
            None => self.root.join(&remote.name),
        })
    }

    fn not_found(&self, remote: &RemoteFile) -> FerryError {
        FerryError::StorageNotFound(format!(
            "{} does not exist in {}",
            remote.relative_path(),
            self.root.display()
        ))
    }
}

impl FromSettings for LocalTransferManager {
    type Settings = LocalTransferSettings;

    fn from_settings(settings: LocalTransferSettings) -> Result<Self, FerryError> {
        settings.validate()?;
        let root = settings.repository_path()?.to_path_buf();
        Ok(Self {
            root,
            connected: false,
        })
    }
}

#[async_trait]
impl TransferManager for LocalTransferManager {
    async fn connect(&mut self) -> Result<(), FerryError> {
        debug!(root = %self.root.display(), "local backend connected");
        self.connected = true;
        Ok(())
    }

    async fn disconnect(&mut self) -> Result<(), FerryError> {
        self.connected = false;
        Ok(())
    }

    async fn init(&mut self, create_if_required: bool) -> Result<(), FerryError> {
        if !self.test_target_exists().await? {
            if !create_if_required {
                return Err(FerryError::StorageNotFound(format!(
                    "repository directory {} does not exist",
                    self.root.display()
                )));
            }
            fs::create_dir_all(&self.root).await.map_err(|e| {
                FerryError::transfer(format!("cannot create {}", self.root.display()), e)
            })?;
        }

        for folder in RemoteFileKind::folders() {
            let dir = self.root.join(folder);
            fs::create_dir_all(&dir)
                .await
                .map_err(|e| FerryError::transfer(format!("cannot create {}", dir.display()), e))?;
        }
        Ok(())
    }

    async fn upload(&self, local: &Path, remote: &RemoteFile) -> Result<(), FerryError> {
        let target = self.path_of(remote)?;
        let staging = self
            .root
            .join(RemoteFileKind::Temp.folder().unwrap_or("temporary"))
            .join(format!("upload-{}", remote.relative_path().replace('/', "-")));

        if let Some(parent) = staging.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| FerryError::transfer("cannot prepare staging folder", e))?;
        }
        fs::copy(local, &staging).await.map_err(|e| {
            FerryError::transfer(format!("cannot read {}", local.display()), e)
        })?;
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| FerryError::transfer(format!("cannot create {}", parent.display()), e))?;
        }
        fs::rename(&staging, &target).await.map_err(|e| {
            FerryError::transfer(format!("cannot move upload into {}", target.display()), e)
        })?;

        debug!(remote = %remote.relative_path(), "uploaded");
        Ok(())
    }

    async fn download(&self, remote: &RemoteFile, local: &Path) -> Result<(), FerryError> {
        match fs::copy(self.path_of(remote)?, local).await {
            Ok(_) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(self.not_found(remote)),
            Err(e) => Err(FerryError::transfer(
                format!("cannot download {}", remote.relative_path()),
                e,
            )),
        }
    }

    async fn move_file(&self, source: &RemoteFile, target: &RemoteFile) -> Result<(), FerryError> {
        let from = self.path_of(source)?;
        let to = self.path_of(target)?;
        if let Some(parent) = to.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| FerryError::transfer(format!("cannot create {}", parent.display()), e))?;
        }
        match fs::rename(&from, &to).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(self.not_found(source)),
            Err(e) => Err(FerryError::transfer(
                format!(
                    "cannot move {} to {}",
                    source.relative_path(),
                    target.relative_path()
                ),
                e,
            )),
        }
    }

    async fn delete(&self, remote: &RemoteFile) -> Result<bool, FerryError> {
        match fs::remove_file(self.path_of(remote)?).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(FerryError::transfer(
                format!("cannot delete {}", remote.relative_path()),
                e,
            )),
        }
    }

    async fn list(&self, kind: RemoteFileKind) -> Result<BTreeMap<String, RemoteFile>, FerryError> {
        let mut files = BTreeMap::new();

        let Some(folder) = kind.folder() else {
            // Singleton kinds sit at the root under a fixed name.
            if let Some(name) = kind.fixed_name() {
                let remote = RemoteFile::new(kind, name);
                if fs::try_exists(self.path_of(&remote)?).await.unwrap_or(false) {
                    files.insert(name.to_string(), remote);
                }
            }
            return Ok(files);
        };

        let dir = self.root.join(folder);
        let mut entries = match fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(files),
            Err(e) => {
                return Err(FerryError::transfer(
                    format!("cannot list {}", dir.display()),
                    e,
                ));
            }
        };

        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| FerryError::transfer(format!("cannot list {}", dir.display()), e))?
        {
            let is_file = entry.file_type().await.is_ok_and(|t| t.is_file());
            if let (true, Some(name)) = (is_file, entry.file_name().to_str()) {
                files.insert(name.to_string(), RemoteFile::new(kind, name));
            }
        }
        Ok(files)
    }

    async fn test_target_exists(&self) -> Result<bool, FerryError> {
        Ok(fs::metadata(&self.root)
            .await
            .is_ok_and(|meta| meta.is_dir()))
    }

    async fn test_target_can_write(&self) -> Result<bool, FerryError> {
        let probe = self.root.join(WRITE_PROBE);
        if fs::write(&probe, b"ferry").await.is_err() {
            return Ok(false);
        }
        if let Err(e) = fs::remove_file(&probe).await {
            warn!(path = %probe.display(), error = %e, "cannot remove write test file");
        }
        Ok(true)
    }

    async fn test_target_can_create(&self) -> Result<bool, FerryError> {
        // The nearest existing ancestor decides whether the target can be made.
        let mut ancestor = self.root.parent();
        while let Some(dir) = ancestor {
            if let Ok(meta) = fs::metadata(dir).await {
                return Ok(meta.is_dir() && !meta.permissions().readonly());
            }
            ancestor = dir.parent();
        }
        Ok(false)
    }

    async fn test_repo_file_exists(&self) -> Result<bool, FerryError> {
        Ok(fs::metadata(self.path_of(&RemoteFile::repo())?)
            .await
            .is_ok_and(|meta| meta.is_file()))
    }
}
