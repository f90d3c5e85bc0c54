// SPDX-FileCopyrightText: 2026 Ferry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared by the capability contracts and the plugin binder.

use std::fmt;
use std::path::{Component, Path};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

use crate::error::FerryError;

/// One of the three responsibilities every backend implements.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumString, Serialize, Deserialize,
)]
#[strum(ascii_case_insensitive)]
pub enum Role {
    Plugin,
    Settings,
    Manager,
}

impl Role {
    /// All roles, in registration order.
    pub const ALL: [Role; 3] = [Role::Plugin, Role::Settings, Role::Manager];

    /// Simple-name suffix carried by the conventional type of this role.
    pub fn suffix(self) -> &'static str {
        match self {
            Role::Plugin => "TransferPlugin",
            Role::Settings => "TransferSettings",
            Role::Manager => "TransferManager",
        }
    }
}

/// Fully qualified name of a registered component, e.g.
/// `org.ferry.plugins.ftp_storage.FtpStorageTransferPlugin`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QualifiedName {
    namespace: String,
    simple_name: String,
}

impl QualifiedName {
    /// Builds a name from its namespace path and simple name.
    pub fn new(namespace: impl Into<String>, simple_name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            simple_name: simple_name.into(),
        }
    }

    /// Splits a dotted name at its last `.`. A name without a dot lives in
    /// the empty namespace.
    pub fn parse(name: &str) -> Self {
        match name.rsplit_once('.') {
            Some((namespace, simple)) => Self::new(namespace, simple),
            None => Self::new("", name),
        }
    }

    /// The enclosing namespace path.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// The unqualified type name.
    pub fn simple_name(&self) -> &str {
        &self.simple_name
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.namespace.is_empty() {
            f.write_str(&self.simple_name)
        } else {
            write!(f, "{}.{}", self.namespace, self.simple_name)
        }
    }
}

impl FromStr for QualifiedName {
    type Err = FerryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = QualifiedName::parse(s.trim());
        if name.simple_name.is_empty() {
            return Err(FerryError::Config(format!(
                "qualified name `{s}` has an empty type name"
            )));
        }
        Ok(name)
    }
}

/// Category of a backend-resident object. Each kind lives in its own folder.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
pub enum RemoteFileKind {
    /// The repository marker file.
    Repo,
    /// The master key salt file.
    Master,
    Database,
    Multichunk,
    Action,
    Transaction,
    Temp,
}

impl RemoteFileKind {
    /// Folder holding objects of this kind, or `None` for the repository root.
    pub fn folder(self) -> Option<&'static str> {
        match self {
            RemoteFileKind::Repo | RemoteFileKind::Master => None,
            RemoteFileKind::Database => Some("databases"),
            RemoteFileKind::Multichunk => Some("multichunks"),
            RemoteFileKind::Action => Some("actions"),
            RemoteFileKind::Transaction => Some("transactions"),
            RemoteFileKind::Temp => Some("temporary"),
        }
    }

    /// Every per-kind folder below the repository root.
    pub fn folders() -> impl Iterator<Item = &'static str> {
        Self::iter().filter_map(Self::folder)
    }

    /// Fixed object name for singleton kinds.
    pub fn fixed_name(self) -> Option<&'static str> {
        match self {
            RemoteFileKind::Repo => Some("repo"),
            RemoteFileKind::Master => Some("master"),
            _ => None,
        }
    }
}

/// An object stored on a backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RemoteFile {
    pub kind: RemoteFileKind,
    pub name: String,
}

impl RemoteFile {
    pub fn new(kind: RemoteFileKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
        }
    }

    /// The repository marker object.
    pub fn repo() -> Self {
        Self::new(RemoteFileKind::Repo, "repo")
    }

    /// Fails unless the name is exactly one plain path component, so the
    /// object cannot land outside its kind's folder.
    pub fn check_name(&self) -> Result<(), FerryError> {
        let mut components = Path::new(&self.name).components();
        let single = matches!(
            (components.next(), components.next()),
            (Some(Component::Normal(_)), None)
        );
        if single && !self.name.contains(['/', '\\']) {
            Ok(())
        } else {
            Err(FerryError::InvalidObjectName(self.name.clone()))
        }
    }

    /// Path of this object relative to the repository root, `/`-separated.
    pub fn relative_path(&self) -> String {
        match self.kind.folder() {
            Some(folder) => format!("{folder}/{}", self.name),
            None => self.name.clone(),
        }
    }
}

/// Outcome of probing a backend's storage target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageTestResult {
    pub target_exists: bool,
    pub target_can_write: bool,
    pub target_can_create: bool,
    pub repo_file_exists: bool,
}

impl StorageTestResult {
    /// True when the target exists, is writable, and already holds a repository.
    pub fn is_usable_repo(&self) -> bool {
        self.target_exists && self.target_can_write && self.repo_file_exists
    }
}
