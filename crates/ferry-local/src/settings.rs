// SPDX-FileCopyrightText: 2026 Ferry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Settings of the `Local` backend.

use std::path::{Path, PathBuf};

use ferry_core::{FerryError, TransferSettings};

/// Where the repository directory lives.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocalTransferSettings {
    pub path: Option<PathBuf>,
}

impl LocalTransferSettings {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// The configured repository directory.
    pub fn repository_path(&self) -> Result<&Path, FerryError> {
        self.path
            .as_deref()
            .ok_or_else(|| FerryError::Config("local: `path` is not set".to_string()))
    }
}

impl TransferSettings for LocalTransferSettings {
    fn field_names(&self) -> &'static [&'static str] {
        &["path"]
    }

    fn get_field(&self, key: &str) -> Option<String> {
        match key {
            "path" => self.path.as_ref().map(|p| p.display().to_string()),
            _ => None,
        }
    }

    fn set_field(&mut self, key: &str, value: &str) -> Result<(), FerryError> {
        match key {
            "path" if value.trim().is_empty() => Err(FerryError::Config(
                "local: `path` must not be empty".to_string(),
            )),
            "path" => {
                self.path = Some(PathBuf::from(value));
                Ok(())
            }
            other => Err(FerryError::Config(format!(
                "local: unknown setting `{other}` (expected one of: path)"
            ))),
        }
    }

    fn validate(&self) -> Result<(), FerryError> {
        self.repository_path().map(|_| ())
    }
}
