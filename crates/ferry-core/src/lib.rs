// SPDX-FileCopyrightText: 2026 Ferry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Ferry transfer framework.
//!
//! This crate defines the three capability contracts every transfer backend
//! implements (plugin, settings, manager), the qualified names under which
//! backends are registered, and the error types shared by the workspace.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::{BindError, FerryError};
pub use types::{QualifiedName, RemoteFile, RemoteFileKind, Role, StorageTestResult};

pub use traits::{AsAny, FromSettings, TransferManager, TransferPlugin, TransferSettings};
