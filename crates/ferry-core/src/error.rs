// SPDX-FileCopyrightText: 2026 Ferry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Ferry transfer framework.

use thiserror::Error;

use crate::types::Role;

/// Failure to bind a sibling component by naming convention.
///
/// All three kinds mean a backend broke the naming convention; none of them
/// is transient, so callers should not retry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindError {
    /// The input type's namespace is not `<root>.<family>.<segment>`.
    #[error("type `{type_name}` is not part of a conventionally named backend family")]
    NoBackendIdentifier { type_name: String },

    /// The synthesized sibling name is not registered.
    #[error("no {role} component registered as `{expected}` (resolved from `{from}`)")]
    SiblingNotFound {
        from: String,
        role: Role,
        expected: String,
    },

    /// A component exists under the synthesized name but serves another role.
    #[error("component `{name}` was expected to be a {expected} but is a {actual}")]
    CapabilityMismatch {
        name: String,
        expected: Role,
        actual: Role,
    },
}

/// The primary error type used across Ferry contracts and registries.
#[derive(Debug, Error)]
pub enum FerryError {
    /// Configuration errors (invalid TOML, bad manifest, bad settings field).
    #[error("configuration error: {0}")]
    Config(String),

    /// Transfer errors raised by a backend manager (I/O, protocol, auth).
    #[error("transfer error: {message}")]
    Transfer {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The backend's storage target does not exist or is not a repository.
    #[error("storage target not found: {0}")]
    StorageNotFound(String),

    /// A component is already registered under this qualified name.
    #[error("component already registered: {name}")]
    DuplicateComponent { name: String },

    /// A backend with this identifier is already registered.
    #[error("backend already registered: {id}")]
    DuplicateBackend { id: String },

    /// No backend with this identifier is registered.
    #[error("backend not found: {id}")]
    BackendNotFound { id: String },

    /// A manager was handed settings that belong to another backend.
    #[error("settings type mismatch: {manager} cannot use settings of type {found}")]
    SettingsMismatch { manager: String, found: String },

    /// The string is not a valid capitalized backend identifier.
    #[error("invalid backend identifier `{0}`: expected ASCII letters starting with an uppercase letter")]
    InvalidBackendId(String),

    /// An object name that is not a single path component.
    #[error("invalid object name `{0}`: expected a plain file name")]
    InvalidObjectName(String),

    /// Sibling resolution failed.
    #[error(transparent)]
    Bind(#[from] BindError),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl FerryError {
    /// Wraps an I/O-style error raised while talking to a backend.
    pub fn transfer(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        FerryError::Transfer {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}
