// SPDX-FileCopyrightText: 2026 Ferry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugin role: identity and metadata of a backend.

/// Describes a transfer backend.
///
/// Plugins carry no connection state; the registry creates them on demand
/// to display metadata or to start binding the settings and manager.
pub trait TransferPlugin: Send + Sync + 'static {
    /// Short machine identifier (e.g., "local", "ftp").
    fn id(&self) -> &str;

    /// Human-readable name.
    fn name(&self) -> &str;

    /// Semantic version of the backend implementation.
    fn version(&self) -> semver::Version;
}
