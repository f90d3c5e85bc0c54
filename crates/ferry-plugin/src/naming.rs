// SPDX-FileCopyrightText: 2026 Ferry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Naming convention linking a backend identifier to its three component names.
//!
//! For backend `FtpStorage` under prefix `org.ferry.plugins`, the components
//! live in namespace `org.ferry.plugins.ftp_storage` and are named
//! `FtpStorageTransferPlugin`, `FtpStorageTransferSettings` and
//! `FtpStorageTransferManager`.

use std::fmt;
use std::str::FromStr;

use ferry_core::{FerryError, QualifiedName, Role};
use regex::Regex;

/// Default first part of every backend namespace.
pub const DEFAULT_ROOT: &str = "org.ferry";

/// Default namespace segment grouping all backends below the root.
pub const DEFAULT_FAMILY: &str = "plugins";

/// Converts a capitalized-camel identifier to lowercase-underscore form.
///
/// Every uppercase letter after the first character starts a new word, so
/// `FtpStorage` becomes `ftp_storage` and `HTTPStore` becomes `h_t_t_p_store`.
pub fn to_snake(camel: &str) -> String {
    let mut out = String::with_capacity(camel.len() + 4);
    for (i, c) in camel.chars().enumerate() {
        if c.is_ascii_uppercase() {
            if i > 0 {
                out.push('_');
            }
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Converts a lowercase-underscore identifier to capitalized-camel form.
///
/// Empty words (leading, trailing or doubled underscores) are dropped.
pub fn to_camel(snake: &str) -> String {
    snake
        .split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    let mut w = String::with_capacity(word.len());
                    w.push(first.to_ascii_uppercase());
                    w.extend(chars.map(|c| c.to_ascii_lowercase()));
                    w
                }
                None => String::new(),
            }
        })
        .collect()
}

/// Identifier of one backend in capitalized-camel form (e.g., `FtpStorage`).
///
/// Always non-empty ASCII letters starting with an uppercase letter, which
/// makes `to_camel(to_snake(id)) == id` hold for every value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BackendId(String);

impl BackendId {
    pub fn new(id: impl Into<String>) -> Result<Self, FerryError> {
        let id = id.into();
        let mut chars = id.chars();
        let valid = chars.next().is_some_and(|c| c.is_ascii_uppercase())
            && chars.all(|c| c.is_ascii_alphabetic());
        if valid {
            Ok(Self(id))
        } else {
            Err(FerryError::InvalidBackendId(id))
        }
    }

    /// Builds an identifier from a lowercase-underscore namespace segment.
    ///
    /// Returns `None` if the segment holds no letters.
    pub fn from_segment(segment: &str) -> Option<Self> {
        Self::new(to_camel(segment)).ok()
    }

    /// The lowercase-underscore namespace segment of this backend.
    pub fn segment(&self) -> String {
        to_snake(&self.0)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BackendId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for BackendId {
    type Err = FerryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// The fixed `<root>.<family>.<segment>` namespace rule.
#[derive(Debug, Clone)]
pub struct NamingConvention {
    prefix: String,
    pattern: Regex,
}

impl NamingConvention {
    /// Builds a convention for backends under `<root>.<family>`.
    ///
    /// Both parts must be dot-separated identifier paths.
    pub fn new(root: &str, family: &str) -> Result<Self, FerryError> {
        for (label, value) in [("root", root), ("family", family)] {
            if !is_identifier_path(value) {
                return Err(FerryError::Config(format!(
                    "naming convention: {label} `{value}` is not a dotted identifier path"
                )));
            }
        }

        let prefix = format!("{root}.{family}");
        let pattern = Regex::new(&format!(r"^{}\.([a-z_]+)$", regex::escape(&prefix)))
            .map_err(|e| FerryError::Internal(format!("naming convention pattern: {e}")))?;

        Ok(Self { prefix, pattern })
    }

    /// The `<root>.<family>` prefix shared by all backend namespaces.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Extracts the backend identifier from a component's namespace.
    ///
    /// `None` means the component is not part of a conventionally named
    /// backend family.
    pub fn extract(&self, name: &QualifiedName) -> Option<BackendId> {
        let captures = self.pattern.captures(name.namespace())?;
        BackendId::from_segment(captures.get(1)?.as_str())
    }

    /// Namespace holding all components of a backend.
    pub fn namespace_of(&self, id: &BackendId) -> String {
        format!("{}.{}", self.prefix, id.segment())
    }

    /// Fully qualified name of a backend's component for `role`.
    pub fn synthesize(&self, id: &BackendId, role: Role) -> QualifiedName {
        QualifiedName::new(self.namespace_of(id), format!("{id}{}", role.suffix()))
    }
}

impl Default for NamingConvention {
    fn default() -> Self {
        Self::new(DEFAULT_ROOT, DEFAULT_FAMILY).expect("default naming convention is valid")
    }
}

/// True for `ident(.ident)*` where `ident` is `[A-Za-z_][A-Za-z0-9_]*`.
pub fn is_identifier_path(value: &str) -> bool {
    !value.is_empty()
        && value.split('.').all(|part| {
            let mut chars = part.chars();
            chars
                .next()
                .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        })
}
