// SPDX-FileCopyrightText: 2026 Ferry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use ferry_core::TransferPlugin;

/// Plugin component of the `Local` backend.
#[derive(Debug, Default)]
pub struct LocalTransferPlugin;

impl TransferPlugin for LocalTransferPlugin {
    fn id(&self) -> &str {
        "local"
    }

    fn name(&self) -> &str {
        "Local"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }
}
