// SPDX-FileCopyrightText: 2026 Ferry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Capability contracts for the three roles of a transfer backend.
//!
//! Every backend ships one type per role: a plugin describing it, a settings
//! type holding its configuration, and a manager performing transfers.

pub mod manager;
pub mod plugin;
pub mod settings;

pub use manager::{FromSettings, TransferManager};
pub use plugin::TransferPlugin;
pub use settings::{AsAny, TransferSettings};
