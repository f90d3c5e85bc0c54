// SPDX-FileCopyrightText: 2026 Ferry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Ferry integration tests.
//!
//! Provides an in-memory backend and a harness that assembles a populated
//! registry, so tests run without touching real storage targets.
//!
//! # Components
//!
//! - [`MemoryStorageTransferManager`] - backend `MemoryStorage` holding objects in a shared map
//! - [`TestHarness`] - registry with the memory and local backends plus a scratch directory

pub mod harness;
pub mod memory;

pub use harness::{TestHarness, TestHarnessBuilder};
pub use memory::{
    MemoryStorageTransferManager, MemoryStorageTransferPlugin, MemoryStorageTransferSettings,
    MemoryStore,
};
