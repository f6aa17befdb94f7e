// SPDX-FileCopyrightText: 2026 Msgdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for msgdesk integration tests.
//!
//! Provides an in-memory record store and record fixtures for fast,
//! deterministic tests without a database or network.
//!
//! # Components
//!
//! - [`MemoryStore`] - In-memory `RecordStore` with per-operation failure injection
//! - [`fixtures`] - Builders for messages, categories, funnels and assignments

pub mod fixtures;
pub mod memory_store;

pub use memory_store::{MemoryStore, StoreCall, StoreOp};
