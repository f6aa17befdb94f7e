// SPDX-FileCopyrightText: 2026 Msgdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Store trait definitions.
//!
//! Backends implement the [`StoreAdapter`] base trait and [`RecordStore`],
//! using `#[async_trait]` so they can sit behind `Arc<dyn RecordStore>`.

pub mod adapter;
pub mod store;

pub use adapter::StoreAdapter;
pub use store::RecordStore;
