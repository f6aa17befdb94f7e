// SPDX-FileCopyrightText: 2026 Msgdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for msgdesk.
//!
//! This crate provides the error type, the domain records (messages,
//! categories, funnels and funnel assignments), the table contract and the
//! store traits shared by every backend and by the console.

pub mod error;
pub mod rows;
pub mod table;
pub mod timestamp;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::DeskError;
pub use table::{OrderBy, Table};
pub use timestamp::Timestamp;
pub use traits::{RecordStore, StoreAdapter};
pub use types::{
    Audience, ByChannel, Category, Channel, FunnelAssignment, HealthStatus, MessageRecord,
    MessageTab, MessageType, Row, SalesFunnel,
};
