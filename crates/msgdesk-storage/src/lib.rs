// SPDX-FileCopyrightText: 2026 Msgdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Embedded SQLite record store for msgdesk.
//!
//! Provides WAL-mode SQLite storage with embedded migrations for the six
//! msgdesk tables, serialized through `tokio-rusqlite`'s background thread.

pub mod adapter;
pub mod database;
pub mod migrations;
pub mod queries;

pub use adapter::SqliteStorage;
pub use database::Database;
