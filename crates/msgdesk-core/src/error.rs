// SPDX-FileCopyrightText: 2026 Msgdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for msgdesk.

use thiserror::Error;

/// The primary error type used across record stores and core operations.
#[derive(Debug, Error)]
pub enum DeskError {
    /// Configuration errors (invalid TOML, missing required fields, bad values).
    #[error("configuration error: {0}")]
    Config(String),

    /// Local storage errors (database open, query failure, migrations).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Hosted backend errors (HTTP failure, non-success status, API error body).
    #[error("backend error: {message}")]
    Backend {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A row returned by the store could not be decoded into its record type.
    #[error("failed to decode `{table}` row: {source}")]
    Decode {
        table: String,
        source: serde_json::Error,
    },

    /// A row handed to the store does not fit the table it targets.
    #[error("invalid row for `{table}`: {message}")]
    InvalidRow { table: String, message: String },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}
