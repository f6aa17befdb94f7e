// SPDX-FileCopyrightText: 2026 Msgdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Console-level failures.
//!
//! The `Display` text of each variant is the alert shown to the user. The
//! store error that caused it stays reachable through `source()`.

use msgdesk_core::DeskError;
use thiserror::Error;

use crate::forms::ValidationError;

#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error("Failed to load data")]
    Load(#[source] DeskError),

    #[error("Failed to save message")]
    SaveMessage(#[source] DeskError),

    #[error("Failed to copy message")]
    CopyMessage(#[source] DeskError),

    #[error("Failed to delete message")]
    DeleteMessage(#[source] DeskError),

    #[error("Failed to send message")]
    SendMessage(#[source] DeskError),

    #[error("Failed to save category")]
    SaveCategory(#[source] DeskError),

    #[error("Failed to delete category")]
    DeleteCategory(#[source] DeskError),

    /// A required form field is empty. Nothing was sent to the store.
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    /// The send action does not apply to this message.
    #[error("\"{name}\" cannot be sent: only unsent broadcasts can be sent")]
    NotSendable { name: String },

    #[error("no {kind} with id `{id}`")]
    NotFound { kind: &'static str, id: String },

    /// A handler was called with no dialog or confirmation open for it.
    #[error("no {0} is open")]
    NothingOpen(&'static str),
}

impl ConsoleError {
    /// The store error behind this alert, if any.
    pub fn store_error(&self) -> Option<&DeskError> {
        match self {
            ConsoleError::Load(e)
            | ConsoleError::SaveMessage(e)
            | ConsoleError::CopyMessage(e)
            | ConsoleError::DeleteMessage(e)
            | ConsoleError::SendMessage(e)
            | ConsoleError::SaveCategory(e)
            | ConsoleError::DeleteCategory(e) => Some(e),
            _ => None,
        }
    }
}
