// SPDX-FileCopyrightText: 2026 Msgdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Console logic for msgdesk.
//!
//! Everything between the record store and a rendering surface: the table
//! snapshot, the view projection (tab, search and category filters plus
//! ordering), the create/edit forms, the single-row write operations, and
//! the [`Console`] state machine that ties them together.
//!
//! Nothing here renders. A shell drives [`Console`] and draws from
//! [`ConsoleState`] and the formatting helpers in [`projector`].

pub mod error;
pub mod forms;
pub mod operations;
pub mod projector;
pub mod snapshot;
pub mod state;

pub use error::ConsoleError;
pub use forms::{CategoryForm, FormStatus, MessageForm, ValidationError};
pub use projector::ViewFilter;
pub use snapshot::Snapshot;
pub use state::{CategoryDialog, Console, ConsoleState, MainTab, MessageDialog, PendingSend};
