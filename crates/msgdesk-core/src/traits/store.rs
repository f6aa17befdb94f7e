// SPDX-FileCopyrightText: 2026 Msgdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Record store trait: the table-query contract the console runs on.

use async_trait::async_trait;

use crate::error::DeskError;
use crate::table::{OrderBy, Table};
use crate::traits::adapter::StoreAdapter;
use crate::types::Row;

/// A table-oriented store offering whole-table reads and single-row writes.
///
/// Each call is atomic on its own. There are no transactions, version checks
/// or retries: the last write wins. Updating or deleting an id that does not
/// exist succeeds without effect, which is how the hosted backend behaves.
#[async_trait]
pub trait RecordStore: StoreAdapter {
    /// Reads every row of `table`, optionally ordered by one column.
    async fn select_all(&self, table: Table, order: Option<OrderBy>)
    -> Result<Vec<Row>, DeskError>;

    /// Inserts one row. Columns the row omits take the store's defaults.
    async fn insert(&self, table: Table, row: Row) -> Result<(), DeskError>;

    /// Overwrites the given fields of the row with id `id`.
    async fn update(&self, table: Table, id: &str, patch: Row) -> Result<(), DeskError>;

    /// Deletes the row with id `id`.
    async fn delete(&self, table: Table, id: &str) -> Result<(), DeskError>;
}
