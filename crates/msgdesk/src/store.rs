// SPDX-FileCopyrightText: 2026 Msgdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Record store selection.

use std::sync::Arc;

use msgdesk_config::MsgdeskConfig;
use msgdesk_config::model::BackendKind;
use msgdesk_core::{DeskError, RecordStore};
use msgdesk_rest::RestStore;
use msgdesk_storage::SqliteStorage;
use tracing::info;

/// Opens the backend named by `backend.kind`.
///
/// The SQLite backend is initialized (file created, migrations applied)
/// before it is returned.
pub async fn open_store(config: &MsgdeskConfig) -> Result<Arc<dyn RecordStore>, DeskError> {
    match config.backend.kind {
        BackendKind::Rest => Ok(Arc::new(RestStore::new(&config.rest)?)),
        BackendKind::Sqlite => {
            let storage = SqliteStorage::new(config.storage.clone());
            storage.initialize().await?;
            info!(path = %config.storage.database_path, "using sqlite backend");
            Ok(Arc::new(storage))
        }
    }
}
