// SPDX-FileCopyrightText: 2026 Msgdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the RecordStore trait.

use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::debug;

use msgdesk_config::model::StorageConfig;
use msgdesk_core::{DeskError, HealthStatus, OrderBy, RecordStore, Row, StoreAdapter, Table};

use crate::database::Database;
use crate::queries;

/// SQLite-backed record store.
///
/// Wraps a [`Database`] handle and delegates to the row queries. The
/// database is opened on the first call to [`SqliteStorage::initialize`].
pub struct SqliteStorage {
    config: StorageConfig,
    db: OnceCell<Database>,
}

impl SqliteStorage {
    /// Create a new SqliteStorage with the given configuration.
    ///
    /// The database is not opened until [`initialize`](Self::initialize) is called.
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            db: OnceCell::new(),
        }
    }

    /// Open the database and apply migrations.
    pub async fn initialize(&self) -> Result<(), DeskError> {
        let db = Database::open(&self.config.database_path).await?;
        self.db.set(db).map_err(|_| DeskError::Storage {
            source: "storage already initialized".into(),
        })?;
        debug!(path = %self.config.database_path, "SQLite storage initialized");
        Ok(())
    }

    fn db(&self) -> Result<&Database, DeskError> {
        self.db.get().ok_or_else(|| DeskError::Storage {
            source: "storage not initialized, call initialize() first".into(),
        })
    }
}

#[async_trait]
impl StoreAdapter for SqliteStorage {
    fn name(&self) -> &str {
        "sqlite"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    async fn health_check(&self) -> Result<HealthStatus, DeskError> {
        let db = self.db()?;
        db.connection()
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch("SELECT 1;")?;
                Ok(())
            })
            .await
            .map_err(crate::database::map_tr_err)?;
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), DeskError> {
        if let Some(db) = self.db.get() {
            db.checkpoint().await?;
            debug!("shutdown: WAL checkpoint complete");
        }
        Ok(())
    }
}

#[async_trait]
impl RecordStore for SqliteStorage {
    async fn select_all(&self, table: Table, order: Option<OrderBy>) -> Result<Vec<Row>, DeskError> {
        queries::records::select_all(self.db()?, table, order).await
    }

    async fn insert(&self, table: Table, row: Row) -> Result<(), DeskError> {
        queries::records::insert(self.db()?, table, row).await
    }

    async fn update(&self, table: Table, id: &str, patch: Row) -> Result<(), DeskError> {
        queries::records::update(self.db()?, table, id, patch).await
    }

    async fn delete(&self, table: Table, id: &str) -> Result<(), DeskError> {
        queries::records::delete(self.db()?, table, id).await
    }
}
