// SPDX-FileCopyrightText: 2026 Msgdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Hosted record store for msgdesk.
//!
//! This crate implements [`RecordStore`] on top of a PostgREST endpoint
//! such as a Supabase project, mapping each table operation to one HTTP
//! request.

pub mod client;
pub mod types;

use std::time::Duration;

use async_trait::async_trait;
use msgdesk_config::model::RestConfig;
use msgdesk_core::{DeskError, HealthStatus, OrderBy, RecordStore, Row, StoreAdapter, Table};
use tracing::{debug, info};

use crate::client::RestClient;

/// Record store backed by a PostgREST HTTP API.
pub struct RestStore {
    client: RestClient,
}

impl RestStore {
    /// Creates a store from the `[rest]` configuration section.
    ///
    /// Both `url` and `api_key` must be set; validation normally guarantees it.
    pub fn new(config: &RestConfig) -> Result<Self, DeskError> {
        let url = config
            .url
            .as_deref()
            .filter(|u| !u.trim().is_empty())
            .ok_or_else(|| DeskError::Config("rest.url is not set".into()))?;
        let api_key = config
            .api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| DeskError::Config("rest.api_key is not set".into()))?;

        let client = RestClient::new(url, api_key, config.timeout_secs.map(Duration::from_secs))?;
        info!(url, "rest record store initialized");
        Ok(Self { client })
    }

    /// Creates a store with an existing client.
    pub fn with_client(client: RestClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl StoreAdapter for RestStore {
    fn name(&self) -> &str {
        "rest"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    async fn health_check(&self) -> Result<HealthStatus, DeskError> {
        match self.client.ping(Table::SalesFunnels.name()).await {
            Ok(()) => Ok(HealthStatus::Healthy),
            Err(e) => Ok(HealthStatus::Unhealthy(e.to_string())),
        }
    }

    async fn shutdown(&self) -> Result<(), DeskError> {
        debug!("rest record store shut down");
        Ok(())
    }
}

#[async_trait]
impl RecordStore for RestStore {
    async fn select_all(&self, table: Table, order: Option<OrderBy>) -> Result<Vec<Row>, DeskError> {
        table.check_order(order)?;
        self.client.select(table.name(), order).await
    }

    async fn insert(&self, table: Table, row: Row) -> Result<(), DeskError> {
        table.check_row(&row)?;
        self.client.insert(table.name(), row).await
    }

    async fn update(&self, table: Table, id: &str, patch: Row) -> Result<(), DeskError> {
        table.check_row(&patch)?;
        self.client.update(table.name(), id, patch).await
    }

    async fn delete(&self, table: Table, id: &str) -> Result<(), DeskError> {
        self.client.delete(table.name(), id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_requires_url_and_key() {
        let missing_url = RestConfig {
            url: None,
            api_key: Some("k".into()),
            timeout_secs: None,
        };
        assert!(matches!(
            RestStore::new(&missing_url),
            Err(DeskError::Config(_))
        ));

        let blank_key = RestConfig {
            url: Some("https://x.supabase.co".into()),
            api_key: Some("  ".into()),
            timeout_secs: None,
        };
        assert!(matches!(RestStore::new(&blank_key), Err(DeskError::Config(_))));
    }

    #[test]
    fn adapter_identity() {
        let store = RestStore::new(&RestConfig {
            url: Some("https://x.supabase.co".into()),
            api_key: Some("k".into()),
            timeout_secs: Some(5),
        })
        .unwrap();
        assert_eq!(store.name(), "rest");
        assert_eq!(store.version(), semver::Version::new(0, 1, 0));
    }

    #[tokio::test]
    async fn unknown_column_is_rejected_before_any_request() {
        // Nothing listens here; a request would fail with a backend error instead.
        let store = RestStore::with_client(RestClient::new("http://127.0.0.1:9", "k", None).unwrap());
        let mut row = Row::new();
        row.insert("subject".into(), "Hi".into());
        let err = store.insert(Table::TextMessages, row).await.unwrap_err();
        assert!(matches!(err, DeskError::InvalidRow { .. }));
    }
}
