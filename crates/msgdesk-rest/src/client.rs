// SPDX-FileCopyrightText: 2026 Msgdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for a PostgREST endpoint.
//!
//! Provides [`RestClient`] which handles URL construction, authentication
//! headers, and error body decoding. Requests are sent once: no retries.

use std::time::Duration;

use msgdesk_core::{DeskError, OrderBy, Row};
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::{RequestBuilder, Response};
use tracing::{debug, warn};

use crate::types::ApiErrorBody;

/// Path prefix PostgREST is mounted under on hosted projects.
const REST_PATH: &str = "/rest/v1";

/// HTTP client for PostgREST table access.
#[derive(Debug, Clone)]
pub struct RestClient {
    client: reqwest::Client,
    base_url: String,
}

impl RestClient {
    /// Creates a new client.
    ///
    /// # Arguments
    /// * `url` - Project URL, e.g. `https://xyz.supabase.co`
    /// * `api_key` - Key sent as both `apikey` and bearer token
    /// * `timeout` - Per-request timeout; `None` keeps the reqwest default
    pub fn new(url: &str, api_key: &str, timeout: Option<Duration>) -> Result<Self, DeskError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            "apikey",
            HeaderValue::from_str(api_key)
                .map_err(|e| DeskError::Config(format!("invalid API key header value: {e}")))?,
        );
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {api_key}"))
                .map_err(|e| DeskError::Config(format!("invalid API key header value: {e}")))?,
        );

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| DeskError::Backend {
            message: format!("failed to build HTTP client: {e}"),
            source: Some(Box::new(e)),
        })?;

        Ok(Self {
            client,
            base_url: format!("{}{REST_PATH}", url.trim_end_matches('/')),
        })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/{table}", self.base_url)
    }

    /// `GET /{table}?select=*[&order=col.dir]`
    pub async fn select(&self, table: &str, order: Option<OrderBy>) -> Result<Vec<Row>, DeskError> {
        let mut query = vec![("select", "*".to_string())];
        if let Some(order) = order {
            let dir = if order.ascending { "asc" } else { "desc" };
            query.push(("order", format!("{}.{dir}", order.column)));
        }

        let response = send(table, "select", self.client.get(self.table_url(table)).query(&query))
            .await?;
        let body = response.text().await.map_err(|e| DeskError::Backend {
            message: format!("failed to read `{table}` response body: {e}"),
            source: Some(Box::new(e)),
        })?;
        serde_json::from_str(&body).map_err(|e| DeskError::Backend {
            message: format!("`{table}` response is not an array of rows: {e}"),
            source: Some(Box::new(e)),
        })
    }

    /// `POST /{table}` with a one-element array body.
    pub async fn insert(&self, table: &str, row: Row) -> Result<(), DeskError> {
        let request = self
            .client
            .post(self.table_url(table))
            .header("Prefer", "return=minimal")
            .json(&[row]);
        send(table, "insert", request).await.map(drop)
    }

    /// `PATCH /{table}?id=eq.{id}` with the patch object.
    pub async fn update(&self, table: &str, id: &str, patch: Row) -> Result<(), DeskError> {
        let request = self
            .client
            .patch(self.table_url(table))
            .query(&[("id", format!("eq.{id}"))])
            .header("Prefer", "return=minimal")
            .json(&patch);
        send(table, "update", request).await.map(drop)
    }

    /// `DELETE /{table}?id=eq.{id}`
    pub async fn delete(&self, table: &str, id: &str) -> Result<(), DeskError> {
        let request = self
            .client
            .delete(self.table_url(table))
            .query(&[("id", format!("eq.{id}"))]);
        send(table, "delete", request).await.map(drop)
    }

    /// Cheapest request that proves the endpoint and key work.
    pub async fn ping(&self, table: &str) -> Result<(), DeskError> {
        let request = self
            .client
            .get(self.table_url(table))
            .query(&[("select", "id"), ("limit", "1")]);
        send(table, "ping", request).await.map(drop)
    }
}

/// Sends a request, turning transport failures and non-2xx statuses into errors.
async fn send(table: &str, op: &str, request: RequestBuilder) -> Result<Response, DeskError> {
    let response = request.send().await.map_err(|e| DeskError::Backend {
        message: format!("{op} on `{table}` failed: {e}"),
        source: Some(Box::new(e)),
    })?;

    let status = response.status();
    debug!(table, op, status = %status, "rest response received");
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let detail = match serde_json::from_str::<ApiErrorBody>(&body) {
        Ok(api_err) => api_err.summary(),
        Err(_) if body.is_empty() => status.to_string(),
        Err(_) => format!("{status}: {body}"),
    };
    warn!(table, op, status = %status, detail = %detail, "rest request rejected");
    Err(DeskError::Backend {
        message: format!("{op} on `{table}` returned {status}: {detail}"),
        source: None,
    })
}
