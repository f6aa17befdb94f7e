// SPDX-FileCopyrightText: 2026 Msgdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory record store for deterministic testing.
//!
//! `MemoryStore` implements `RecordStore` over plain row vectors, records
//! every call it receives, and can be told to fail chosen operations.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use tokio::sync::Mutex;

use msgdesk_core::{
    DeskError, HealthStatus, OrderBy, RecordStore, Row, StoreAdapter, Table, rows, timestamp,
};

/// The four record store operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOp {
    Select,
    Insert,
    Update,
    Delete,
}

/// One call received by the store, in arrival order.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreCall {
    pub op: StoreOp,
    pub table: Table,
    /// Target id for update and delete.
    pub id: Option<String>,
    /// Row for insert, patch for update.
    pub row: Option<Row>,
}

#[derive(Default)]
struct Inner {
    tables: HashMap<Table, Vec<Row>>,
    failures: HashSet<(Table, StoreOp)>,
    calls: Vec<StoreCall>,
}

/// An in-memory `RecordStore`.
///
/// Inserts fill `id` (UUIDv4) and `created_at` when omitted, like the real
/// backends. Updating or deleting a missing id succeeds without effect.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the contents of `table` with typed records.
    ///
    /// Panics if a record does not encode into the table.
    pub async fn seed<T: Serialize>(&self, table: Table, records: &[T]) {
        let encoded = records
            .iter()
            .map(|r| rows::encode(table, r).expect("fixture should encode"))
            .collect();
        self.inner.lock().await.tables.insert(table, encoded);
    }

    /// Replace the contents of `table` with raw rows, bypassing column checks.
    pub async fn seed_rows(&self, table: Table, raw: Vec<Row>) {
        self.inner.lock().await.tables.insert(table, raw);
    }

    /// Current rows of `table`, in storage order.
    pub async fn rows(&self, table: Table) -> Vec<Row> {
        self.inner
            .lock()
            .await
            .tables
            .get(&table)
            .cloned()
            .unwrap_or_default()
    }

    /// Make `op` on `table` fail until cleared.
    pub async fn fail(&self, table: Table, op: StoreOp) {
        self.inner.lock().await.failures.insert((table, op));
    }

    /// Make `op` fail on every table.
    pub async fn fail_everywhere(&self, op: StoreOp) {
        let mut inner = self.inner.lock().await;
        for table in Table::ALL {
            inner.failures.insert((table, op));
        }
    }

    pub async fn clear_failures(&self) {
        self.inner.lock().await.failures.clear();
    }

    /// Every call received so far, including failed ones.
    pub async fn calls(&self) -> Vec<StoreCall> {
        self.inner.lock().await.calls.clone()
    }

    /// Calls other than reads.
    pub async fn writes(&self) -> Vec<StoreCall> {
        self.calls()
            .await
            .into_iter()
            .filter(|c| c.op != StoreOp::Select)
            .collect()
    }

    pub async fn clear_calls(&self) {
        self.inner.lock().await.calls.clear();
    }
}

impl Inner {
    fn record(&mut self, call: StoreCall) -> Result<(), DeskError> {
        let key = (call.table, call.op);
        self.calls.push(call);
        if self.failures.contains(&key) {
            return Err(DeskError::Backend {
                message: format!("injected {:?} failure on `{}`", key.1, key.0),
                source: None,
            });
        }
        Ok(())
    }
}

/// Text comparison matching the hosted backend: nulls sort last ascending,
/// first descending.
fn compare_column(a: &Row, b: &Row, order: OrderBy) -> Ordering {
    let key = |row: &Row| match row.get(order.column) {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(other) => Some(other.to_string()),
    };
    let ord = match (key(a), key(b)) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(x), Some(y)) => x.cmp(&y),
    };
    if order.ascending { ord } else { ord.reverse() }
}

#[async_trait]
impl StoreAdapter for MemoryStore {
    fn name(&self) -> &str {
        "memory"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    async fn health_check(&self) -> Result<HealthStatus, DeskError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), DeskError> {
        Ok(())
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn select_all(&self, table: Table, order: Option<OrderBy>) -> Result<Vec<Row>, DeskError> {
        let mut inner = self.inner.lock().await;
        inner.record(StoreCall {
            op: StoreOp::Select,
            table,
            id: None,
            row: None,
        })?;
        table.check_order(order)?;
        let mut out = inner.tables.get(&table).cloned().unwrap_or_default();
        if let Some(order) = order {
            out.sort_by(|a, b| compare_column(a, b, order));
        }
        Ok(out)
    }

    async fn insert(&self, table: Table, mut row: Row) -> Result<(), DeskError> {
        let mut inner = self.inner.lock().await;
        inner.record(StoreCall {
            op: StoreOp::Insert,
            table,
            id: None,
            row: Some(row.clone()),
        })?;
        table.check_row(&row)?;
        row.entry("id")
            .or_insert_with(|| Value::String(uuid::Uuid::new_v4().to_string()));
        row.entry("created_at")
            .or_insert_with(|| Value::String(timestamp::format(&timestamp::now())));
        inner.tables.entry(table).or_default().push(row);
        Ok(())
    }

    async fn update(&self, table: Table, id: &str, patch: Row) -> Result<(), DeskError> {
        let mut inner = self.inner.lock().await;
        inner.record(StoreCall {
            op: StoreOp::Update,
            table,
            id: Some(id.to_string()),
            row: Some(patch.clone()),
        })?;
        table.check_row(&patch)?;
        if let Some(target) = inner
            .tables
            .get_mut(&table)
            .and_then(|rows| rows.iter_mut().find(|r| r.get("id") == Some(&Value::from(id))))
        {
            target.extend(patch);
        }
        Ok(())
    }

    async fn delete(&self, table: Table, id: &str) -> Result<(), DeskError> {
        let mut inner = self.inner.lock().await;
        inner.record(StoreCall {
            op: StoreOp::Delete,
            table,
            id: Some(id.to_string()),
            row: None,
        })?;
        if let Some(rows) = inner.tables.get_mut(&table) {
            rows.retain(|r| r.get("id") != Some(&Value::from(id)));
        }
        Ok(())
    }
}
