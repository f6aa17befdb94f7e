// SPDX-FileCopyrightText: 2026 Msgdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Table-generic row CRUD.
//!
//! Every column msgdesk stores is TEXT, so a row maps onto SQLite as a list
//! of optional strings. Table and column names are only ever taken from
//! [`Table::columns`], never from the caller.

use msgdesk_core::{DeskError, OrderBy, Row, Table, timestamp};
use rusqlite::params_from_iter;
use serde_json::Value;

use crate::database::{Database, map_tr_err};

/// Read every row of `table`, optionally ordered.
pub async fn select_all(
    db: &Database,
    table: Table,
    order: Option<OrderBy>,
) -> Result<Vec<Row>, DeskError> {
    table.check_order(order)?;
    let columns = table.columns();
    let mut sql = format!("SELECT {} FROM {}", columns.join(", "), table.name());
    if let Some(order) = order {
        let dir = if order.ascending { "ASC" } else { "DESC" };
        sql.push_str(&format!(" ORDER BY {} {dir}", order.column));
    }

    db.connection()
        .call(move |conn| -> Result<Vec<Row>, rusqlite::Error> {
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt.query_map([], |r| {
                let mut row = Row::new();
                for (i, column) in columns.iter().enumerate() {
                    let value = r
                        .get::<_, Option<String>>(i)?
                        .map_or(Value::Null, Value::String);
                    row.insert((*column).to_string(), value);
                }
                Ok(row)
            })?;
            let collected = rows.collect::<Result<Vec<_>, _>>()?;
            Ok(collected)
        })
        .await
        .map_err(map_tr_err)
}

/// Insert one row, filling `id` and `created_at` when the row omits them.
pub async fn insert(db: &Database, table: Table, mut row: Row) -> Result<(), DeskError> {
    table.check_row(&row)?;
    if !row.contains_key("id") {
        row.insert("id".into(), Value::String(uuid::Uuid::new_v4().to_string()));
    }
    if !row.contains_key("created_at") {
        row.insert(
            "created_at".into(),
            Value::String(timestamp::format(&timestamp::now())),
        );
    }

    let (columns, values) = split_row(table, row)?;
    let placeholders: Vec<String> = (1..=columns.len()).map(|i| format!("?{i}")).collect();
    let sql = format!(
        "INSERT INTO {} ({}) VALUES ({})",
        table.name(),
        columns.join(", "),
        placeholders.join(", ")
    );

    db.connection()
        .call(move |conn| -> Result<(), rusqlite::Error> {
            conn.execute(&sql, params_from_iter(values.iter()))?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}

/// Overwrite the given columns of the row with id `id`.
///
/// A missing id affects nothing and is not an error.
pub async fn update(db: &Database, table: Table, id: &str, patch: Row) -> Result<(), DeskError> {
    table.check_row(&patch)?;
    if patch.contains_key("id") {
        return Err(DeskError::InvalidRow {
            table: table.name().to_string(),
            message: "the id column cannot be updated".into(),
        });
    }
    if patch.is_empty() {
        return Ok(());
    }

    let (columns, mut values) = split_row(table, patch)?;
    let assignments: Vec<String> = columns
        .iter()
        .enumerate()
        .map(|(i, c)| format!("{c} = ?{}", i + 1))
        .collect();
    let sql = format!(
        "UPDATE {} SET {} WHERE id = ?{}",
        table.name(),
        assignments.join(", "),
        columns.len() + 1
    );
    values.push(Some(id.to_string()));

    db.connection()
        .call(move |conn| -> Result<(), rusqlite::Error> {
            conn.execute(&sql, params_from_iter(values.iter()))?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}

/// Delete the row with id `id`. A missing id is not an error.
pub async fn delete(db: &Database, table: Table, id: &str) -> Result<(), DeskError> {
    let sql = format!("DELETE FROM {} WHERE id = ?1", table.name());
    let id = id.to_string();
    db.connection()
        .call(move |conn| -> Result<(), rusqlite::Error> {
            conn.execute(&sql, [id])?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}

/// Splits a checked row into static column names and TEXT values.
fn split_row(
    table: Table,
    row: Row,
) -> Result<(Vec<&'static str>, Vec<Option<String>>), DeskError> {
    let mut columns = Vec::with_capacity(row.len());
    let mut values = Vec::with_capacity(row.len());
    for (key, value) in row {
        let Some(column) = table.columns().iter().copied().find(|c| *c == key) else {
            return Err(DeskError::InvalidRow {
                table: table.name().to_string(),
                message: format!("unknown column `{key}`"),
            });
        };
        let text = match value {
            Value::Null => None,
            Value::String(s) => Some(s),
            other => {
                return Err(DeskError::InvalidRow {
                    table: table.name().to_string(),
                    message: format!("column `{column}` expects text or null, got {other}"),
                });
            }
        };
        columns.push(column);
        values.push(text);
    }
    Ok((columns, values))
}
