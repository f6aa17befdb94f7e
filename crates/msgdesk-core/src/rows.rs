// SPDX-FileCopyrightText: 2026 Msgdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversions between typed records and store rows.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::DeskError;
use crate::table::Table;
use crate::types::Row;

/// Decodes every row of a whole-table read into `T`.
///
/// A single undecodable row fails the whole read.
pub fn decode<T: DeserializeOwned>(table: Table, rows: Vec<Row>) -> Result<Vec<T>, DeskError> {
    rows.into_iter()
        .map(|row| {
            serde_json::from_value(serde_json::Value::Object(row)).map_err(|source| {
                DeskError::Decode {
                    table: table.name().to_string(),
                    source,
                }
            })
        })
        .collect()
}

/// Encodes a payload struct into a row, checking it against the table.
pub fn encode<T: Serialize>(table: Table, value: &T) -> Result<Row, DeskError> {
    let row = match serde_json::to_value(value) {
        Ok(serde_json::Value::Object(row)) => row,
        Ok(other) => {
            return Err(DeskError::InvalidRow {
                table: table.name().to_string(),
                message: format!("expected an object, got {other}"),
            });
        }
        Err(e) => {
            return Err(DeskError::InvalidRow {
                table: table.name().to_string(),
                message: e.to_string(),
            });
        }
    };
    table.check_row(&row)?;
    Ok(row)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Category;

    #[test]
    fn decode_fails_whole_batch_on_one_bad_row() {
        let good = serde_json::json!({
            "id": "c1", "name": "Promo", "description": null,
            "created_at": "2026-01-01T00:00:00Z", "updated_at": "2026-01-01T00:00:00Z"
        });
        let bad = serde_json::json!({ "id": "c2" });
        let rows = vec![
            good.as_object().unwrap().clone(),
            bad.as_object().unwrap().clone(),
        ];
        let err = decode::<Category>(Table::Categories, rows).unwrap_err();
        assert!(matches!(err, DeskError::Decode { ref table, .. } if table == "categories"));
    }

    #[test]
    fn encode_rejects_columns_outside_table() {
        #[derive(Serialize)]
        struct Payload {
            name: &'static str,
            subject: &'static str,
        }
        let err = encode(
            Table::Categories,
            &Payload {
                name: "x",
                subject: "y",
            },
        )
        .unwrap_err();
        assert!(matches!(err, DeskError::InvalidRow { .. }));
    }

    #[test]
    fn encode_rejects_non_objects() {
        assert!(encode(Table::Categories, &42).is_err());
    }
}
