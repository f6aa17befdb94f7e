// SPDX-FileCopyrightText: 2026 Msgdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Single-row writes behind the console's actions.
//!
//! Each function issues exactly one store call. Reloading afterwards is up
//! to the caller.

use msgdesk_core::{
    Channel, DeskError, MessageRecord, RecordStore, Row, Table, Timestamp, rows, timestamp,
};
use serde_json::Value;
use tracing::info;

use crate::forms::{CategoryPayload, MessagePayload};

/// Suffix appended to the name of a copied message.
pub const COPY_SUFFIX: &str = " (Copy)";

fn stamp(row: &mut Row, column: &str, at: Timestamp) {
    row.insert(column.to_string(), Value::String(timestamp::format(&at)));
}

/// Inserts a new message into the table of `channel`.
pub async fn create_message(
    store: &dyn RecordStore,
    channel: Channel,
    payload: &MessagePayload,
) -> Result<(), DeskError> {
    let table = Table::messages(channel);
    let row = rows::encode(table, payload)?;
    store.insert(table, row).await?;
    info!(table = %table, name = %payload.content_name, "message created");
    Ok(())
}

/// Overwrites an existing message and stamps `updated_at`.
pub async fn update_message(
    store: &dyn RecordStore,
    channel: Channel,
    id: &str,
    payload: &MessagePayload,
    now: Timestamp,
) -> Result<(), DeskError> {
    let table = Table::messages(channel);
    let mut row = rows::encode(table, payload)?;
    stamp(&mut row, "updated_at", now);
    store.update(table, id, row).await?;
    info!(table = %table, id, "message updated");
    Ok(())
}

/// The insert payload for a duplicate of `source`.
///
/// The kind comes from the source record's own tag. The sent date is never
/// carried over, and SMS copies get `now` as their creation date.
pub fn copy_payload(source: &MessageRecord, now: Timestamp) -> MessagePayload {
    MessagePayload {
        content_name: format!("{}{COPY_SUFFIX}", source.content_name),
        context_category: source.context_category.clone(),
        subject: source.subject.clone(),
        content: source.content.clone(),
        message_type: source.message_type,
        created_date: (source.channel() == Channel::Sms).then_some(now),
    }
}

/// Inserts a duplicate of `source` into the table its tag names.
pub async fn copy_message(
    store: &dyn RecordStore,
    source: &MessageRecord,
    now: Timestamp,
) -> Result<(), DeskError> {
    let table = Table::messages(source.channel());
    let row = rows::encode(table, &copy_payload(source, now))?;
    store.insert(table, row).await?;
    info!(table = %table, source = %source.id, "message copied");
    Ok(())
}

/// Deletes a message from the table of `channel`.
pub async fn delete_message(
    store: &dyn RecordStore,
    channel: Channel,
    id: &str,
) -> Result<(), DeskError> {
    let table = Table::messages(channel);
    store.delete(table, id).await?;
    info!(table = %table, id, "message deleted");
    Ok(())
}

/// Marks a message sent by setting `sent_date` and nothing else.
pub async fn send_message(
    store: &dyn RecordStore,
    record: &MessageRecord,
    now: Timestamp,
) -> Result<(), DeskError> {
    let table = Table::messages(record.channel());
    let mut patch = Row::new();
    stamp(&mut patch, "sent_date", now);
    store.update(table, &record.id, patch).await?;
    info!(table = %table, id = %record.id, "message sent");
    Ok(())
}

/// Inserts a category into the list of `channel`.
pub async fn create_category(
    store: &dyn RecordStore,
    channel: Channel,
    payload: &CategoryPayload,
) -> Result<(), DeskError> {
    let table = Table::categories(channel);
    let row = rows::encode(table, payload)?;
    store.insert(table, row).await?;
    info!(table = %table, name = %payload.name, "category created");
    Ok(())
}

/// Overwrites a category and stamps `updated_at`.
pub async fn update_category(
    store: &dyn RecordStore,
    channel: Channel,
    id: &str,
    payload: &CategoryPayload,
    now: Timestamp,
) -> Result<(), DeskError> {
    let table = Table::categories(channel);
    let mut row = rows::encode(table, payload)?;
    stamp(&mut row, "updated_at", now);
    store.update(table, id, row).await?;
    info!(table = %table, id, "category updated");
    Ok(())
}

/// Deletes a category. Messages filed under its name are left as they are.
pub async fn delete_category(
    store: &dyn RecordStore,
    channel: Channel,
    id: &str,
) -> Result<(), DeskError> {
    let table = Table::categories(channel);
    store.delete(table, id).await?;
    info!(table = %table, id, "category deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use msgdesk_core::MessageType;
    use msgdesk_test_utils::fixtures::{in_category, message, sent, ts};
    use msgdesk_test_utils::{MemoryStore, StoreOp};

    #[test]
    fn copy_appends_suffix_and_drops_sent_date() {
        let now = ts("2026-06-01T12:00:00Z");
        let source = sent(
            in_category(message("m1", MessageType::Broadcast, "Welcome"), "Promo"),
            "2026-05-01T00:00:00Z",
        );
        let copy = copy_payload(&source, now);
        assert_eq!(copy.content_name, "Welcome (Copy)");
        assert_eq!(copy.context_category.as_deref(), Some("Promo"));
        assert_eq!(copy.content, source.content);
        assert_eq!(copy.message_type, MessageType::Broadcast);
        assert_eq!(copy.created_date, Some(now));

        let row = rows::encode(Table::TextMessages, &copy).unwrap();
        assert!(!row.contains_key("sent_date"));
    }

    #[test]
    fn email_copy_keeps_subject_without_created_date() {
        let source = message("e1", MessageType::EmailFunnelContent, "Day 1");
        let copy = copy_payload(&source, ts("2026-06-01T12:00:00Z"));
        assert_eq!(copy.subject.as_deref(), Some("Day 1 subject"));
        assert_eq!(copy.created_date, None);
    }

    #[tokio::test]
    async fn send_patches_only_sent_date() {
        let store = MemoryStore::new();
        let record = message("m1", MessageType::EmailBroadcast, "Launch");
        send_message(&store, &record, ts("2026-06-01T12:00:00Z"))
            .await
            .unwrap();

        let writes = store.writes().await;
        assert_eq!(writes.len(), 1);
        assert_eq!(writes[0].op, StoreOp::Update);
        assert_eq!(writes[0].table, Table::EmailMessages);
        assert_eq!(writes[0].id.as_deref(), Some("m1"));
        let patch = writes[0].row.as_ref().unwrap();
        assert_eq!(patch.len(), 1);
        assert_eq!(patch["sent_date"], "2026-06-01T12:00:00.000Z");
    }

    #[tokio::test]
    async fn update_category_stamps_updated_at() {
        let store = MemoryStore::new();
        let payload = CategoryPayload {
            name: "Promo".into(),
            description: None,
        };
        update_category(&store, Channel::Email, "c1", &payload, ts("2026-06-01T00:00:00Z"))
            .await
            .unwrap();
        let writes = store.writes().await;
        assert_eq!(writes[0].table, Table::EmailCategories);
        let patch = writes[0].row.as_ref().unwrap();
        assert_eq!(patch["updated_at"], "2026-06-01T00:00:00.000Z");
        assert_eq!(patch["description"], Value::Null);
    }
}
