// SPDX-FileCopyrightText: 2026 Msgdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Record fixtures with fixed timestamps.

use msgdesk_core::{
    Category, FunnelAssignment, MessageRecord, MessageType, SalesFunnel, Timestamp, timestamp,
};

/// Parse a fixture timestamp. Panics on malformed input.
pub fn ts(raw: &str) -> Timestamp {
    timestamp::parse(raw).unwrap_or_else(|| panic!("bad fixture timestamp `{raw}`"))
}

/// The `created_at` every fixture gets unless overridden.
pub fn epoch() -> Timestamp {
    ts("2026-01-01T00:00:00Z")
}

/// A message of the given type with placeholder content.
///
/// SMS messages get a `created_date`, email messages a `subject`.
pub fn message(id: &str, message_type: MessageType, name: &str) -> MessageRecord {
    let is_email = message_type.channel() == msgdesk_core::Channel::Email;
    MessageRecord {
        id: id.to_string(),
        context_category: None,
        content_name: name.to_string(),
        subject: is_email.then(|| format!("{name} subject")),
        content: format!("{name} body"),
        message_type,
        created_date: (!is_email).then(epoch),
        sent_date: None,
        created_at: epoch(),
        updated_at: None,
    }
}

/// Same message, marked sent at `sent`.
pub fn sent(mut record: MessageRecord, sent: &str) -> MessageRecord {
    record.sent_date = Some(ts(sent));
    record
}

/// Same message, filed under `category`.
pub fn in_category(mut record: MessageRecord, category: &str) -> MessageRecord {
    record.context_category = Some(category.to_string());
    record
}

pub fn category(id: &str, name: &str) -> Category {
    Category {
        id: id.to_string(),
        name: name.to_string(),
        description: None,
        created_at: epoch(),
        updated_at: Some(epoch()),
    }
}

pub fn funnel(id: &str, name: &str) -> SalesFunnel {
    SalesFunnel {
        id: id.to_string(),
        name: name.to_string(),
        description: None,
        created_at: epoch(),
        updated_at: Some(epoch()),
    }
}

pub fn assignment(id: &str, funnel_id: &str, message_id: &str) -> FunnelAssignment {
    FunnelAssignment {
        id: id.to_string(),
        funnel_id: funnel_id.to_string(),
        message_id: message_id.to_string(),
        created_at: epoch(),
    }
}
