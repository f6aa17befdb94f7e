// SPDX-FileCopyrightText: 2026 Msgdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain records and the small enums that classify them.
//!
//! SMS and email content share one record shape. The family a record
//! belongs to is expressed through [`Channel`], and the email-only subject
//! is an optional field rather than a separate type.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::timestamp::{self, Timestamp};

/// A JSON object with named fields, the unit of exchange with a record store.
pub type Row = serde_json::Map<String, serde_json::Value>;

/// Health status reported by store health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Store is fully operational.
    Healthy,
    /// Store is reachable but reports problems.
    Degraded(String),
    /// Store is not operational.
    Unhealthy(String),
}

/// The message family: SMS or email.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Channel {
    Sms,
    Email,
}

impl Channel {
    pub const ALL: [Channel; 2] = [Channel::Sms, Channel::Email];

    /// Human-readable label used in headings.
    pub fn label(self) -> &'static str {
        match self {
            Channel::Sms => "SMS",
            Channel::Email => "Email",
        }
    }
}

/// Whether a message is a one-shot broadcast or drip-funnel content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Audience {
    Broadcast,
    Funnel,
}

/// The variant tag stored in a message's `message_type` column.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum MessageType {
    Broadcast,
    FunnelContent,
    EmailBroadcast,
    EmailFunnelContent,
}

impl MessageType {
    pub fn from_parts(channel: Channel, audience: Audience) -> Self {
        match (channel, audience) {
            (Channel::Sms, Audience::Broadcast) => MessageType::Broadcast,
            (Channel::Sms, Audience::Funnel) => MessageType::FunnelContent,
            (Channel::Email, Audience::Broadcast) => MessageType::EmailBroadcast,
            (Channel::Email, Audience::Funnel) => MessageType::EmailFunnelContent,
        }
    }

    pub fn channel(self) -> Channel {
        match self {
            MessageType::Broadcast | MessageType::FunnelContent => Channel::Sms,
            MessageType::EmailBroadcast | MessageType::EmailFunnelContent => Channel::Email,
        }
    }

    pub fn audience(self) -> Audience {
        match self {
            MessageType::Broadcast | MessageType::EmailBroadcast => Audience::Broadcast,
            MessageType::FunnelContent | MessageType::EmailFunnelContent => Audience::Funnel,
        }
    }

    pub fn is_broadcast(self) -> bool {
        self.audience() == Audience::Broadcast
    }
}

/// The four message views a user can select.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum MessageTab {
    #[default]
    SmsBroadcast,
    SmsFunnel,
    EmailBroadcast,
    EmailFunnel,
}

impl MessageTab {
    pub const ALL: [MessageTab; 4] = [
        MessageTab::SmsBroadcast,
        MessageTab::SmsFunnel,
        MessageTab::EmailBroadcast,
        MessageTab::EmailFunnel,
    ];

    pub fn channel(self) -> Channel {
        self.message_type().channel()
    }

    pub fn audience(self) -> Audience {
        self.message_type().audience()
    }

    /// The tag new messages created under this tab are filed with.
    pub fn message_type(self) -> MessageType {
        match self {
            MessageTab::SmsBroadcast => MessageType::Broadcast,
            MessageTab::SmsFunnel => MessageType::FunnelContent,
            MessageTab::EmailBroadcast => MessageType::EmailBroadcast,
            MessageTab::EmailFunnel => MessageType::EmailFunnelContent,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MessageTab::SmsBroadcast => "SMS Broadcast",
            MessageTab::SmsFunnel => "SMS Funnel Content",
            MessageTab::EmailBroadcast => "Email Broadcast",
            MessageTab::EmailFunnel => "Email Funnel Content",
        }
    }
}

/// A pair of values, one per [`Channel`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ByChannel<T> {
    pub sms: T,
    pub email: T,
}

impl<T> ByChannel<T> {
    pub fn new(sms: T, email: T) -> Self {
        Self { sms, email }
    }

    pub fn get(&self, channel: Channel) -> &T {
        match channel {
            Channel::Sms => &self.sms,
            Channel::Email => &self.email,
        }
    }

    pub fn get_mut(&mut self, channel: Channel) -> &mut T {
        match channel {
            Channel::Sms => &mut self.sms,
            Channel::Email => &mut self.email,
        }
    }
}

/// An SMS or email message as stored in `text_messages` / `email_messages`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageRecord {
    pub id: String,
    #[serde(default)]
    pub context_category: Option<String>,
    pub content_name: String,
    /// Email only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    pub content: String,
    pub message_type: MessageType,
    /// SMS only; email rows carry just `created_at`.
    #[serde(
        default,
        with = "timestamp::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_date: Option<Timestamp>,
    /// Set once when a broadcast is sent, never cleared.
    #[serde(default, with = "timestamp::optional")]
    pub sent_date: Option<Timestamp>,
    #[serde(with = "timestamp::required")]
    pub created_at: Timestamp,
    #[serde(
        default,
        with = "timestamp::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<Timestamp>,
}

impl MessageRecord {
    pub fn channel(&self) -> Channel {
        self.message_type.channel()
    }

    pub fn is_broadcast(&self) -> bool {
        self.message_type.is_broadcast()
    }

    pub fn is_sent(&self) -> bool {
        self.sent_date.is_some()
    }

    /// Whether the send action applies: an unsent broadcast.
    pub fn can_send(&self) -> bool {
        self.is_broadcast() && !self.is_sent()
    }
}

/// A message category, one list per channel.
///
/// Messages reference categories by name, not by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(with = "timestamp::required")]
    pub created_at: Timestamp,
    #[serde(
        default,
        with = "timestamp::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<Timestamp>,
}

/// A named drip sequence funnel-content messages can be attached to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesFunnel {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(with = "timestamp::required")]
    pub created_at: Timestamp,
    #[serde(
        default,
        with = "timestamp::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<Timestamp>,
}

/// Join-table edge between a funnel and a message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunnelAssignment {
    pub id: String,
    pub funnel_id: String,
    pub message_id: String,
    #[serde(with = "timestamp::required")]
    pub created_at: Timestamp,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn message_type_axes_round_trip() {
        for channel in Channel::ALL {
            for audience in [Audience::Broadcast, Audience::Funnel] {
                let ty = MessageType::from_parts(channel, audience);
                assert_eq!(ty.channel(), channel);
                assert_eq!(ty.audience(), audience);
            }
        }
    }

    #[test]
    fn message_type_uses_stored_tags() {
        assert_eq!(
            serde_json::to_string(&MessageType::FunnelContent).unwrap(),
            "\"funnel_content\""
        );
        assert_eq!(
            MessageType::from_str("email_broadcast").unwrap(),
            MessageType::EmailBroadcast
        );
        assert_eq!(MessageType::EmailFunnelContent.to_string(), "email_funnel_content");
    }

    #[test]
    fn tabs_map_onto_message_types() {
        assert_eq!(MessageTab::SmsBroadcast.message_type(), MessageType::Broadcast);
        assert_eq!(MessageTab::SmsFunnel.message_type(), MessageType::FunnelContent);
        assert_eq!(MessageTab::EmailBroadcast.message_type(), MessageType::EmailBroadcast);
        assert_eq!(
            MessageTab::EmailFunnel.message_type(),
            MessageType::EmailFunnelContent
        );
        assert_eq!(MessageTab::from_str("email_funnel").unwrap(), MessageTab::EmailFunnel);
        assert_eq!(MessageTab::default(), MessageTab::SmsBroadcast);
    }

    #[test]
    fn sms_row_decodes_without_subject() {
        let json = serde_json::json!({
            "id": "m1",
            "context_category": null,
            "content_name": "Welcome",
            "content": "Hi there",
            "message_type": "broadcast",
            "created_date": "2026-01-01T00:00:00+00:00",
            "sent_date": null,
            "created_at": "2026-01-01T00:00:00+00:00",
            "updated_at": "2026-01-01T00:00:00+00:00"
        });
        let record: MessageRecord = serde_json::from_value(json).unwrap();
        assert_eq!(record.channel(), Channel::Sms);
        assert!(record.subject.is_none());
        assert!(record.can_send());
    }

    #[test]
    fn empty_sent_date_counts_as_unsent() {
        let json = serde_json::json!({
            "id": "e1",
            "context_category": "Promo",
            "content_name": "Spring sale",
            "subject": "20% off",
            "content": "Body",
            "message_type": "email_broadcast",
            "sent_date": "",
            "created_at": "2026-01-01T00:00:00Z"
        });
        let record: MessageRecord = serde_json::from_value(json).unwrap();
        assert_eq!(record.channel(), Channel::Email);
        assert!(!record.is_sent());
        assert!(record.updated_at.is_none());
    }

    #[test]
    fn funnel_content_is_never_sendable() {
        let json = serde_json::json!({
            "id": "f1",
            "content_name": "Day 1",
            "content": "Body",
            "message_type": "funnel_content",
            "created_at": "2026-01-01T00:00:00Z"
        });
        let record: MessageRecord = serde_json::from_value(json).unwrap();
        assert!(!record.can_send());
    }

    #[test]
    fn by_channel_selects_side() {
        let mut pair = ByChannel::new(1, 2);
        assert_eq!(*pair.get(Channel::Sms), 1);
        assert_eq!(*pair.get(Channel::Email), 2);
        *pair.get_mut(Channel::Email) = 5;
        assert_eq!(pair.email, 5);
    }
}
