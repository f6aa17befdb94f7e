// SPDX-FileCopyrightText: 2026 Msgdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Input-state holders for the message and category dialogs.
//!
//! A form only validates and assembles payloads. Writing them to a store is
//! the job of [`crate::operations`].

use msgdesk_core::{Category, Channel, MessageRecord, MessageType, Timestamp, timestamp};
use serde::Serialize;
use thiserror::Error;

/// A required field left empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Content name is required")]
    MissingContentName,
    #[error("Content is required")]
    MissingContent,
    #[error("Subject is required for email messages")]
    MissingSubject,
    #[error("Category name is required")]
    MissingCategoryName,
}

/// Where a form is in its submit cycle.
///
/// A successful submit closes the form, so there is no settled state here.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FormStatus {
    #[default]
    Editing,
    Submitting,
    /// The last submit failed; fields are unchanged.
    Failed(String),
}

/// Fields of the create/edit message dialog.
#[derive(Debug, Clone, PartialEq)]
pub struct MessageForm {
    channel: Channel,
    pub content_name: String,
    /// Empty string means no category.
    pub context_category: String,
    /// Ignored for SMS.
    pub subject: String,
    pub content: String,
    pub status: FormStatus,
}

/// Insert or update payload for a message row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MessagePayload {
    pub content_name: String,
    pub context_category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    pub content: String,
    pub message_type: MessageType,
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "timestamp::optional"
    )]
    pub created_date: Option<Timestamp>,
}

impl MessageForm {
    /// An empty form for a new message of `channel`.
    pub fn blank(channel: Channel) -> Self {
        Self {
            channel,
            content_name: String::new(),
            context_category: String::new(),
            subject: String::new(),
            content: String::new(),
            status: FormStatus::Editing,
        }
    }

    /// A form seeded from an existing message.
    pub fn seeded(record: &MessageRecord) -> Self {
        Self {
            channel: record.channel(),
            content_name: record.content_name.clone(),
            context_category: record.context_category.clone().unwrap_or_default(),
            subject: record.subject.clone().unwrap_or_default(),
            content: record.content.clone(),
            status: FormStatus::Editing,
        }
    }

    pub fn channel(&self) -> Channel {
        self.channel
    }

    /// Checks required fields in display order and reports the first gap.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.content_name.is_empty() {
            return Err(ValidationError::MissingContentName);
        }
        if self.channel == Channel::Email && self.subject.is_empty() {
            return Err(ValidationError::MissingSubject);
        }
        if self.content.is_empty() {
            return Err(ValidationError::MissingContent);
        }
        Ok(())
    }

    /// Builds the payload for saving under `message_type`.
    ///
    /// `created` is the creation time stamped on new SMS messages; pass
    /// `None` when editing so creation timestamps are left alone.
    pub fn payload(
        &self,
        message_type: MessageType,
        created: Option<Timestamp>,
    ) -> Result<MessagePayload, ValidationError> {
        self.validate()?;
        let is_email = self.channel == Channel::Email;
        Ok(MessagePayload {
            content_name: self.content_name.clone(),
            context_category: non_empty(&self.context_category),
            subject: is_email.then(|| self.subject.clone()),
            content: self.content.clone(),
            message_type,
            created_date: if is_email { None } else { created },
        })
    }
}

/// Fields of the create/edit category form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryForm {
    pub name: String,
    pub description: String,
    pub status: FormStatus,
}

/// Insert or update payload for a category row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryPayload {
    pub name: String,
    pub description: Option<String>,
}

impl CategoryForm {
    pub fn blank() -> Self {
        Self::default()
    }

    pub fn seeded(category: &Category) -> Self {
        Self {
            name: category.name.clone(),
            description: category.description.clone().unwrap_or_default(),
            status: FormStatus::Editing,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.is_empty() {
            return Err(ValidationError::MissingCategoryName);
        }
        Ok(())
    }

    /// Builds the payload; an empty description becomes null.
    pub fn payload(&self) -> Result<CategoryPayload, ValidationError> {
        self.validate()?;
        Ok(CategoryPayload {
            name: self.name.clone(),
            description: non_empty(&self.description),
        })
    }
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use msgdesk_test_utils::fixtures::{category, in_category, message, sent, ts};

    fn filled(channel: Channel) -> MessageForm {
        let mut form = MessageForm::blank(channel);
        form.content_name = "Welcome".into();
        form.subject = "Hi".into();
        form.content = "Body".into();
        form
    }

    #[test]
    fn required_fields_are_checked() {
        let mut form = filled(Channel::Sms);
        form.content_name.clear();
        assert_eq!(form.validate(), Err(ValidationError::MissingContentName));

        let mut form = filled(Channel::Sms);
        form.content.clear();
        assert_eq!(form.validate(), Err(ValidationError::MissingContent));
    }

    #[test]
    fn subject_required_only_for_email() {
        let mut sms = filled(Channel::Sms);
        sms.subject.clear();
        assert!(sms.validate().is_ok());

        let mut email = filled(Channel::Email);
        email.subject.clear();
        assert_eq!(email.validate(), Err(ValidationError::MissingSubject));
    }

    #[test]
    fn whitespace_counts_as_filled() {
        let mut form = filled(Channel::Sms);
        form.content = "   ".into();
        assert!(form.validate().is_ok());
    }

    #[test]
    fn sms_payload_has_created_date_and_no_subject() {
        let created = ts("2026-05-01T08:00:00Z");
        let payload = filled(Channel::Sms)
            .payload(MessageType::Broadcast, Some(created))
            .unwrap();
        assert_eq!(payload.subject, None);
        assert_eq!(payload.created_date, Some(created));
        assert_eq!(payload.context_category, None);

        let json = serde_json::to_value(&payload).unwrap();
        assert!(json.get("subject").is_none());
        assert_eq!(json["context_category"], serde_json::Value::Null);
        assert_eq!(json["message_type"], "broadcast");
    }

    #[test]
    fn email_payload_has_subject_and_no_created_date() {
        let payload = filled(Channel::Email)
            .payload(MessageType::EmailFunnelContent, Some(ts("2026-05-01T08:00:00Z")))
            .unwrap();
        assert_eq!(payload.subject.as_deref(), Some("Hi"));
        assert_eq!(payload.created_date, None);
        let json = serde_json::to_value(&payload).unwrap();
        assert!(json.get("created_date").is_none());
    }

    #[test]
    fn seeded_form_mirrors_record() {
        let record = sent(
            in_category(message("m1", MessageType::EmailBroadcast, "Launch"), "News"),
            "2026-02-01T00:00:00Z",
        );
        let form = MessageForm::seeded(&record);
        assert_eq!(form.channel(), Channel::Email);
        assert_eq!(form.content_name, "Launch");
        assert_eq!(form.context_category, "News");
        assert_eq!(form.subject, "Launch subject");
        assert_eq!(form.status, FormStatus::Editing);

        let payload = form.payload(MessageType::EmailBroadcast, None).unwrap();
        assert_eq!(payload.context_category.as_deref(), Some("News"));
    }

    #[test]
    fn category_description_normalizes_to_null() {
        let mut form = CategoryForm::blank();
        assert_eq!(form.payload(), Err(ValidationError::MissingCategoryName));

        form.name = "Promo".into();
        assert_eq!(form.payload().unwrap().description, None);

        form.description = "Seasonal offers".into();
        assert_eq!(
            form.payload().unwrap().description.as_deref(),
            Some("Seasonal offers")
        );
    }

    #[test]
    fn category_form_seeds_from_record() {
        let mut record = category("c1", "Promo");
        record.description = Some("Deals".into());
        let form = CategoryForm::seeded(&record);
        assert_eq!(form.name, "Promo");
        assert_eq!(form.description, "Deals");
    }
}
