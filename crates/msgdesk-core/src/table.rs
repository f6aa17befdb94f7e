// SPDX-FileCopyrightText: 2026 Msgdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The six tables a record store exposes, and their column sets.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::DeskError;
use crate::types::{Channel, Row};

/// A logical table in the record store.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Table {
    TextMessages,
    EmailMessages,
    Categories,
    EmailCategories,
    SalesFunnels,
    FunnelContentAssignments,
}

/// Sort order for a whole-table read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderBy {
    pub column: &'static str,
    pub ascending: bool,
}

impl OrderBy {
    pub const fn asc(column: &'static str) -> Self {
        Self {
            column,
            ascending: true,
        }
    }

    pub const fn desc(column: &'static str) -> Self {
        Self {
            column,
            ascending: false,
        }
    }
}

const TEXT_MESSAGE_COLUMNS: &[&str] = &[
    "id",
    "context_category",
    "content_name",
    "content",
    "message_type",
    "created_date",
    "sent_date",
    "created_at",
    "updated_at",
];

const EMAIL_MESSAGE_COLUMNS: &[&str] = &[
    "id",
    "context_category",
    "content_name",
    "subject",
    "content",
    "message_type",
    "sent_date",
    "created_at",
    "updated_at",
];

const NAMED_COLUMNS: &[&str] = &["id", "name", "description", "created_at", "updated_at"];

const ASSIGNMENT_COLUMNS: &[&str] = &["id", "funnel_id", "message_id", "created_at"];

impl Table {
    pub const ALL: [Table; 6] = [
        Table::TextMessages,
        Table::EmailMessages,
        Table::Categories,
        Table::EmailCategories,
        Table::SalesFunnels,
        Table::FunnelContentAssignments,
    ];

    /// The table holding messages of a channel.
    pub fn messages(channel: Channel) -> Self {
        match channel {
            Channel::Sms => Table::TextMessages,
            Channel::Email => Table::EmailMessages,
        }
    }

    /// The table holding categories of a channel.
    pub fn categories(channel: Channel) -> Self {
        match channel {
            Channel::Sms => Table::Categories,
            Channel::Email => Table::EmailCategories,
        }
    }

    /// Table name as known to the store.
    pub fn name(self) -> &'static str {
        match self {
            Table::TextMessages => "text_messages",
            Table::EmailMessages => "email_messages",
            Table::Categories => "categories",
            Table::EmailCategories => "email_categories",
            Table::SalesFunnels => "sales_funnels",
            Table::FunnelContentAssignments => "funnel_content_assignments",
        }
    }

    pub fn columns(self) -> &'static [&'static str] {
        match self {
            Table::TextMessages => TEXT_MESSAGE_COLUMNS,
            Table::EmailMessages => EMAIL_MESSAGE_COLUMNS,
            Table::Categories | Table::EmailCategories | Table::SalesFunnels => NAMED_COLUMNS,
            Table::FunnelContentAssignments => ASSIGNMENT_COLUMNS,
        }
    }

    pub fn has_column(self, column: &str) -> bool {
        self.columns().contains(&column)
    }

    /// The ordering the console reads this table with.
    pub fn default_order(self) -> Option<OrderBy> {
        match self {
            Table::TextMessages | Table::EmailMessages => Some(OrderBy::desc("created_at")),
            Table::Categories | Table::EmailCategories | Table::SalesFunnels => {
                Some(OrderBy::asc("name"))
            }
            Table::FunnelContentAssignments => None,
        }
    }

    /// Rejects rows naming columns this table does not have.
    pub fn check_row(self, row: &Row) -> Result<(), DeskError> {
        match row.keys().find(|k| !self.has_column(k)) {
            Some(unknown) => Err(DeskError::InvalidRow {
                table: self.name().to_string(),
                message: format!("unknown column `{unknown}`"),
            }),
            None => Ok(()),
        }
    }

    /// Rejects an order-by on a column this table does not have.
    pub fn check_order(self, order: Option<OrderBy>) -> Result<(), DeskError> {
        match order {
            Some(o) if !self.has_column(o.column) => Err(DeskError::InvalidRow {
                table: self.name().to_string(),
                message: format!("cannot order by unknown column `{}`", o.column),
            }),
            _ => Ok(()),
        }
    }
}
