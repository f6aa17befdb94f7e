// SPDX-FileCopyrightText: 2026 Msgdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! View projection: from a snapshot and the current filter selections to the
//! rows a message table shows.
//!
//! Everything here is a pure function of its arguments. Nothing is cached;
//! callers recompute on every render.

use std::cmp::Ordering;
use std::collections::HashMap;

use msgdesk_core::{
    Audience, Category, Channel, MessageRecord, MessageTab, SalesFunnel, Timestamp,
};
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::snapshot::Snapshot;

/// Text shown in the sent column of a message that has not gone out.
pub const NOT_SENT: &str = "Not sent";

/// Text shown when the projection is empty.
pub const EMPTY_LIST: &str = "No messages found. Create your first message to get started.";

/// The filter selections a projection is computed for.
#[derive(Debug, Clone, Copy)]
pub struct ViewFilter<'a> {
    pub tab: MessageTab,
    /// Case-insensitive substring of `content_name`; empty matches all.
    pub search: &'a str,
    /// Exact `context_category`; empty matches all.
    pub category: &'a str,
}

impl<'a> ViewFilter<'a> {
    pub fn tab(tab: MessageTab) -> Self {
        Self {
            tab,
            search: "",
            category: "",
        }
    }
}

/// Selects, filters and orders the messages of the filter's tab.
pub fn project<'s>(snapshot: &'s Snapshot, filter: &ViewFilter<'_>) -> Vec<&'s MessageRecord> {
    let audience = filter.tab.audience();
    let needle = filter.search.to_lowercase();

    let mut rows: Vec<&MessageRecord> = snapshot
        .messages
        .get(filter.tab.channel())
        .iter()
        .filter(|m| m.message_type.audience() == audience)
        .filter(|m| needle.is_empty() || m.content_name.to_lowercase().contains(&needle))
        .filter(|m| {
            filter.category.is_empty() || m.context_category.as_deref() == Some(filter.category)
        })
        .collect();

    match audience {
        Audience::Broadcast => rows.sort_by(|a, b| broadcast_order(a, b)),
        Audience::Funnel => rows.sort_by(|a, b| funnel_order(a, b)),
    }
    rows
}

/// Unsent first, in input order; then sent, newest first.
fn broadcast_order(a: &MessageRecord, b: &MessageRecord) -> Ordering {
    match (a.sent_date, b.sent_date) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(x), Some(y)) => y.cmp(&x),
    }
}

/// By category (absent sorts as empty), then by name.
fn funnel_order(a: &MessageRecord, b: &MessageRecord) -> Ordering {
    let cat_a = a.context_category.as_deref().unwrap_or("");
    let cat_b = b.context_category.as_deref().unwrap_or("");
    locale_cmp(cat_a, cat_b).then_with(|| locale_cmp(&a.content_name, &b.content_name))
}

/// Locale-aware string comparison.
///
/// Strings are compared on base letters first, ignoring accents and case.
/// Letters with no canonical decomposition (`ß`, `ø`, `æ`, `ł` and a few
/// more) are folded to their base spelling so they sort beside it.
/// Ties are broken by accents (unaccented first), then by case (lowercase
/// first), then by code point so the order is total.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    primary_key(a)
        .cmp(&primary_key(b))
        .then_with(|| secondary_key(a).cmp(&secondary_key(b)))
        .then_with(|| tertiary_key(a).cmp(&tertiary_key(b)))
        .then_with(|| a.cmp(b))
}

fn primary_key(s: &str) -> String {
    let mut key = String::with_capacity(s.len());
    for c in s
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
    {
        match fold(c) {
            Some(base) => key.push_str(base),
            None => key.push(c),
        }
    }
    key
}

/// Base spelling of lowercase letters NFD leaves whole.
fn fold(c: char) -> Option<&'static str> {
    Some(match c {
        'ß' => "ss",
        'æ' => "ae",
        'œ' => "oe",
        'ø' => "o",
        'ł' => "l",
        'đ' | 'ð' => "d",
        'ħ' => "h",
        'ı' => "i",
        'þ' => "th",
        _ => return None,
    })
}

fn secondary_key(s: &str) -> String {
    s.nfd().flat_map(char::to_lowercase).collect()
}

fn tertiary_key(s: &str) -> Vec<u8> {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .map(|c| u8::from(c.is_uppercase()))
        .collect()
}

/// Message id to the funnels its assignment edges point at, in edge order.
///
/// Edges naming a funnel the snapshot does not contain are dropped.
pub fn funnel_map(snapshot: &Snapshot) -> HashMap<&str, Vec<&SalesFunnel>> {
    let funnels: HashMap<&str, &SalesFunnel> =
        snapshot.funnels.iter().map(|f| (f.id.as_str(), f)).collect();

    let mut map: HashMap<&str, Vec<&SalesFunnel>> = HashMap::new();
    for edge in &snapshot.assignments {
        if let Some(&funnel) = funnels.get(edge.funnel_id.as_str()) {
            map.entry(edge.message_id.as_str()).or_default().push(funnel);
        }
    }
    map
}

/// Category dropdown options for a tab: the categories of its channel.
pub fn category_options(snapshot: &Snapshot, tab: MessageTab) -> &[Category] {
    snapshot.categories.get(tab.channel())
}

/// Header of the detail column: the subject for email, the body for SMS.
pub fn detail_header(channel: Channel) -> &'static str {
    match channel {
        Channel::Sms => "Content",
        Channel::Email => "Subject",
    }
}

/// Text of the detail column for one message.
pub fn detail_text(record: &MessageRecord) -> &str {
    match record.channel() {
        Channel::Email => record.subject.as_deref().unwrap_or(""),
        Channel::Sms => &record.content,
    }
}

/// Header of the last data column: send state for broadcasts, funnels otherwise.
pub fn status_header(tab: MessageTab) -> &'static str {
    match tab.audience() {
        Audience::Broadcast => "Sent Date",
        Audience::Funnel => "Sales Funnels",
    }
}

/// Text of the category column.
pub fn category_label(record: &MessageRecord) -> &str {
    record.context_category.as_deref().unwrap_or("-")
}

/// The creation instant shown for a message.
pub fn created_of(record: &MessageRecord) -> Timestamp {
    match record.channel() {
        Channel::Sms => record.created_date.unwrap_or(record.created_at),
        Channel::Email => record.created_at,
    }
}

/// Text of the sent column.
pub fn sent_label(record: &MessageRecord) -> String {
    record.sent_date.map_or_else(|| NOT_SENT.to_string(), |t| short_date(&t))
}

/// Funnel names for the funnels column, or `No funnels`.
pub fn funnels_label(funnels: Option<&Vec<&SalesFunnel>>) -> String {
    match funnels {
        Some(list) if !list.is_empty() => list
            .iter()
            .map(|f| f.name.as_str())
            .collect::<Vec<_>>()
            .join(", "),
        _ => "No funnels".to_string(),
    }
}

/// `Mar 5, 2026`
pub fn short_date(ts: &Timestamp) -> String {
    ts.format("%b %-d, %Y").to_string()
}
