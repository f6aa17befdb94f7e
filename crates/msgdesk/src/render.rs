// SPDX-FileCopyrightText: 2026 Msgdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plain-text tables and JSON views shared by `list`, `categories` and the
//! shell.

use std::collections::HashMap;

use colored::Colorize;
use msgdesk_console::projector::{
    EMPTY_LIST, category_label, created_of, detail_header, detail_text, funnels_label, sent_label,
    short_date, status_header,
};
use msgdesk_core::{Audience, Category, MessageRecord, MessageTab, SalesFunnel};
use serde::Serialize;

/// Widest the detail column is allowed to get.
const DETAIL_WIDTH: usize = 40;

/// One message as printed by `list --json`.
#[derive(Debug, Serialize)]
pub struct MessageView<'a> {
    #[serde(flatten)]
    pub message: &'a MessageRecord,
    /// Names of the funnels the message is assigned to; funnel tabs only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub funnels: Option<Vec<&'a str>>,
}

pub fn message_views<'a>(
    tab: MessageTab,
    rows: &[&'a MessageRecord],
    funnels: &HashMap<&str, Vec<&'a SalesFunnel>>,
) -> Vec<MessageView<'a>> {
    rows.iter()
        .map(|&message| MessageView {
            message,
            funnels: (tab.audience() == Audience::Funnel).then(|| {
                funnels
                    .get(message.id.as_str())
                    .map(|list| list.iter().map(|f| f.name.as_str()).collect())
                    .unwrap_or_default()
            }),
        })
        .collect()
}

/// Renders the message table of `tab`, rows numbered from 1.
pub fn message_table(
    tab: MessageTab,
    rows: &[&MessageRecord],
    funnels: &HashMap<&str, Vec<&SalesFunnel>>,
    use_color: bool,
) -> String {
    if rows.is_empty() {
        return format!("  {EMPTY_LIST}\n");
    }

    let headers = [
        "#",
        "Name",
        "Category",
        detail_header(tab.channel()),
        "Created",
        status_header(tab),
    ];
    let body: Vec<Vec<String>> = rows
        .iter()
        .enumerate()
        .map(|(i, m)| {
            let status = match tab.audience() {
                Audience::Broadcast => sent_label(m),
                Audience::Funnel => funnels_label(funnels.get(m.id.as_str())),
            };
            vec![
                (i + 1).to_string(),
                m.content_name.clone(),
                category_label(m).to_string(),
                truncate(detail_text(m), DETAIL_WIDTH),
                short_date(&created_of(m)),
                status,
            ]
        })
        .collect();

    let mut out = table(&headers, &body, use_color, |row, col, cell| {
        if !use_color || col != 5 || tab.audience() != Audience::Broadcast {
            return cell;
        }
        if rows[row].is_sent() {
            cell.green().to_string()
        } else {
            cell.yellow().to_string()
        }
    });
    out.push_str(&format!("\n  {} message(s)\n", rows.len()));
    out
}

/// Renders a category list, rows numbered from 1.
pub fn category_table(categories: &[Category], use_color: bool) -> String {
    if categories.is_empty() {
        return "  No categories yet.\n".to_string();
    }
    let body: Vec<Vec<String>> = categories
        .iter()
        .enumerate()
        .map(|(i, c)| {
            vec![
                (i + 1).to_string(),
                c.name.clone(),
                truncate(c.description.as_deref().unwrap_or("-"), DETAIL_WIDTH),
                short_date(&c.created_at),
            ]
        })
        .collect();
    table(&["#", "Name", "Description", "Created"], &body, use_color, |_, _, cell| cell)
}

/// Full detail of one message for the shell's `show` command.
pub fn message_detail(
    record: &MessageRecord,
    funnels: Option<&Vec<&SalesFunnel>>,
    use_color: bool,
) -> String {
    let label = |name: &str| {
        let padded = format!("{name:<10}");
        if use_color {
            padded.bold().to_string()
        } else {
            padded
        }
    };
    let kind = MessageTab::ALL
        .iter()
        .find(|t| t.message_type() == record.message_type)
        .map_or("", |t| t.label());

    let mut out = String::new();
    out.push_str(&format!("{}{}\n", label("Name"), record.content_name));
    out.push_str(&format!("{}{kind}\n", label("Type")));
    out.push_str(&format!("{}{}\n", label("Category"), category_label(record)));
    if let Some(subject) = &record.subject {
        out.push_str(&format!("{}{subject}\n", label("Subject")));
    }
    out.push_str(&format!("{}{}\n", label("Created"), short_date(&created_of(record))));
    if record.is_broadcast() {
        out.push_str(&format!("{}{}\n", label("Sent"), sent_label(record)));
    } else {
        out.push_str(&format!("{}{}\n", label("Funnels"), funnels_label(funnels)));
    }
    out.push('\n');
    out.push_str(&record.content);
    out.push('\n');
    out
}

fn table(
    headers: &[&str],
    body: &[Vec<String>],
    use_color: bool,
    style: impl Fn(usize, usize, String) -> String,
) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in body {
        for (col, cell) in row.iter().enumerate() {
            widths[col] = widths[col].max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let header_line = headers
        .iter()
        .zip(&widths)
        .map(|(h, w)| format!("{h:<w$}"))
        .collect::<Vec<_>>()
        .join("  ");
    let header_line = header_line.trim_end();
    if use_color {
        out.push_str(&format!("  {}\n", header_line.bold()));
    } else {
        out.push_str(&format!("  {header_line}\n"));
    }
    let rule_width = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);
    out.push_str(&format!("  {}\n", "-".repeat(rule_width)));

    for (r, row) in body.iter().enumerate() {
        let line = row
            .iter()
            .zip(&widths)
            .enumerate()
            .map(|(c, (cell, w))| style(r, c, format!("{cell:<w$}")))
            .collect::<Vec<_>>()
            .join("  ");
        out.push_str(&format!("  {}\n", line.trim_end()));
    }
    out
}

/// Single-line, at most `max` characters.
fn truncate(text: &str, max: usize) -> String {
    let flat: String = text
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect();
    if flat.chars().count() <= max {
        return flat;
    }
    let mut cut: String = flat.chars().take(max.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

#[cfg(test)]
mod tests {
    use super::*;
    use msgdesk_core::MessageType;
    use msgdesk_test_utils::fixtures::{category, funnel, in_category, message, sent};

    #[test]
    fn broadcast_table_shows_sent_column() {
        let a = in_category(message("a", MessageType::Broadcast, "Spring"), "Promo");
        let b = sent(message("b", MessageType::Broadcast, "Winter"), "2026-03-05T10:00:00Z");
        let out = message_table(MessageTab::SmsBroadcast, &[&a, &b], &HashMap::new(), false);

        let lines: Vec<&str> = out.lines().collect();
        assert!(lines[0].contains("Content"));
        assert!(lines[0].ends_with("Sent Date"));
        assert!(lines[2].contains("Spring"));
        assert!(lines[2].contains("Promo"));
        assert!(lines[2].ends_with("Not sent"));
        assert!(lines[3].ends_with("Mar 5, 2026"));
        assert!(out.contains("2 message(s)"));
    }

    #[test]
    fn funnel_table_names_funnels() {
        let m = message("m", MessageType::EmailFunnelContent, "Day 1");
        let onboarding = funnel("f1", "Onboarding");
        let mut funnels = HashMap::new();
        funnels.insert("m", vec![&onboarding]);

        let out = message_table(MessageTab::EmailFunnel, &[&m], &funnels, false);
        assert!(out.lines().next().unwrap().contains("Subject"));
        assert!(out.contains("Day 1 subject"));
        assert!(out.contains("Onboarding"));
    }

    #[test]
    fn empty_table_prints_placeholder() {
        let out = message_table(MessageTab::SmsFunnel, &[], &HashMap::new(), false);
        assert_eq!(out.trim(), EMPTY_LIST);
    }

    #[test]
    fn plain_output_has_no_escape_codes() {
        let m = message("m", MessageType::Broadcast, "Spring");
        let out = message_table(MessageTab::SmsBroadcast, &[&m], &HashMap::new(), false);
        assert!(!out.contains('\u{1b}'));
    }

    #[test]
    fn long_detail_is_cut() {
        let text = "x".repeat(100);
        let cut = truncate(&text, DETAIL_WIDTH);
        assert_eq!(cut.chars().count(), DETAIL_WIDTH);
        assert!(cut.ends_with('…'));
        assert_eq!(truncate("line one\nline two", 40), "line one line two");
    }

    #[test]
    fn json_view_lists_funnels_only_on_funnel_tabs() {
        let m = message("m", MessageType::FunnelContent, "Day 1");
        let f = funnel("f1", "Onboarding");
        let mut funnels = HashMap::new();
        funnels.insert("m", vec![&f]);

        let views = message_views(MessageTab::SmsFunnel, &[&m], &funnels);
        let json = serde_json::to_value(&views).unwrap();
        assert_eq!(json[0]["id"], "m");
        assert_eq!(json[0]["funnels"][0], "Onboarding");

        let b = message("b", MessageType::Broadcast, "Spring");
        let views = message_views(MessageTab::SmsBroadcast, &[&b], &HashMap::new());
        let json = serde_json::to_value(&views).unwrap();
        assert!(json[0].get("funnels").is_none());
        assert_eq!(json[0]["sent_date"], serde_json::Value::Null);
    }

    #[test]
    fn category_table_fills_missing_description() {
        let mut promo = category("c1", "Promo");
        promo.description = Some("Deals".into());
        let out = category_table(&[promo, category("c2", "News")], false);
        assert!(out.contains("Deals"));
        assert!(out.lines().nth(3).unwrap().contains('-'));
    }

    #[test]
    fn detail_shows_subject_for_email() {
        let m = message("m", MessageType::EmailBroadcast, "Launch");
        let out = message_detail(&m, None, false);
        assert!(out.contains("Email Broadcast"));
        assert!(out.contains("Launch subject"));
        assert!(out.contains("Not sent"));
        assert!(out.ends_with("Launch body\n"));
    }
}
