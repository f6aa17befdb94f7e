// SPDX-FileCopyrightText: 2026 Msgdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `msgdesk list` and `msgdesk categories` command implementations.
//!
//! One-shot reads: load the snapshot, project it, print it, exit.

use std::io::IsTerminal;

use msgdesk_config::MsgdeskConfig;
use msgdesk_console::Snapshot;
use msgdesk_console::projector::{self, ViewFilter};
use msgdesk_core::{Channel, DeskError, MessageTab};

use crate::render;
use crate::store;

/// Run the `msgdesk list` command.
///
/// With `json`, prints the projected records as a JSON array for scripting.
pub async fn run_list(
    config: &MsgdeskConfig,
    tab: MessageTab,
    search: &str,
    category: &str,
    json: bool,
    plain: bool,
) -> Result<(), DeskError> {
    let store = store::open_store(config).await?;
    let snapshot = Snapshot::load(store.as_ref()).await?;

    let filter = ViewFilter {
        tab,
        search,
        category,
    };
    let rows = projector::project(&snapshot, &filter);
    let funnels = projector::funnel_map(&snapshot);

    if json {
        let views = render::message_views(tab, &rows, &funnels);
        println!("{}", to_json(&views)?);
    } else {
        let use_color = !plain && std::io::stdout().is_terminal();
        println!("\n  {}\n", tab.label());
        print!("{}", render::message_table(tab, &rows, &funnels, use_color));
    }

    store.shutdown().await
}

/// Run the `msgdesk categories` command.
pub async fn run_categories(
    config: &MsgdeskConfig,
    channel: Channel,
    json: bool,
) -> Result<(), DeskError> {
    let store = store::open_store(config).await?;
    let snapshot = Snapshot::load(store.as_ref()).await?;
    let categories = snapshot.categories.get(channel);

    if json {
        println!("{}", to_json(categories)?);
    } else {
        let use_color = std::io::stdout().is_terminal();
        println!("\n  {} Categories\n", channel.label());
        print!("{}", render::category_table(categories, use_color));
    }

    store.shutdown().await
}

fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<String, DeskError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| DeskError::Internal(format!("failed to encode JSON output: {e}")))
}
