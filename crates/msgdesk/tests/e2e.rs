// SPDX-FileCopyrightText: 2026 Msgdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end tests for the msgdesk binary against a temp SQLite database.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use msgdesk_config::model::StorageConfig;
use msgdesk_core::{MessageType, RecordStore, StoreAdapter, Table, rows};
use msgdesk_storage::SqliteStorage;
use msgdesk_test_utils::fixtures::{category, in_category, message, sent};
use serde_json::Value;

struct Workspace {
    _dir: tempfile::TempDir,
    db: PathBuf,
    config: PathBuf,
}

fn workspace() -> Workspace {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("desk.db");
    let config = dir.path().join("msgdesk.toml");
    std::fs::write(
        &config,
        format!(
            "[console]\nlog_level = \"warn\"\n\n[backend]\nkind = \"sqlite\"\n\n[storage]\ndatabase_path = {:?}\n",
            db.display().to_string()
        ),
    )
    .unwrap();
    Workspace {
        _dir: dir,
        db,
        config,
    }
}

async fn seed(db: &Path) {
    let storage = SqliteStorage::new(StorageConfig {
        database_path: db.display().to_string(),
    });
    storage.initialize().await.unwrap();

    let records = [
        sent(
            message("s-old", MessageType::Broadcast, "Winter sale"),
            "2026-02-01T00:00:00Z",
        ),
        in_category(message("s-new", MessageType::Broadcast, "Spring sale"), "Promo"),
        message("s-funnel", MessageType::FunnelContent, "Day 1"),
    ];
    for record in &records {
        let row = rows::encode(Table::TextMessages, record).unwrap();
        storage.insert(Table::TextMessages, row).await.unwrap();
    }
    let row = rows::encode(Table::EmailCategories, &category("ec1", "News")).unwrap();
    storage.insert(Table::EmailCategories, row).await.unwrap();
    storage.shutdown().await.unwrap();
}

fn msgdesk(config: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_msgdesk"))
        .arg("--config")
        .arg(config)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run msgdesk")
}

#[test]
fn help_lists_subcommands() {
    let output = Command::new(env!("CARGO_BIN_EXE_msgdesk"))
        .arg("--help")
        .output()
        .expect("failed to run msgdesk --help");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for word in ["shell", "list", "categories", "check", "--config"] {
        assert!(stdout.contains(word), "help is missing `{word}`");
    }
}

#[tokio::test]
async fn list_json_projects_the_broadcast_tab() {
    let ws = workspace();
    seed(&ws.db).await;

    let output = msgdesk(&ws.config, &["list", "--tab", "sms_broadcast", "--json"]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    let ids: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, ["s-new", "s-old"]);
    assert_eq!(json[0]["context_category"], "Promo");
    assert!(json[0].get("funnels").is_none());
}

#[tokio::test]
async fn list_json_applies_search_and_funnel_view() {
    let ws = workspace();
    seed(&ws.db).await;

    let output = msgdesk(&ws.config, &["list", "--tab", "sms_broadcast", "--search", "WINTER", "--json"]);
    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json.as_array().unwrap().len(), 1);
    assert_eq!(json[0]["content_name"], "Winter sale");

    let output = msgdesk(&ws.config, &["list", "--tab", "sms_funnel", "--json"]);
    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json[0]["id"], "s-funnel");
    assert_eq!(json[0]["funnels"], Value::Array(vec![]));
}

#[tokio::test]
async fn plain_list_prints_a_table() {
    let ws = workspace();
    seed(&ws.db).await;

    let output = msgdesk(&ws.config, &["list", "--plain"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("SMS Broadcast"));
    assert!(stdout.contains("Sent Date"));
    assert!(stdout.contains("Not sent"));
    assert!(stdout.contains("Feb 1, 2026"));
}

#[tokio::test]
async fn categories_json_reads_the_channel_list() {
    let ws = workspace();
    seed(&ws.db).await;

    let output = msgdesk(&ws.config, &["categories", "--channel", "email", "--json"]);
    assert!(output.status.success());
    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json[0]["name"], "News");

    let output = msgdesk(&ws.config, &["categories", "--json"]);
    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(json.as_array().unwrap().is_empty());
}

#[test]
fn check_passes_on_fresh_database() {
    let ws = workspace();
    let output = msgdesk(&ws.config, &["check", "--plain"]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stdout));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("[OK]"));
    assert!(stdout.contains("All checks passed."));
    assert!(ws.db.exists());
}

#[test]
fn invalid_config_exits_with_diagnostics() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("msgdesk.toml");
    std::fs::write(&config, "[backend]\nkind = \"sqlite\"\n\n[storage]\ndatabse_path = \"x.db\"\n")
        .unwrap();

    let output = msgdesk(&config, &["list"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(!output.stderr.is_empty());
}
