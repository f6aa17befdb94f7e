// SPDX-FileCopyrightText: 2026 Msgdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `msgdesk check` command implementation.
//!
//! Opens the configured backend and runs its health check, reporting each
//! step with timing.

use std::io::IsTerminal;
use std::time::{Duration, Instant};

use colored::Colorize;
use msgdesk_config::MsgdeskConfig;
use msgdesk_config::model::BackendKind;
use msgdesk_core::{DeskError, HealthStatus};

use crate::store;

/// Status of a diagnostic check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckStatus {
    Pass,
    Warn,
    Fail,
}

/// Result of a single diagnostic check.
#[derive(Debug, Clone)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    pub duration: Duration,
}

/// Run the `msgdesk check` command.
///
/// Returns `Ok(false)` when any check failed so the caller can set the exit
/// code.
pub async fn run_check(config: &MsgdeskConfig, plain: bool) -> Result<bool, DeskError> {
    let use_color = !plain && std::io::stdout().is_terminal();

    let mut results = vec![CheckResult {
        name: "Configuration".to_string(),
        status: CheckStatus::Pass,
        message: format!("valid (backend: {})", backend_name(config.backend.kind)),
        duration: Duration::ZERO,
    }];
    results.extend(check_backend(config).await);

    println!();
    println!("  msgdesk check");
    println!("  {}", "-".repeat(50));
    for result in &results {
        println!("{}", format_result(result, use_color));
    }
    println!();

    let failed = results
        .iter()
        .filter(|r| r.status == CheckStatus::Fail)
        .count();
    if failed == 0 {
        println!("  All checks passed.");
    } else {
        let word = if failed == 1 { "check" } else { "checks" };
        println!("  {failed} {word} failed.");
    }
    println!();

    Ok(failed == 0)
}

fn backend_name(kind: BackendKind) -> &'static str {
    match kind {
        BackendKind::Rest => "rest",
        BackendKind::Sqlite => "sqlite",
    }
}

/// Opens the store, then asks it for its health.
async fn check_backend(config: &MsgdeskConfig) -> Vec<CheckResult> {
    let start = Instant::now();
    let store = match store::open_store(config).await {
        Ok(store) => store,
        Err(e) => {
            return vec![CheckResult {
                name: "Backend".to_string(),
                status: CheckStatus::Fail,
                message: e.to_string(),
                duration: start.elapsed(),
            }];
        }
    };
    let opened = CheckResult {
        name: "Backend".to_string(),
        status: CheckStatus::Pass,
        message: format!("{} v{}", store.name(), store.version()),
        duration: start.elapsed(),
    };

    let start = Instant::now();
    let (status, message) = match store.health_check().await {
        Ok(HealthStatus::Healthy) => (CheckStatus::Pass, "healthy".to_string()),
        Ok(HealthStatus::Degraded(reason)) => (CheckStatus::Warn, reason),
        Ok(HealthStatus::Unhealthy(reason)) => (CheckStatus::Fail, reason),
        Err(e) => (CheckStatus::Fail, e.to_string()),
    };
    let health = CheckResult {
        name: "Health".to_string(),
        status,
        message,
        duration: start.elapsed(),
    };

    if let Err(e) = store.shutdown().await {
        tracing::warn!(error = %e, "backend shutdown failed");
    }
    vec![opened, health]
}

fn format_result(result: &CheckResult, use_color: bool) -> String {
    let duration_ms = result.duration.as_millis();
    if use_color {
        let (symbol, message) = match result.status {
            CheckStatus::Pass => ("✓".green(), result.message.normal()),
            CheckStatus::Warn => ("!".yellow(), result.message.yellow()),
            CheckStatus::Fail => ("✗".red(), result.message.red()),
        };
        format!(
            "    {symbol} {:<20} {message} ({duration_ms}ms)",
            result.name
        )
    } else {
        let tag = match result.status {
            CheckStatus::Pass => "[OK]  ",
            CheckStatus::Warn => "[WARN]",
            CheckStatus::Fail => "[FAIL]",
        };
        format!(
            "    {tag} {:<20} {} ({duration_ms}ms)",
            result.name, result.message
        )
    }
}
