// SPDX-FileCopyrightText: 2026 Msgdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for msgdesk.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use msgdesk_core::MessageTab;
use serde::{Deserialize, Serialize};

/// Top-level msgdesk configuration.
///
/// Loaded from TOML files following the XDG hierarchy, with environment
/// variable overrides. All sections are optional.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct MsgdeskConfig {
    /// Console behavior settings.
    #[serde(default)]
    pub console: ConsoleConfig,

    /// Which record store backend to use.
    #[serde(default)]
    pub backend: BackendConfig,

    /// Hosted REST backend settings.
    #[serde(default)]
    pub rest: RestConfig,

    /// Local SQLite backend settings.
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Console behavior configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ConsoleConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Message tab selected when the console opens.
    #[serde(default)]
    pub default_tab: MessageTab,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            default_tab: MessageTab::default(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Record store backend selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Hosted PostgREST-compatible backend.
    #[default]
    Rest,
    /// Embedded SQLite database.
    Sqlite,
}

/// Backend selection configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BackendConfig {
    /// `rest` or `sqlite`.
    #[serde(default)]
    pub kind: BackendKind,
}

/// Hosted REST backend configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RestConfig {
    /// Project base URL, e.g. `https://xyz.supabase.co`.
    #[serde(default)]
    pub url: Option<String>,

    /// API key sent as both `apikey` and bearer token.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Request timeout in seconds. Unset leaves the HTTP client default.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

/// Local SQLite backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
        }
    }
}

fn default_database_path() -> String {
    dirs::data_dir()
        .map(|p| p.join("msgdesk").join("msgdesk.db"))
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "msgdesk.db".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_select_rest_backend() {
        let config = MsgdeskConfig::default();
        assert_eq!(config.backend.kind, BackendKind::Rest);
        assert_eq!(config.console.log_level, "info");
        assert_eq!(config.console.default_tab, MessageTab::SmsBroadcast);
        assert!(config.rest.url.is_none());
        assert!(config.rest.timeout_secs.is_none());
        assert!(config.storage.database_path.ends_with("msgdesk.db"));
    }

    #[test]
    fn backend_kind_parses_lowercase() {
        let config: MsgdeskConfig = toml::from_str("[backend]\nkind = \"sqlite\"\n").unwrap();
        assert_eq!(config.backend.kind, BackendKind::Sqlite);
    }

    #[test]
    fn default_tab_parses_snake_case() {
        let config: MsgdeskConfig =
            toml::from_str("[console]\ndefault_tab = \"email_funnel\"\n").unwrap();
        assert_eq!(config.console.default_tab, MessageTab::EmailFunnel);
    }

    #[test]
    fn unknown_section_is_rejected() {
        assert!(toml::from_str::<MsgdeskConfig>("[telegram]\nbot_token = \"x\"\n").is_err());
    }
}
