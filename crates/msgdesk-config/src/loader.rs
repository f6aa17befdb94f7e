// SPDX-FileCopyrightText: 2026 Msgdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./msgdesk.toml` > `~/.config/msgdesk/msgdesk.toml`
//! > `/etc/msgdesk/msgdesk.toml` with environment variable overrides via the
//! `MSGDESK_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::MsgdeskConfig;

/// System-wide config file.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/msgdesk/msgdesk.toml";

/// Config file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "msgdesk.toml";

/// Per-user config file under the XDG config directory.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("msgdesk").join("msgdesk.toml"))
}

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/msgdesk/msgdesk.toml` (system-wide)
/// 3. `~/.config/msgdesk/msgdesk.toml` (user XDG config)
/// 4. `./msgdesk.toml` (local directory)
/// 5. `MSGDESK_*` environment variables
pub fn load_config() -> Result<MsgdeskConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
pub fn load_config_from_str(toml_content: &str) -> Result<MsgdeskConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(MsgdeskConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<MsgdeskConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(MsgdeskConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used for config loading, before extraction.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(MsgdeskConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_PATH))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file(LOCAL_CONFIG_FILE))
        .merge(env_provider())
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` because key names contain
/// underscores: `MSGDESK_REST_API_KEY` must map to `rest.api_key`, not
/// `rest.api.key`.
fn env_provider() -> Env {
    Env::prefixed("MSGDESK_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("console_", "console.", 1)
            .replacen("backend_", "backend.", 1)
            .replacen("rest_", "rest.", 1)
            .replacen("storage_", "storage.", 1);
        mapped.into()
    })
}
