// SPDX-FileCopyrightText: 2026 Msgdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.

use crate::diagnostic::ConfigError;
use crate::model::{BackendKind, MsgdeskConfig};

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Collects every failure instead of stopping at the first one.
pub fn validate_config(config: &MsgdeskConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    let level = config.console.log_level.trim().to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "console.log_level `{}` must be one of: {}",
                config.console.log_level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    match config.backend.kind {
        BackendKind::Rest => validate_rest(config, &mut errors),
        BackendKind::Sqlite => {
            if config.storage.database_path.trim().is_empty() {
                errors.push(ConfigError::Validation {
                    message: "storage.database_path must not be empty".to_string(),
                });
            }
        }
    }

    if config.rest.timeout_secs == Some(0) {
        errors.push(ConfigError::Validation {
            message: "rest.timeout_secs must be greater than zero when set".to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_rest(config: &MsgdeskConfig, errors: &mut Vec<ConfigError>) {
    match config.rest.url.as_deref().map(str::trim) {
        None | Some("") => errors.push(ConfigError::MissingKey {
            key: "rest.url".to_string(),
        }),
        Some(url) if !(url.starts_with("https://") || url.starts_with("http://")) => {
            errors.push(ConfigError::Validation {
                message: format!("rest.url `{url}` must start with http:// or https://"),
            });
        }
        Some(_) => {}
    }

    if config
        .rest
        .api_key
        .as_deref()
        .is_none_or(|k| k.trim().is_empty())
    {
        errors.push(ConfigError::MissingKey {
            key: "rest.api_key".to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rest_config() -> MsgdeskConfig {
        let mut config = MsgdeskConfig::default();
        config.rest.url = Some("https://example.supabase.co".to_string());
        config.rest.api_key = Some("anon".to_string());
        config
    }

    fn has_message(errors: &[ConfigError], needle: &str) -> bool {
        errors.iter().any(|e| e.to_string().contains(needle))
    }

    #[test]
    fn complete_rest_config_validates() {
        assert!(validate_config(&rest_config()).is_ok());
    }

    #[test]
    fn default_config_needs_rest_credentials() {
        let errors = validate_config(&MsgdeskConfig::default()).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(has_message(&errors, "rest.url"));
        assert!(has_message(&errors, "rest.api_key"));
    }

    #[test]
    fn sqlite_backend_ignores_rest_section() {
        let mut config = MsgdeskConfig::default();
        config.backend.kind = BackendKind::Sqlite;
        config.storage.database_path = "/tmp/msgdesk.db".to_string();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn empty_database_path_fails_for_sqlite() {
        let mut config = MsgdeskConfig::default();
        config.backend.kind = BackendKind::Sqlite;
        config.storage.database_path = "  ".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(has_message(&errors, "database_path"));
    }

    #[test]
    fn url_without_scheme_fails() {
        let mut config = rest_config();
        config.rest.url = Some("example.supabase.co".to_string());
        let errors = validate_config(&config).unwrap_err();
        assert!(has_message(&errors, "must start with"));
    }

    #[test]
    fn zero_timeout_fails() {
        let mut config = rest_config();
        config.rest.timeout_secs = Some(0);
        let errors = validate_config(&config).unwrap_err();
        assert!(has_message(&errors, "timeout_secs"));
    }

    #[test]
    fn bad_log_level_fails() {
        let mut config = rest_config();
        config.console.log_level = "loud".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(has_message(&errors, "log_level"));
    }
}
