// SPDX-FileCopyrightText: 2026 Msgdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wire types for the PostgREST API.

use serde::Deserialize;

/// Error body returned by PostgREST on a failed request.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub code: Option<String>,
    pub message: String,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default)]
    pub hint: Option<String>,
}

impl ApiErrorBody {
    /// One-line summary: `message (code): details; hint: hint`.
    pub fn summary(&self) -> String {
        let mut out = self.message.clone();
        if let Some(code) = &self.code {
            out.push_str(&format!(" ({code})"));
        }
        if let Some(details) = self.details.as_deref().filter(|d| !d.is_empty()) {
            out.push_str(&format!(": {details}"));
        }
        if let Some(hint) = self.hint.as_deref().filter(|h| !h.is_empty()) {
            out.push_str(&format!("; hint: {hint}"));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_includes_code_details_and_hint() {
        let body: ApiErrorBody = serde_json::from_str(
            r#"{"code":"23502","message":"null value in column","details":"Failing row","hint":null}"#,
        )
        .unwrap();
        assert_eq!(body.summary(), "null value in column (23502): Failing row");
    }

    #[test]
    fn summary_with_only_message() {
        let body: ApiErrorBody = serde_json::from_str(r#"{"message":"boom"}"#).unwrap();
        assert_eq!(body.summary(), "boom");
    }
}
