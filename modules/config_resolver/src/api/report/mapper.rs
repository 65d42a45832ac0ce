//! Conversions from domain results into report DTOs, and text rendering

use super::dto::*;
use crate::contract::SettingValue;
use crate::domain::resolver::{ResolvedEntry, REDACTED};
use crate::domain::{ActionOutcome, ConditionalActionResult, ResolvedConfig};
use std::fmt::Write;

impl SettingDto {
    /// Build from a resolved entry; sensitive values are redacted unless `reveal` is set
    pub fn from_entry(key: &str, entry: &ResolvedEntry, reveal: bool) -> Self {
        let redacted = entry.sensitive && !reveal;
        let value = if redacted {
            serde_json::Value::String(REDACTED.to_string())
        } else {
            match &entry.value {
                SettingValue::Integer(v) => serde_json::Value::from(*v),
                SettingValue::String(v) => serde_json::Value::String(v.clone()),
                SettingValue::Boolean(v) => serde_json::Value::Bool(*v),
            }
        };

        Self {
            key: key.to_string(),
            r#type: entry.value.setting_type().to_string(),
            value,
            origin: entry.origin.to_string(),
            redacted,
        }
    }
}

impl From<&ConditionalActionResult> for ActionDto {
    fn from(result: &ConditionalActionResult) -> Self {
        Self {
            name: result.name.clone(),
            activated: result.is_activated(),
            error: match &result.outcome {
                ActionOutcome::Failed { message } => Some(message.clone()),
                _ => None,
            },
        }
    }
}

impl ReportDto {
    /// Build a report for `config` and the action results evaluated against it
    pub fn build(
        config: &ResolvedConfig,
        actions: &[ConditionalActionResult],
        reveal: bool,
    ) -> Self {
        Self {
            settings: config
                .entries()
                .map(|(key, entry)| SettingDto::from_entry(key, entry, reveal))
                .collect(),
            actions: actions.iter().map(ActionDto::from).collect(),
        }
    }

    /// Render as aligned plain text
    pub fn render_text(&self) -> String {
        let width = self.settings.iter().map(|s| s.key.len()).max().unwrap_or(0);
        let mut out = String::new();

        for setting in &self.settings {
            let value = match &setting.value {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            let _ = writeln!(
                out,
                "{:<width$} = {} ({}, {})",
                setting.key,
                value,
                setting.r#type,
                setting.origin,
                width = width
            );
        }

        if !self.actions.is_empty() {
            out.push('\n');
        }
        for action in &self.actions {
            let state = match (&action.error, action.activated) {
                (Some(error), _) => format!("failed: {}", error),
                (None, true) => "activated".to_string(),
                (None, false) => "skipped".to_string(),
            };
            let _ = writeln!(out, "{}: {}", action.name, state);
        }

        out
    }
}
