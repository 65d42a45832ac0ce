//! Report DTOs with serde derives

use serde::{Deserialize, Serialize};

/// Full resolution report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportDto {
    /// Resolved settings in key order
    pub settings: Vec<SettingDto>,

    /// Conditional action outcomes in evaluation order
    pub actions: Vec<ActionDto>,
}

/// One resolved setting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingDto {
    pub key: String,

    /// Declared type (integer, string, boolean)
    pub r#type: String,

    /// Typed JSON value, or the redaction placeholder
    pub value: serde_json::Value,

    /// Where the value came from
    pub origin: String,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub redacted: bool,
}

/// One conditional action outcome
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionDto {
    pub name: String,
    pub activated: bool,

    /// Effect error, when the condition held but the effect failed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
