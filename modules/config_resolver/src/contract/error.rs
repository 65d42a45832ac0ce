//! Contract error types for the config resolver
//!
//! Every variant aborts the operation that raised it; none are retried.

use super::model::SettingType;

/// Config resolution and access errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Key absent from the source and the setting has no default
    #[error("Missing required setting: {key}")]
    MissingRequiredSetting { key: String },

    /// Raw value cannot be converted to the declared type
    #[error("Cannot convert value '{raw_value}' of setting {key} to {target_type}")]
    TypeCoercion {
        key: String,
        raw_value: String,
        target_type: SettingType,
    },

    /// Accessor asked for a type other than the declared one
    #[error("Setting {key} is declared as {declared}, requested as {requested}")]
    TypeMismatch {
        key: String,
        requested: SettingType,
        declared: SettingType,
    },

    /// Accessor asked for a key that was not resolved
    #[error("Setting not resolved: {key}")]
    UnknownSetting { key: String },

    /// Schema rejected before resolution
    #[error("Invalid schema entry '{key}': {reason}")]
    InvalidSchema { key: String, reason: String },
}

impl ConfigError {
    /// Key the error refers to
    pub fn key(&self) -> &str {
        match self {
            Self::MissingRequiredSetting { key }
            | Self::TypeCoercion { key, .. }
            | Self::TypeMismatch { key, .. }
            | Self::UnknownSetting { key }
            | Self::InvalidSchema { key, .. } => key,
        }
    }
}
