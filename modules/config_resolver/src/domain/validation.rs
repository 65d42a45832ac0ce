//! Value coercion and schema validation

use crate::contract::{ConfigError, SettingDescriptor, SettingType, SettingValue};
use std::collections::HashSet;

/// Coerce a raw string to the declared type of `key`
///
/// - integer: base-10 signed 64-bit, surrounding whitespace ignored
/// - boolean: `true`/`false` in any case, surrounding whitespace ignored
/// - string: taken verbatim, empty included
pub fn coerce(key: &str, raw: &str, target_type: SettingType) -> Result<SettingValue, ConfigError> {
    let coercion_error = || ConfigError::TypeCoercion {
        key: key.to_string(),
        raw_value: raw.to_string(),
        target_type,
    };

    match target_type {
        SettingType::String => Ok(SettingValue::String(raw.to_string())),
        SettingType::Integer => raw
            .trim()
            .parse::<i64>()
            .map(SettingValue::Integer)
            .map_err(|_| coercion_error()),
        SettingType::Boolean => {
            let trimmed = raw.trim();
            if trimmed.eq_ignore_ascii_case("true") {
                Ok(SettingValue::Boolean(true))
            } else if trimmed.eq_ignore_ascii_case("false") {
                Ok(SettingValue::Boolean(false))
            } else {
                Err(coercion_error())
            }
        }
    }
}

/// Validate a dotted setting key
///
/// Accepts segments of any non-whitespace characters separated by single dots,
/// e.g. "server.port" or "management.metrics.binders.jvm.enabled".
pub fn validate_setting_key(key: &str) -> Result<(), ConfigError> {
    let invalid = |reason: &str| ConfigError::InvalidSchema {
        key: key.to_string(),
        reason: reason.to_string(),
    };

    if key.is_empty() {
        return Err(invalid("key cannot be empty"));
    }

    if key.chars().any(char::is_whitespace) {
        return Err(invalid("key cannot contain whitespace"));
    }

    if key.split('.').any(str::is_empty) {
        return Err(invalid("key cannot contain empty dotted segments"));
    }

    Ok(())
}

/// Validate a whole schema before any resolution happens
pub fn validate_schema(schema: &[SettingDescriptor]) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();

    for descriptor in schema {
        validate_setting_key(&descriptor.key)?;
        for alias in &descriptor.aliases {
            validate_setting_key(alias)?;
        }

        if !seen.insert(descriptor.key.as_str()) {
            return Err(ConfigError::InvalidSchema {
                key: descriptor.key.clone(),
                reason: "duplicate key".to_string(),
            });
        }

        if let Some(default_value) = descriptor.default_value() {
            coerce(&descriptor.key, default_value, descriptor.target_type).map_err(|_| {
                ConfigError::InvalidSchema {
                    key: descriptor.key.clone(),
                    reason: format!(
                        "default '{}' is not a valid {}",
                        default_value, descriptor.target_type
                    ),
                }
            })?;
        }
    }

    Ok(())
}
