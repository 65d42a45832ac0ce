//! Contract models for the config resolver
//!
//! These models are transport-agnostic and shared by the domain, infra and api layers.
//! NO serde derives - report DTOs live in `api::report`.

use std::fmt;

/// Declared target type of a setting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingType {
    Integer,
    String,
    Boolean,
}

impl SettingType {
    /// Lowercase type name used in errors and reports
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Integer => "integer",
            Self::String => "string",
            Self::Boolean => "boolean",
        }
    }
}

impl fmt::Display for SettingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A coerced, typed setting value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingValue {
    Integer(i64),
    String(String),
    Boolean(bool),
}

impl SettingValue {
    /// Type of the held value
    pub fn setting_type(&self) -> SettingType {
        match self {
            Self::Integer(_) => SettingType::Integer,
            Self::String(_) => SettingType::String,
            Self::Boolean(_) => SettingType::Boolean,
        }
    }
}

/// String representation used by property conditions.
///
/// Booleans render as `true`/`false` and integers in base 10, so a condition
/// expecting `"true"` matches a flag that was supplied as `TRUE`.
impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(v) => write!(f, "{}", v),
            Self::String(v) => f.write_str(v),
            Self::Boolean(v) => write!(f, "{}", v),
        }
    }
}

/// How a setting behaves when neither its key nor any alias is supplied
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fallback {
    /// Fail resolution with `MissingRequiredSetting`
    Required,
    /// Leave the key out of the resolved config
    Optional,
    /// Use this raw value, coerced like a supplied one
    Default(String),
}

/// Schema entry describing one setting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingDescriptor {
    /// Dotted key (e.g., "server.port")
    pub key: String,
    /// Target type for coercion
    pub target_type: SettingType,
    /// Behaviour when the key is absent
    pub fallback: Fallback,
    /// Deprecated keys consulted, in order, when `key` is absent
    pub aliases: Vec<String>,
    /// Whether the value must be redacted in logs and reports
    pub sensitive: bool,
}

impl SettingDescriptor {
    /// Create a required setting with no default
    pub fn required(key: impl Into<String>, target_type: SettingType) -> Self {
        Self {
            key: key.into(),
            target_type,
            fallback: Fallback::Required,
            aliases: Vec::new(),
            sensitive: false,
        }
    }

    /// Create an optional setting that may be absent from the resolved config
    pub fn optional(key: impl Into<String>, target_type: SettingType) -> Self {
        Self {
            fallback: Fallback::Optional,
            ..Self::required(key, target_type)
        }
    }

    /// Create a setting with a raw default value
    pub fn with_default(
        key: impl Into<String>,
        target_type: SettingType,
        default_value: impl Into<String>,
    ) -> Self {
        Self {
            fallback: Fallback::Default(default_value.into()),
            ..Self::required(key, target_type)
        }
    }

    /// Add a deprecated alias key
    pub fn alias(mut self, key: impl Into<String>) -> Self {
        self.aliases.push(key.into());
        self
    }

    /// Mark the value as sensitive
    pub fn sensitive(mut self) -> Self {
        self.sensitive = true;
        self
    }

    /// Raw default value, if any
    pub fn default_value(&self) -> Option<&str> {
        match &self.fallback {
            Fallback::Default(v) => Some(v),
            _ => None,
        }
    }
}

/// Where a resolved value came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueOrigin {
    /// Supplied under the primary key by the named source
    Source { name: String },
    /// Supplied under a deprecated alias key
    Alias { key: String, source: String },
    /// Taken from the descriptor default
    Default,
}

impl fmt::Display for ValueOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Source { name } => write!(f, "{}", name),
            Self::Alias { key, source } => write!(f, "{} (deprecated key {})", source, key),
            Self::Default => f.write_str("default"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_display_matches_condition_form() {
        assert_eq!(SettingValue::Boolean(true).to_string(), "true");
        assert_eq!(SettingValue::Integer(-42).to_string(), "-42");
        assert_eq!(SettingValue::String(String::new()).to_string(), "");
    }

    #[test]
    fn test_descriptor_builders() {
        let d = SettingDescriptor::with_default("a.b", SettingType::Integer, "1")
            .alias("a.c")
            .sensitive();
        assert_eq!(d.default_value(), Some("1"));
        assert_eq!(d.aliases, vec!["a.c".to_string()]);
        assert!(d.sensitive);

        let r = SettingDescriptor::required("a.b", SettingType::String);
        assert_eq!(r.fallback, Fallback::Required);
        assert!(r.default_value().is_none());

        let o = SettingDescriptor::optional("a.b", SettingType::String);
        assert_eq!(o.fallback, Fallback::Optional);
    }
}
