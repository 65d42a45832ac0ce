//! Setting resolution - turns a property source and a schema into a typed snapshot

use super::source::PropertySource;
use super::validation::{coerce, validate_schema};
use crate::contract::{
    ConfigError, Fallback, SettingDescriptor, SettingType, SettingValue, ValueOrigin,
};
use std::collections::BTreeMap;

/// Placeholder shown instead of sensitive values
pub const REDACTED: &str = "******";

/// Keys of the application schema
pub mod keys {
    pub const SERVER_PORT: &str = "server.port";
    pub const DATASOURCE_URL: &str = "spring.datasource.url";
    pub const DATASOURCE_USERNAME: &str = "spring.datasource.username";
    pub const JVM_METRICS_ENABLED: &str = "management.metrics.binders.jvm.enabled";
    pub const TOMCAT_METRICS_ENABLED: &str = "management.metrics.binders.tomcat.enabled";
    pub const WEB_EXPOSURE_INCLUDE: &str = "management.endpoints.web.exposure.include";

    /// Newer spellings of the metrics flags, accepted as aliases
    pub const JVM_METRICS_ENABLE: &str = "management.metrics.enable.jvm";
    pub const TOMCAT_METRICS_ENABLE: &str = "management.metrics.enable.tomcat";
}

/// Schema of the sample application settings, in resolution order
pub fn application_schema() -> Vec<SettingDescriptor> {
    vec![
        SettingDescriptor::with_default(keys::SERVER_PORT, SettingType::Integer, "8080"),
        SettingDescriptor::required(keys::DATASOURCE_URL, SettingType::String).sensitive(),
        SettingDescriptor::with_default(
            keys::DATASOURCE_USERNAME,
            SettingType::String,
            "defaultUser",
        ),
        SettingDescriptor::with_default(keys::JVM_METRICS_ENABLED, SettingType::Boolean, "true")
            .alias(keys::JVM_METRICS_ENABLE),
        SettingDescriptor::with_default(
            keys::TOMCAT_METRICS_ENABLED,
            SettingType::Boolean,
            "false",
        )
        .alias(keys::TOMCAT_METRICS_ENABLE),
        // Only read by the actuator endpoints condition
        SettingDescriptor::optional(keys::WEB_EXPOSURE_INCLUDE, SettingType::String),
    ]
}

/// One resolved setting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEntry {
    pub value: SettingValue,
    pub origin: ValueOrigin,
    pub sensitive: bool,
}

impl ResolvedEntry {
    /// Value as shown in logs and reports
    pub fn display_value(&self) -> String {
        if self.sensitive {
            REDACTED.to_string()
        } else {
            self.value.to_string()
        }
    }
}

/// Immutable typed configuration snapshot
///
/// Built once by [`resolve`] and never mutated afterwards, so it can be shared
/// across threads behind an `Arc` without locking.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedConfig {
    entries: BTreeMap<String, ResolvedEntry>,
}

impl ResolvedConfig {
    /// Typed value for `key`, if resolved
    pub fn get(&self, key: &str) -> Option<&SettingValue> {
        self.entries.get(key).map(|e| &e.value)
    }

    /// Full entry (value, origin, sensitivity) for `key`
    pub fn entry(&self, key: &str) -> Option<&ResolvedEntry> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Entries in key order
    pub fn entries(&self) -> impl Iterator<Item = (&str, &ResolvedEntry)> {
        self.entries.iter().map(|(k, e)| (k.as_str(), e))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Integer accessor
    pub fn get_integer(&self, key: &str) -> Result<i64, ConfigError> {
        match self.value(key)? {
            SettingValue::Integer(v) => Ok(*v),
            other => Err(type_mismatch(key, SettingType::Integer, other)),
        }
    }

    /// String accessor
    pub fn get_string(&self, key: &str) -> Result<&str, ConfigError> {
        match self.value(key)? {
            SettingValue::String(v) => Ok(v),
            other => Err(type_mismatch(key, SettingType::String, other)),
        }
    }

    /// Boolean accessor
    pub fn get_bool(&self, key: &str) -> Result<bool, ConfigError> {
        match self.value(key)? {
            SettingValue::Boolean(v) => Ok(*v),
            other => Err(type_mismatch(key, SettingType::Boolean, other)),
        }
    }

    fn value(&self, key: &str) -> Result<&SettingValue, ConfigError> {
        self.get(key).ok_or_else(|| ConfigError::UnknownSetting {
            key: key.to_string(),
        })
    }
}

fn type_mismatch(key: &str, requested: SettingType, actual: &SettingValue) -> ConfigError {
    ConfigError::TypeMismatch {
        key: key.to_string(),
        requested,
        declared: actual.setting_type(),
    }
}

/// Resolve every descriptor of `schema` against `source`, in order.
///
/// Fails fast on the first missing required setting or coercion error; no
/// partial config is ever returned.
pub fn resolve(
    source: &dyn PropertySource,
    schema: &[SettingDescriptor],
) -> Result<ResolvedConfig, ConfigError> {
    let mut entries = BTreeMap::new();

    for descriptor in schema {
        let (raw, origin) = match lookup(source, descriptor) {
            Some(found) => found,
            None => match &descriptor.fallback {
                Fallback::Default(default_value) => {
                    (default_value.as_str(), ValueOrigin::Default)
                }
                Fallback::Optional => {
                    tracing::debug!(key = %descriptor.key, "optional setting not supplied");
                    continue;
                }
                Fallback::Required => {
                    return Err(ConfigError::MissingRequiredSetting {
                        key: descriptor.key.clone(),
                    });
                }
            },
        };

        let value = coerce(&descriptor.key, raw, descriptor.target_type)?;
        let entry = ResolvedEntry {
            value,
            origin,
            sensitive: descriptor.sensitive,
        };

        tracing::debug!(
            key = %descriptor.key,
            origin = %entry.origin,
            value = %entry.display_value(),
            "resolved setting"
        );
        entries.insert(descriptor.key.clone(), entry);
    }

    tracing::info!(settings = entries.len(), "configuration resolved");
    Ok(ResolvedConfig { entries })
}

/// Primary key first, then deprecated aliases in declaration order
fn lookup<'a>(
    source: &'a dyn PropertySource,
    descriptor: &SettingDescriptor,
) -> Option<(&'a str, ValueOrigin)> {
    if let Some((name, raw)) = source.locate(&descriptor.key) {
        return Some((raw, ValueOrigin::Source { name: name.to_string() }));
    }

    descriptor.aliases.iter().find_map(|alias| {
        source.locate(alias).map(|(name, raw)| {
            tracing::warn!(
                key = %descriptor.key,
                alias = %alias,
                source = %name,
                "setting supplied under deprecated key"
            );
            (
                raw,
                ValueOrigin::Alias {
                    key: alias.clone(),
                    source: name.to_string(),
                },
            )
        })
    })
}

/// Validated schema, reusable across sources
#[derive(Debug, Clone)]
pub struct Resolver {
    schema: Vec<SettingDescriptor>,
}

impl Resolver {
    /// Validate `schema` and wrap it
    pub fn new(schema: Vec<SettingDescriptor>) -> Result<Self, ConfigError> {
        validate_schema(&schema)?;
        Ok(Self { schema })
    }

    /// Resolver over [`application_schema`]
    pub fn application() -> Result<Self, ConfigError> {
        Self::new(application_schema())
    }

    pub fn schema(&self) -> &[SettingDescriptor] {
        &self.schema
    }

    pub fn resolve(&self, source: &dyn PropertySource) -> Result<ResolvedConfig, ConfigError> {
        resolve(source, &self.schema)
    }
}
