//! Native client implementation - typed projection of the resolved config

use crate::contract::{AppSettingsApi, ConfigError};
use crate::domain::{keys, ResolvedConfig};

/// Application settings read out of a [`ResolvedConfig`]
///
/// Built once after resolution; every field was type-checked on construction,
/// so the accessors cannot fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    server_port: i64,
    database_url: String,
    database_username: String,
    jvm_metrics_enabled: bool,
    tomcat_metrics_enabled: bool,
}

impl AppConfig {
    /// Project the application settings out of `config`
    pub fn from_resolved(config: &ResolvedConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            server_port: config.get_integer(keys::SERVER_PORT)?,
            database_url: config.get_string(keys::DATASOURCE_URL)?.to_string(),
            database_username: config.get_string(keys::DATASOURCE_USERNAME)?.to_string(),
            jvm_metrics_enabled: config.get_bool(keys::JVM_METRICS_ENABLED)?,
            tomcat_metrics_enabled: config.get_bool(keys::TOMCAT_METRICS_ENABLED)?,
        })
    }
}

impl AppSettingsApi for AppConfig {
    fn server_port(&self) -> i64 {
        self.server_port
    }

    fn database_url(&self) -> &str {
        &self.database_url
    }

    fn database_username(&self) -> &str {
        &self.database_username
    }

    fn is_jvm_metrics_enabled(&self) -> bool {
        self.jvm_metrics_enabled
    }

    fn is_tomcat_metrics_enabled(&self) -> bool {
        self.tomcat_metrics_enabled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::{SettingDescriptor, SettingType};
    use crate::domain::resolve;
    use std::collections::HashMap;

    #[test]
    fn test_from_resolved_reports_mismatch() {
        // A schema that declares the port as a string
        let schema = vec![
            SettingDescriptor::with_default(keys::SERVER_PORT, SettingType::String, "8080"),
        ];
        let config = resolve(&HashMap::<String, String>::new(), &schema).unwrap();
        assert_eq!(
            AppConfig::from_resolved(&config),
            Err(ConfigError::TypeMismatch {
                key: keys::SERVER_PORT.to_string(),
                requested: SettingType::Integer,
                declared: SettingType::String,
            })
        );
    }

    #[test]
    fn test_from_resolved_reports_unresolved_key() {
        let schema = vec![
            SettingDescriptor::with_default(keys::SERVER_PORT, SettingType::Integer, "8080"),
        ];
        let config = resolve(&HashMap::<String, String>::new(), &schema).unwrap();
        assert_eq!(
            AppConfig::from_resolved(&config),
            Err(ConfigError::UnknownSetting {
                key: keys::DATASOURCE_URL.to_string(),
            })
        );
    }
}
