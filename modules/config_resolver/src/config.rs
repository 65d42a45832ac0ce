//! Configuration for the settings loader

use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment prefix for loader options (e.g., `CONFIG_RESOLVER_ENV_PREFIX`)
pub const LOADER_ENV_PREFIX: &str = "CONFIG_RESOLVER_";

/// Options controlling which property sources are loaded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoaderConfig {
    /// Property files loaded in order; later files override earlier ones
    #[serde(default)]
    pub property_files: Vec<PathBuf>,

    /// Skip missing property files instead of failing
    #[serde(default)]
    pub optional_files: bool,

    /// Add an environment variable layer above the property files
    #[serde(default = "default_true")]
    pub env_overrides: bool,

    /// Prefix required on environment variable names
    #[serde(default)]
    pub env_prefix: Option<String>,

    /// Directory searched for `application.properties`, `application.yml` and
    /// `application.yaml`; found files sit below `property_files`
    #[serde(default)]
    pub config_dir: Option<PathBuf>,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            property_files: Vec::new(),
            optional_files: false,
            env_overrides: true,
            env_prefix: None,
            config_dir: None,
        }
    }
}

fn default_true() -> bool {
    true
}

impl LoaderConfig {
    /// Load options from defaults, an optional YAML file and `CONFIG_RESOLVER_*`
    /// environment variables, in increasing precedence
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = path {
            figment = figment.merge(Yaml::file(path));
        }
        figment
            .merge(Env::prefixed(LOADER_ENV_PREFIX))
            .extract()
            .context("failed to load loader configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = LoaderConfig::default();
        assert!(config.property_files.is_empty());
        assert!(config.env_overrides);
        assert!(!config.optional_files);
        assert!(config.env_prefix.is_none());
        assert!(config.config_dir.is_none());
    }

    #[test]
    fn test_load_from_yaml_file() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(
            file,
            "property_files:\n  \
             - conf/application.properties\n  \
             - conf/application-local.yml\n\
             env_overrides: false\n\
             env_prefix: APP\n\
             config_dir: conf"
        )
        .unwrap();

        let config = LoaderConfig::load(Some(file.path())).unwrap();
        assert_eq!(
            config.property_files,
            vec![
                PathBuf::from("conf/application.properties"),
                PathBuf::from("conf/application-local.yml"),
            ]
        );
        assert!(!config.env_overrides);
        assert_eq!(config.env_prefix.as_deref(), Some("APP"));
        assert_eq!(config.config_dir, Some(PathBuf::from("conf")));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(file, "property_file: application.properties").unwrap();
        assert!(LoaderConfig::load(Some(file.path())).is_err());
    }
}
