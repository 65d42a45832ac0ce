//! Environment variable source with relaxed key binding

use crate::domain::PropertySource;
use std::collections::HashMap;

/// Snapshot of environment variables
///
/// Dotted keys are looked up by their environment form: `server.port` reads
/// `SERVER_PORT`, `my-app.items[0]` reads `MYAPP_ITEMS_0`. With a prefix of
/// `APP` the same key reads `APP_SERVER_PORT`.
#[derive(Debug, Clone, Default)]
pub struct EnvSource {
    prefix: Option<String>,
    vars: HashMap<String, String>,
}

impl EnvSource {
    /// Snapshot the current process environment
    ///
    /// Variables whose name or value is not valid UTF-8 are skipped.
    pub fn from_env(prefix: Option<&str>) -> Self {
        let vars = std::env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)));
        Self::from_vars(prefix, vars)
    }

    /// Build from explicit variables
    pub fn from_vars<K, V>(prefix: Option<&str>, vars: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let prefix = prefix
            .map(|p| p.trim_end_matches('_').to_ascii_uppercase())
            .filter(|p| !p.is_empty());
        Self {
            prefix,
            vars: vars.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }

    /// Environment variable name for a dotted key
    pub fn variable_name(&self, key: &str) -> String {
        let mut name: String = key
            .chars()
            .filter_map(|c| match c {
                '.' | '[' => Some('_'),
                '-' | ']' => None,
                c => Some(c.to_ascii_uppercase()),
            })
            .collect();
        if let Some(prefix) = &self.prefix {
            name = format!("{}_{}", prefix, name);
        }
        name
    }
}

impl PropertySource for EnvSource {
    fn name(&self) -> &str {
        "environment"
    }

    fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(&self.variable_name(key)).map(String::as_str)
    }
}
