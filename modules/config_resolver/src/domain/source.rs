//! Property source trait for key-value lookup
//!
//! The resolver only sees this interface. Implementations are in infra/sources.

use std::collections::{BTreeMap, HashMap};

/// Read-only key-value lookup over an already materialized snapshot
pub trait PropertySource: Send + Sync {
    /// Name reported as the origin of values found here
    fn name(&self) -> &str;

    /// Raw value for `key`, if supplied
    fn get(&self, key: &str) -> Option<&str>;

    /// Raw value together with the name of the source that supplied it
    ///
    /// Composite sources override this to report the inner source.
    fn locate(&self, key: &str) -> Option<(&str, &str)> {
        self.get(key).map(|value| (self.name(), value))
    }
}

impl PropertySource for HashMap<String, String> {
    fn name(&self) -> &str {
        "map"
    }

    fn get(&self, key: &str) -> Option<&str> {
        HashMap::get(self, key).map(String::as_str)
    }
}

impl PropertySource for BTreeMap<String, String> {
    fn name(&self) -> &str {
        "map"
    }

    fn get(&self, key: &str) -> Option<&str> {
        BTreeMap::get(self, key).map(String::as_str)
    }
}
