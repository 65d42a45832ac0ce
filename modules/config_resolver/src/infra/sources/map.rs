//! Named in-memory property source

use super::SourceError;
use crate::domain::PropertySource;
use std::collections::BTreeMap;

/// In-memory key-value source with a name for origin reporting
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MapSource {
    name: String,
    values: BTreeMap<String, String>,
}

impl MapSource {
    /// Create an empty source
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: BTreeMap::new(),
        }
    }

    pub fn from_map(name: impl Into<String>, values: BTreeMap<String, String>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Build from key/value pairs; later duplicates win
    pub fn from_pairs<K, V>(
        name: impl Into<String>,
        pairs: impl IntoIterator<Item = (K, V)>,
    ) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let mut source = Self::new(name);
        for (key, value) in pairs {
            source.insert(key, value);
        }
        source
    }

    /// Parse `key=value` override entries (e.g., from `--set`)
    ///
    /// Only the first `=` separates; the value may contain further `=` or be empty.
    pub fn from_overrides<S: AsRef<str>>(
        name: impl Into<String>,
        entries: &[S],
    ) -> Result<Self, SourceError> {
        let mut source = Self::new(name);
        for entry in entries {
            let entry = entry.as_ref();
            let (key, value) = entry
                .split_once('=')
                .filter(|(key, _)| !key.trim().is_empty())
                .ok_or_else(|| SourceError::Override {
                    entry: entry.to_string(),
                })?;
            source.insert(key.trim(), value);
        }
        Ok(source)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl PropertySource for MapSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_overrides() {
        let source = MapSource::from_overrides(
            "overrides",
            &["server.port=9090", "spring.datasource.url=jdbc:h2:mem:a;MODE=PG", "empty="],
        )
        .unwrap();
        assert_eq!(source.get("server.port"), Some("9090"));
        assert_eq!(source.get("spring.datasource.url"), Some("jdbc:h2:mem:a;MODE=PG"));
        assert_eq!(source.get("empty"), Some(""));
        assert_eq!(source.locate("server.port"), Some(("overrides", "9090")));
    }

    #[test]
    fn test_from_overrides_rejects_malformed() {
        assert!(matches!(
            MapSource::from_overrides("overrides", &["server.port"]),
            Err(SourceError::Override { .. })
        ));
        assert!(MapSource::from_overrides("overrides", &["=8080"]).is_err());
    }
}
