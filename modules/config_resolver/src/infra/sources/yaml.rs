//! YAML flattening into dotted property keys

use serde_yaml::Value;
use std::collections::BTreeMap;

/// Error type for YAML property files
#[derive(Debug, thiserror::Error)]
pub enum FlattenError {
    #[error(transparent)]
    Syntax(#[from] serde_yaml::Error),

    #[error("document root must be a mapping")]
    NotAMapping,

    #[error("unsupported key under '{parent}': keys must be scalars")]
    NonScalarKey { parent: String },
}

/// Flatten a YAML document into dotted keys
///
/// `server: {port: 8080}` becomes `server.port=8080`; sequences become
/// `key[0]`, `key[1]`; null becomes an empty string. An empty document yields
/// no properties.
pub fn flatten(content: &str) -> Result<BTreeMap<String, String>, FlattenError> {
    let document: Value = serde_yaml::from_str(content)?;
    let mut values = BTreeMap::new();

    match document {
        Value::Null => {}
        Value::Mapping(_) => flatten_into(&mut values, String::new(), &document)?,
        _ => return Err(FlattenError::NotAMapping),
    }

    Ok(values)
}

fn flatten_into(
    values: &mut BTreeMap<String, String>,
    prefix: String,
    value: &Value,
) -> Result<(), FlattenError> {
    match value {
        Value::Mapping(mapping) => {
            for (key, child) in mapping {
                let key = scalar_to_string(key).ok_or_else(|| FlattenError::NonScalarKey {
                    parent: prefix.clone(),
                })?;
                let path = if prefix.is_empty() {
                    key
                } else {
                    format!("{}.{}", prefix, key)
                };
                flatten_into(values, path, child)?;
            }
        }
        Value::Sequence(items) => {
            for (i, item) in items.iter().enumerate() {
                flatten_into(values, format!("{}[{}]", prefix, i), item)?;
            }
        }
        Value::Tagged(tagged) => flatten_into(values, prefix, &tagged.value)?,
        scalar => {
            if let Some(text) = scalar_to_string(scalar) {
                values.insert(prefix, text);
            }
        }
    }
    Ok(())
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => Some(String::new()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(s.clone()),
        Value::Tagged(tagged) => scalar_to_string(&tagged.value),
        Value::Sequence(_) | Value::Mapping(_) => None,
    }
}
