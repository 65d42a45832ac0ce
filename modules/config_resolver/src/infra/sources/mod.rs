//! Property source implementations and file loading

pub mod env;
pub mod layered;
pub mod map;
pub mod properties;
pub mod yaml;

pub use env::EnvSource;
pub use layered::LayeredSource;
pub use map::MapSource;

use std::path::{Path, PathBuf};

/// Error type for building property sources
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid properties file {}: {source}", .path.display())]
    Properties {
        path: PathBuf,
        #[source]
        source: properties::ParseError,
    },

    #[error("Invalid YAML file {}: {source}", .path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: yaml::FlattenError,
    },

    #[error("Invalid override '{entry}': expected key=value")]
    Override { entry: String },
}

/// Supported property file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Properties,
    Yaml,
}

impl FileFormat {
    /// Detect the format from the file extension
    ///
    /// Unknown extensions are read as properties.
    pub fn detect(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("yml") | Some("yaml") => Self::Yaml,
            _ => Self::Properties,
        }
    }
}

/// Read and parse a property file into a source named after its path
pub fn load_file(path: &Path) -> Result<MapSource, SourceError> {
    let content = std::fs::read_to_string(path).map_err(|source| SourceError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let format = FileFormat::detect(path);
    let values = match format {
        FileFormat::Properties => {
            properties::parse(&content).map_err(|source| SourceError::Properties {
                path: path.to_path_buf(),
                source,
            })?
        }
        FileFormat::Yaml => yaml::flatten(&content).map_err(|source| SourceError::Yaml {
            path: path.to_path_buf(),
            source,
        })?,
    };

    tracing::debug!(
        path = %path.display(),
        ?format,
        properties = values.len(),
        "loaded property file"
    );
    Ok(MapSource::from_map(path.display().to_string(), values))
}
