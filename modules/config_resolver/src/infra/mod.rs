//! Infrastructure layer - concrete property sources

pub mod sources;

pub use sources::{load_file, EnvSource, FileFormat, LayeredSource, MapSource, SourceError};
