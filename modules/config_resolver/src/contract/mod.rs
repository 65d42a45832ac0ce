//! Contract layer - public types shared across layers
//!
//! This layer contains transport-agnostic models, the error taxonomy and the accessor trait.

pub mod client;
pub mod error;
pub mod model;

pub use client::AppSettingsApi;
pub use error::ConfigError;
pub use model::{Fallback, SettingDescriptor, SettingType, SettingValue, ValueOrigin};
