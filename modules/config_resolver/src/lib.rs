//! Config Resolver Module
//!
//! Resolves a fixed set of typed application settings from an external
//! key-value source, applying defaults and coercion, and evaluates
//! property conditions that gate auxiliary configuration actions.

// Public exports
pub mod contract;
pub use contract::{
    client::AppSettingsApi, error::ConfigError, SettingDescriptor, SettingType, SettingValue,
    ValueOrigin,
};

pub mod domain;
pub use domain::{
    evaluate_conditions, resolve, ActionHook, ActionOutcome, ConditionalAction,
    ConditionalActionResult, NoOpHook, PropertyCondition, PropertySource, ResolvedConfig,
    Resolver,
};

pub mod module;
pub use module::{ConfigModule, LoadedConfig, SharedConfig};

pub mod api;
pub use api::native::AppConfig;

pub mod config;
pub use config::LoaderConfig;

pub mod infra;
