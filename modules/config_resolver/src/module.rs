//! Startup bootstrap: sources, resolution and conditional actions

use crate::api::native::AppConfig;
use crate::config::LoaderConfig;
use crate::domain::{
    application_actions, evaluate_conditions, ActionHook, ConditionalAction,
    ConditionalActionResult, ResolvedConfig, Resolver,
};
use crate::infra::sources::{load_file, EnvSource, LayeredSource, MapSource, SourceError};
use anyhow::{Context, Result};
use once_cell::sync::OnceCell;
use std::path::Path;
use std::sync::Arc;

/// Name of the override layer
pub const OVERRIDES_SOURCE: &str = "overrides";

/// Files looked up in the config directory, highest precedence first
pub const CONFIG_DIR_FILES: [&str; 3] =
    ["application.yml", "application.yaml", "application.properties"];

/// Config resolver bootstrap
///
/// Source precedence, highest first: overrides, environment, property files
/// (last listed first), files found in the config directory.
pub struct ConfigModule {
    loader: LoaderConfig,
    overrides: Vec<String>,
    env: Option<EnvSource>,
    actions: Vec<ConditionalAction>,
}

impl ConfigModule {
    /// Create a bootstrap for the application schema and actions
    pub fn new(loader: LoaderConfig) -> Self {
        Self {
            loader,
            overrides: Vec::new(),
            env: None,
            actions: application_actions(),
        }
    }

    /// Add `key=value` override entries
    pub fn with_overrides<I, S>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.overrides.extend(entries.into_iter().map(Into::into));
        self
    }

    /// Use this environment snapshot instead of the process environment
    pub fn with_env(mut self, env: EnvSource) -> Self {
        self.env = Some(env);
        self
    }

    /// Replace the effect of the named action
    ///
    /// An unknown action name leaves every action unchanged.
    pub fn with_hook(mut self, action: &str, hook: Arc<dyn ActionHook>) -> Self {
        if !self.actions.iter().any(|a| a.name == action) {
            tracing::warn!(action, "no conditional action with this name; hook ignored");
            return self;
        }
        self.actions = self
            .actions
            .into_iter()
            .map(|a| if a.name == action { a.with_hook(hook.clone()) } else { a })
            .collect();
        self
    }

    pub fn loader(&self) -> &LoaderConfig {
        &self.loader
    }

    /// Build the layered source described by the loader config
    pub fn build_source(&self) -> Result<LayeredSource> {
        let mut source = LayeredSource::new();

        if !self.overrides.is_empty() {
            let overrides = MapSource::from_overrides(OVERRIDES_SOURCE, &self.overrides)?;
            source.push_lowest(Box::new(overrides));
        }

        if self.loader.env_overrides {
            let env = match &self.env {
                Some(env) => env.clone(),
                None => EnvSource::from_env(self.loader.env_prefix.as_deref()),
            };
            source.push_lowest(Box::new(env));
        }

        for path in self.loader.property_files.iter().rev() {
            push_file(&mut source, path, self.loader.optional_files)?;
        }

        if let Some(dir) = &self.loader.config_dir {
            for name in CONFIG_DIR_FILES {
                push_file(&mut source, &dir.join(name), true)?;
            }
        }

        Ok(source)
    }

    /// Load sources, resolve the application settings and run conditional actions
    ///
    /// Any error aborts startup; no partially resolved config is returned.
    pub fn init(&self) -> Result<LoadedConfig> {
        let source = self.build_source()?;
        tracing::info!(layers = ?source.layer_names(), "property sources ready");

        let resolver = Resolver::application()?;
        let resolved = resolver
            .resolve(&source)
            .context("failed to resolve application settings")?;
        let app = AppConfig::from_resolved(&resolved)?;
        let actions = evaluate_conditions(&resolved, &self.actions).collect();

        tracing::info!("Config resolver initialized");
        Ok(LoadedConfig {
            resolved: Arc::new(resolved),
            app,
            actions,
        })
    }
}

/// Load `path` as the lowest layer; a missing file is skipped when `optional`
fn push_file(source: &mut LayeredSource, path: &Path, optional: bool) -> Result<()> {
    match load_file(path) {
        Ok(file) => source.push_lowest(Box::new(file)),
        Err(SourceError::Io { source: e, .. })
            if optional && e.kind() == std::io::ErrorKind::NotFound =>
        {
            tracing::debug!(path = %path.display(), "optional property file not found");
        }
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

/// Outcome of a successful bootstrap
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    resolved: Arc<ResolvedConfig>,
    app: AppConfig,
    actions: Vec<ConditionalActionResult>,
}

impl LoadedConfig {
    pub fn resolved(&self) -> &Arc<ResolvedConfig> {
        &self.resolved
    }

    pub fn app(&self) -> &AppConfig {
        &self.app
    }

    /// Action results in evaluation order
    pub fn actions(&self) -> &[ConditionalActionResult] {
        &self.actions
    }
}

/// Lazily initialized config shared across threads
///
/// The first successful `get_or_init` wins; concurrent callers block until it
/// finishes. A failed attempt leaves the cell empty.
#[derive(Debug, Default)]
pub struct SharedConfig {
    cell: OnceCell<Arc<LoadedConfig>>,
}

impl SharedConfig {
    pub const fn new() -> Self {
        Self {
            cell: OnceCell::new(),
        }
    }

    pub fn get_or_init(&self, module: &ConfigModule) -> Result<Arc<LoadedConfig>> {
        self.cell
            .get_or_try_init(|| module.init().map(Arc::new))
            .cloned()
    }

    /// Config if already initialized
    pub fn get(&self) -> Option<Arc<LoadedConfig>> {
        self.cell.get().cloned()
    }
}
