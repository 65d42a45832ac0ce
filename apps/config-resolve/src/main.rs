use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use config_resolver::api::report::ReportDto;
use config_resolver::{ConfigModule, LoaderConfig};
use std::path::PathBuf;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Resolve the application settings and print where each value came from
#[derive(Parser, Debug)]
#[command(name = "config-resolve", version, about)]
struct Cli {
    /// Loader options file (YAML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Property file (.properties, .yml, .yaml); repeatable, later files win
    #[arg(short, long = "file")]
    files: Vec<PathBuf>,

    /// Override a setting (key=value); repeatable, takes precedence over everything
    #[arg(short = 's', long = "set", value_name = "KEY=VALUE")]
    overrides: Vec<String>,

    /// Ignore environment variables
    #[arg(long)]
    no_env: bool,

    /// Prefix required on environment variable names
    #[arg(long)]
    env_prefix: Option<String>,

    /// Skip property files that do not exist
    #[arg(long)]
    optional_files: bool,

    /// Directory searched for application.properties/.yml/.yaml (below --file)
    #[arg(long, value_name = "DIR")]
    config_dir: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Print sensitive values instead of redacting them
    #[arg(long)]
    show_sensitive: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.debug);

    let mut loader = LoaderConfig::load(cli.config.as_deref())?;
    loader.property_files.extend(cli.files.iter().cloned());
    if cli.no_env {
        loader.env_overrides = false;
    }
    if cli.env_prefix.is_some() {
        loader.env_prefix = cli.env_prefix.clone();
    }
    if cli.optional_files {
        loader.optional_files = true;
    }
    if cli.config_dir.is_some() {
        loader.config_dir = cli.config_dir.clone();
    }
    tracing::debug!(?loader, "loader configuration");

    let loaded = ConfigModule::new(loader)
        .with_overrides(cli.overrides.iter().cloned())
        .init()?;

    let report = ReportDto::build(loaded.resolved(), loaded.actions(), cli.show_sensitive);
    match cli.format {
        OutputFormat::Text => print!("{}", report.render_text()),
        OutputFormat::Json => {
            let json =
                serde_json::to_string_pretty(&report).context("failed to encode report")?;
            println!("{}", json);
        }
    }

    Ok(())
}

fn init_logging(debug: bool) {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = log_filter(rust_log.as_deref(), debug);
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// `RUST_LOG` directives when valid, `warn` otherwise; `--debug` adds `debug` on top
fn log_filter(rust_log: Option<&str>, debug: bool) -> EnvFilter {
    let filter = rust_log
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new("warn"));
    if debug {
        filter.add_directive(LevelFilter::DEBUG.into())
    } else {
        filter
    }
}
