use std::process::ExitCode;

use anyhow::{anyhow, Context, Result};
use geolens_core::config::{AppConfig, LoadOptions, LogFormat, LoggingConfig};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    // Config errors are reported by the command itself; logging falls back to defaults.
    let logging = AppConfig::load(LoadOptions::default())
        .map(|config| config.logging)
        .unwrap_or_else(|_| AppConfig::default().logging);

    if let Err(error) = init_logging(&logging) {
        eprintln!("failed to initialize logging: {error:#}");
    }

    geolens_cli::run()
}

/// Logs go to stderr so stdout carries only the command payload
fn init_logging(logging: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&logging.level))
        .with_context(|| format!("invalid log level `{}`", logging.level))?;

    let builder = tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    let result = match logging.format {
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Json => builder.json().try_init(),
    };

    result.map_err(|error| anyhow!(error))
}
