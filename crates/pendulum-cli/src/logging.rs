//! Log initialization.
//!
//! Logs go to stderr so they never mix with frame output on stdout.

use tracing_subscriber::EnvFilter;

use crate::cli::{LogFormat, LogLevel};

/// Installs the global subscriber.
///
/// `RUST_LOG`, when set, takes precedence over `level`.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init(level: LogLevel, format: LogFormat) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_directive()));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    let installed = match format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    installed.map_err(anyhow::Error::msg)
}
