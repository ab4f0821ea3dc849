//! Application logging functionality
//!
//! Console logging through `tracing-subscriber`, with an optional dated log
//! file under ~/.config/bitglyph/logs/

use crate::core::config_file::ConfigFile;
use anyhow::Context;
use std::fs;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

/// Level used when RUST_LOG is not set
fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "bitglyph=debug,info"
    } else {
        "info"
    }
}

/// Initialize the logs directory
pub fn initialize_logs_directory() -> anyhow::Result<()> {
    let logs_dir = ConfigFile::logs_dir();
    fs::create_dir_all(&logs_dir)
        .with_context(|| format!("Failed to create logs directory {}", logs_dir.display()))?;
    Ok(())
}

/// Install the global subscriber
///
/// The returned guard flushes the file writer on drop; keep it alive until
/// the program exits.
pub fn init_logging(verbose: bool, log_to_file: bool) -> anyhow::Result<Option<WorkerGuard>> {
    let filter = || {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)))
    };

    let console = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .without_time()
        .with_filter(filter());

    let (file_layer, guard) = if log_to_file {
        initialize_logs_directory()?;
        let log_file_path = ConfigFile::current_log_file();
        let file_name = log_file_path
            .file_name()
            .map(|name| name.to_os_string())
            .context("Log file path has no file name")?;
        let appender = tracing_appender::rolling::never(ConfigFile::logs_dir(), file_name);
        let (writer, guard) = tracing_appender::non_blocking(appender);
        let layer = fmt::layer()
            .with_writer(writer)
            .with_ansi(false)
            .with_filter(filter());
        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(console)
        .with(file_layer)
        .try_init()
        .context("Failed to install log subscriber")?;

    if guard.is_some() {
        tracing::info!(
            "=== bitglyph started at {} ===",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
        );
        tracing::info!("Logs written to: {:?}", ConfigFile::current_log_file());
    }

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbose_enables_debug_for_crate() {
        assert_eq!(default_directive(false), "info");
        assert!(default_directive(true).contains("bitglyph=debug"));
        assert!(EnvFilter::try_new(default_directive(true)).is_ok());
    }
}
