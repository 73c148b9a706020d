//! Logging Infrastructure
//!
//! Console logging (pretty or JSON) with an optional daily-rotating file.
//! `RUST_LOG` overrides the level passed in.

use std::fs;
use std::path::Path;

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, Layer, fmt, prelude::*};

/// Rotated log files kept on disk
const MAX_LOG_FILES: usize = 14;

/// Initialize the logging system
///
/// # Arguments
/// * `level` - Log level (e.g., "info", "attend_client=debug")
/// * `json_format` - JSON console output instead of the pretty format
/// * `log_dir` - Optional directory for daily-rotated `attend-client.*.log` files
///
/// # Examples
/// ```no_run
/// // Development setup (console only)
/// attend_client::logger::init_logger("debug", false, None)?;
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn init_logger(level: &str, json_format: bool, log_dir: Option<&Path>) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let console_layer = if json_format {
        fmt::layer()
            .json()
            .with_target(true)
            .with_current_span(true)
            .with_file(true)
            .with_line_number(true)
            .boxed()
    } else {
        fmt::layer()
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .boxed()
    };

    let file_layer = match log_dir {
        Some(dir) => {
            fs::create_dir_all(dir)?;
            let appender = RollingFileAppender::builder()
                .rotation(Rotation::DAILY)
                .filename_prefix("attend-client")
                .filename_suffix("log")
                .max_log_files(MAX_LOG_FILES)
                .build(dir)?;
            Some(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_ansi(false)
                    .with_writer(std::sync::Mutex::new(appender)),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()?;

    Ok(())
}
