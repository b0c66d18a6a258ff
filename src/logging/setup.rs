use std::fs;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use super::formatter::BracketedFormatter;

/// Initialize dual logging (timestamped file + stdout) and return the log
/// file path. Level defaults to `info`, overridable via `RUST_LOG`.
pub fn setup_logging() -> PathBuf {
    let log_dir = std::env::current_dir().unwrap().join("logs");
    fs::create_dir_all(&log_dir).expect("Failed to create logs directory");

    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    let log_filename = format!("trip_distribution_{}.log", timestamp);
    let log_path = log_dir.join(&log_filename);

    let file = std::fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&log_path)
        .expect("Failed to create log file");

    let file_layer = fmt::layer()
        .event_format(BracketedFormatter)
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false);

    let stdout_layer = fmt::layer()
        .event_format(BracketedFormatter)
        .with_writer(std::io::stdout);

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(file_layer)
        .with(stdout_layer)
        .init();

    info!("Log file created at: {:?}", log_path);

    log_path
}
