use crate::utils::error::Result;
use chrono::{DateTime, Local};
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Run log name, one file per run: `roleremover_YYYYMMDDHHMMSS.log`.
pub fn log_file_name(started: DateTime<Local>) -> String {
    format!("roleremover_{}.log", started.format("%Y%m%d%H%M%S"))
}

/// Installs the run logger: everything from this crate goes to the log file,
/// while the console only shows warnings and errors unless `RUST_LOG` says otherwise.
pub fn init_cli_logger(debug: bool, log_dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(log_dir)?;
    let log_path = log_dir.join(log_file_name(Local::now()));
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;

    let file_filter = if debug {
        EnvFilter::new("role_remover=debug")
    } else {
        EnvFilter::new("role_remover=info")
    };
    let console_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("role_remover=warn"));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(false)
                .with_thread_ids(false)
                .with_filter(file_filter),
        )
        .with(
            fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact()
                .with_filter(console_filter),
        )
        .init();

    Ok(log_path)
}
