use std::{
    fs::{self, OpenOptions},
    path::{Path, PathBuf},
    sync::Mutex,
};

use tracing_subscriber::EnvFilter;

use crate::disk_storage::egx_dir;

/// Used when `RUST_LOG` is not set.
pub const DEFAULT_DIRECTIVES: &str = "egx_bin=info,egx_tui=info,egx_utils=info";

pub fn default_log_path() -> crate::Result<PathBuf> {
    Ok(egx_dir()?.join("egx.log"))
}

/// Installs the global tracing subscriber, appending to `path`.
///
/// The terminal belongs to the UI while it runs, so logs never go to stdout.
pub fn init_file_logging(path: &Path) -> crate::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| crate::Error::CreateDirAllFailed(parent.to_path_buf(), e))?;
    }

    let file = OpenOptions::new()
        .append(true)
        .create(true)
        .open(path)
        .map_err(|e| crate::Error::LogFileOpenFailed(path.to_path_buf(), e))?;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|e| crate::Error::LogInitFailed(e.to_string()))
}
