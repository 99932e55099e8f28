//! File logging; the terminal itself belongs to the UI.

use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use color_eyre::eyre::{WrapErr, eyre};
use directories::ProjectDirs;
use tracing_subscriber::EnvFilter;

/// Name of the log file inside the data directory.
const LOG_FILE: &str = "dialplate.log";

/// Install a `tracing` subscriber appending to the log file.
///
/// The filter comes from `RUST_LOG` and defaults to `info`. Returns the
/// path of the log file.
pub fn init() -> color_eyre::Result<PathBuf> {
    let dirs = ProjectDirs::from("", "", "dialplate")
        .ok_or_else(|| eyre!("could not determine a data directory"))?;
    let dir = dirs.data_local_dir();
    fs::create_dir_all(dir)
        .wrap_err_with(|| format!("failed to create log directory {}", dir.display()))?;

    let path = dir.join(LOG_FILE);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .wrap_err_with(|| format!("failed to open log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|err| eyre!("failed to install log subscriber: {err}"))?;

    Ok(path)
}
