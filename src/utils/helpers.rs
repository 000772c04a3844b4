//! Helpers for parsec.
//!
//! - Home directory lookup for the config path
//! - Resolving the directory argument to an absolute path
//! - Optional file logging, enabled through `PARSEC_LOG`

use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};

/// Names the file parsec logs to. Without it logging stays off, since the UI owns the
/// terminal.
pub const LOG_ENV: &str = "PARSEC_LOG";

pub fn get_home() -> Option<PathBuf> {
    dirs::home_dir()
}

/// Expands a leading `~` and makes `arg` absolute against the current directory.
///
/// The path is not required to exist.
pub fn resolve_initial_dir(arg: &str) -> io::Result<PathBuf> {
    let expanded = match arg.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with(['/', '\\']) => match get_home() {
            Some(home) => home.join(rest.trim_start_matches(['/', '\\'])),
            None => PathBuf::from(arg),
        },
        _ => PathBuf::from(arg),
    };
    absolute(&expanded)
}

fn absolute(path: &Path) -> io::Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    Ok(std::env::current_dir()?.join(path))
}

/// Starts file logging when [LOG_ENV] is set. The level filter comes from `RUST_LOG`.
///
/// Returns `Ok(false)` when logging stays off.
pub fn init_logging() -> io::Result<bool> {
    let Some(path) = std::env::var_os(LOG_ENV) else {
        return Ok(false);
    };
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init()
        .map_err(io::Error::other)?;
    Ok(true)
}
