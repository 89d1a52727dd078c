//! Config directory resolution.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// File name of the browser log inside the config directory.
const LOG_FILE_NAME: &str = "moviedb.log";

/// Resolves the config directory: `dir` if given, else `~/.config/moviedb`.
fn resolve_config_dir(dir: Option<&Path>) -> Result<PathBuf> {
    if let Some(d) = dir {
        return Ok(d.to_path_buf());
    }

    let home = std::env::var("HOME").context("HOME environment variable is not set")?;
    Ok(PathBuf::from(home).join(".config").join("moviedb"))
}

/// Resolves the config file path.
///
/// - If `dir` is `Some`, returns `{dir}/config.toml`.
/// - Otherwise returns `~/.config/moviedb/config.toml`.
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined (when `dir` is `None`).
pub fn resolve_config_path(dir: Option<&Path>) -> Result<PathBuf> {
    Ok(resolve_config_dir(dir)?.join("config.toml"))
}

/// Resolves where the browser writes its log: `log_file` if given, else
/// `moviedb.log` in the config directory.
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined.
pub fn resolve_log_path(dir: Option<&Path>, log_file: Option<&Path>) -> Result<PathBuf> {
    if let Some(f) = log_file {
        return Ok(f.to_path_buf());
    }
    Ok(resolve_config_dir(dir)?.join(LOG_FILE_NAME))
}
