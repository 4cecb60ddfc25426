//! Configuration loading at process start

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::Config;

/// Locate the config file to load.
///
/// Search order:
/// 1. explicit path (`--config` or `STREAMAUTH_CONFIG_PATH`)
/// 2. ./config.yaml (current working directory)
///
/// An explicit path is returned even when it does not exist so the caller
/// reports it instead of silently running on defaults.
#[must_use]
pub fn resolve_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }

    let cwd = Path::new("config.yaml");
    cwd.exists().then(|| cwd.to_path_buf())
}

/// Load configuration from a config file and environment variables.
///
/// Runs before logging is initialized, so progress goes to stderr.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let config = match resolve_config_path(explicit) {
        Some(path) => {
            eprintln!("Loading config from {}", path.display());
            Config::from_file(&path)?
        }
        None => {
            eprintln!("No config file found, using environment variables");
            Config::from_env()?
        }
    };

    Ok(config)
}
