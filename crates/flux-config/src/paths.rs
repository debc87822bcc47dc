//! Configuration directory paths
//!
//! Uses XDG directories via `dirs` crate.
//!
//! Platform-specific locations:
//! - Linux: `~/.config/flux-lander/`
//! - macOS: `~/Library/Application Support/flux-lander/`
//! - Windows: `%APPDATA%\flux-lander\`

use anyhow::{Context, Result};
use std::path::PathBuf;

const APP_NAME: &str = "flux-lander";

/// Get the application config directory
/// Returns ~/.config/flux-lander/ on Linux, ~/Library/Application Support/flux-lander/ on macOS
pub fn config_dir() -> Result<PathBuf> {
    let base = dirs::config_dir().context("Could not determine config directory")?;
    Ok(base.join(APP_NAME))
}

/// Path to `config.toml` inside the config directory, if one can be determined
pub fn config_file_path() -> Option<PathBuf> {
    config_dir().ok().map(|dir| dir.join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_dir_ends_with_app_name() {
        if let Ok(dir) = config_dir() {
            assert!(dir.ends_with(APP_NAME));
        }
    }

    #[test]
    fn test_config_file_path() {
        if let Some(path) = config_file_path() {
            assert!(path.ends_with("config.toml"));
        }
    }
}
