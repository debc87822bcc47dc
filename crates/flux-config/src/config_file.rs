use std::{env, path::PathBuf};

pub(crate) const CONFIG_FILE: &str = ".flux-lander.toml";

/// Load config file content from CWD first, then home directory, then the
/// platform config directory
///
/// Searches for:
/// 1. `.flux-lander.toml` in the current working directory
/// 2. `.flux-lander.toml` in the home directory
/// 3. `config.toml` in the flux-lander config directory
///
/// Returns the file content if found, None otherwise.
pub fn load_config_file() -> Option<String> {
    // Try current directory first
    if let Ok(content) = std::fs::read_to_string(CONFIG_FILE) {
        log::debug!("Loaded config from {}", CONFIG_FILE);
        return Some(content);
    }

    for path in [get_home_config_path(), crate::paths::config_file_path()]
        .into_iter()
        .flatten()
    {
        if let Ok(content) = std::fs::read_to_string(&path) {
            log::debug!("Loaded config from {}", path.display());
            return Some(content);
        }
    }

    None
}

/// Get the path to the config file in the home directory
///
/// Returns ~/.flux-lander.toml if HOME environment variable is set.
fn get_home_config_path() -> Option<PathBuf> {
    env::var_os("HOME").map(|home| PathBuf::from(home).join(CONFIG_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_home_config_path_uses_dotfile() {
        if let Some(path) = get_home_config_path() {
            assert!(path.ends_with(CONFIG_FILE));
        }
    }
}
