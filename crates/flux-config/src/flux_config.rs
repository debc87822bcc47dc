//! Dispatcher and store configuration
//!
//! Configuration loaded from `.flux-lander.toml`.

use crate::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Configuration for dispatchers and stores
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct FluxConfig {
    /// Install a logging worker at the head of every dispatcher built from
    /// this config
    #[serde(default)]
    pub log_actions: bool,

    /// Priority of the logging worker (lower runs first)
    #[serde(default = "default_logging_priority")]
    pub logging_priority: i32,

    /// Per-store priority overrides, keyed by store name
    #[serde(default)]
    pub store_priorities: HashMap<String, i32>,
}

fn default_logging_priority() -> i32 {
    i32::MIN
}

impl Default for FluxConfig {
    fn default() -> Self {
        Self {
            log_actions: false,
            logging_priority: default_logging_priority(),
            store_priorities: HashMap::new(),
        }
    }
}

impl FluxConfig {
    /// Load config from CWD first, then home directory, or use defaults
    pub fn load() -> Self {
        if let Some(content) = crate::load_config_file() {
            match Self::from_toml_str(&content) {
                Ok(config) => {
                    log::info!("Loaded flux config from file");
                    return config;
                }
                Err(e) => {
                    log::warn!("{}", e);
                }
            }
        }

        log::debug!("Using default flux config");
        Self::default()
    }

    /// Parse config from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Read and parse a specific config file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Priority for the named store, falling back to `default` when the
    /// config has no override
    pub fn priority_for(&self, store_name: &str, default: i32) -> i32 {
        self.store_priorities
            .get(store_name)
            .copied()
            .unwrap_or(default)
    }
}
