//! Configuration for flux-lander
//!
//! This crate provides:
//! - Configuration file discovery (CWD, home directory, config directory)
//! - Dispatcher and store configuration (`FluxConfig`) loaded from TOML
//! - Typed errors for explicit config loading

pub mod config_file;
pub mod error;
pub mod flux_config;
pub mod paths;

pub use config_file::load_config_file;
pub use error::ConfigError;
pub use flux_config::FluxConfig;
