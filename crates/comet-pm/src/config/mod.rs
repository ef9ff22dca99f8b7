//! Configuration management for comet
//!
//! Configuration is loaded from multiple sources and merged in priority order
//! (highest to lowest):
//!
//! 1. Command line flags (applied by the caller)
//! 2. Environment variables (`COMET_*`)
//! 3. Project `comet.json` config section
//! 4. Global `<config dir>/comet/config.json`
//! 5. Built-in defaults
//!
//! # Example
//!
//! ```rust,no_run
//! use comet_pm::config::Config;
//! use std::path::Path;
//!
//! let config = Config::build(Some(Path::new("/path/to/project")), true).unwrap();
//! println!("Install dir: {:?}", config.get_install_dir());
//! println!("Default branch: {}", config.default_branch);
//! ```

mod config;
mod source;

pub use config::{Config, DEFAULT_RAW_BASE_URL};
pub use source::{ConfigLoader, ConfigSource, RawConfig, PROJECT_CONFIG_FILE};
