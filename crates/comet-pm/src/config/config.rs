use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::source::{ConfigLoader, ConfigSource, RawConfig};
use crate::error::{ComponentError, Result};
use crate::http::HttpClientConfig;
use crate::installer::InstallConfig;

/// Default host serving raw repository contents
pub const DEFAULT_RAW_BASE_URL: &str = "https://raw.githubusercontent.com";

/// Main comet configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(rename = "install-dir", default = "default_install_dir")]
    pub install_dir: PathBuf,

    /// Branch fetched for wildcard (`*`) versions
    #[serde(rename = "default-branch", default = "default_default_branch")]
    pub default_branch: String,

    #[serde(rename = "raw-base-url", default = "default_raw_base_url")]
    pub raw_base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    #[serde(rename = "user-agent", skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxy: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cafile: Option<PathBuf>,

    #[serde(default)]
    pub force: bool,

    #[serde(default)]
    pub dedupe: bool,

    // Internal tracking
    #[serde(skip)]
    base_dir: Option<PathBuf>,

    #[serde(skip)]
    sources: HashMap<String, ConfigSource>,
}

fn default_install_dir() -> PathBuf {
    PathBuf::from("components")
}

fn default_default_branch() -> String {
    "master".to_string()
}

fn default_raw_base_url() -> String {
    DEFAULT_RAW_BASE_URL.to_string()
}

fn default_timeout() -> u64 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self {
            install_dir: default_install_dir(),
            default_branch: default_default_branch(),
            raw_base_url: default_raw_base_url(),
            timeout: default_timeout(),
            user_agent: None,
            proxy: None,
            cafile: None,
            force: false,
            dedupe: false,
            base_dir: None,
            sources: HashMap::new(),
        }
    }
}

impl Config {
    /// Create a new Config with defaults and base directory
    pub fn with_base_dir<P: AsRef<Path>>(base_dir: P) -> Self {
        let mut config = Self::default();
        config.base_dir = Some(base_dir.as_ref().to_path_buf());
        config
    }

    /// Build configuration from all sources (defaults, global, project, env)
    pub fn build<P: AsRef<Path>>(project_dir: Option<P>, use_environment: bool) -> Result<Self> {
        let loader = ConfigLoader::new(use_environment);
        let mut config = Self::default();

        if let Some(ref dir) = project_dir {
            config.base_dir = Some(dir.as_ref().to_path_buf());
        }

        for key in Self::config_keys() {
            config.sources.insert(key.to_string(), ConfigSource::Default);
        }

        // 1. Global config from <comet home>/config.json
        let global_config = loader.load_global_config()?;
        config.merge_raw_config(global_config, ConfigSource::Global)?;

        // 2. Project config from comet.json
        if let Some(project_dir) = &project_dir {
            let project_config = loader.load_project_config(project_dir)?;
            config.merge_raw_config(project_config, ConfigSource::Project)?;
        }

        // 3. Environment variable overrides
        if use_environment {
            config.apply_env_overrides(&loader);
        }

        log::debug!(
            "Config: install-dir={} default-branch={} raw-base-url={}",
            config.install_dir.display(),
            config.default_branch,
            config.raw_base_url
        );

        Ok(config)
    }

    /// Get base directory
    pub fn base_dir(&self) -> Option<&Path> {
        self.base_dir.as_deref()
    }

    /// Get the source of a configuration value
    pub fn get_source(&self, key: &str) -> Option<&ConfigSource> {
        self.sources.get(key)
    }

    /// Record a value set from the command line
    pub fn set_from_command(&mut self, key: &str) {
        self.sources.insert(key.to_string(), ConfigSource::Command);
    }

    /// Get install directory (resolved against the base directory)
    pub fn get_install_dir(&self) -> PathBuf {
        self.resolve_path(&self.install_dir)
    }

    /// HTTP client settings derived from this configuration
    pub fn http_client_config(&self) -> HttpClientConfig {
        let mut http = HttpClientConfig::new().with_timeout(Duration::from_secs(self.timeout));
        if let Some(ref user_agent) = self.user_agent {
            http = http.with_user_agent(user_agent.clone());
        }
        if let Some(ref proxy) = self.proxy {
            http = http.with_proxy(proxy.clone());
        }
        if let Some(ref cafile) = self.cafile {
            http = http.with_cafile(self.resolve_path(cafile));
        }
        http
    }

    /// Installer settings derived from this configuration
    pub fn install_config(&self) -> InstallConfig {
        InstallConfig {
            dest_dir: self.get_install_dir(),
            force: self.force,
            default_branch: self.default_branch.clone(),
            raw_base_url: self.raw_base_url.clone(),
            dedupe: self.dedupe,
        }
    }

    /// Resolve a path relative to base_dir if not absolute
    fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else if let Some(ref base) = self.base_dir {
            base.join(path)
        } else {
            path.to_path_buf()
        }
    }

    /// Merge raw configuration from a source
    fn merge_raw_config(&mut self, raw: RawConfig, source: ConfigSource) -> Result<()> {
        if let Some(config_map) = raw.config {
            for (key, value) in config_map {
                self.merge_config_value(&key, value, source.clone())?;
            }
        }
        Ok(())
    }

    /// Merge a single configuration value
    fn merge_config_value(
        &mut self,
        key: &str,
        value: serde_json::Value,
        source: ConfigSource,
    ) -> Result<()> {
        let invalid = |expected: &str| {
            ComponentError::Config(format!("'{}' must be {} (from {})", key, expected, source.as_str()))
        };

        match key {
            "install-dir" => {
                let s = value.as_str().ok_or_else(|| invalid("a string"))?;
                self.install_dir = PathBuf::from(s);
            }
            "default-branch" => {
                let s = value.as_str().filter(|s| !s.is_empty()).ok_or_else(|| invalid("a non-empty string"))?;
                self.default_branch = s.to_string();
            }
            "raw-base-url" => {
                let s = value.as_str().ok_or_else(|| invalid("a string"))?;
                self.raw_base_url = s.to_string();
            }
            "timeout" => {
                self.timeout = value.as_u64().ok_or_else(|| invalid("a number of seconds"))?;
            }
            "user-agent" => {
                let s = value.as_str().ok_or_else(|| invalid("a string"))?;
                self.user_agent = Some(s.to_string());
            }
            "proxy" => {
                let s = value.as_str().ok_or_else(|| invalid("a string"))?;
                self.proxy = Some(s.to_string());
            }
            "cafile" => {
                let s = value.as_str().ok_or_else(|| invalid("a string"))?;
                self.cafile = Some(PathBuf::from(s));
            }
            "force" => {
                self.force = value.as_bool().ok_or_else(|| invalid("a boolean"))?;
            }
            "dedupe" => {
                self.dedupe = value.as_bool().ok_or_else(|| invalid("a boolean"))?;
            }
            _ => {
                log::warn!("Unknown config key '{}' (from {})", key, source.as_str());
                return Ok(());
            }
        }

        self.sources.insert(key.to_string(), source);
        Ok(())
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self, loader: &ConfigLoader) {
        if let Some(install_dir) = loader.get_env_path("install-dir") {
            self.install_dir = install_dir;
            self.sources.insert(
                "install-dir".to_string(),
                ConfigSource::Environment("COMET_INSTALL_DIR".to_string()),
            );
        }

        if let Some(branch) = loader.get_env_config("default-branch") {
            self.default_branch = branch;
            self.sources.insert(
                "default-branch".to_string(),
                ConfigSource::Environment("COMET_DEFAULT_BRANCH".to_string()),
            );
        }

        if let Some(base_url) = loader.get_env_config("raw-base-url") {
            self.raw_base_url = base_url;
            self.sources.insert(
                "raw-base-url".to_string(),
                ConfigSource::Environment("COMET_RAW_BASE_URL".to_string()),
            );
        }

        if let Some(timeout) = loader.get_env_u64("timeout") {
            self.timeout = timeout;
            self.sources.insert(
                "timeout".to_string(),
                ConfigSource::Environment("COMET_TIMEOUT".to_string()),
            );
        }

        if let Some(force) = loader.get_env_bool("force") {
            self.force = force;
            self.sources.insert(
                "force".to_string(),
                ConfigSource::Environment("COMET_FORCE".to_string()),
            );
        }

        if let Some(dedupe) = loader.get_env_bool("dedupe") {
            self.dedupe = dedupe;
            self.sources.insert(
                "dedupe".to_string(),
                ConfigSource::Environment("COMET_DEDUPE".to_string()),
            );
        }
    }

    /// Get all configuration keys
    fn config_keys() -> &'static [&'static str] {
        &[
            "install-dir",
            "default-branch",
            "raw-base-url",
            "timeout",
            "force",
            "dedupe",
        ]
    }
}
