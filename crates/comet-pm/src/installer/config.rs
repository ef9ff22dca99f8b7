use std::path::PathBuf;

use crate::config::DEFAULT_RAW_BASE_URL;

/// Installation configuration
#[derive(Debug, Clone)]
pub struct InstallConfig {
    /// Directory packages are installed into (`<dest_dir>/<owner>-<repo>`)
    pub dest_dir: PathBuf,
    /// Reinstall packages whose manifest already exists locally
    pub force: bool,
    /// Ref used for wildcard (`*`) versions
    pub default_branch: String,
    /// Host serving raw repository contents
    pub raw_base_url: String,
    /// Install each `owner/repo@version` at most once per run
    pub dedupe: bool,
}

impl Default for InstallConfig {
    fn default() -> Self {
        Self {
            dest_dir: PathBuf::from("components"),
            force: false,
            default_branch: "master".to_string(),
            raw_base_url: DEFAULT_RAW_BASE_URL.to_string(),
            dedupe: false,
        }
    }
}
