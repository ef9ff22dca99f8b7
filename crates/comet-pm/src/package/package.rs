use std::fmt;
use std::path::{Path, PathBuf};

use super::PackageName;
use crate::error::{ComponentError, Result};

/// File name of the manifest, both remotely and in the install directory.
pub const MANIFEST_FILE: &str = "component.json";

/// Version constraint meaning "whatever the default branch points at".
pub const WILDCARD_VERSION: &str = "*";

/// Resolve a version constraint to the ref that is actually fetched.
pub fn effective_version<'a>(constraint: &'a str, default_branch: &'a str) -> &'a str {
    if constraint == WILDCARD_VERSION {
        default_branch
    } else {
        constraint
    }
}

/// One installable component: a name, a version ref and where it goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Package {
    pub name: PackageName,
    pub version: String,
    pub dest_dir: PathBuf,
    pub force: bool,
}

impl Package {
    /// Create a package descriptor.
    ///
    /// Fails without touching the network or filesystem if the name or
    /// version is missing, or if the name is not `owner/repo`.
    pub fn new(name: &str, version: &str, dest_dir: impl Into<PathBuf>, force: bool) -> Result<Self> {
        if name.trim().is_empty() {
            return Err(ComponentError::InvalidPackage {
                message: "package name is required".to_string(),
            });
        }
        if version.trim().is_empty() {
            return Err(ComponentError::InvalidPackage {
                message: format!("version is required for {}", name),
            });
        }

        Ok(Self {
            name: PackageName::parse(name)?,
            version: version.to_string(),
            dest_dir: dest_dir.into(),
            force,
        })
    }

    /// Descriptor for a declared dependency of this package.
    ///
    /// The dependency inherits the destination directory and the force flag;
    /// a wildcard constraint becomes `default_branch`.
    pub fn dependency(&self, name: &str, constraint: &str, default_branch: &str) -> Result<Self> {
        Self::new(
            name,
            effective_version(constraint, default_branch),
            self.dest_dir.clone(),
            self.force,
        )
    }

    /// Local directory this package installs into (`<dest>/<owner>-<repo>`).
    pub fn install_dir(&self) -> PathBuf {
        self.dest_dir.join(self.name.slug())
    }

    /// Path of the locally persisted manifest.
    pub fn manifest_path(&self) -> PathBuf {
        self.install_dir().join(MANIFEST_FILE)
    }

    /// Local path for a file listed in the manifest.
    pub fn file_path(&self, file: &str) -> PathBuf {
        self.install_dir().join(Path::new(file))
    }

    /// Raw content URL for a file of this package at its version.
    pub fn raw_url(&self, base_url: &str, file: &str) -> String {
        format!(
            "{}/{}/{}/{}/{}",
            base_url.trim_end_matches('/'),
            self.name.owner(),
            self.name.repo(),
            self.version,
            file.trim_start_matches('/')
        )
    }

    /// Identity used when deduplicating installs (`owner/repo@version`).
    pub fn id(&self) -> String {
        format!("{}@{}", self.name, self.version)
    }
}

impl fmt::Display for Package {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.name, self.version)
    }
}
