use std::collections::HashSet;
use std::io::ErrorKind;
use std::sync::{Arc, Mutex};

use futures_util::future::{join_all, BoxFuture, FutureExt};

use super::InstallConfig;
use crate::downloader::{ensure_dir, write_file, FileFetcher};
use crate::event::{EventSender, InstallEvent};
use crate::http::Transport;
use crate::package::{effective_version, Manifest, Package};
use crate::{ComponentError, Result};

/// Terminal outcome of a successful package install.
///
/// Failures are the `Err` side of the surrounding `Result`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallOutcome {
    /// The package was fetched and written.
    Installed,
    /// A local manifest was already present and `force` was off.
    AlreadyExists,
    /// Deduplication is on and this package was already claimed in this run.
    Deduplicated,
}

/// Installs packages and, recursively, their dependencies.
pub struct Installer {
    fetcher: FileFetcher,
    config: InstallConfig,
    events: Option<EventSender>,
    claimed: Mutex<HashSet<String>>,
}

impl Installer {
    /// Create a new installer
    pub fn new(transport: Arc<dyn Transport>, config: InstallConfig) -> Self {
        Self {
            fetcher: FileFetcher::new(transport, config.raw_base_url.clone()),
            config,
            events: None,
            claimed: Mutex::new(HashSet::new()),
        }
    }

    /// Report lifecycle events on `events`
    pub fn with_events(mut self, events: EventSender) -> Self {
        self.events = Some(events);
        self
    }

    /// Get the install configuration
    pub fn config(&self) -> &InstallConfig {
        &self.config
    }

    /// Build a top-level package descriptor from a name and version constraint.
    pub fn package(&self, name: &str, version: &str) -> Result<Package> {
        Package::new(
            name,
            effective_version(version, &self.config.default_branch),
            self.config.dest_dir.clone(),
            self.config.force,
        )
    }

    /// Validate and install a single package.
    pub async fn install(&self, name: &str, version: &str) -> Result<InstallOutcome> {
        let package = self.package(name, version)?;
        self.install_package(package).await
    }

    /// Install several packages concurrently.
    ///
    /// Every install runs to completion; results are returned in input order.
    pub async fn install_all(&self, packages: Vec<Package>) -> Vec<Result<InstallOutcome>> {
        join_all(packages.into_iter().map(|package| self.install_package(package))).await
    }

    /// Install a package and report its terminal event.
    pub fn install_package(&self, package: Package) -> BoxFuture<'_, Result<InstallOutcome>> {
        async move {
            let result = self.run_lifecycle(&package).await;

            let id = package.to_string();
            match &result {
                Ok(InstallOutcome::Installed) => {
                    log::info!("Installed {}", id);
                    self.emit(InstallEvent::Installed { package: id });
                }
                Ok(InstallOutcome::AlreadyExists) => {
                    log::debug!("{} already exists", id);
                    self.emit(InstallEvent::AlreadyExists { package: id });
                }
                Ok(InstallOutcome::Deduplicated) => {
                    log::debug!("{} already claimed in this run", id);
                    self.emit(InstallEvent::Deduplicated { package: id });
                }
                Err(e) => {
                    log::debug!("Failed to install {}: {}", id, e);
                    self.emit(InstallEvent::Failed {
                        package: id,
                        message: e.to_string(),
                    });
                }
            }

            result
        }
        .boxed()
    }

    async fn run_lifecycle(&self, package: &Package) -> Result<InstallOutcome> {
        if self.config.dedupe && !self.claim(package) {
            return Ok(InstallOutcome::Deduplicated);
        }

        let manifest_path = package.manifest_path();
        match tokio::fs::read(&manifest_path).await {
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::debug!("{} is not installed", package);
            }
            Err(source) => {
                return Err(ComponentError::ReadManifest {
                    path: manifest_path,
                    source,
                });
            }
            Ok(_) if !package.force => return Ok(InstallOutcome::AlreadyExists),
            Ok(_) => log::debug!("Reinstalling {}", package),
        }

        self.really_install(package).await?;
        Ok(InstallOutcome::Installed)
    }

    /// Fetch the manifest, then resolve dependencies, persist the manifest and
    /// fetch the files concurrently. All three settle before returning.
    async fn really_install(&self, package: &Package) -> Result<()> {
        let mut manifest = self.fetcher.fetch_manifest(package).await?;
        let files = manifest.files();
        manifest.ensure_repo(&package.name);

        let (dependencies, persisted, fetched) = tokio::join!(
            self.install_dependencies(package, &manifest),
            self.persist_manifest(package, &manifest),
            self.fetch_files(package, &files),
        );

        dependencies?;
        persisted?;
        let written = fetched?;
        log::debug!("{}: wrote {} file(s)", package, written);

        Ok(())
    }

    async fn persist_manifest(&self, package: &Package, manifest: &Manifest) -> Result<()> {
        ensure_dir(&package.install_dir()).await?;
        let json = manifest.to_json_pretty()?;
        write_file(&package.manifest_path(), &json).await
    }

    async fn fetch_files(&self, package: &Package, files: &[String]) -> Result<usize> {
        ensure_dir(&package.install_dir()).await?;

        let id = package.to_string();
        self.fetcher
            .fetch_files(package, files, |path, url| {
                self.emit(InstallEvent::FileDiscovered {
                    package: id.clone(),
                    path: path.to_string(),
                    url: url.to_string(),
                });
            })
            .await
    }

    /// Claim a package identity; false if it was already claimed.
    fn claim(&self, package: &Package) -> bool {
        match self.claimed.lock() {
            Ok(mut claimed) => claimed.insert(package.id()),
            Err(poisoned) => poisoned.into_inner().insert(package.id()),
        }
    }

    pub(super) fn emit(&self, event: InstallEvent) {
        if let Some(ref events) = self.events {
            // A dropped receiver only means nobody is listening.
            let _ = events.send(event);
        }
    }
}
