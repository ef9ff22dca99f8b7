use futures_util::future::{self, join_all, BoxFuture, FutureExt};

use super::{InstallOutcome, Installer};
use crate::event::InstallEvent;
use crate::package::{Manifest, Package};
use crate::util::settle;
use crate::Result;

impl Installer {
    /// Install every declared dependency of `parent` concurrently.
    ///
    /// Each dependency is installed into the parent's destination with the
    /// parent's force flag. A dependency that is already installed counts as
    /// a success. All installs settle before the first failure is reported.
    pub(super) async fn install_dependencies(&self, parent: &Package, manifest: &Manifest) -> Result<()> {
        if !manifest.has_dependencies() {
            return Ok(());
        }

        let default_branch = &self.config().default_branch;
        let installs: Vec<BoxFuture<'_, Result<InstallOutcome>>> = manifest
            .dependencies
            .iter()
            .map(|(name, constraint)| match parent.dependency(name, constraint, default_branch) {
                Ok(dependency) => {
                    self.emit(InstallEvent::DependencyDiscovered {
                        parent: parent.to_string(),
                        name: dependency.name.to_string(),
                        version: dependency.version.clone(),
                    });
                    self.install_package(dependency)
                }
                Err(e) => {
                    log::warn!("{}: skipping dependency {}: {}", parent, name, e);
                    future::ready(Err(e)).boxed()
                }
            })
            .collect();

        settle(join_all(installs).await)?;
        Ok(())
    }
}
