//! Package installation.
//!
//! An [`Installer`] drives the lifecycle of one package: check the local
//! manifest, fetch the remote one, then install dependencies, persist the
//! manifest and fetch the files concurrently.

mod config;
mod installer;
mod resolver;

pub use config::InstallConfig;
pub use installer::{InstallOutcome, Installer};
