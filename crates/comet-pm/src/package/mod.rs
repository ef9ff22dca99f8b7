// Package model for components
//
// This module provides the package descriptor (name, version, destination),
// the `owner/repo` name type and the `component.json` manifest.

mod manifest;
mod name;
mod package;

pub use manifest::Manifest;
pub use name::PackageName;
pub use package::{effective_version, Package, MANIFEST_FILE, WILDCARD_VERSION};
