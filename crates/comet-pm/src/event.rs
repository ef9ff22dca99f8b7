//! Install lifecycle events.
//!
//! The installer reports progress through an unbounded channel so that a
//! front end (terminal output, logging) can observe an install without being
//! coupled to it. Events are informational; the terminal outcome of an
//! install is always its returned `Result`.

use std::fmt;

use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

/// Something that happened while installing a package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallEvent {
    /// A dependency is about to be installed.
    DependencyDiscovered {
        parent: String,
        name: String,
        version: String,
    },
    /// A file is about to be fetched.
    FileDiscovered {
        package: String,
        path: String,
        url: String,
    },
    /// The package is already installed and was left alone.
    AlreadyExists { package: String },
    /// Another dependency path already claimed this package in the current run.
    Deduplicated { package: String },
    /// The install failed.
    Failed { package: String, message: String },
    /// The install completed.
    Installed { package: String },
}

impl InstallEvent {
    /// Short label used by the CLI and logs.
    pub fn label(&self) -> &'static str {
        match self {
            InstallEvent::DependencyDiscovered { .. } => "dep",
            InstallEvent::FileDiscovered { .. } => "fetch",
            InstallEvent::AlreadyExists { .. } => "exists",
            InstallEvent::Deduplicated { .. } => "shared",
            InstallEvent::Failed { .. } => "error",
            InstallEvent::Installed { .. } => "install",
        }
    }
}

impl fmt::Display for InstallEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InstallEvent::DependencyDiscovered { parent, name, version } => {
                write!(f, "{}@{} (required by {})", name, version, parent)
            }
            InstallEvent::FileDiscovered { package, path, .. } => write!(f, "{}: {}", package, path),
            InstallEvent::AlreadyExists { package } => write!(f, "{} is already installed", package),
            InstallEvent::Deduplicated { package } => write!(f, "{} is installed by another dependency", package),
            InstallEvent::Failed { package, message } => write!(f, "{}: {}", package, message),
            InstallEvent::Installed { package } => write!(f, "{}", package),
        }
    }
}

/// Sending half held by the installer.
pub type EventSender = UnboundedSender<InstallEvent>;

/// Receiving half handed to the observer.
pub type EventReceiver = UnboundedReceiver<InstallEvent>;

/// Create a connected event channel.
pub fn event_channel() -> (EventSender, EventReceiver) {
    unbounded_channel()
}
