pub mod config;
pub mod downloader;
pub mod error;
pub mod event;
pub mod http;
pub mod installer;
pub mod package;
pub mod util;

pub use config::{Config, ConfigSource};
pub use downloader::FileFetcher;
pub use error::{ComponentError, Result};
pub use event::{event_channel, EventReceiver, EventSender, InstallEvent};
pub use http::{HttpClient, HttpClientConfig, HttpError, Transport};
pub use installer::{InstallConfig, InstallOutcome, Installer};
pub use package::{Manifest, Package, PackageName};
