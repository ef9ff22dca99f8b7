use std::path::PathBuf;

use thiserror::Error;

use crate::http::HttpError;

#[derive(Error, Debug)]
pub enum ComponentError {
    // Input errors
    #[error("Invalid package: {message}")]
    InvalidPackage { message: String },

    #[error("Invalid package name '{name}': expected owner/repo")]
    InvalidPackageName { name: String },

    // Manifest errors
    #[error("Failed to read {}: {source}", path.display())]
    ReadManifest {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to fetch manifest for {package}: {source}")]
    ManifestFetch {
        package: String,
        #[source]
        source: HttpError,
    },

    #[error("Failed to parse manifest for {package}: {source}")]
    ManifestParse {
        package: String,
        #[source]
        source: serde_json::Error,
    },

    // Download errors
    #[error("Download failed for {package} ({file}): {reason}")]
    DownloadFailed {
        package: String,
        file: String,
        reason: String,
    },

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // JSON errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // Config errors
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, ComponentError>;
