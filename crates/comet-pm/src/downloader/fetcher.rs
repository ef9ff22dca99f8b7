//! Fetches component manifests and files over HTTP and writes them to disk.

use std::path::{Component, Path};
use std::sync::Arc;

use futures_util::future::join_all;

use crate::http::Transport;
use crate::package::{Manifest, Package, MANIFEST_FILE};
use crate::util::settle;
use crate::{ComponentError, Result};

/// Fetches raw repository contents for packages
pub struct FileFetcher {
    transport: Arc<dyn Transport>,
    raw_base_url: String,
}

impl FileFetcher {
    /// Create a new fetcher reading from `raw_base_url`
    pub fn new(transport: Arc<dyn Transport>, raw_base_url: impl Into<String>) -> Self {
        Self {
            transport,
            raw_base_url: raw_base_url.into(),
        }
    }

    /// URL of a file of `package` at the package's version
    pub fn url_for(&self, package: &Package, file: &str) -> String {
        package.raw_url(&self.raw_base_url, file)
    }

    /// Fetch and parse the remote manifest of a package
    pub async fn fetch_manifest(&self, package: &Package) -> Result<Manifest> {
        let url = self.url_for(package, MANIFEST_FILE);
        log::debug!("Fetching manifest for {} from {}", package, url);

        let body = self
            .transport
            .get_text(&url)
            .await
            .map_err(|source| ComponentError::ManifestFetch {
                package: package.to_string(),
                source,
            })?;

        Manifest::from_json(&body).map_err(|source| ComponentError::ManifestParse {
            package: package.to_string(),
            source,
        })
    }

    /// Fetch every file of a package concurrently and write each one below the
    /// package's install directory.
    ///
    /// `on_file` is called with the file path and URL before each fetch starts;
    /// paths that would leave the install directory fail without a fetch.
    /// All fetches run to completion; if any failed, the first failure in
    /// listing order is returned. Returns the number of files written.
    pub async fn fetch_files<F>(&self, package: &Package, files: &[String], on_file: F) -> Result<usize>
    where
        F: Fn(&str, &str),
    {
        let fetches: Vec<_> = files
            .iter()
            .map(|file| {
                let url = self.url_for(package, file);
                if is_relative_path(file) {
                    on_file(file, &url);
                }
                self.fetch_file(package, file, url)
            })
            .collect();

        let written = settle(join_all(fetches).await)?;
        Ok(written.len())
    }

    async fn fetch_file(&self, package: &Package, file: &str, url: String) -> Result<()> {
        if !is_relative_path(file) {
            return Err(ComponentError::DownloadFailed {
                package: package.to_string(),
                file: file.to_string(),
                reason: "path must be relative and stay inside the package".to_string(),
            });
        }

        let body = self
            .transport
            .get_text(&url)
            .await
            .map_err(|e| {
                log::debug!("{}: fetching {} failed: {}", package, file, e);
                ComponentError::DownloadFailed {
                    package: package.to_string(),
                    file: file.to_string(),
                    reason: e.to_string(),
                }
            })?;

        let dest = package.file_path(file);
        write_file(&dest, &body).await?;
        log::trace!("Wrote {} ({} bytes)", dest.display(), body.len());

        Ok(())
    }
}

/// Create a directory and its parents; an existing directory is fine.
pub async fn ensure_dir(path: &Path) -> Result<()> {
    tokio::fs::create_dir_all(path)
        .await
        .map_err(|source| ComponentError::Write {
            path: path.to_path_buf(),
            source,
        })
}

/// Write `contents` to `path`, creating parent directories first.
pub async fn write_file(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent).await?;
    }

    tokio::fs::write(path, contents)
        .await
        .map_err(|source| ComponentError::Write {
            path: path.to_path_buf(),
            source,
        })
}

fn is_relative_path(file: &str) -> bool {
    let path = Path::new(file);
    !file.is_empty()
        && path
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::HttpError;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use tempfile::TempDir;

    const BASE: &str = "https://raw.test";

    #[derive(Default)]
    struct MapTransport {
        responses: HashMap<String, String>,
        requests: Mutex<Vec<String>>,
    }

    impl MapTransport {
        fn with(mut self, url: &str, body: &str) -> Self {
            self.responses.insert(url.to_string(), body.to_string());
            self
        }
    }

    #[async_trait]
    impl Transport for MapTransport {
        async fn get_text(&self, url: &str) -> std::result::Result<String, HttpError> {
            self.requests.lock().unwrap().push(url.to_string());
            self.responses.get(url).cloned().ok_or_else(|| HttpError::HttpStatus {
                status: 404,
                url: url.to_string(),
            })
        }
    }

    fn package(dir: &Path) -> Package {
        Package::new("component/emitter", "1.0.0", dir, false).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_manifest() {
        let temp = TempDir::new().unwrap();
        let transport = MapTransport::default().with(
            "https://raw.test/component/emitter/1.0.0/component.json",
            r#"{"scripts": ["index.js"]}"#,
        );
        let fetcher = FileFetcher::new(Arc::new(transport), BASE);

        let manifest = fetcher.fetch_manifest(&package(temp.path())).await.unwrap();
        assert_eq!(manifest.scripts, vec!["index.js"]);
    }

    #[tokio::test]
    async fn test_fetch_manifest_not_found() {
        let temp = TempDir::new().unwrap();
        let fetcher = FileFetcher::new(Arc::new(MapTransport::default()), BASE);

        let err = fetcher.fetch_manifest(&package(temp.path())).await.unwrap_err();
        assert!(matches!(
            err,
            ComponentError::ManifestFetch { source: HttpError::HttpStatus { status: 404, .. }, .. }
        ));
    }

    #[tokio::test]
    async fn test_fetch_manifest_invalid_json() {
        let temp = TempDir::new().unwrap();
        let transport = MapTransport::default()
            .with("https://raw.test/component/emitter/1.0.0/component.json", "<html>");
        let fetcher = FileFetcher::new(Arc::new(transport), BASE);

        let err = fetcher.fetch_manifest(&package(temp.path())).await.unwrap_err();
        assert!(matches!(err, ComponentError::ManifestParse { .. }));
    }

    #[tokio::test]
    async fn test_fetch_files_writes_verbatim() {
        let temp = TempDir::new().unwrap();
        let transport = MapTransport::default()
            .with("https://raw.test/component/emitter/1.0.0/index.js", "module.exports = 1;\n")
            .with("https://raw.test/component/emitter/1.0.0/lib/util.js", "exports.x = 2;");
        let fetcher = FileFetcher::new(Arc::new(transport), BASE);
        let pkg = package(temp.path());

        let seen = Mutex::new(Vec::new());
        let files = vec!["index.js".to_string(), "lib/util.js".to_string()];
        let written = fetcher
            .fetch_files(&pkg, &files, |file, _url| seen.lock().unwrap().push(file.to_string()))
            .await
            .unwrap();

        assert_eq!(written, 2);
        assert_eq!(seen.into_inner().unwrap(), vec!["index.js", "lib/util.js"]);
        let index = std::fs::read_to_string(temp.path().join("component-emitter/index.js")).unwrap();
        assert_eq!(index, "module.exports = 1;\n");
        assert!(temp.path().join("component-emitter/lib/util.js").exists());
    }

    #[tokio::test]
    async fn test_one_failure_fails_batch_after_others_settle() {
        let temp = TempDir::new().unwrap();
        let transport = Arc::new(
            MapTransport::default()
                .with("https://raw.test/component/emitter/1.0.0/a.js", "a")
                .with("https://raw.test/component/emitter/1.0.0/c.js", "c"),
        );
        let fetcher = FileFetcher::new(transport.clone(), BASE);
        let pkg = package(temp.path());

        let files = vec!["a.js".to_string(), "missing.js".to_string(), "c.js".to_string()];
        let err = fetcher.fetch_files(&pkg, &files, |_, _| {}).await.unwrap_err();

        assert!(matches!(err, ComponentError::DownloadFailed { ref file, .. } if file == "missing.js"));
        assert_eq!(transport.requests.lock().unwrap().len(), 3);
        assert!(temp.path().join("component-emitter/a.js").exists());
        assert!(temp.path().join("component-emitter/c.js").exists());
    }

    #[tokio::test]
    async fn test_rejects_escaping_paths() {
        let temp = TempDir::new().unwrap();
        let transport = Arc::new(MapTransport::default());
        let fetcher = FileFetcher::new(transport.clone(), BASE);
        let pkg = package(temp.path());

        let seen = Mutex::new(Vec::new());
        let files = vec!["../outside.js".to_string(), "/etc/passwd".to_string()];
        let err = fetcher
            .fetch_files(&pkg, &files, |file, _url| seen.lock().unwrap().push(file.to_string()))
            .await
            .unwrap_err();

        assert!(matches!(err, ComponentError::DownloadFailed { ref file, .. } if file == "../outside.js"));
        assert!(transport.requests.lock().unwrap().is_empty());
        assert!(seen.into_inner().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_ensure_dir_is_idempotent() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("a/b");
        ensure_dir(&dir).await.unwrap();
        ensure_dir(&dir).await.unwrap();
        assert!(dir.is_dir());
    }

    #[test]
    fn test_is_relative_path() {
        assert!(is_relative_path("index.js"));
        assert!(is_relative_path("lib/index.js"));
        assert!(is_relative_path("./index.js"));
        assert!(!is_relative_path("../index.js"));
        assert!(!is_relative_path("/etc/passwd"));
        assert!(!is_relative_path(""));
    }
}
