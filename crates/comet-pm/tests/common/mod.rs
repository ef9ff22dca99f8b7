#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use comet_pm::{HttpError, InstallConfig, Installer, Transport};
use tempfile::TempDir;

pub const BASE: &str = "https://raw.test";

/// In-memory transport serving canned bodies and recording every request.
#[derive(Default)]
pub struct MapTransport {
    responses: HashMap<String, String>,
    requests: Mutex<Vec<String>>,
}

impl MapTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `body` for `<BASE>/<path>`
    pub fn with(mut self, path: &str, body: &str) -> Self {
        self.responses.insert(format!("{}/{}", BASE, path), body.to_string());
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    pub fn count(&self, path: &str) -> usize {
        let url = format!("{}/{}", BASE, path);
        self.requests.lock().unwrap().iter().filter(|u| **u == url).count()
    }
}

#[async_trait]
impl Transport for MapTransport {
    async fn get_text(&self, url: &str) -> Result<String, HttpError> {
        self.requests.lock().unwrap().push(url.to_string());
        self.responses.get(url).cloned().ok_or_else(|| HttpError::HttpStatus {
            status: 404,
            url: url.to_string(),
        })
    }
}

pub fn install_config(dir: &TempDir) -> InstallConfig {
    InstallConfig {
        dest_dir: dir.path().to_path_buf(),
        raw_base_url: BASE.to_string(),
        ..Default::default()
    }
}

pub fn installer(transport: &Arc<MapTransport>, config: InstallConfig) -> Installer {
    Installer::new(transport.clone(), config)
}
