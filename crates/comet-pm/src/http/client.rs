//! HTTP client for component downloads.
//!
//! This module wraps `reqwest` with the settings the installer cares about:
//! - Custom User-Agent header
//! - Connection and request timeouts
//! - Proxy and custom CA certificate support
//!
//! Requests are issued exactly once. A failed request is reported to the
//! caller as-is.
//!
//! # Examples
//!
//! ```no_run
//! use comet_pm::http::{HttpClient, HttpClientConfig, Transport};
//! use std::time::Duration;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = HttpClientConfig::new()
//!     .with_timeout(Duration::from_secs(60))
//!     .with_proxy("http://proxy.example.com:8080".to_string());
//!
//! let client = HttpClient::with_config(config)?;
//! let body = client
//!     .get_text("https://raw.githubusercontent.com/component/emitter/master/component.json")
//!     .await?;
//! println!("{}", body);
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use reqwest::{Client, Response};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

use super::Transport;

const DEFAULT_USER_AGENT: &str = concat!("comet/", env!("CARGO_PKG_VERSION"));
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("HTTP {status}: {url}")]
    HttpStatus { status: u16, url: String },
}

pub struct HttpClient {
    client: Client,
    user_agent: String,
}

impl HttpClient {
    pub fn with_config(config: HttpClientConfig) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .gzip(true)
            .user_agent(&config.user_agent);

        if let Some(proxy_url) = &config.proxy {
            let proxy = reqwest::Proxy::all(proxy_url)?;
            builder = builder.proxy(proxy);
        }

        if let Some(cafile) = &config.cafile {
            match std::fs::read(cafile) {
                Ok(cert_bytes) => {
                    let cert = reqwest::Certificate::from_pem(&cert_bytes)?;
                    builder = builder.add_root_certificate(cert);
                }
                Err(e) => {
                    log::warn!("Ignoring CA file {}: {}", cafile.display(), e);
                }
            }
        }

        let client = builder.build()?;

        Ok(Self {
            client,
            user_agent: config.user_agent,
        })
    }

    /// Perform a GET request, failing on non-success statuses
    pub async fn get(&self, url: &str) -> Result<Response, HttpError> {
        log::trace!("GET {}", url);
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(HttpError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response)
    }

    /// Get the configured user agent
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }
}

#[async_trait]
impl Transport for HttpClient {
    async fn get_text(&self, url: &str) -> Result<String, HttpError> {
        let response = self.get(url).await?;
        let text = response.text().await?;
        log::trace!("GET {} ({} bytes)", url, text.len());
        Ok(text)
    }
}

#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    pub timeout: Duration,
    pub connect_timeout: Duration,
    pub proxy: Option<String>,
    pub cafile: Option<PathBuf>,
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            proxy: None,
            cafile: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl HttpClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_connect_timeout(mut self, connect_timeout: Duration) -> Self {
        self.connect_timeout = connect_timeout;
        self
    }

    pub fn with_proxy(mut self, proxy: String) -> Self {
        self.proxy = Some(proxy);
        self
    }

    pub fn with_cafile(mut self, cafile: PathBuf) -> Self {
        self.cafile = Some(cafile);
        self
    }

    pub fn with_user_agent(mut self, user_agent: String) -> Self {
        self.user_agent = user_agent;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = HttpClientConfig::new()
            .with_timeout(Duration::from_secs(60))
            .with_connect_timeout(Duration::from_secs(5))
            .with_user_agent("Test/1.0".to_string());

        assert_eq!(config.timeout, Duration::from_secs(60));
        assert_eq!(config.connect_timeout, Duration::from_secs(5));
        assert_eq!(config.user_agent, "Test/1.0");
        assert!(config.proxy.is_none());
    }

    #[test]
    fn test_default_user_agent() {
        let config = HttpClientConfig::default();
        assert!(config.user_agent.starts_with("comet/"));
    }

    #[test]
    fn test_client_keeps_user_agent() {
        let client = HttpClient::with_config(
            HttpClientConfig::new().with_user_agent("comet-test".to_string()),
        )
        .unwrap();
        assert_eq!(client.user_agent(), "comet-test");
    }

    #[test]
    fn test_missing_cafile_is_ignored() {
        let config = HttpClientConfig::new().with_cafile(PathBuf::from("/nonexistent/ca.pem"));
        assert!(HttpClient::with_config(config).is_ok());
    }

    #[tokio::test]
    #[ignore] // Requires network access
    async fn test_get_text() {
        let client = HttpClient::with_config(HttpClientConfig::default()).unwrap();
        let body = client
            .get_text("https://raw.githubusercontent.com/component/emitter/master/component.json")
            .await
            .unwrap();
        assert!(body.contains("emitter"));
    }

    #[tokio::test]
    #[ignore] // Requires network access
    async fn test_get_not_found() {
        let client = HttpClient::with_config(HttpClientConfig::default()).unwrap();
        let result = client
            .get_text("https://raw.githubusercontent.com/component/emitter/master/does-not-exist.json")
            .await;
        assert!(matches!(result, Err(HttpError::HttpStatus { status: 404, .. })));
    }
}
