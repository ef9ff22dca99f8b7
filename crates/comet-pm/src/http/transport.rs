use async_trait::async_trait;

use super::HttpError;

/// Source of remote text resources.
///
/// The installer only ever needs "GET this URL as text", so everything
/// network-related sits behind this trait. [`super::HttpClient`] is the real
/// implementation; tests plug in an in-memory map.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Fetch `url` and return its body as text.
    ///
    /// Non-success statuses are errors.
    async fn get_text(&self, url: &str) -> Result<String, HttpError>;
}
