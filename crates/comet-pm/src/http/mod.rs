//! HTTP access for fetching raw component files.

mod client;
mod transport;

pub use client::{HttpClient, HttpClientConfig, HttpError};
pub use transport::Transport;
