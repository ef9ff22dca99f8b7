//! Component downloading.
//!
//! This module fetches remote manifests and package files over HTTP and
//! writes them into the local install tree.

mod fetcher;

pub use fetcher::{ensure_dir, write_file, FileFetcher};
