//! Deterministic, site-keyed password hashing
//!
//! A site identifier (URL or host name) is reduced to its registrable label,
//! which salts a PBKDF2 derivation of the secret. The same secret therefore
//! yields the same password for `google.com`, `accounts.google.com` and
//! `https://www.google.com.au/`, and different passwords across sites.
//!
//! ```
//! assert_eq!(
//!     comet_hash::hash("google.com", "P@$$W0RD").as_deref(),
//!     Some("@62W9HxAiw9hvSssRTEUPYg==")
//! );
//! assert_eq!(comet_hash::hash("", "P@$$W0RD"), None);
//! ```

mod domain;
mod hasher;

pub use domain::normalize_domain;
pub use hasher::{HashError, PasswordHasher, ITERATIONS, KEY_SIZE, PREFIX};

/// Hash `secret` for `site` with the default parameters.
///
/// Returns `None` when the site normalizes to nothing or the secret is empty.
pub fn hash(site: &str, secret: &str) -> Option<String> {
    PasswordHasher::default().hash(site, secret)
}
