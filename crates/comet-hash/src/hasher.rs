use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use sha1::Sha1;
use thiserror::Error;

use crate::domain::normalize_domain;

/// PBKDF2 iteration count
pub const ITERATIONS: u32 = 10_000;

/// Derived key length in bytes
pub const KEY_SIZE: usize = 16;

/// Symbol every generated password starts with
pub const PREFIX: char = '@';

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HashError {
    #[error("iteration count must be at least 1")]
    InvalidIterations,

    #[error("key size must be at least 1 byte")]
    InvalidKeySize,
}

/// Derives site passwords from a secret.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordHasher {
    iterations: u32,
    key_size: usize,
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self {
            iterations: ITERATIONS,
            key_size: KEY_SIZE,
        }
    }
}

impl PasswordHasher {
    /// Create a hasher with explicit derivation parameters.
    pub fn new(iterations: u32, key_size: usize) -> Result<Self, HashError> {
        if iterations == 0 {
            return Err(HashError::InvalidIterations);
        }
        if key_size == 0 {
            return Err(HashError::InvalidKeySize);
        }
        Ok(Self { iterations, key_size })
    }

    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    pub fn key_size(&self) -> usize {
        self.key_size
    }

    /// Length of every password this hasher produces.
    pub fn output_len(&self) -> usize {
        PREFIX.len_utf8() + self.key_size.div_ceil(3) * 4
    }

    /// Hash `secret` for the site identified by `site` (URL or host).
    pub fn hash(&self, site: &str, secret: &str) -> Option<String> {
        self.hash_domain(&normalize_domain(site), secret)
    }

    /// Hash `secret` using an already normalized `domain` as salt.
    ///
    /// The derived key is base64 encoded (padded), prefixed with [`PREFIX`],
    /// and the first lowercase ASCII letter is uppercased. Returns `None` if
    /// either input is empty.
    pub fn hash_domain(&self, domain: &str, secret: &str) -> Option<String> {
        if domain.is_empty() || secret.is_empty() {
            return None;
        }

        let mut key = vec![0u8; self.key_size];
        pbkdf2::pbkdf2_hmac::<Sha1>(secret.as_bytes(), domain.as_bytes(), self.iterations, &mut key);

        let mut password = String::with_capacity(self.output_len());
        password.push(PREFIX);
        STANDARD.encode_string(&key, &mut password);

        Some(uppercase_first_lowercase(password))
    }
}

/// Uppercase the first lowercase ASCII letter; later ones are left alone.
fn uppercase_first_lowercase(mut s: String) -> String {
    if let Some(idx) = s.find(|c: char| c.is_ascii_lowercase()) {
        s[idx..idx + 1].make_ascii_uppercase();
    }
    s
}
