//! Client fingerprint hashing.
//!
//! Click events never store a raw client address. The redirect path derives
//! an opaque fingerprint by running the best-available network identifier
//! through keyed HMAC-SHA-256 and keeping only the hex digest. This is a
//! privacy control, not a security boundary; the transform is one-way.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// One-way fingerprint derivation keyed with a per-deployment salt.
#[derive(Clone)]
pub struct Fingerprinter {
    salt: Vec<u8>,
}

impl Fingerprinter {
    pub fn new(salt: impl Into<Vec<u8>>) -> Self {
        Self { salt: salt.into() }
    }

    /// Creates a fingerprinter with a random salt.
    ///
    /// Fingerprints produced this way are stable only for the lifetime of the
    /// process.
    pub fn with_random_salt() -> Self {
        let mut salt = [0u8; 32];
        getrandom::fill(&mut salt).expect("Failed to generate random salt");
        Self::new(salt.to_vec())
    }

    /// Hashes a client network identifier into a 64-character hex digest.
    pub fn hash(&self, client_id: &str) -> String {
        let mut mac =
            HmacSha256::new_from_slice(&self.salt).expect("HMAC accepts any key length");
        mac.update(client_id.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }
}
