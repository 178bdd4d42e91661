//! Content fingerprinting.
//!
//! A document's fingerprint is the SHA-256 digest of its decoded UTF-8 bytes,
//! hex-encoded in lowercase. The digest is computed over the exact content
//! before any other mutation of the entity, so identical content always maps
//! to the identical 64-character fingerprint.

use sha2::{Digest, Sha256};

/// Hash document content with SHA-256 and return a lowercase hex digest.
///
/// Pure and deterministic. Empty input is valid and hashes to the standard
/// digest of the empty byte sequence.
///
/// # Examples
///
/// ```rust
/// use lexico::content_hash;
///
/// let hash = content_hash("hola mundo");
/// assert_eq!(hash.len(), 64);
/// assert_eq!(hash, content_hash("hola mundo"));
/// ```
pub fn content_hash(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    hex::encode(hasher.finalize())
}
