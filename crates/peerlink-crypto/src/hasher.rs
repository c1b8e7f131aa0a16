use crate::error::{HasherError, HasherResult};
use crate::multihash::Multihash;

/// BLAKE3 content hasher producing [`Multihash`] digests.
///
/// Each hasher may carry a domain tag that is prepended to every hash
/// computation. Identifier derivation uses the untagged [`ContentHasher::DOCUMENT`]
/// hasher so the digest covers exactly the document bytes.
pub struct ContentHasher {
    domain: Option<&'static str>,
}

impl ContentHasher {
    /// Hasher for identity documents (no domain tag).
    pub const DOCUMENT: Self = Self { domain: None };
    /// Hasher for protocol thread identifiers.
    pub const THREAD: Self = Self {
        domain: Some("peerlink-thread-v1"),
    };

    /// Hash raw bytes.
    ///
    /// Fails with [`HasherError::EmptyInput`] on zero-length input.
    pub fn hash(&self, data: &[u8]) -> HasherResult<Multihash> {
        if data.is_empty() {
            return Err(HasherError::EmptyInput);
        }
        let mut hasher = blake3::Hasher::new();
        if let Some(domain) = self.domain {
            hasher.update(domain.as_bytes());
            hasher.update(b":");
        }
        hasher.update(data);
        Ok(Multihash::from_digest(*hasher.finalize().as_bytes()))
    }

    /// Verify that data produces the expected digest.
    pub fn verify(&self, data: &[u8], expected: &Multihash) -> bool {
        matches!(self.hash(data), Ok(actual) if actual == *expected)
    }
}
