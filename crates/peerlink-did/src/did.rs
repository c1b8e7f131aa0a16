//! Parsed `did:peer` identifiers.
//!
//! Grammar: `did:peer:11-<suffix>` where
//! - the method is exactly `peer`
//! - the method version / encoding tag is exactly `11`
//! - the suffix is non-empty, even-length, and hex only

use std::fmt;
use std::str::FromStr;

use peerlink_crypto::Multihash;

use crate::error::{DidError, DidResult};

/// Method name.
pub const METHOD: &str = "peer";

/// Method version and digest encoding tag.
pub const METHOD_VERSION: &str = "11";

/// Everything before the digest.
pub const PREFIX: &str = "did:peer:11-";

/// A syntactically valid peer DID.
///
/// Parsing only checks the grammar. Whether the digest belongs to a given
/// document is decided by [`validate_identifier`](crate::validate_identifier).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PeerDid {
    suffix: String,
}

impl PeerDid {
    /// Build the identifier embedding `digest`.
    pub fn from_multihash(digest: &Multihash) -> Self {
        Self {
            suffix: digest.to_hex(),
        }
    }

    /// The text-encoded digest after the `-` separator.
    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// Decode the embedded digest.
    pub fn multihash(&self) -> DidResult<Multihash> {
        Ok(Multihash::from_hex(&self.suffix)?)
    }

    /// Returns `true` if the embedded digest equals `digest`.
    pub fn matches(&self, digest: &Multihash) -> bool {
        self.suffix.eq_ignore_ascii_case(&digest.to_hex())
    }
}

impl fmt::Display for PeerDid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{PREFIX}{}", self.suffix)
    }
}

impl FromStr for PeerDid {
    type Err = DidError;

    fn from_str(s: &str) -> DidResult<Self> {
        let rest = s
            .strip_prefix("did:")
            .ok_or_else(|| DidError::grammar(s, "must start with 'did:'"))?;
        let (method, rest) = rest
            .split_once(':')
            .ok_or_else(|| DidError::grammar(s, "missing method-specific identifier"))?;
        if method != METHOD {
            return Err(DidError::grammar(s, format!("method must be '{METHOD}'")));
        }
        let (version, suffix) = rest
            .split_once('-')
            .ok_or_else(|| DidError::grammar(s, "missing '-' after method version"))?;
        if version != METHOD_VERSION {
            return Err(DidError::grammar(
                s,
                format!("method version must be '{METHOD_VERSION}'"),
            ));
        }
        if suffix.is_empty() {
            return Err(DidError::grammar(s, "digest must not be empty"));
        }
        if let Some(ch) = suffix.chars().find(|c| !c.is_ascii_hexdigit()) {
            return Err(DidError::grammar(
                s,
                format!("digest contains non-hex character {ch:?}"),
            ));
        }
        if suffix.len() % 2 != 0 {
            return Err(DidError::grammar(s, "digest must have an even number of hex digits"));
        }
        Ok(Self {
            suffix: suffix.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use peerlink_crypto::ContentHasher;

    fn assert_grammar_error(did: &str) {
        match did.parse::<PeerDid>() {
            Err(DidError::Grammar { did: reported, .. }) => assert_eq!(reported, did),
            other => panic!("{did:?}: expected grammar error, got {other:?}"),
        }
    }

    #[test]
    fn parse_valid_identifier() {
        let did: PeerDid = "did:peer:11-1e20abcdef".parse().unwrap();
        assert_eq!(did.suffix(), "1e20abcdef");
        assert_eq!(did.to_string(), "did:peer:11-1e20abcdef");
    }

    #[test]
    fn reject_wrong_method() {
        assert_grammar_error("did:sidetree:22");
        assert_grammar_error("did:sidetree:11-abcd");
    }

    #[test]
    fn reject_wrong_version() {
        assert_grammar_error("did:peer:22");
        assert_grammar_error("did:peer:22-abcd");
        assert_grammar_error("did:peer:1-abcd");
    }

    #[test]
    fn reject_bad_suffix() {
        assert_grammar_error("did:peer:1-*&$*|||");
        assert_grammar_error("did:peer:11-*&$*|||");
        assert_grammar_error("did:peer:11-");
        assert_grammar_error("did:peer:11-abc");
        assert_grammar_error("did:peer:11-ab cd");
        assert_grammar_error("did:peer:11-abcd\n");
    }

    #[test]
    fn reject_missing_scheme() {
        assert_grammar_error("");
        assert_grammar_error("peer:11-abcd");
        assert_grammar_error("did:peer");
    }

    #[test]
    fn multihash_roundtrip() {
        let digest = ContentHasher::DOCUMENT.hash(b"genesis").unwrap();
        let did = PeerDid::from_multihash(&digest);
        assert!(did.to_string().starts_with(PREFIX));
        assert!(did.matches(&digest));
        assert_eq!(did.multihash().unwrap(), digest);

        let reparsed: PeerDid = did.to_string().parse().unwrap();
        assert_eq!(reparsed, did);
    }

    #[test]
    fn matches_is_case_insensitive() {
        let digest = ContentHasher::DOCUMENT.hash(b"genesis").unwrap();
        let upper: PeerDid = format!("{PREFIX}{}", digest.to_hex().to_uppercase())
            .parse()
            .unwrap();
        assert!(upper.matches(&digest));
    }
}
