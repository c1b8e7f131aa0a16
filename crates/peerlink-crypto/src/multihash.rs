use std::fmt;
use std::str::FromStr;

use crate::error::{HasherError, HasherResult};

/// Multicodec code for BLAKE3 with a 256-bit output.
pub const BLAKE3_CODE: u8 = 0x1e;

/// Digest length in bytes.
pub const DIGEST_LEN: usize = 32;

/// Self-describing content hash: `<code><length><digest>`.
///
/// Both the code and the length fit in a single unsigned-varint byte, so the
/// binary form is always `2 + DIGEST_LEN` bytes. The text form is lowercase
/// hex of the binary form.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Multihash {
    digest: [u8; DIGEST_LEN],
}

impl Multihash {
    /// Wrap a raw BLAKE3 digest.
    pub fn from_digest(digest: [u8; DIGEST_LEN]) -> Self {
        Self { digest }
    }

    /// The algorithm code.
    pub fn code(&self) -> u8 {
        BLAKE3_CODE
    }

    /// The raw digest bytes (without code and length prefix).
    pub fn digest(&self) -> &[u8; DIGEST_LEN] {
        &self.digest
    }

    /// Binary multihash encoding.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(2 + DIGEST_LEN);
        out.push(BLAKE3_CODE);
        out.push(DIGEST_LEN as u8);
        out.extend_from_slice(&self.digest);
        out
    }

    /// Decode the binary multihash encoding.
    pub fn from_bytes(bytes: &[u8]) -> HasherResult<Self> {
        let (header, digest) = match bytes {
            [code, len, rest @ ..] => ((*code, *len as usize), rest),
            _ => return Err(HasherError::Malformed("missing code/length header".into())),
        };
        if header.0 != BLAKE3_CODE {
            return Err(HasherError::Malformed(format!(
                "unsupported hash code 0x{:02x}",
                header.0
            )));
        }
        if header.1 != DIGEST_LEN || digest.len() != DIGEST_LEN {
            return Err(HasherError::Malformed(format!(
                "expected {DIGEST_LEN}-byte digest, header says {} and {} bytes follow",
                header.1,
                digest.len()
            )));
        }
        let mut arr = [0u8; DIGEST_LEN];
        arr.copy_from_slice(digest);
        Ok(Self { digest: arr })
    }

    /// Hex-encoded string representation.
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    /// Parse from a hex string.
    pub fn from_hex(s: &str) -> HasherResult<Self> {
        let bytes = hex::decode(s).map_err(|e| HasherError::InvalidHex(e.to_string()))?;
        Self::from_bytes(&bytes)
    }
}

impl fmt::Debug for Multihash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Multihash({})", self.to_hex())
    }
}

impl fmt::Display for Multihash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Multihash {
    type Err = HasherError;

    fn from_str(s: &str) -> HasherResult<Self> {
        Self::from_hex(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binary_form_has_header() {
        let mh = Multihash::from_digest([7u8; DIGEST_LEN]);
        let bytes = mh.to_bytes();
        assert_eq!(bytes.len(), 2 + DIGEST_LEN);
        assert_eq!(bytes[0], BLAKE3_CODE);
        assert_eq!(bytes[1], DIGEST_LEN as u8);
        assert_eq!(&bytes[2..], &[7u8; DIGEST_LEN]);
    }

    #[test]
    fn hex_starts_with_header() {
        let mh = Multihash::from_digest([0u8; DIGEST_LEN]);
        assert!(mh.to_hex().starts_with("1e20"));
        assert_eq!(mh.to_hex().len(), 2 * (2 + DIGEST_LEN));
    }

    #[test]
    fn parse_hex() {
        let mh = Multihash::from_digest([42u8; DIGEST_LEN]);
        let parsed: Multihash = mh.to_hex().parse().unwrap();
        assert_eq!(parsed, mh);
    }

    #[test]
    fn reject_wrong_code() {
        let mut bytes = Multihash::from_digest([1u8; DIGEST_LEN]).to_bytes();
        bytes[0] = 0x12;
        assert!(matches!(
            Multihash::from_bytes(&bytes),
            Err(HasherError::Malformed(_))
        ));
    }

    #[test]
    fn reject_truncated_digest() {
        let bytes = Multihash::from_digest([1u8; DIGEST_LEN]).to_bytes();
        assert!(Multihash::from_bytes(&bytes[..10]).is_err());
        assert!(Multihash::from_bytes(&[]).is_err());
    }

    #[test]
    fn reject_non_hex() {
        assert!(matches!(
            Multihash::from_hex("*&$*|||"),
            Err(HasherError::InvalidHex(_))
        ));
    }
}
