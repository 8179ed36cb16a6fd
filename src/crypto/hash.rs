//! SHA-256 hashing
//!
//! Block hashes and Base58Check checksums are double SHA-256, as on Bitcoin.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;

/// 32-byte hash output
///
/// Bytes are kept in the order they are written in hex, so a hash parsed
/// from a constant prints back as the same string.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Hash(pub [u8; 32]);

impl Hash {
    /// Create a zero hash (used for genesis previous hash)
    pub const fn zero() -> Self {
        Hash([0u8; 32])
    }

    /// Create hash from bytes
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Hash(bytes)
    }

    /// Create hash from hex string
    pub fn from_hex(hex: &str) -> Result<Self, hex::FromHexError> {
        let mut arr = [0u8; 32];
        hex::decode_to_slice(hex, &mut arr)?;
        Ok(Hash(arr))
    }

    /// Convert to hex string
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Get as bytes
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Same hash with the byte order flipped (wire order <-> display order)
    pub fn reversed(&self) -> Self {
        let mut bytes = self.0;
        bytes.reverse();
        Hash(bytes)
    }
}

impl FromStr for Hash {
    type Err = hex::FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Hash::from_hex(s)
    }
}

impl fmt::Debug for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hash({})", self.to_hex())
    }
}

impl fmt::Display for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl Default for Hash {
    fn default() -> Self {
        Self::zero()
    }
}

/// Single SHA-256 of arbitrary bytes
pub fn sha256(data: &[u8]) -> Hash {
    Hash(Sha256::digest(data).into())
}

/// SHA-256 applied twice
pub fn double_sha256(data: &[u8]) -> Hash {
    let first = Sha256::digest(data);
    Hash(Sha256::digest(first).into())
}

/// Four-byte Base58Check checksum
pub fn checksum(data: &[u8]) -> [u8; 4] {
    let digest = double_sha256(data);
    let mut out = [0u8; 4];
    out.copy_from_slice(&digest.0[..4]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_double_sha256_known_vector() {
        // sha256d("hello")
        let hash = double_sha256(b"hello");
        assert_eq!(
            hash.to_hex(),
            "9595c9df90075148eb06860365df33584b75bff782a510c6cd4883a419833d50"
        );
    }

    #[test]
    fn test_zero_hash() {
        let zero = Hash::zero();
        assert_eq!(zero.0, [0u8; 32]);
    }

    #[test]
    fn test_hex_preserves_written_order() {
        let text = "00000006941e463cf1cb6c74024228810dc81545c854ba5153b117d3bf602204";
        let hash: Hash = text.parse().unwrap();
        assert_eq!(hash.0[0], 0x00);
        assert_eq!(hash.0[31], 0x04);
        assert_eq!(hash.to_string(), text);
    }

    #[test]
    fn test_from_hex_rejects_wrong_length() {
        assert!(Hash::from_hex("abcd").is_err());
        assert!(Hash::from_hex(&"0".repeat(66)).is_err());
        assert!(Hash::from_hex(&"zz".repeat(32)).is_err());
    }

    #[test]
    fn test_reversed_is_involution() {
        let hash = sha256(b"gyl");
        assert_ne!(hash, hash.reversed());
        assert_eq!(hash, hash.reversed().reversed());
    }

    #[test]
    fn test_checksum_is_digest_prefix() {
        let digest = double_sha256(b"payload");
        assert_eq!(checksum(b"payload"), digest.0[..4]);
    }
}
