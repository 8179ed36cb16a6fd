//! Block structure for the GYL chain
//!
//! Only the header matters to network parameters; transactions belong to
//! the validator and are not modelled here.

use serde::{Deserialize, Serialize};
use crate::crypto::{double_sha256, Hash};

/// Serialized header length in bytes
pub const HEADER_SIZE: usize = 80;

/// Block header containing all metadata
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BlockHeader {
    /// Protocol version
    pub version: i32,
    /// Hash of the previous block
    pub prev_hash: Hash,
    /// Merkle root of all transactions
    pub merkle_root: Hash,
    /// Block timestamp (seconds since Unix epoch)
    pub time: u32,
    /// Difficulty target (compact representation)
    pub difficulty_target: u32,
    /// Nonce used for PoW
    pub nonce: u32,
}

impl BlockHeader {
    /// Create a new block header
    pub fn new(
        version: i32,
        prev_hash: Hash,
        merkle_root: Hash,
        time: u32,
        difficulty_target: u32,
        nonce: u32,
    ) -> Self {
        Self {
            version,
            prev_hash,
            merkle_root,
            time,
            difficulty_target,
            nonce,
        }
    }

    /// Serialize the header for hashing
    ///
    /// Hashes are written in wire order, the reverse of how they print.
    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut bytes = [0u8; HEADER_SIZE];
        bytes[0..4].copy_from_slice(&self.version.to_le_bytes());
        bytes[4..36].copy_from_slice(&self.prev_hash.reversed().0);
        bytes[36..68].copy_from_slice(&self.merkle_root.reversed().0);
        bytes[68..72].copy_from_slice(&self.time.to_le_bytes());
        bytes[72..76].copy_from_slice(&self.difficulty_target.to_le_bytes());
        bytes[76..80].copy_from_slice(&self.nonce.to_le_bytes());
        bytes
    }

    /// Calculate the hash of this header
    pub fn hash(&self) -> Hash {
        double_sha256(&self.to_bytes()).reversed()
    }
}

/// A block as the parameter profile sees it: a header, plus an optional
/// hash pinned from outside.
///
/// Some chains ship a genesis whose header cannot be rebuilt from the
/// fields the profile knows. For those the trusted hash is set directly
/// and takes precedence over derivation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Block {
    /// Block header
    pub header: BlockHeader,
    declared_hash: Option<Hash>,
}

impl Block {
    /// Create a new block
    pub fn new(header: BlockHeader) -> Self {
        Self {
            header,
            declared_hash: None,
        }
    }

    /// Pin the block hash instead of deriving it from the header
    pub fn set_hash(&mut self, hash: Hash) {
        self.declared_hash = Some(hash);
    }

    /// Whether the hash was pinned with [`Block::set_hash`]
    pub fn has_declared_hash(&self) -> bool {
        self.declared_hash.is_some()
    }

    /// Get the block hash
    pub fn hash(&self) -> Hash {
        self.declared_hash.unwrap_or_else(|| self.header.hash())
    }

    /// Hash derived from the header fields, ignoring any pinned value
    pub fn computed_hash(&self) -> Hash {
        self.header.hash()
    }

    /// Get the block hash as hex
    pub fn hash_as_string(&self) -> String {
        self.hash().to_hex()
    }

    pub fn prev_hash(&self) -> &Hash {
        &self.header.prev_hash
    }

    /// Check if this is the genesis block
    pub fn is_genesis(&self) -> bool {
        self.header.prev_hash == Hash::zero()
    }
}
