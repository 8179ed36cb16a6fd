//! Proof-of-work targets
//!
//! A target is a 256-bit unsigned integer; a block's hash must not exceed
//! it. Headers carry it in the packed "compact" form.

use serde::{Deserialize, Serialize};
use std::fmt;

/// 256-bit target, big-endian so byte-wise ordering is numeric ordering
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Target(pub [u8; 32]);

/// Sign bit of the compact mantissa
const COMPACT_SIGN_BIT: u32 = 0x0080_0000;

/// Mantissa bits of the compact form
const COMPACT_MANTISSA_MASK: u32 = 0x007f_ffff;

impl Target {
    pub const ZERO: Target = Target([0u8; 32]);

    pub const fn from_be_bytes(bytes: [u8; 32]) -> Self {
        Target(bytes)
    }

    pub fn to_be_bytes(&self) -> [u8; 32] {
        self.0
    }

    /// Parse a 64-digit big-endian hex number
    pub fn from_hex(hex: &str) -> Result<Self, hex::FromHexError> {
        let mut bytes = [0u8; 32];
        hex::decode_to_slice(hex, &mut bytes)?;
        Ok(Target(bytes))
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Decode a compact target
    ///
    /// Returns `None` for negative encodings and for values that do not
    /// fit in 256 bits.
    pub fn from_compact(compact: u32) -> Option<Self> {
        let size = (compact >> 24) as usize;
        let mut word = compact & COMPACT_MANTISSA_MASK;
        let mut target = [0u8; 32];

        if word == 0 {
            return Some(Target::ZERO);
        }
        if compact & COMPACT_SIGN_BIT != 0 {
            return None;
        }

        if size <= 3 {
            word >>= 8 * (3 - size);
            target[29..32].copy_from_slice(&word.to_be_bytes()[1..4]);
            return Some(Target(target));
        }

        // Mantissa bytes, most significant first, land at 32 - size.
        let mantissa = word.to_be_bytes();
        for (k, &byte) in mantissa[1..4].iter().enumerate() {
            match (32 + k).checked_sub(size) {
                Some(idx) if idx < 32 => target[idx] = byte,
                _ if byte != 0 => return None,
                _ => {}
            }
        }
        Some(Target(target))
    }

    /// Encode as compact, truncating to the three most significant bytes
    pub fn to_compact(&self) -> u32 {
        let first_nonzero = match self.0.iter().position(|&b| b != 0) {
            Some(i) => i,
            None => return 0,
        };

        let mut size = (32 - first_nonzero) as u32;
        let mut mantissa: u32 = 0;
        for k in 0..3 {
            let byte = self.0.get(first_nonzero + k).copied().unwrap_or(0);
            mantissa = (mantissa << 8) | byte as u32;
        }

        // Keep the sign bit clear by moving one byte into the exponent
        if mantissa & COMPACT_SIGN_BIT != 0 {
            mantissa >>= 8;
            size += 1;
        }

        (size << 24) | mantissa
    }
}

impl fmt::Debug for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Target({})", self.to_hex())
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}
