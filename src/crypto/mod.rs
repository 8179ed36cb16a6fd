//! Cryptography module - SHA-256 hashing

mod hash;

pub use hash::*;
