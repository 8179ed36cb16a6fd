//! Seed Node Configuration
//!
//! Hardcoded bootstrap sources for initial peer discovery: DNS seed hosts,
//! signed HTTP peer lists, and a last-resort set of packed IPv4 addresses.
//! Resolving and contacting them is the P2P layer's job.

use k256::elliptic_curve::sec1::ToEncodedPoint;
use k256::PublicKey;
use std::net::{Ipv4Addr, SocketAddrV4};
use tracing::debug;

/// An HTTP seed as written in a static table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpSeedSpec {
    /// SEC1-encoded secp256k1 key, hex
    pub pubkey: &'static str,
    pub uri: &'static str,
}

/// A trusted HTTP peer-list provider
///
/// Responses from `uri` are only accepted when signed by `auth_key`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpSeed {
    pub auth_key: PublicKey,
    pub uri: &'static str,
}

impl HttpSeed {
    /// Parse the authentication key of a table entry
    ///
    /// Returns `None` when the key is not hex or not a point on the curve.
    pub fn parse(spec: &HttpSeedSpec) -> Option<Self> {
        let bytes = hex::decode(spec.pubkey).ok()?;
        let auth_key = PublicKey::from_sec1_bytes(&bytes).ok()?;
        debug!(uri = spec.uri, "parsed http seed key");
        Some(Self {
            auth_key,
            uri: spec.uri,
        })
    }

    /// Compressed SEC1 encoding of the key, hex
    pub fn auth_key_hex(&self) -> String {
        hex::encode(self.auth_key.to_encoded_point(true).as_bytes())
    }
}

/// Unpack a hardcoded seed address
///
/// Seeds are stored with the first octet in the low byte.
pub fn unpack_ipv4(packed: u32) -> Ipv4Addr {
    Ipv4Addr::from(packed.to_le_bytes())
}

/// Pack an address the way seed tables store it
pub fn pack_ipv4(addr: Ipv4Addr) -> u32 {
    u32::from_le_bytes(addr.octets())
}

/// Hardcoded seeds as connectable socket addresses
pub fn addr_seed_addresses(seeds: &[u32], port: u16) -> Vec<SocketAddrV4> {
    seeds
        .iter()
        .map(|&packed| SocketAddrV4::new(unpack_ipv4(packed), port))
        .collect()
}

/// DNS seed hosts paired with the default port, ready for resolution
pub fn dns_seed_targets(seeds: &[&str], port: u16) -> Vec<String> {
    seeds.iter().map(|host| format!("{host}:{port}")).collect()
}
