//! Genyuanlian (GYL) Network Parameters
//!
//! The immutable identity of the GYL main network: genesis block,
//! checkpoints, peer seeds, address and key version bytes, and the
//! proof-of-work constants validators retarget against.
//!
//! A profile verifies its own genesis hash when it is built and is never
//! mutated afterwards. Build one with [`params::NetworkParameters::mainnet`]
//! and share it, or use the lazily built [`params::mainnet::get`].

pub mod address;
pub mod config;
pub mod consensus;
pub mod crypto;
pub mod p2p;
pub mod params;
