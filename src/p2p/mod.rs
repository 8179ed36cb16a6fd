//! P2P module - Peer bootstrap sources

mod seeds;

pub use seeds::*;
