//! Network parameters - Genesis identity, checkpoints, seeds, and codec headers

mod network;
mod profile;
pub mod mainnet;

pub use network::*;
pub use profile::*;

/// Static table for a network, if this build ships one
pub fn spec_for(network: NetworkId) -> Option<&'static ProfileSpec> {
    match network {
        NetworkId::Main => Some(&mainnet::MAINNET),
        NetworkId::Test | NetworkId::Regtest => None,
    }
}
