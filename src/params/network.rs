//! Network identifiers

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which network a parameter profile describes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkId {
    #[default]
    Main,
    Test,
    Regtest,
}

impl NetworkId {
    /// Stable identifier string shared with wallets and peers
    pub const fn id(&self) -> &'static str {
        match self {
            NetworkId::Main => "org.bitcoin.production",
            NetworkId::Test => "org.bitcoin.test",
            NetworkId::Regtest => "org.bitcoin.regtest",
        }
    }

    /// Network name used by payment protocol requests
    pub const fn payment_protocol_id(&self) -> &'static str {
        match self {
            NetworkId::Main => "main",
            NetworkId::Test => "test",
            NetworkId::Regtest => "regtest",
        }
    }

    /// Look up a network by its stable identifier string
    pub fn from_id(id: &str) -> Option<Self> {
        [NetworkId::Main, NetworkId::Test, NetworkId::Regtest]
            .into_iter()
            .find(|n| n.id() == id)
    }
}

impl fmt::Display for NetworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.payment_protocol_id())
    }
}

/// Accepts short names (`main`, `mainnet`, ...) and the stable id strings
impl FromStr for NetworkId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "main" | "mainnet" => Ok(NetworkId::Main),
            "test" | "testnet" => Ok(NetworkId::Test),
            "regtest" => Ok(NetworkId::Regtest),
            other => NetworkId::from_id(other).ok_or_else(|| format!("unknown network: {s}")),
        }
    }
}
