//! Network parameter profile
//!
//! A profile is built once from a static [`ProfileSpec`] table, checks that
//! the table describes a coherent network identity, and is read-only from
//! then on. Validators, the P2P layer and the address codec all read from
//! the same verified value.

use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::{error, info};

use crate::consensus::{calculate_block_subsidy, Block, BlockHeader, Target, MAX_MONEY};
use crate::crypto::Hash;
use crate::p2p::{HttpSeed, HttpSeedSpec};
use crate::params::network::NetworkId;

/// URI scheme for payment requests
pub const URI_SCHEME: &str = "bitcoin";

/// P2P protocol version spoken by nodes on these networks
pub const PROTOCOL_VERSION: u32 = 70001;

/// Time from which P2SH rules are enforced (2012-04-01)
pub const BIP16_ENFORCE_TIME: u32 = 1_333_238_400;

/// Block version of the genesis header
const GENESIS_VERSION: i32 = 1;

/// Packet magics of networks a node may also see on the wire
pub const FOREIGN_PACKET_MAGICS: &[u32] = &[
    0xf9beb4d9, // bitcoin main
    0x0b110907, // bitcoin testnet3
    0xfabfb5da, // bitcoin regtest
];

/// Reasons a profile refuses to come into existence
///
/// Every variant means the embedded tables do not describe one coherent
/// network; none of them is recoverable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConsensusIdentityError {
    #[error("genesis hash mismatch: expected {expected}, got {actual}")]
    GenesisMismatch { expected: Hash, actual: Hash },
    #[error("malformed {what} hash constant: {value}")]
    MalformedHash { what: &'static str, value: &'static str },
    #[error("checkpoint height {height} does not follow height {previous}")]
    CheckpointOrder { previous: u32, height: u32 },
    #[error("checkpoint at height 0 missing or not equal to genesis {genesis}")]
    CheckpointGenesis { genesis: Hash },
    #[error("majority thresholds out of order: enforce {enforce}, reject {reject}, window {window}")]
    MajorityThresholds { enforce: u32, reject: u32, window: u32 },
    #[error("retarget interval must be non-zero")]
    ZeroInterval,
    #[error("address version byte {0} used by more than one encoding")]
    AddressCodeCollision(u8),
    #[error("extended key headers are identical: {0:#010x}")]
    Bip32HeaderCollision(u32),
    #[error("packet magic {0:#010x} belongs to another network")]
    PacketMagicCollision(u32),
    #[error("http seed {uri} has an invalid authentication key")]
    InvalidSeedKey { uri: &'static str },
}

/// A checkpoint as written in a static table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint {
    pub height: u32,
    pub hash: &'static str,
}

/// The fields of the genesis block a profile pins
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenesisSpec {
    /// Packed difficulty target
    pub difficulty_target: u32,
    /// Seconds since the Unix epoch
    pub time: u32,
    /// Hash set directly on the block
    pub hash: &'static str,
}

/// Static description of one network
#[derive(Debug, Clone)]
pub struct ProfileSpec {
    pub network: NetworkId,
    pub max_target: Target,
    pub address_header: u8,
    pub p2sh_header: u8,
    pub dumped_private_key_header: u8,
    pub packet_magic: u32,
    pub bip32_header_pub: u32,
    pub bip32_header_priv: u32,
    pub port: u16,
    pub interval: u32,
    pub target_timespan: u32,
    pub majority_window: u32,
    pub majority_enforce_block_upgrade: u32,
    pub majority_reject_block_outdated: u32,
    pub subsidy_decrease_block_count: u32,
    pub spendable_coinbase_depth: u32,
    pub genesis: GenesisSpec,
    /// What the genesis block must hash to
    pub expected_genesis_hash: &'static str,
    /// Strictly increasing by height, starting at 0
    pub checkpoints: &'static [Checkpoint],
    pub dns_seeds: &'static [&'static str],
    pub http_seeds: &'static [HttpSeedSpec],
    pub addr_seeds: &'static [u32],
}

/// Verified, immutable consensus and network constants for one network
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkParameters {
    network: NetworkId,
    genesis_block: Block,
    max_target: Target,
    address_header: u8,
    p2sh_header: u8,
    dumped_private_key_header: u8,
    acceptable_address_codes: [u8; 2],
    packet_magic: u32,
    bip32_header_pub: u32,
    bip32_header_priv: u32,
    port: u16,
    interval: u32,
    target_timespan: u32,
    majority_window: u32,
    majority_enforce_block_upgrade: u32,
    majority_reject_block_outdated: u32,
    subsidy_decrease_block_count: u32,
    spendable_coinbase_depth: u32,
    checkpoints: BTreeMap<u32, Hash>,
    dns_seeds: &'static [&'static str],
    http_seeds: Vec<HttpSeed>,
    addr_seeds: &'static [u32],
}

fn parse_hash(what: &'static str, value: &'static str) -> Result<Hash, ConsensusIdentityError> {
    Hash::from_hex(value).map_err(|_| ConsensusIdentityError::MalformedHash { what, value })
}

impl NetworkParameters {
    /// Build a profile from its table, verifying the network identity
    pub fn from_spec(spec: &ProfileSpec) -> Result<Self, ConsensusIdentityError> {
        match Self::build(spec) {
            Ok(params) => {
                info!(
                    network = %params.network,
                    genesis = %params.genesis_block.hash(),
                    checkpoints = params.checkpoints.len(),
                    "network parameters verified"
                );
                Ok(params)
            }
            Err(e) => {
                error!(network = %spec.network, error = %e, "refusing unverifiable network parameters");
                Err(e)
            }
        }
    }

    /// Fresh mainnet profile, for callers that hand it out themselves
    pub fn mainnet() -> Result<Self, ConsensusIdentityError> {
        Self::from_spec(&crate::params::mainnet::MAINNET)
    }

    fn build(spec: &ProfileSpec) -> Result<Self, ConsensusIdentityError> {
        // Only bits and time are known for the genesis header, so the
        // trusted hash is pinned rather than derived.
        let header = BlockHeader::new(
            GENESIS_VERSION,
            Hash::zero(),
            Hash::zero(),
            spec.genesis.time,
            spec.genesis.difficulty_target,
            0,
        );
        let mut genesis_block = Block::new(header);
        genesis_block.set_hash(parse_hash("genesis", spec.genesis.hash)?);

        let expected = parse_hash("expected genesis", spec.expected_genesis_hash)?;
        let actual = genesis_block.hash();
        if actual != expected {
            return Err(ConsensusIdentityError::GenesisMismatch { expected, actual });
        }

        let checkpoints = Self::build_checkpoints(spec.checkpoints, &actual)?;

        let http_seeds = spec
            .http_seeds
            .iter()
            .map(|seed| {
                HttpSeed::parse(seed).ok_or(ConsensusIdentityError::InvalidSeedKey { uri: seed.uri })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let params = Self {
            network: spec.network,
            genesis_block,
            max_target: spec.max_target,
            address_header: spec.address_header,
            p2sh_header: spec.p2sh_header,
            dumped_private_key_header: spec.dumped_private_key_header,
            acceptable_address_codes: [spec.address_header, spec.p2sh_header],
            packet_magic: spec.packet_magic,
            bip32_header_pub: spec.bip32_header_pub,
            bip32_header_priv: spec.bip32_header_priv,
            port: spec.port,
            interval: spec.interval,
            target_timespan: spec.target_timespan,
            majority_window: spec.majority_window,
            majority_enforce_block_upgrade: spec.majority_enforce_block_upgrade,
            majority_reject_block_outdated: spec.majority_reject_block_outdated,
            subsidy_decrease_block_count: spec.subsidy_decrease_block_count,
            spendable_coinbase_depth: spec.spendable_coinbase_depth,
            checkpoints,
            dns_seeds: spec.dns_seeds,
            http_seeds,
            addr_seeds: spec.addr_seeds,
        };
        params.check_scalars()?;
        Ok(params)
    }

    fn build_checkpoints(
        table: &'static [Checkpoint],
        genesis: &Hash,
    ) -> Result<BTreeMap<u32, Hash>, ConsensusIdentityError> {
        let mut checkpoints = BTreeMap::new();
        let mut previous: Option<u32> = None;
        for checkpoint in table {
            if let Some(previous) = previous {
                if checkpoint.height <= previous {
                    return Err(ConsensusIdentityError::CheckpointOrder {
                        previous,
                        height: checkpoint.height,
                    });
                }
            }
            previous = Some(checkpoint.height);
            checkpoints.insert(checkpoint.height, parse_hash("checkpoint", checkpoint.hash)?);
        }

        if checkpoints.get(&0) != Some(genesis) {
            return Err(ConsensusIdentityError::CheckpointGenesis { genesis: *genesis });
        }
        Ok(checkpoints)
    }

    fn check_scalars(&self) -> Result<(), ConsensusIdentityError> {
        if self.interval == 0 {
            return Err(ConsensusIdentityError::ZeroInterval);
        }

        let (enforce, reject, window) = (
            self.majority_enforce_block_upgrade,
            self.majority_reject_block_outdated,
            self.majority_window,
        );
        if !(enforce <= reject && reject <= window) {
            return Err(ConsensusIdentityError::MajorityThresholds { enforce, reject, window });
        }

        if self.address_header == self.p2sh_header
            || self.address_header == self.dumped_private_key_header
        {
            return Err(ConsensusIdentityError::AddressCodeCollision(self.address_header));
        }
        if self.p2sh_header == self.dumped_private_key_header {
            return Err(ConsensusIdentityError::AddressCodeCollision(self.p2sh_header));
        }

        if self.bip32_header_pub == self.bip32_header_priv {
            return Err(ConsensusIdentityError::Bip32HeaderCollision(self.bip32_header_pub));
        }

        if FOREIGN_PACKET_MAGICS.contains(&self.packet_magic) {
            return Err(ConsensusIdentityError::PacketMagicCollision(self.packet_magic));
        }
        Ok(())
    }

    pub fn network(&self) -> NetworkId {
        self.network
    }

    /// Stable identifier string of the network
    pub fn id(&self) -> &'static str {
        self.network.id()
    }

    /// Network name used by payment protocol requests
    pub fn payment_protocol_id(&self) -> &'static str {
        self.network.payment_protocol_id()
    }

    pub fn uri_scheme(&self) -> &'static str {
        URI_SCHEME
    }

    pub fn protocol_version(&self) -> u32 {
        PROTOCOL_VERSION
    }

    pub fn bip16_enforce_time(&self) -> u32 {
        BIP16_ENFORCE_TIME
    }

    pub fn max_money(&self) -> u64 {
        MAX_MONEY
    }

    pub fn genesis_block(&self) -> &Block {
        &self.genesis_block
    }

    pub fn genesis_hash(&self) -> Hash {
        self.genesis_block.hash()
    }

    /// Easiest target any block may claim
    pub fn max_target(&self) -> &Target {
        &self.max_target
    }

    /// Whether a target is within the network's proof-of-work limit
    pub fn is_valid_target(&self, target: &Target) -> bool {
        *target <= self.max_target
    }

    pub fn address_header(&self) -> u8 {
        self.address_header
    }

    pub fn p2sh_header(&self) -> u8 {
        self.p2sh_header
    }

    pub fn dumped_private_key_header(&self) -> u8 {
        self.dumped_private_key_header
    }

    /// Version bytes an address may decode to on this network
    pub fn acceptable_address_codes(&self) -> &[u8] {
        &self.acceptable_address_codes
    }

    pub fn is_acceptable_address_code(&self, version: u8) -> bool {
        self.acceptable_address_codes.contains(&version)
    }

    pub fn packet_magic(&self) -> u32 {
        self.packet_magic
    }

    /// Packet magic in the order it is sent on the wire
    pub fn packet_magic_bytes(&self) -> [u8; 4] {
        self.packet_magic.to_be_bytes()
    }

    pub fn bip32_header_pub(&self) -> u32 {
        self.bip32_header_pub
    }

    pub fn bip32_header_priv(&self) -> u32 {
        self.bip32_header_priv
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Blocks per retarget period
    pub fn interval(&self) -> u32 {
        self.interval
    }

    /// Intended length of a retarget period in seconds
    pub fn target_timespan(&self) -> u32 {
        self.target_timespan
    }

    /// Intended seconds between blocks
    pub fn expected_block_spacing(&self) -> u32 {
        self.target_timespan / self.interval
    }

    /// True for the last block of a retarget period
    pub fn is_difficulty_transition_point(&self, height: u32) -> bool {
        (height as u64 + 1) % self.interval as u64 == 0
    }

    pub fn majority_window(&self) -> u32 {
        self.majority_window
    }

    pub fn majority_enforce_block_upgrade(&self) -> u32 {
        self.majority_enforce_block_upgrade
    }

    pub fn majority_reject_block_outdated(&self) -> u32 {
        self.majority_reject_block_outdated
    }

    pub fn subsidy_decrease_block_count(&self) -> u32 {
        self.subsidy_decrease_block_count
    }

    /// Block reward at `height` under this network's halving schedule
    pub fn block_subsidy(&self, height: u32) -> u64 {
        calculate_block_subsidy(height as u64, self.subsidy_decrease_block_count as u64)
    }

    pub fn spendable_coinbase_depth(&self) -> u32 {
        self.spendable_coinbase_depth
    }

    pub fn checkpoints(&self) -> &BTreeMap<u32, Hash> {
        &self.checkpoints
    }

    pub fn is_checkpoint(&self, height: u32) -> bool {
        self.checkpoints.contains_key(&height)
    }

    /// False only when a checkpoint pins a different hash at `height`
    pub fn passes_checkpoint(&self, height: u32, hash: &Hash) -> bool {
        self.checkpoints.get(&height).map_or(true, |pinned| pinned == hash)
    }

    /// Highest checkpoint not above `height`
    pub fn last_checkpoint_at_or_below(&self, height: u32) -> Option<(u32, Hash)> {
        self.checkpoints
            .range(..=height)
            .next_back()
            .map(|(h, hash)| (*h, *hash))
    }

    pub fn dns_seeds(&self) -> &[&'static str] {
        self.dns_seeds
    }

    pub fn http_seeds(&self) -> &[HttpSeed] {
        &self.http_seeds
    }

    pub fn addr_seeds(&self) -> &[u32] {
        self.addr_seeds
    }

    /// Serializable snapshot of every parameter
    pub fn summary(&self) -> ProfileSummary {
        ProfileSummary {
            network: self.network,
            id: self.id(),
            payment_protocol_id: self.payment_protocol_id(),
            genesis_hash: self.genesis_hash().to_hex(),
            genesis_time: self.genesis_block.header.time,
            genesis_difficulty_target: self.genesis_block.header.difficulty_target,
            max_target: self.max_target.to_hex(),
            address_header: self.address_header,
            p2sh_header: self.p2sh_header,
            dumped_private_key_header: self.dumped_private_key_header,
            acceptable_address_codes: self.acceptable_address_codes.to_vec(),
            packet_magic: format!("{:08x}", self.packet_magic),
            bip32_header_pub: format!("{:08x}", self.bip32_header_pub),
            bip32_header_priv: format!("{:08x}", self.bip32_header_priv),
            port: self.port,
            interval: self.interval,
            target_timespan: self.target_timespan,
            majority_window: self.majority_window,
            majority_enforce_block_upgrade: self.majority_enforce_block_upgrade,
            majority_reject_block_outdated: self.majority_reject_block_outdated,
            subsidy_decrease_block_count: self.subsidy_decrease_block_count,
            spendable_coinbase_depth: self.spendable_coinbase_depth,
            checkpoints: self
                .checkpoints
                .iter()
                .map(|(height, hash)| CheckpointSummary { height: *height, hash: hash.to_hex() })
                .collect(),
            dns_seeds: self.dns_seeds.iter().map(|s| s.to_string()).collect(),
            http_seeds: self
                .http_seeds
                .iter()
                .map(|seed| HttpSeedSummary { pubkey: seed.auth_key_hex(), uri: seed.uri.to_string() })
                .collect(),
            addr_seeds: crate::p2p::addr_seed_addresses(self.addr_seeds, self.port)
                .iter()
                .map(|addr| addr.ip().to_string())
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CheckpointSummary {
    pub height: u32,
    pub hash: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct HttpSeedSummary {
    pub pubkey: String,
    pub uri: String,
}

/// Printable form of a profile
#[derive(Debug, Clone, Serialize)]
pub struct ProfileSummary {
    pub network: NetworkId,
    pub id: &'static str,
    pub payment_protocol_id: &'static str,
    pub genesis_hash: String,
    pub genesis_time: u32,
    pub genesis_difficulty_target: u32,
    pub max_target: String,
    pub address_header: u8,
    pub p2sh_header: u8,
    pub dumped_private_key_header: u8,
    pub acceptable_address_codes: Vec<u8>,
    pub packet_magic: String,
    pub bip32_header_pub: String,
    pub bip32_header_priv: String,
    pub port: u16,
    pub interval: u32,
    pub target_timespan: u32,
    pub majority_window: u32,
    pub majority_enforce_block_upgrade: u32,
    pub majority_reject_block_outdated: u32,
    pub subsidy_decrease_block_count: u32,
    pub spendable_coinbase_depth: u32,
    pub checkpoints: Vec<CheckpointSummary>,
    pub dns_seeds: Vec<String>,
    pub http_seeds: Vec<HttpSeedSummary>,
    pub addr_seeds: Vec<String>,
}
