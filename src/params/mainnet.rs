//! Parameters for the main production network
//!
//! Everything here is fixed, trusted data. Changing any entry changes the
//! network a node joins.

use std::sync::OnceLock;

use crate::consensus::Target;
use crate::p2p::HttpSeedSpec;
use crate::params::network::NetworkId;
use crate::params::profile::{Checkpoint, ConsensusIdentityError, GenesisSpec, NetworkParameters, ProfileSpec};

pub const MAINNET_MAJORITY_WINDOW: u32 = 1000;
pub const MAINNET_MAJORITY_REJECT_BLOCK_OUTDATED: u32 = 950;
pub const MAINNET_MAJORITY_ENFORCE_BLOCK_UPGRADE: u32 = 750;

/// Two weeks
pub const TARGET_TIMESPAN: u32 = 14 * 24 * 60 * 60;

/// Ten minutes
pub const TARGET_SPACING: u32 = 10 * 60;

pub const INTERVAL: u32 = TARGET_TIMESPAN / TARGET_SPACING;

pub const GENESIS_HASH: &str = "00000006941e463cf1cb6c74024228810dc81545c854ba5153b117d3bf602204";

/// 0x0000000fffff...ff
const MAX_TARGET: Target = Target::from_be_bytes({
    let mut bytes = [0xff; 32];
    bytes[0] = 0x00;
    bytes[1] = 0x00;
    bytes[2] = 0x00;
    bytes[3] = 0x0f;
    bytes
});

static CHECKPOINTS: &[Checkpoint] = &[
    Checkpoint { height: 0, hash: GENESIS_HASH },
    Checkpoint { height: 111, hash: "0000000267a3a12da835680c963702dca940b1302883ea605669ad99881d06d4" },
    Checkpoint { height: 3000, hash: "000000016b6a454f4fef562024d4dbb822d1af76ce48352afc30b6892214394d" },
    Checkpoint { height: 4600, hash: "00000000e55dd5660ea3e64fa0bbcd2550369ac7f04479a3da94a29e44fe19a3" },
    Checkpoint { height: 4650, hash: "00000000120a2fdfe68d571f7c3eadaac1c1be8f18f15817e533e43eee32a120" },
];

static DNS_SEEDS: &[&str] = &[
    "seed.cn1.genyuanlian.com",
    "seed.hk1.genyuanlian.com",
    "seed.hk1.rSTK.world",
    "seed.cn1.rSTK.world",
];

static HTTP_SEEDS: &[HttpSeedSpec] = &[HttpSeedSpec {
    pubkey: "0238746c59d46d5408bf8b1d0af5740fe1a6e1703fcb56b2953f0b965c740d256f",
    uri: "http://httpseed.bitcoin.schildbach.de/peers",
}];

static ADDR_SEEDS: &[u32] = &[
    0x45351c77, 0x0d431c77, 0xac657e76, 0xc3ade66f, 0x28a9e66f,
    0xe3893331, 0x37c65ada, 0xf65231fe, 0xd257ea72, 0x0e617e76,
];

pub static MAINNET: ProfileSpec = ProfileSpec {
    network: NetworkId::Main,
    max_target: MAX_TARGET,
    address_header: 0,
    p2sh_header: 5,
    dumped_private_key_header: 128,
    packet_magic: 0xf9beb402,
    // "xpub" / "xprv"
    bip32_header_pub: 0x0488b21e,
    bip32_header_priv: 0x0488ade4,
    port: 10666,
    interval: INTERVAL,
    target_timespan: TARGET_TIMESPAN,
    majority_window: MAINNET_MAJORITY_WINDOW,
    majority_enforce_block_upgrade: MAINNET_MAJORITY_ENFORCE_BLOCK_UPGRADE,
    majority_reject_block_outdated: MAINNET_MAJORITY_REJECT_BLOCK_OUTDATED,
    subsidy_decrease_block_count: 210_000,
    spendable_coinbase_depth: 100,
    genesis: GenesisSpec {
        difficulty_target: 2_018_867_506,
        time: 1_516_820_700,
        hash: GENESIS_HASH,
    },
    expected_genesis_hash: GENESIS_HASH,
    checkpoints: CHECKPOINTS,
    dns_seeds: DNS_SEEDS,
    http_seeds: HTTP_SEEDS,
    addr_seeds: ADDR_SEEDS,
};

static INSTANCE: OnceLock<Result<NetworkParameters, ConsensusIdentityError>> = OnceLock::new();

#[cfg(test)]
static BUILDS: std::sync::atomic::AtomicUsize = std::sync::atomic::AtomicUsize::new(0);

/// The process-wide mainnet profile
///
/// Built on first call; every caller, concurrent or not, sees the same
/// instance or the same error.
pub fn get() -> Result<&'static NetworkParameters, ConsensusIdentityError> {
    INSTANCE
        .get_or_init(|| {
            #[cfg(test)]
            BUILDS.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            NetworkParameters::from_spec(&MAINNET)
        })
        .as_ref()
        .map_err(Clone::clone)
}
