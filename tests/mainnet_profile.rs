//! Invariants of the shipped mainnet profile

use std::collections::HashSet;
use std::sync::{Arc, Barrier};
use std::thread;

use gyl_params::consensus::Target;
use gyl_params::crypto::Hash;
use gyl_params::params::mainnet::{self, GENESIS_HASH, MAINNET};
use gyl_params::params::{ConsensusIdentityError, NetworkId, NetworkParameters};

#[test]
fn genesis_hash_matches_declared_constant() {
    let params = mainnet::get().unwrap();
    assert_eq!(params.genesis_hash(), Hash::from_hex(GENESIS_HASH).unwrap());
    assert_eq!(params.genesis_block().hash_as_string(), GENESIS_HASH);
    assert!(params.genesis_block().is_genesis());
}

#[test]
fn checkpoint_zero_is_genesis() {
    let params = mainnet::get().unwrap();
    assert_eq!(params.checkpoints().get(&0), Some(&params.genesis_hash()));
}

#[test]
fn checkpoint_heights_strictly_increase() {
    let heights: Vec<u32> = MAINNET.checkpoints.iter().map(|c| c.height).collect();
    assert!(heights.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(heights, vec![0, 111, 3000, 4600, 4650]);

    let params = mainnet::get().unwrap();
    let stored: Vec<u32> = params.checkpoints().keys().copied().collect();
    assert_eq!(stored, heights);
}

#[test]
fn acceptable_address_codes_are_the_two_headers() {
    let params = mainnet::get().unwrap();
    let codes = params.acceptable_address_codes();
    assert_eq!(codes.len(), 2);

    let set: HashSet<u8> = codes.iter().copied().collect();
    let expected: HashSet<u8> = [params.address_header(), params.p2sh_header()].into_iter().collect();
    assert_eq!(set, expected);
    assert!(!params.is_acceptable_address_code(params.dumped_private_key_header()));
}

#[test]
fn majority_thresholds_are_ordered() {
    let params = mainnet::get().unwrap();
    assert!(params.majority_enforce_block_upgrade() <= params.majority_reject_block_outdated());
    assert!(params.majority_reject_block_outdated() <= params.majority_window());
}

#[test]
fn bip32_headers_differ() {
    let params = mainnet::get().unwrap();
    assert_ne!(params.bip32_header_pub(), params.bip32_header_priv());
}

#[test]
fn concurrent_get_returns_one_instance() {
    const CALLERS: usize = 32;
    let barrier = Arc::new(Barrier::new(CALLERS));
    let handles: Vec<_> = (0..CALLERS)
        .map(|_| {
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                mainnet::get().unwrap() as *const NetworkParameters as usize
            })
        })
        .collect();

    let addrs: HashSet<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(addrs.len(), 1);
}

#[test]
fn corrupted_genesis_constant_fails_construction() {
    let mut spec = MAINNET.clone();
    spec.expected_genesis_hash = "00000006941e463cf1cb6c74024228810dc81545c854ba5153b117d3bf602205";
    match NetworkParameters::from_spec(&spec) {
        Err(ConsensusIdentityError::GenesisMismatch { expected, actual }) => {
            assert_ne!(expected, actual);
            assert_eq!(actual.to_hex(), GENESIS_HASH);
        }
        other => panic!("expected genesis mismatch, got {other:?}"),
    }
}

#[test]
fn injected_profile_equals_singleton() {
    let owned = NetworkParameters::mainnet().unwrap();
    assert_eq!(&owned, mainnet::get().unwrap());
}

#[test]
fn scalar_constants() {
    let params = mainnet::get().unwrap();
    assert_eq!(params.network(), NetworkId::Main);
    assert_eq!(params.id(), "org.bitcoin.production");
    assert_eq!(params.payment_protocol_id(), "main");
    assert_eq!(params.address_header(), 0);
    assert_eq!(params.p2sh_header(), 5);
    assert_eq!(params.dumped_private_key_header(), 128);
    assert_eq!(params.packet_magic(), 0xf9beb402);
    assert_eq!(params.packet_magic_bytes(), [0xf9, 0xbe, 0xb4, 0x02]);
    assert_eq!(params.port(), 10666);
    assert_eq!(params.interval(), 2016);
    assert_eq!(params.target_timespan(), 1_209_600);
    assert_eq!(params.subsidy_decrease_block_count(), 210_000);
    assert_eq!(params.spendable_coinbase_depth(), 100);
    assert_eq!(
        params.max_target(),
        &Target::from_hex("0000000fffffffffffffffffffffffffffffffffffffffffffffffffffffffff").unwrap()
    );
}

#[test]
fn seed_lists_are_populated_in_order() {
    let params = mainnet::get().unwrap();
    assert_eq!(params.dns_seeds().len(), 4);
    assert_eq!(params.dns_seeds()[0], "seed.cn1.genyuanlian.com");
    assert_eq!(params.http_seeds().len(), 1);
    assert_eq!(params.http_seeds()[0].uri, "http://httpseed.bitcoin.schildbach.de/peers");
    assert_eq!(params.addr_seeds().len(), 10);
    assert_eq!(params.addr_seeds()[0], 0x45351c77);
}

#[test]
fn subsidy_schedule() {
    let params = mainnet::get().unwrap();
    assert_eq!(params.block_subsidy(0), 5_000_000_000);
    assert_eq!(params.block_subsidy(210_000), 2_500_000_000);
    assert!(params.max_money() >= params.block_subsidy(0));
}
