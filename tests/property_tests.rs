//! Property-based and adversarial tests for the GYL network parameters
//!
//! These tests verify invariants hold under random inputs and attack scenarios.

use proptest::prelude::*;
use std::net::Ipv4Addr;

use gyl_params::address::{decode_versioned, encode_versioned, Address, AddressError, AddressKind};
use gyl_params::consensus::{calculate_block_subsidy, BlockHeader, Target, MAX_MONEY};
use gyl_params::crypto::Hash;
use gyl_params::p2p::{pack_ipv4, unpack_ipv4};
use gyl_params::params::mainnet::{self, MAINNET};
use gyl_params::params::{ConsensusIdentityError, NetworkParameters};

fn target_from_u128(value: u128) -> Target {
    let mut bytes = [0u8; 32];
    bytes[16..32].copy_from_slice(&value.to_be_bytes());
    Target::from_be_bytes(bytes)
}

// ============================================================================
// PROPERTY-BASED TESTS
// ============================================================================

proptest! {
    /// Only the two address headers decode as addresses
    #[test]
    fn prop_foreign_versions_rejected(
        version in any::<u8>(),
        payload in prop::array::uniform20(any::<u8>())
    ) {
        let params = mainnet::get().unwrap();
        let encoded = encode_versioned(version, &payload);
        let result = Address::from_base58(params, &encoded);

        if version == params.address_header() || version == params.p2sh_header() {
            prop_assert_eq!(result.unwrap().hash160, payload);
        } else {
            prop_assert_eq!(result.unwrap_err(), AddressError::UnacceptableVersion(version));
        }
    }

    /// Address kind selects the version byte
    #[test]
    fn prop_address_kind_selects_header(
        script in any::<bool>(),
        payload in prop::array::uniform20(any::<u8>())
    ) {
        let params = mainnet::get().unwrap();
        let kind = if script { AddressKind::ScriptHash } else { AddressKind::PubKeyHash };
        let address = Address::new(kind, payload);

        let (version, _) = decode_versioned(&address.to_base58(params)).unwrap();
        let expected = if script { params.p2sh_header() } else { params.address_header() };
        prop_assert_eq!(version, expected);
    }

    /// Compact encoding only ever truncates, never loosens a target
    #[test]
    fn prop_compact_never_exceeds_target(value in any::<u128>()) {
        let target = target_from_u128(value);
        let packed = Target::from_compact(target.to_compact()).unwrap();
        prop_assert!(packed <= target);
    }

    /// Byte-wise ordering of targets is numeric ordering
    #[test]
    fn prop_target_order_is_numeric(a in any::<u128>(), b in any::<u128>()) {
        prop_assert_eq!(target_from_u128(a).cmp(&target_from_u128(b)), a.cmp(&b));
    }

    /// Heights without a checkpoint accept any hash
    #[test]
    fn prop_unpinned_heights_pass(height in any::<u32>(), bytes in any::<[u8; 32]>()) {
        let params = mainnet::get().unwrap();
        let hash = Hash::from_bytes(bytes);
        if !params.is_checkpoint(height) {
            prop_assert!(params.passes_checkpoint(height, &hash));
        } else {
            prop_assert_eq!(
                params.passes_checkpoint(height, &hash),
                params.checkpoints()[&height] == hash
            );
        }
    }

    /// Packed seed addresses unpack to the same address they were packed from
    #[test]
    fn prop_seed_packing_inverts(octets in any::<[u8; 4]>()) {
        let addr = Ipv4Addr::from(octets);
        prop_assert_eq!(unpack_ipv4(pack_ipv4(addr)), addr);
    }

    /// Subsidy never grows with height
    #[test]
    fn prop_subsidy_non_increasing(height in 0u64..20_000_000u64, step in 1u64..1_000_000u64) {
        let now = calculate_block_subsidy(height, 210_000);
        let later = calculate_block_subsidy(height + step, 210_000);
        prop_assert!(later <= now);
        prop_assert!(now <= MAX_MONEY);
    }

    /// Different nonces produce different hashes
    #[test]
    fn prop_different_nonce_different_hash(nonce1 in 0u32..u32::MAX) {
        let nonce2 = nonce1.wrapping_add(1);

        let header1 = BlockHeader::new(1, Hash::zero(), Hash::zero(), 0, 0x1d00ffff, nonce1);
        let header2 = BlockHeader::new(1, Hash::zero(), Hash::zero(), 0, 0x1d00ffff, nonce2);

        prop_assert_ne!(header1.hash(), header2.hash());
    }

    /// Any expected genesis other than the real one refuses to build
    #[test]
    fn prop_wrong_genesis_never_builds(bytes in any::<[u8; 32]>()) {
        let candidate = Hash::from_bytes(bytes);
        prop_assume!(candidate.to_hex() != MAINNET.expected_genesis_hash);

        let mut spec = MAINNET.clone();
        spec.expected_genesis_hash = Box::leak(candidate.to_hex().into_boxed_str());

        let is_mismatch = matches!(
            NetworkParameters::from_spec(&spec),
            Err(ConsensusIdentityError::GenesisMismatch { .. })
        );
        prop_assert!(is_mismatch);
    }
}

// ============================================================================
// ADVERSARIAL TESTS
// ============================================================================

/// Test: Foreign network magic
///
/// A table that reuses Bitcoin's magic would let this node talk to the
/// wrong peers; it must not build.
#[test]
fn test_bitcoin_magic_rejected() {
    for magic in [0xf9beb4d9u32, 0x0b110907, 0xfabfb5da] {
        let mut spec = MAINNET.clone();
        spec.packet_magic = magic;
        assert_eq!(
            NetworkParameters::from_spec(&spec).unwrap_err(),
            ConsensusIdentityError::PacketMagicCollision(magic)
        );
    }
}

/// Test: Rewritten history
///
/// A block at a checkpointed height with any other hash is refused.
#[test]
fn test_checkpoint_pins_history() {
    let params = mainnet::get().unwrap();
    for (height, hash) in params.checkpoints() {
        assert!(params.passes_checkpoint(*height, hash));

        let mut forged = hash.0;
        forged[31] ^= 0x01;
        assert!(!params.passes_checkpoint(*height, &Hash::from_bytes(forged)));
    }
}

/// Test: Easier-than-allowed work
///
/// Targets above the limit are invalid, the limit itself is not.
#[test]
fn test_target_above_limit_rejected() {
    let params = mainnet::get().unwrap();
    let limit = *params.max_target();
    assert!(params.is_valid_target(&limit));

    let mut looser = limit.to_be_bytes();
    looser[3] = 0x10;
    assert!(!params.is_valid_target(&Target::from_be_bytes(looser)));
}

/// Test: Private key pasted as an address
#[test]
fn test_wif_is_not_an_address() {
    let params = mainnet::get().unwrap();
    let wif = "5HpHagT65TZzG1PH3CSu63k8DbpvD8s5ip4nEB3kEsreAnchuDf";
    assert_eq!(
        Address::from_base58(params, wif).unwrap_err(),
        AddressError::UnacceptableVersion(128)
    );
}
