//! Base58Check version bytes
//!
//! Addresses, dumped private keys and extended keys all carry a version
//! prefix taken from the network parameters. Decoding rejects anything
//! whose prefix the profile does not list.

use thiserror::Error;

use crate::crypto::checksum;
use crate::params::NetworkParameters;

/// Length of a hash160 address payload
pub const ADDRESS_PAYLOAD_LEN: usize = 20;

/// Length of a serialized BIP32 extended key
pub const EXTENDED_KEY_LEN: usize = 78;

/// Marker byte appended to private keys whose public key is compressed
const COMPRESSED_KEY_MARKER: u8 = 0x01;

/// Address and key codec errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    #[error("Invalid base58 encoding")]
    InvalidBase58,
    #[error("Invalid checksum")]
    InvalidChecksum,
    #[error("Invalid payload length: {0}")]
    InvalidLength(usize),
    #[error("Version byte {0} is not accepted on this network")]
    UnacceptableVersion(u8),
    #[error("Unknown extended key header {0:#010x}")]
    UnknownExtendedKeyHeader(u32),
}

/// Encode `data` with a trailing checksum
pub fn encode_check(data: &[u8]) -> String {
    let mut bytes = Vec::with_capacity(data.len() + 4);
    bytes.extend_from_slice(data);
    bytes.extend_from_slice(&checksum(data));
    bs58::encode(bytes).into_string()
}

/// Decode and strip the trailing checksum
pub fn decode_check(encoded: &str) -> Result<Vec<u8>, AddressError> {
    let mut decoded = bs58::decode(encoded)
        .into_vec()
        .map_err(|_| AddressError::InvalidBase58)?;

    if decoded.len() < 5 {
        return Err(AddressError::InvalidLength(decoded.len()));
    }

    let split = decoded.len() - 4;
    if decoded[split..] != checksum(&decoded[..split]) {
        return Err(AddressError::InvalidChecksum);
    }
    decoded.truncate(split);
    Ok(decoded)
}

/// Encode a payload under a single version byte
pub fn encode_versioned(version: u8, payload: &[u8]) -> String {
    let mut data = Vec::with_capacity(payload.len() + 1);
    data.push(version);
    data.extend_from_slice(payload);
    encode_check(&data)
}

/// Decode into version byte and payload
pub fn decode_versioned(encoded: &str) -> Result<(u8, Vec<u8>), AddressError> {
    let mut data = decode_check(encoded)?;
    let version = data.remove(0);
    Ok((version, data))
}

/// What an address pays to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressKind {
    PubKeyHash,
    ScriptHash,
}

/// A decoded address, valid on the network it was checked against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Address {
    pub kind: AddressKind,
    pub hash160: [u8; ADDRESS_PAYLOAD_LEN],
}

impl Address {
    pub fn new(kind: AddressKind, hash160: [u8; ADDRESS_PAYLOAD_LEN]) -> Self {
        Self { kind, hash160 }
    }

    /// Parse an address, rejecting version bytes outside the acceptable codes
    pub fn from_base58(params: &NetworkParameters, encoded: &str) -> Result<Self, AddressError> {
        let (version, payload) = decode_versioned(encoded)?;
        if !params.is_acceptable_address_code(version) {
            return Err(AddressError::UnacceptableVersion(version));
        }

        let hash160: [u8; ADDRESS_PAYLOAD_LEN] = payload
            .as_slice()
            .try_into()
            .map_err(|_| AddressError::InvalidLength(payload.len()))?;

        let kind = if version == params.p2sh_header() {
            AddressKind::ScriptHash
        } else {
            AddressKind::PubKeyHash
        };
        Ok(Self { kind, hash160 })
    }

    pub fn to_base58(&self, params: &NetworkParameters) -> String {
        let version = match self.kind {
            AddressKind::PubKeyHash => params.address_header(),
            AddressKind::ScriptHash => params.p2sh_header(),
        };
        encode_versioned(version, &self.hash160)
    }
}

/// A private key in wallet export form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DumpedPrivateKey {
    pub secret: [u8; 32],
    pub compressed: bool,
}

impl DumpedPrivateKey {
    pub fn to_base58(&self, params: &NetworkParameters) -> String {
        let mut payload = self.secret.to_vec();
        if self.compressed {
            payload.push(COMPRESSED_KEY_MARKER);
        }
        encode_versioned(params.dumped_private_key_header(), &payload)
    }

    pub fn from_base58(params: &NetworkParameters, encoded: &str) -> Result<Self, AddressError> {
        let (version, payload) = decode_versioned(encoded)?;
        if version != params.dumped_private_key_header() {
            return Err(AddressError::UnacceptableVersion(version));
        }

        let compressed = match payload.len() {
            32 => false,
            33 if payload[32] == COMPRESSED_KEY_MARKER => true,
            len => return Err(AddressError::InvalidLength(len)),
        };
        let mut secret = [0u8; 32];
        secret.copy_from_slice(&payload[..32]);
        Ok(Self { secret, compressed })
    }
}

/// Which half of a BIP32 key pair a serialized key is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtendedKeyKind {
    Public,
    Private,
}

/// Classify a serialized extended key by its four-byte header
pub fn classify_extended_key(
    params: &NetworkParameters,
    encoded: &str,
) -> Result<ExtendedKeyKind, AddressError> {
    let data = decode_check(encoded)?;
    if data.len() != EXTENDED_KEY_LEN {
        return Err(AddressError::InvalidLength(data.len()));
    }

    let header = u32::from_be_bytes([data[0], data[1], data[2], data[3]]);
    if header == params.bip32_header_pub() {
        Ok(ExtendedKeyKind::Public)
    } else if header == params.bip32_header_priv() {
        Ok(ExtendedKeyKind::Private)
    } else {
        Err(AddressError::UnknownExtendedKeyHeader(header))
    }
}
