//! Wallet Import Format private keys.

use crypto_utils::{
    Base58Error,
    base58::{base58_check_decode, base58_check_encode},
};
use secp256k1::SecretKey;
use thiserror::Error;

use crate::network::NetworkParams;

/// Suffix marking that the key's public counterpart is used in compressed form.
const COMPRESSED_FLAG: u8 = 0x01;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WifError {
    #[error(transparent)]
    Base58(#[from] Base58Error),
    #[error("WIF payload must be 33 or 34 bytes, got {0}")]
    InvalidLength(usize),
    #[error("unknown WIF version byte {0:#04x}")]
    UnknownVersion(u8),
    #[error("invalid compression flag {0:#04x}")]
    InvalidCompressionFlag(u8),
    #[error("private key is out of range")]
    InvalidKey,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wif {
    pub secret_key: SecretKey,
    pub params: &'static NetworkParams,
    pub compressed: bool,
}

pub fn encode_wif(secret_key: &SecretKey, params: &NetworkParams, compressed: bool) -> String {
    let mut payload = Vec::with_capacity(34);
    payload.push(params.wif_version);
    payload.extend_from_slice(&secret_key.secret_bytes());
    if compressed {
        payload.push(COMPRESSED_FLAG);
    }
    base58_check_encode(&payload)
}

pub fn decode_wif(s: &str) -> Result<Wif, WifError> {
    let payload = base58_check_decode(s)?;
    let compressed = match payload.len() {
        33 => false,
        34 if payload[33] == COMPRESSED_FLAG => true,
        34 => return Err(WifError::InvalidCompressionFlag(payload[33])),
        len => return Err(WifError::InvalidLength(len)),
    };
    let params =
        NetworkParams::for_wif_version(payload[0]).ok_or(WifError::UnknownVersion(payload[0]))?;
    let secret_key = SecretKey::from_slice(&payload[1..33]).map_err(|_| WifError::InvalidKey)?;
    Ok(Wif {
        secret_key,
        params,
        compressed,
    })
}
