//! Bitcoin addresses: Base58Check legacy (P2PKH, P2SH) and bech32 SegWit.
//!
//! Wallets only produce P2PKH. The other kinds are decoded so that a
//! well-formed address is never mistaken for a malformed one.

use std::fmt;
use std::str::FromStr;

use bech32::{Fe32, Hrp, segwit};
use crypto_utils::{
    Base58Error,
    base58::{base58_check_decode, base58_check_encode},
    hash::hash160,
};
use secp256k1::PublicKey;
use thiserror::Error;

use crate::network::{Network, NetworkParams};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    #[error(transparent)]
    Base58(#[from] Base58Error),
    #[error("invalid segwit address: {0}")]
    Bech32(String),
    #[error("address payload must be 21 bytes, got {0}")]
    InvalidLength(usize),
    #[error("unknown address version byte {0:#04x}")]
    UnknownVersion(u8),
    #[error("unsupported witness program: version {version}, {len} bytes")]
    UnsupportedWitnessProgram { version: u8, len: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressKind {
    PubKeyHash,
    ScriptHash,
    WitnessPubKeyHash,
    WitnessScriptHash,
    Taproot,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Payload {
    Legacy { version: u8, hash: [u8; 20] },
    Witness { hrp: Hrp, version: Fe32, program: Vec<u8> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    network: Network,
    kind: AddressKind,
    payload: Payload,
}

impl Address {
    /// P2PKH address of the compressed serialization of `public_key`.
    pub fn p2pkh(public_key: &PublicKey, params: &NetworkParams) -> Self {
        Address {
            network: params.network,
            kind: AddressKind::PubKeyHash,
            payload: Payload::Legacy {
                version: params.pubkey_hash_version,
                hash: hash160(&public_key.serialize()),
            },
        }
    }

    /// Decodes a legacy or SegWit address of any known network.
    ///
    /// Strings whose prefix before the last `1` is a known bech32 HRP are
    /// decoded as SegWit, everything else as Base58Check.
    pub fn decode(s: &str) -> Result<Self, AddressError> {
        let segwit_params = s
            .rfind('1')
            .and_then(|sep| NetworkParams::for_bech32_hrp(&s[..sep]));
        match segwit_params {
            Some(params) => Self::decode_segwit(s, params),
            None => Self::decode_base58(s),
        }
    }

    fn decode_base58(s: &str) -> Result<Self, AddressError> {
        let payload = base58_check_decode(s)?;
        if payload.len() != 21 {
            return Err(AddressError::InvalidLength(payload.len()));
        }
        let version = payload[0];
        let params = NetworkParams::for_address_version(version)
            .ok_or(AddressError::UnknownVersion(version))?;
        let kind = if version == params.pubkey_hash_version {
            AddressKind::PubKeyHash
        } else {
            AddressKind::ScriptHash
        };
        let mut hash = [0u8; 20];
        hash.copy_from_slice(&payload[1..]);
        Ok(Address {
            network: params.network,
            kind,
            payload: Payload::Legacy { version, hash },
        })
    }

    fn decode_segwit(s: &str, params: &NetworkParams) -> Result<Self, AddressError> {
        // checks the checksum variant per witness version and the program length
        let (hrp, version, program) =
            segwit::decode(s).map_err(|e| AddressError::Bech32(e.to_string()))?;
        let kind = match (version.to_u8(), program.len()) {
            (0, 20) => AddressKind::WitnessPubKeyHash,
            (0, 32) => AddressKind::WitnessScriptHash,
            (1, 32) => AddressKind::Taproot,
            (version, len) => {
                return Err(AddressError::UnsupportedWitnessProgram { version, len });
            }
        };
        Ok(Address {
            network: params.network,
            kind,
            payload: Payload::Witness {
                hrp,
                version,
                program,
            },
        })
    }

    /// Base58Check for legacy kinds, lowercase bech32 for SegWit kinds.
    pub fn encode(&self) -> String {
        self.to_string()
    }

    pub fn is_for_network(&self, params: &NetworkParams) -> bool {
        self.network == params.network
    }

    pub fn network(&self) -> Network {
        self.network
    }

    pub fn kind(&self) -> AddressKind {
        self.kind
    }

    /// The 20-byte hash of legacy addresses, or the witness program.
    pub fn hash(&self) -> &[u8] {
        match &self.payload {
            Payload::Legacy { hash, .. } => hash,
            Payload::Witness { program, .. } => program,
        }
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.payload {
            Payload::Legacy { version, hash } => {
                let mut payload = Vec::with_capacity(21);
                payload.push(*version);
                payload.extend_from_slice(hash);
                f.write_str(&base58_check_encode(&payload))
            }
            Payload::Witness {
                hrp,
                version,
                program,
            } => segwit::encode_lower_to_fmt_unchecked(f, *hrp, *version, program),
        }
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, AddressError> {
        Self::decode(s)
    }
}
