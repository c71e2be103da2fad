use crypto_utils::Base58Error;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Bip32Error {
    #[error("seed must be between 16 and 64 bytes, got {0}")]
    InvalidSeedLength(usize),
    #[error("seed produced an invalid master key")]
    InvalidMasterKey,
    #[error("derived child key is invalid")]
    InvalidChildKey,
    #[error("invalid extended key data")]
    InvalidKeyData,
    #[error("invalid base58 encoding")]
    InvalidBase58,
    #[error("extended key checksum mismatch")]
    InvalidChecksum,
    #[error("extended key has the wrong length")]
    InvalidLength,
    #[error("unknown extended key version")]
    InvalidVersion,
    #[error("invalid derivation path: {0}")]
    InvalidDerivationPath(String),
    #[error("hardened index {0} requires a private parent key")]
    HardenedFromPublic(u32),
    #[error("unsupported network: {0}")]
    UnsupportedNetwork(String),
    #[error("derivation failed at index {index}: {source}")]
    Derivation {
        index: u32,
        #[source]
        source: Box<Bip32Error>,
    },
}

impl From<Base58Error> for Bip32Error {
    fn from(err: Base58Error) -> Self {
        match err {
            Base58Error::InvalidChecksum => Bip32Error::InvalidChecksum,
            Base58Error::InvalidLength => Bip32Error::InvalidLength,
            Base58Error::InvalidCharacter(_) => Bip32Error::InvalidBase58,
        }
    }
}
