use bip32::Bip32Error;
use thiserror::Error;

use crate::address::AddressError;

#[derive(Debug, Error)]
pub enum WalletError {
    #[error("invalid mnemonic: {0}")]
    InvalidMnemonic(String),

    #[error("entropy must be 128 to 256 bits in steps of 32, got {0}")]
    InvalidEntropy(usize),

    #[error("unsupported network type {0:?}: choose either 'mainnet' or 'testnet'")]
    UnsupportedNetwork(String),

    #[error("failed to parse derivation path {path:?}")]
    InvalidPath {
        path: String,
        #[source]
        source: Bip32Error,
    },

    #[error("failed to generate master key: {0}")]
    MasterKeyDerivation(#[source] Bip32Error),

    #[error("failed to derive key at index {index}: {source}")]
    KeyDerivation {
        index: u32,
        #[source]
        source: Bip32Error,
    },

    #[error("index {0} does not fit a 32-bit child number")]
    IndexOutOfRange(String),

    #[error("failed to decode address: {0}")]
    Decode(#[from] AddressError),
}

impl WalletError {
    /// Maps a failed derivation walk onto the index that broke it.
    pub(crate) fn from_derivation(err: Bip32Error, fallback_index: u32) -> Self {
        match err {
            Bip32Error::Derivation { index, source } => WalletError::KeyDerivation {
                index,
                source: *source,
            },
            source => WalletError::KeyDerivation {
                index: fallback_index,
                source,
            },
        }
    }
}
