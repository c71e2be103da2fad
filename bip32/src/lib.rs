//! BIP32 hierarchical deterministic keys over secp256k1.
//!
//! Holds the per-network parameter table, extended private/public keys with
//! their Base58Check serialization, and derivation paths that walk CKDpriv or
//! CKDpub from a master key.

pub mod derivation;
pub mod error;
pub mod extended_key;
pub mod network;

pub use derivation::DerivationPath;
pub use error::Bip32Error;
pub use extended_key::{ExtendedPrivKey, ExtendedPubKey, HARDENED_OFFSET, is_hardened};
pub use network::{Network, NetworkParams};
pub use secp256k1;
