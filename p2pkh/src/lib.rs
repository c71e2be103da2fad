//! Hierarchical deterministic P2PKH wallets for Bitcoin mainnet and testnet.
//!
//! A [`Wallet`] is built from a BIP39 mnemonic and a BIP32 path (the BIP44
//! account path `m/44'/<coin>'/0'/0` unless one is given) and exposes the
//! derived public key, P2PKH address, WIF private key and extended keys.
//!
//! ```no_run
//! use p2pkh::{Config, Network, Wallet};
//!
//! let phrase = p2pkh::mnemonic::generate_mnemonic(128)?;
//! let root = Wallet::new(&Config::new(phrase, Network::Mainnet))?;
//! let first = root.derive(0)?;
//! println!("{} {}", first.path(), first.address());
//! # Ok::<(), p2pkh::WalletError>(())
//! ```

pub mod address;
pub mod config;
pub mod derivation;
pub mod error;
pub mod mnemonic;
pub mod network;
pub mod path;
pub mod wallet;
pub mod wif;

pub use address::{Address, AddressError, AddressKind};
pub use config::Config;
pub use error::WalletError;
pub use network::{Network, NetworkParams};
pub use secp256k1::PublicKey;
pub use wallet::Wallet;
pub use wif::{Wif, WifError};
