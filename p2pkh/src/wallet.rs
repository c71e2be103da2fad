use std::fmt;

use bip32::{DerivationPath, ExtendedPrivKey, NetworkParams};
use secp256k1::{PublicKey, Secp256k1, Signing};
use zeroize::Zeroizing;

use crate::address::Address;
use crate::config::Config;
use crate::derivation::{derive_along_path, derive_child, master_key_from, parse_path};
use crate::error::WalletError;
use crate::mnemonic::{mnemonic_seed, parse_mnemonic};
use crate::network::{Network, params_for};
use crate::path::resolve_path;
use crate::wif::encode_wif;

/// An HD wallet node: an extended private key at a known path, plus the
/// public key and P2PKH address derived from it.
///
/// Wallets are immutable. [`Wallet::derive`] returns a new wallet one level
/// deeper and leaves the receiver untouched.
#[derive(Clone)]
pub struct Wallet {
    mnemonic: Option<Zeroizing<String>>,
    path: DerivationPath,
    root: ExtendedPrivKey,
    extended_key: ExtendedPrivKey,
    public_key: PublicKey,
    address: Address,
    params: &'static NetworkParams,
}

impl Wallet {
    /// Builds the wallet at `config.path` (or the network default) from a BIP39
    /// mnemonic. Nothing is returned unless every step succeeds.
    pub fn new(config: &Config) -> Result<Wallet, WalletError> {
        let mnemonic = parse_mnemonic(&config.mnemonic)?;
        let path = resolve_path(config.network, config.path.as_deref().unwrap_or(""))?;
        let params = params_for(config.network)?;

        let seed = mnemonic_seed(&mnemonic, &config.passphrase);
        let master = master_key_from(&seed[..], params)?;
        drop(seed);

        let path = parse_path(&path)?;
        let secp = Secp256k1::new();
        let key = derive_along_path(&secp, &master, &path)?;

        log::debug!("created {} wallet at {}", params.name, path);
        Ok(Self::assemble(
            &secp,
            Some(Zeroizing::new(config.mnemonic.clone())),
            path,
            master,
            key,
            params,
        ))
    }

    fn assemble<C: Signing>(
        secp: &Secp256k1<C>,
        mnemonic: Option<Zeroizing<String>>,
        path: DerivationPath,
        root: ExtendedPrivKey,
        extended_key: ExtendedPrivKey,
        params: &'static NetworkParams,
    ) -> Wallet {
        let public_key = extended_key.public_key(secp);
        let address = Address::p2pkh(&public_key, params);
        Wallet {
            mnemonic,
            path,
            root,
            extended_key,
            public_key,
            address,
            params,
        }
    }

    /// Derives the child at `index` (hardened when `index >= 2^31`).
    ///
    /// The child does not carry the mnemonic: a key in the middle of the tree
    /// cannot reproduce the seed phrase, and the child reports exactly the key
    /// material it holds.
    pub fn derive(&self, index: u32) -> Result<Wallet, WalletError> {
        let secp = Secp256k1::new();
        let child = derive_child(&secp, &self.extended_key, index)?;
        let path = self.path.child(index);
        log::debug!("derived {} wallet at {}", self.params.name, path);
        Ok(Self::assemble(
            &secp,
            None,
            path,
            self.extended_key.clone(),
            child,
            self.params,
        ))
    }

    /// [`Wallet::derive`] for callers holding a wider or signed integer.
    /// Negative values and values above `u32::MAX` fail with
    /// [`WalletError::IndexOutOfRange`].
    pub fn derive_index<I>(&self, index: I) -> Result<Wallet, WalletError>
    where
        I: TryInto<u32> + Copy + fmt::Display,
    {
        let index = index
            .try_into()
            .map_err(|_| WalletError::IndexOutOfRange(index.to_string()))?;
        self.derive(index)
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    /// Base58Check form of [`Wallet::address`]. Between 25 and 34 characters;
    /// leading zero bytes of the hash shorten the encoding.
    pub fn address_string(&self) -> String {
        self.address.encode()
    }

    /// Canonical path, hardened steps written with an apostrophe.
    pub fn path(&self) -> String {
        self.path.to_string()
    }

    pub fn derivation_path(&self) -> &DerivationPath {
        &self.path
    }

    /// The phrase this wallet was built from, or `""` for derived wallets.
    pub fn mnemonic(&self) -> &str {
        self.mnemonic.as_deref().map(String::as_str).unwrap_or("")
    }

    /// Compressed-key WIF of this wallet's private key.
    pub fn private_key(&self) -> Zeroizing<String> {
        Zeroizing::new(encode_wif(
            &self.extended_key.private_key,
            self.params,
            true,
        ))
    }

    /// `Ok(true)` if `address` decodes and belongs to this wallet's network,
    /// `Ok(false)` if it decodes but belongs to another network.
    pub fn validate_address(&self, address: &str) -> Result<bool, WalletError> {
        let decoded = Address::decode(address)?;
        Ok(decoded.is_for_network(self.params))
    }

    /// `xpub...` on mainnet, `tpub...` on testnet.
    pub fn extended_public_key(&self) -> String {
        let secp = Secp256k1::signing_only();
        self.extended_key.neuter(&secp).to_base58()
    }

    /// `xprv...` on mainnet, `tprv...` on testnet.
    pub fn extended_private_key(&self) -> Zeroizing<String> {
        Zeroizing::new(self.extended_key.to_base58())
    }

    pub fn extended_key(&self) -> &ExtendedPrivKey {
        &self.extended_key
    }

    /// The key this wallet was derived from: the master key for wallets built
    /// by [`Wallet::new`], the parent key for wallets built by [`Wallet::derive`].
    pub fn root(&self) -> &ExtendedPrivKey {
        &self.root
    }

    pub fn network(&self) -> Network {
        self.params.network
    }

    pub fn params(&self) -> &'static NetworkParams {
        self.params
    }
}

impl fmt::Debug for Wallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Wallet")
            .field("network", &self.params.network)
            .field("path", &self.path.to_string())
            .field("address", &self.address.encode())
            .field("has_mnemonic", &self.mnemonic.is_some())
            .finish_non_exhaustive()
    }
}
