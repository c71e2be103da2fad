//! Seed to master key to path-walked key, with failures mapped onto wallet errors.

use bip32::{Bip32Error, DerivationPath, ExtendedPrivKey, NetworkParams};
use secp256k1::{Secp256k1, Signing};

use crate::error::WalletError;

/// BIP32 master key. Seeds outside 16..=64 bytes are rejected.
pub fn master_key_from(
    seed: &[u8],
    params: &'static NetworkParams,
) -> Result<ExtendedPrivKey, WalletError> {
    ExtendedPrivKey::new_master(seed, params).map_err(WalletError::MasterKeyDerivation)
}

/// Parses a wallet path. A bare `m` names the master key itself and is
/// rejected: a wallet always sits at least one step below the seed.
pub fn parse_path(path: &str) -> Result<DerivationPath, WalletError> {
    let invalid = |source: Bip32Error| WalletError::InvalidPath {
        path: path.to_string(),
        source,
    };
    let parsed: DerivationPath = path.parse().map_err(invalid)?;
    if parsed.is_empty() {
        return Err(invalid(Bip32Error::InvalidDerivationPath(path.to_string())));
    }
    Ok(parsed)
}

/// Walks `path` from `master` one CKDpriv step at a time. The first failing
/// step aborts the walk.
pub fn derive_along_path<C: Signing>(
    secp: &Secp256k1<C>,
    master: &ExtendedPrivKey,
    path: &DerivationPath,
) -> Result<ExtendedPrivKey, WalletError> {
    path.derive_private(secp, master)
        .map_err(|err| WalletError::from_derivation(err, master.child_index))
}

/// A single CKDpriv step.
pub fn derive_child<C: Signing>(
    secp: &Secp256k1<C>,
    parent: &ExtendedPrivKey,
    index: u32,
) -> Result<ExtendedPrivKey, WalletError> {
    parent
        .derive_private_child(secp, index)
        .map_err(|source| WalletError::KeyDerivation { index, source })
}
