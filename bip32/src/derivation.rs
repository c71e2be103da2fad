use crate::{
    Bip32Error,
    extended_key::{ExtendedPrivKey, ExtendedPubKey, HARDENED_OFFSET, is_hardened},
};
use secp256k1::{Secp256k1, Signing, Verification};
use std::fmt;
use std::str::FromStr;

/// A BIP-32 derivation path (e.g., "m/44'/0'/0'/0/1").
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct DerivationPath(Vec<u32>);

impl FromStr for DerivationPath {
    type Err = Bip32Error;

    /// Parses "m/44'/0'/0'/0/0", "m/44h/0h", "44/0/0/0" or a bare "m".
    fn from_str(s: &str) -> Result<Self, Bip32Error> {
        let invalid = || Bip32Error::InvalidDerivationPath(s.to_string());

        let trimmed = s.trim();
        let rest = match trimmed {
            "m" | "M" => return Ok(DerivationPath::default()),
            _ => trimmed
                .strip_prefix("m/")
                .or_else(|| trimmed.strip_prefix("M/"))
                .unwrap_or(trimmed),
        };
        if rest.is_empty() {
            return Err(invalid());
        }

        rest.split('/')
            .map(|part| {
                let (digits, hardened) = match part.strip_suffix(['\'', 'h', 'H']) {
                    Some(digits) => (digits, true),
                    None => (part, false),
                };
                // u32::from_str would also accept a leading '+'.
                if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(invalid());
                }
                let index: u32 = digits.parse().map_err(|_| invalid())?;
                if !hardened {
                    return Ok(index);
                }
                if is_hardened(index) {
                    return Err(invalid());
                }
                Ok(index + HARDENED_OFFSET)
            })
            .collect::<Result<Vec<_>, _>>()
            .map(DerivationPath)
    }
}

impl fmt::Display for DerivationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("m")?;
        for &index in &self.0 {
            if is_hardened(index) {
                write!(f, "/{}'", index - HARDENED_OFFSET)?;
            } else {
                write!(f, "/{index}")?;
            }
        }
        Ok(())
    }
}

impl From<Vec<u32>> for DerivationPath {
    fn from(indices: Vec<u32>) -> Self {
        DerivationPath(indices)
    }
}

impl DerivationPath {
    pub fn indices(&self) -> &[u32] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// This path extended by one index.
    pub fn child(&self, index: u32) -> DerivationPath {
        let mut indices = Vec::with_capacity(self.0.len() + 1);
        indices.extend_from_slice(&self.0);
        indices.push(index);
        DerivationPath(indices)
    }

    /// Derive a private extended key along this path from a master xprv.
    ///
    /// A failing step aborts the walk and is reported as
    /// [`Bip32Error::Derivation`] carrying the offending index.
    pub fn derive_private<C: Signing>(
        &self,
        secp: &Secp256k1<C>,
        master: &ExtendedPrivKey,
    ) -> Result<ExtendedPrivKey, Bip32Error> {
        let mut key = master.clone();
        for &index in &self.0 {
            log::trace!("CKDpriv depth {} index {}", key.depth, index);
            key = key
                .derive_private_child(secp, index)
                .map_err(|source| Bip32Error::Derivation {
                    index,
                    source: Box::new(source),
                })?;
        }
        Ok(key)
    }

    /// Derive a public extended key along this path from an xpub (non-hardened only).
    pub fn derive_public<C: Verification>(
        &self,
        secp: &Secp256k1<C>,
        master: &ExtendedPubKey,
    ) -> Result<ExtendedPubKey, Bip32Error> {
        let mut key = master.clone();
        for &index in &self.0 {
            log::trace!("CKDpub depth {} index {}", key.depth, index);
            key = key
                .derive_public_child(secp, index)
                .map_err(|source| Bip32Error::Derivation {
                    index,
                    source: Box::new(source),
                })?;
        }
        Ok(key)
    }
}
