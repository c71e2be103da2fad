//! BIP39 mnemonic phrases: generation, validation and seed stretching.

use bip39::{Language, Mnemonic};
use rand::RngCore;
use zeroize::{Zeroize, Zeroizing};

use crate::error::WalletError;

/// Generate a random English mnemonic from `entropy_bits` of OS randomness.
///
/// 128 bits gives 12 words, 256 bits gives 24.
pub fn generate_mnemonic(entropy_bits: usize) -> Result<String, WalletError> {
    if !(128..=256).contains(&entropy_bits) || entropy_bits % 32 != 0 {
        return Err(WalletError::InvalidEntropy(entropy_bits));
    }
    let mut entropy = [0u8; 32];
    let entropy = &mut entropy[..entropy_bits / 8];
    rand::rngs::OsRng.fill_bytes(entropy);
    let mnemonic = Mnemonic::from_entropy_in(Language::English, entropy)
        .map_err(|e| WalletError::InvalidMnemonic(e.to_string()));
    entropy.zeroize();
    Ok(mnemonic?.to_string())
}

/// Parses an English phrase, checking word list membership, word count and
/// checksum.
pub fn parse_mnemonic(phrase: &str) -> Result<Mnemonic, WalletError> {
    if phrase.trim().is_empty() {
        return Err(WalletError::InvalidMnemonic("mnemonic is required".into()));
    }
    Mnemonic::parse_in_normalized(Language::English, phrase)
        .map_err(|e| WalletError::InvalidMnemonic(e.to_string()))
}

pub fn validate_mnemonic(phrase: &str) -> Result<(), WalletError> {
    parse_mnemonic(phrase).map(|_| ())
}

pub fn is_valid_mnemonic(phrase: &str) -> bool {
    validate_mnemonic(phrase).is_ok()
}

/// PBKDF2-stretched 64-byte BIP39 seed. Wiped when dropped.
pub fn mnemonic_seed(mnemonic: &Mnemonic, passphrase: &str) -> Zeroizing<[u8; 64]> {
    Zeroizing::new(mnemonic.to_seed(passphrase))
}

/// [`parse_mnemonic`] followed by [`mnemonic_seed`].
pub fn seed_from_mnemonic(
    phrase: &str,
    passphrase: &str,
) -> Result<Zeroizing<[u8; 64]>, WalletError> {
    Ok(mnemonic_seed(&parse_mnemonic(phrase)?, passphrase))
}
