use crate::error::WalletError;
use crate::network::{Network, params_for};

/// `m/44'/<coin_type>'/0'/0`: external chain of the first BIP44 account.
pub fn default_path(network: Network) -> Result<String, WalletError> {
    let params = params_for(network)?;
    Ok(format!("m/44'/{}'/0'/0", params.coin_type))
}

/// Picks the derivation path for a wallet.
///
/// An empty `path` selects the network's default account path. Anything else is
/// returned untouched; it is parsed (and rejected with
/// [`WalletError::InvalidPath`]) when the wallet walks it.
pub fn resolve_path(network: Network, path: &str) -> Result<String, WalletError> {
    if path.is_empty() {
        return default_path(network);
    }
    Ok(path.to_string())
}
