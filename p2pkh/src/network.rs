use bip32::Bip32Error;
pub use bip32::{Network, NetworkParams};

use crate::error::WalletError;

/// Looks up the parameter table row for `network`.
pub fn params_for(network: Network) -> Result<&'static NetworkParams, WalletError> {
    NetworkParams::for_network(network).map_err(unsupported)
}

/// Parses a network name such as `"mainnet"` or `"testnet"`.
pub fn parse_network(name: &str) -> Result<Network, WalletError> {
    name.parse().map_err(unsupported)
}

fn unsupported(err: Bip32Error) -> WalletError {
    match err {
        Bip32Error::UnsupportedNetwork(name) => WalletError::UnsupportedNetwork(name),
        other => WalletError::UnsupportedNetwork(other.to_string()),
    }
}
