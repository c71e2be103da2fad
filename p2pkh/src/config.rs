use std::fmt;

use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::network::Network;

/// Inputs for [`Wallet::new`](crate::Wallet::new).
#[derive(Clone, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct Config {
    pub mnemonic: String,
    /// Derivation path; `None` or empty selects the network's BIP44 default.
    #[serde(default)]
    pub path: Option<String>,
    #[zeroize(skip)]
    pub network: Network,
    /// BIP39 passphrase, empty unless set.
    #[serde(default)]
    pub passphrase: String,
}

impl Config {
    pub fn new(mnemonic: impl Into<String>, network: Network) -> Self {
        Config {
            mnemonic: mnemonic.into(),
            path: None,
            network,
            passphrase: String::new(),
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_passphrase(mut self, passphrase: impl Into<String>) -> Self {
        self.passphrase = passphrase.into();
        self
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("mnemonic", &"<redacted>")
            .field("path", &self.path)
            .field("network", &self.network)
            .field("passphrase", &"<redacted>")
            .finish()
    }
}
