//! Static per-network constants: address prefixes, WIF and extended-key version bytes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Bip32Error;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Mainnet,
    Testnet,
}

/// Version bytes and BIP44 coin type associated with a [`Network`].
#[derive(Debug, PartialEq, Eq)]
pub struct NetworkParams {
    pub network: Network,
    pub name: &'static str,
    /// BIP44 coin type (`m/44'/<coin_type>'/...`).
    pub coin_type: u32,
    pub pubkey_hash_version: u8,
    pub script_hash_version: u8,
    /// Human-readable part of bech32 SegWit addresses.
    pub bech32_hrp: &'static str,
    pub wif_version: u8,
    pub xprv_version: [u8; 4],
    pub xpub_version: [u8; 4],
}

pub static MAINNET: NetworkParams = NetworkParams {
    network: Network::Mainnet,
    name: "mainnet",
    coin_type: 0,
    pubkey_hash_version: 0x00,
    script_hash_version: 0x05,
    bech32_hrp: "bc",
    wif_version: 0x80,
    xprv_version: [0x04, 0x88, 0xAD, 0xE4],
    xpub_version: [0x04, 0x88, 0xB2, 0x1E],
};

pub static TESTNET: NetworkParams = NetworkParams {
    network: Network::Testnet,
    name: "testnet",
    coin_type: 1,
    pubkey_hash_version: 0x6F,
    script_hash_version: 0xC4,
    bech32_hrp: "tb",
    wif_version: 0xEF,
    xprv_version: [0x04, 0x35, 0x83, 0x94],
    xpub_version: [0x04, 0x35, 0x87, 0xCF],
};

/// Every supported network. New networks are added here, not matched on elsewhere.
pub static NETWORKS: [&NetworkParams; 2] = [&MAINNET, &TESTNET];

impl NetworkParams {
    pub fn for_network(network: Network) -> Result<&'static NetworkParams, Bip32Error> {
        Self::find(|p| p.network == network)
            .ok_or_else(|| Bip32Error::UnsupportedNetwork(format!("{network:?}")))
    }

    pub fn for_name(name: &str) -> Option<&'static NetworkParams> {
        Self::find(|p| p.name.eq_ignore_ascii_case(name))
    }

    pub fn for_xprv_version(version: [u8; 4]) -> Option<&'static NetworkParams> {
        Self::find(|p| p.xprv_version == version)
    }

    pub fn for_xpub_version(version: [u8; 4]) -> Option<&'static NetworkParams> {
        Self::find(|p| p.xpub_version == version)
    }

    /// Matches either the P2PKH or the P2SH version byte.
    pub fn for_address_version(version: u8) -> Option<&'static NetworkParams> {
        Self::find(|p| p.pubkey_hash_version == version || p.script_hash_version == version)
    }

    pub fn for_bech32_hrp(hrp: &str) -> Option<&'static NetworkParams> {
        Self::find(|p| p.bech32_hrp.eq_ignore_ascii_case(hrp))
    }

    pub fn for_wif_version(version: u8) -> Option<&'static NetworkParams> {
        Self::find(|p| p.wif_version == version)
    }

    fn find(pred: impl Fn(&NetworkParams) -> bool) -> Option<&'static NetworkParams> {
        NETWORKS.iter().copied().find(|p| pred(*p))
    }
}

impl Network {
    pub fn params(self) -> Result<&'static NetworkParams, Bip32Error> {
        NetworkParams::for_network(self)
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Network::Mainnet => write!(f, "mainnet"),
            Network::Testnet => write!(f, "testnet"),
        }
    }
}

impl FromStr for Network {
    type Err = Bip32Error;

    fn from_str(s: &str) -> Result<Self, Bip32Error> {
        NetworkParams::for_name(s.trim())
            .map(|p| p.network)
            .ok_or_else(|| Bip32Error::UnsupportedNetwork(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_network_has_params() {
        for network in [Network::Mainnet, Network::Testnet] {
            assert_eq!(network.params().unwrap().network, network);
        }
    }

    #[test]
    fn coin_types_follow_bip44() {
        assert_eq!(MAINNET.coin_type, 0);
        assert_eq!(TESTNET.coin_type, 1);
    }

    #[test]
    fn parse_network_names() {
        assert_eq!("mainnet".parse::<Network>().unwrap(), Network::Mainnet);
        assert_eq!("Testnet".parse::<Network>().unwrap(), Network::Testnet);
        assert_eq!(
            "regtest".parse::<Network>().unwrap_err(),
            Bip32Error::UnsupportedNetwork("regtest".into())
        );
    }

    #[test]
    fn display_matches_parse() {
        for network in [Network::Mainnet, Network::Testnet] {
            assert_eq!(network.to_string().parse::<Network>().unwrap(), network);
        }
    }

    #[test]
    fn reverse_lookups() {
        assert_eq!(
            NetworkParams::for_address_version(0x00).unwrap().network,
            Network::Mainnet
        );
        assert_eq!(
            NetworkParams::for_address_version(0xC4).unwrap().network,
            Network::Testnet
        );
        assert!(NetworkParams::for_address_version(0x30).is_none());
        assert_eq!(
            NetworkParams::for_xpub_version([0x04, 0x35, 0x87, 0xCF]).unwrap().network,
            Network::Testnet
        );
        assert_eq!(
            NetworkParams::for_wif_version(0x80).unwrap().network,
            Network::Mainnet
        );
        assert_eq!(
            NetworkParams::for_bech32_hrp("TB").unwrap().network,
            Network::Testnet
        );
        assert!(NetworkParams::for_bech32_hrp("ltc").is_none());
    }

    #[test]
    fn serde_uses_lowercase_names() {
        assert_eq!(serde_json::to_string(&Network::Testnet).unwrap(), "\"testnet\"");
        let parsed: Network = serde_json::from_str("\"mainnet\"").unwrap();
        assert_eq!(parsed, Network::Mainnet);
        assert!(serde_json::from_str::<Network>("\"signet\"").is_err());
    }
}
