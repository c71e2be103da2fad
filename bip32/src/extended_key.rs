use std::fmt;
use std::str::FromStr;

use crate::error::Bip32Error;
use crate::network::{Network, NetworkParams};
use crypto_utils::{
    base58::{base58_check_decode, base58_check_encode},
    hash::hash160,
    hmac::{BIP32_SEED_KEY, hmac_sha512},
};
use secp256k1::{PublicKey, Scalar, Secp256k1, SecretKey, Signing, Verification};

/// Index offset for hardened children (index >= 0x80000000) i.e., 0x80000000 = 2³¹
pub const HARDENED_OFFSET: u32 = 0x8000_0000;

const MIN_SEED_LEN: usize = 16;
const MAX_SEED_LEN: usize = 64;

// version (4) | depth (1) | parent fingerprint (4) | child index (4) | chain code (32) | key data (33)
const SERIALIZED_LEN: usize = 78;

pub fn is_hardened(index: u32) -> bool {
    index >= HARDENED_OFFSET
}

/// Extended private key (xprv / tprv)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExtendedPrivKey {
    pub params: &'static NetworkParams,
    pub depth: u8,
    pub parent_fingerprint: [u8; 4],
    pub child_index: u32,
    pub chain_code: [u8; 32],
    pub private_key: SecretKey,
}

/// Extended public key (xpub / tpub)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExtendedPubKey {
    pub params: &'static NetworkParams,
    pub depth: u8,
    pub parent_fingerprint: [u8; 4],
    pub child_index: u32,
    pub chain_code: [u8; 32],
    pub public_key: PublicKey,
}

/// 4-byte key fingerprint: HASH160(compressed pubkey)[0..4]
fn fingerprint(pubkey: &PublicKey) -> [u8; 4] {
    let hash = hash160(&pubkey.serialize());
    [hash[0], hash[1], hash[2], hash[3]]
}

/// Splits an HMAC-SHA512 output into IL (tweak) and IR (chain code).
fn split_hmac(i: &[u8; 64]) -> ([u8; 32], [u8; 32]) {
    let mut il = [0u8; 32];
    let mut ir = [0u8; 32];
    il.copy_from_slice(&i[..32]);
    ir.copy_from_slice(&i[32..]);
    (il, ir)
}

impl ExtendedPrivKey {
    /// Master extended private key from a seed (16 to 64 bytes).
    pub fn new_master(seed: &[u8], params: &'static NetworkParams) -> Result<Self, Bip32Error> {
        if !(MIN_SEED_LEN..=MAX_SEED_LEN).contains(&seed.len()) {
            return Err(Bip32Error::InvalidSeedLength(seed.len()));
        }
        let (il, chain_code) = split_hmac(&hmac_sha512(BIP32_SEED_KEY, seed));
        let private_key = SecretKey::from_slice(&il).map_err(|_| Bip32Error::InvalidMasterKey)?;
        Ok(ExtendedPrivKey {
            params,
            depth: 0,
            parent_fingerprint: [0u8; 4],
            child_index: 0,
            chain_code,
            private_key,
        })
    }

    pub fn network(&self) -> Network {
        self.params.network
    }

    pub fn public_key<C: Signing>(&self, secp: &Secp256k1<C>) -> PublicKey {
        PublicKey::from_secret_key(secp, &self.private_key)
    }

    pub fn fingerprint<C: Signing>(&self, secp: &Secp256k1<C>) -> [u8; 4] {
        fingerprint(&self.public_key(secp))
    }

    /// Strips the private key, keeping chain code and metadata.
    pub fn neuter<C: Signing>(&self, secp: &Secp256k1<C>) -> ExtendedPubKey {
        ExtendedPubKey {
            params: self.params,
            depth: self.depth,
            parent_fingerprint: self.parent_fingerprint,
            child_index: self.child_index,
            chain_code: self.chain_code,
            public_key: self.public_key(secp),
        }
    }

    /// Child key derivation for private keys (CKDpriv).
    pub fn derive_private_child<C: Signing>(
        &self,
        secp: &Secp256k1<C>,
        index: u32,
    ) -> Result<Self, Bip32Error> {
        let parent_pub = self.public_key(secp);

        // Hardened: 0x00 || ser256(k_par) || ser32(i)
        // Normal:   serP(K_par) || ser32(i)
        let mut data = Vec::with_capacity(33 + 4);
        if is_hardened(index) {
            data.push(0u8);
            data.extend_from_slice(&self.private_key.secret_bytes());
        } else {
            data.extend_from_slice(&parent_pub.serialize());
        }
        data.extend_from_slice(&index.to_be_bytes());

        let (il, chain_code) = split_hmac(&hmac_sha512(&self.chain_code, &data));

        // k_i = parse256(IL) + k_par (mod n); fails if IL >= n or the sum is zero
        let tweak = Scalar::from_be_bytes(il).map_err(|_| Bip32Error::InvalidChildKey)?;
        let private_key = self
            .private_key
            .add_tweak(&tweak)
            .map_err(|_| Bip32Error::InvalidChildKey)?;

        let depth = self.depth.checked_add(1).ok_or(Bip32Error::InvalidChildKey)?;

        Ok(ExtendedPrivKey {
            params: self.params,
            depth,
            parent_fingerprint: fingerprint(&parent_pub),
            child_index: index,
            chain_code,
            private_key,
        })
    }

    /// Serialize into a Base58Check string (`xprv...` on mainnet, `tprv...` on testnet).
    pub fn to_base58(&self) -> String {
        let mut key_data = [0u8; 33];
        key_data[1..].copy_from_slice(&self.private_key.secret_bytes());
        RawKey {
            version: self.params.xprv_version,
            depth: self.depth,
            parent_fingerprint: self.parent_fingerprint,
            child_index: self.child_index,
            chain_code: self.chain_code,
            key_data,
        }
        .encode()
    }

    /// Deserialize an xprv/tprv from a Base58Check string.
    pub fn from_base58(s: &str) -> Result<Self, Bip32Error> {
        let (raw, params) = RawKey::decode(s, NetworkParams::for_xprv_version)?;
        if raw.key_data[0] != 0 {
            return Err(Bip32Error::InvalidKeyData);
        }
        let private_key =
            SecretKey::from_slice(&raw.key_data[1..]).map_err(|_| Bip32Error::InvalidKeyData)?;
        Ok(ExtendedPrivKey {
            params,
            depth: raw.depth,
            parent_fingerprint: raw.parent_fingerprint,
            child_index: raw.child_index,
            chain_code: raw.chain_code,
            private_key,
        })
    }
}

impl ExtendedPubKey {
    pub fn network(&self) -> Network {
        self.params.network
    }

    pub fn fingerprint(&self) -> [u8; 4] {
        fingerprint(&self.public_key)
    }

    /// Child key derivation for public keys (CKDpub), non-hardened indices only.
    pub fn derive_public_child<C: Verification>(
        &self,
        secp: &Secp256k1<C>,
        index: u32,
    ) -> Result<Self, Bip32Error> {
        if is_hardened(index) {
            return Err(Bip32Error::HardenedFromPublic(index));
        }

        let mut data = Vec::with_capacity(33 + 4);
        data.extend_from_slice(&self.public_key.serialize());
        data.extend_from_slice(&index.to_be_bytes());

        let (il, chain_code) = split_hmac(&hmac_sha512(&self.chain_code, &data));

        // K_i = point(parse256(IL)) + K_par
        let tweak = Scalar::from_be_bytes(il).map_err(|_| Bip32Error::InvalidChildKey)?;
        let public_key = self
            .public_key
            .add_exp_tweak(secp, &tweak)
            .map_err(|_| Bip32Error::InvalidChildKey)?;

        let depth = self.depth.checked_add(1).ok_or(Bip32Error::InvalidChildKey)?;

        Ok(ExtendedPubKey {
            params: self.params,
            depth,
            parent_fingerprint: self.fingerprint(),
            child_index: index,
            chain_code,
            public_key,
        })
    }

    /// Serialize into a Base58Check string (`xpub...` on mainnet, `tpub...` on testnet).
    pub fn to_base58(&self) -> String {
        RawKey {
            version: self.params.xpub_version,
            depth: self.depth,
            parent_fingerprint: self.parent_fingerprint,
            child_index: self.child_index,
            chain_code: self.chain_code,
            key_data: self.public_key.serialize(),
        }
        .encode()
    }

    /// Deserialize an xpub/tpub from a Base58Check string.
    pub fn from_base58(s: &str) -> Result<Self, Bip32Error> {
        let (raw, params) = RawKey::decode(s, NetworkParams::for_xpub_version)?;
        let public_key =
            PublicKey::from_slice(&raw.key_data).map_err(|_| Bip32Error::InvalidKeyData)?;
        Ok(ExtendedPubKey {
            params,
            depth: raw.depth,
            parent_fingerprint: raw.parent_fingerprint,
            child_index: raw.child_index,
            chain_code: raw.chain_code,
            public_key,
        })
    }
}

/// The 78-byte serialization shared by both key kinds.
struct RawKey {
    version: [u8; 4],
    depth: u8,
    parent_fingerprint: [u8; 4],
    child_index: u32,
    chain_code: [u8; 32],
    key_data: [u8; 33],
}

impl RawKey {
    fn encode(&self) -> String {
        let mut payload = Vec::with_capacity(SERIALIZED_LEN);
        payload.extend_from_slice(&self.version);
        payload.push(self.depth);
        payload.extend_from_slice(&self.parent_fingerprint);
        payload.extend_from_slice(&self.child_index.to_be_bytes());
        payload.extend_from_slice(&self.chain_code);
        payload.extend_from_slice(&self.key_data);
        base58_check_encode(&payload)
    }

    fn decode(
        s: &str,
        params_for_version: fn([u8; 4]) -> Option<&'static NetworkParams>,
    ) -> Result<(Self, &'static NetworkParams), Bip32Error> {
        let data = base58_check_decode(s)?;
        if data.len() != SERIALIZED_LEN {
            return Err(Bip32Error::InvalidLength);
        }
        let mut raw = RawKey {
            version: [0u8; 4],
            depth: data[4],
            parent_fingerprint: [0u8; 4],
            child_index: u32::from_be_bytes([data[9], data[10], data[11], data[12]]),
            chain_code: [0u8; 32],
            key_data: [0u8; 33],
        };
        raw.version.copy_from_slice(&data[0..4]);
        raw.parent_fingerprint.copy_from_slice(&data[5..9]);
        raw.chain_code.copy_from_slice(&data[13..45]);
        raw.key_data.copy_from_slice(&data[45..78]);

        let params = params_for_version(raw.version).ok_or(Bip32Error::InvalidVersion)?;

        // A master key has no parent.
        if raw.depth == 0 && (raw.parent_fingerprint != [0u8; 4] || raw.child_index != 0) {
            return Err(Bip32Error::InvalidChildKey);
        }
        Ok((raw, params))
    }
}

impl fmt::Display for ExtendedPrivKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_base58())
    }
}

impl fmt::Display for ExtendedPubKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_base58())
    }
}

impl FromStr for ExtendedPrivKey {
    type Err = Bip32Error;

    fn from_str(s: &str) -> Result<Self, Bip32Error> {
        Self::from_base58(s)
    }
}

impl FromStr for ExtendedPubKey {
    type Err = Bip32Error;

    fn from_str(s: &str) -> Result<Self, Bip32Error> {
        Self::from_base58(s)
    }
}
