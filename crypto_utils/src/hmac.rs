use hmac::{Hmac, Mac};
use sha2::Sha512;

type HmacSha512 = Hmac<Sha512>;

/// HMAC key used to derive a BIP32 master node from a seed.
pub const BIP32_SEED_KEY: &[u8] = b"Bitcoin seed";

/// HMAC-SHA512, split by BIP32 callers into IL (key material) and IR (chain code).
pub fn hmac_sha512(key: &[u8], data: &[u8]) -> [u8; 64] {
    // HMAC accepts keys of any length.
    let mut mac = HmacSha512::new_from_slice(key).expect("HMAC takes keys of any size");
    mac.update(data);
    mac.finalize().into_bytes().into()
}
