use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Base58Error {
    #[error("invalid base58 character {0:?}")]
    InvalidCharacter(char),
    #[error("invalid base58 payload length")]
    InvalidLength,
    #[error("base58check checksum mismatch")]
    InvalidChecksum,
}

fn decode_error(input: &str, err: bs58::decode::Error) -> Base58Error {
    use bs58::decode::Error;
    match err {
        Error::InvalidCharacter { character, .. } => Base58Error::InvalidCharacter(character),
        // bs58 only reports the byte offset for non-ASCII input.
        Error::NonAsciiCharacter { index } => Base58Error::InvalidCharacter(
            input
                .get(index..)
                .and_then(|rest| rest.chars().next())
                .unwrap_or(char::REPLACEMENT_CHARACTER),
        ),
        Error::InvalidChecksum { .. } => Base58Error::InvalidChecksum,
        _ => Base58Error::InvalidLength,
    }
}

/// Appends the first four bytes of SHA256d(payload) and encodes the result.
pub fn base58_check_encode(payload: &[u8]) -> String {
    bs58::encode(payload).with_check().into_string()
}

/// Decodes a Base58Check string and returns the payload with the checksum stripped.
pub fn base58_check_decode(s: &str) -> Result<Vec<u8>, Base58Error> {
    if s.is_empty() {
        return Err(Base58Error::InvalidLength);
    }
    bs58::decode(s)
        .with_check(None)
        .into_vec()
        .map_err(|e| decode_error(s, e))
}
