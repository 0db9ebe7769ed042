//! baseconv/mod.rs
//! Reversible byte <-> text conversion for the bases used on QR payloads.
//!
//! - base32: RFC 4648 alphabet, unpadded output (BBQR bodies, compact QRs).
//! - base43: positional conversion over the Electrum alphabet (QR alphanumeric friendly).
//! - base58: Bitcoin alphabet via `bs58`.
//! - base64: RFC 4648 standard engine via `base64`.
//!
//! Empty input encodes to the empty string and back.

pub mod types;
pub mod base32;
pub mod positional;
pub mod detect;

pub use types::*;
pub use detect::{detect_encodings, hint_encodings};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

pub fn base_encode(data: &[u8], base: Base) -> String {
    if data.is_empty() {
        return String::new();
    }
    match base {
        Base::B32 => base32::encode(data),
        Base::B43 => positional::encode(data, positional::B43_ALPHABET),
        Base::B58 => bs58::encode(data).into_string(),
        Base::B64 => STANDARD.encode(data),
    }
}

pub fn base_decode(text: &str, base: Base) -> Result<Vec<u8>, BaseError> {
    if text.is_empty() {
        return Ok(Vec::new());
    }
    match base {
        Base::B32 => base32::decode(text),
        Base::B43 => positional::decode(text, positional::B43_ALPHABET, Base::B43),
        Base::B58 => bs58::decode(text).into_vec().map_err(|e| match e {
            bs58::decode::Error::InvalidCharacter { character, index } =>
                BaseError::InvalidCharacter { base: Base::B58, character, index },
            other => BaseError::Decode { base: Base::B58, msg: other.to_string() },
        }),
        Base::B64 => STANDARD
            .decode(text)
            .map_err(|e| BaseError::Decode { base: Base::B64, msg: e.to_string() }),
    }
}

/// Same as [`base_encode`] but takes the raw base number.
pub fn encode_raw(data: &[u8], base: u8) -> Result<String, BaseError> {
    Ok(base_encode(data, Base::from_raw(base)?))
}

/// Same as [`base_decode`] but takes the raw base number.
pub fn decode_raw(text: &str, base: u8) -> Result<Vec<u8>, BaseError> {
    base_decode(text, Base::from_raw(base)?)
}
