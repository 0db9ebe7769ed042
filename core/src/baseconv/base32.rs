//! RFC 4648 base32 (upper-case alphabet), unpadded on encode.
//!
//! Decoding accepts trailing `=` padding so that parts split on 8-character
//! boundaries can be padded back and decoded independently.

use crate::baseconv::types::{Base, BaseError};

pub const ALPHABET: &[u8; 32] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ234567";
pub const PAD: u8 = b'=';

pub fn encode(data: &[u8]) -> String {
    let mut out = String::with_capacity((data.len() * 8 + 4) / 5);
    let mut buffer: u32 = 0;
    let mut bits: u32 = 0;

    for &byte in data {
        buffer = (buffer << 8) | byte as u32;
        bits += 8;
        while bits >= 5 {
            bits -= 5;
            out.push(ALPHABET[((buffer >> bits) & 0x1f) as usize] as char);
        }
        buffer &= (1 << bits) - 1;
    }
    if bits > 0 {
        out.push(ALPHABET[((buffer << (5 - bits)) & 0x1f) as usize] as char);
    }
    out
}

fn value_of(c: u8) -> Option<u32> {
    match c {
        b'A'..=b'Z' => Some((c - b'A') as u32),
        b'2'..=b'7' => Some((c - b'2') as u32 + 26),
        _ => None,
    }
}

pub fn decode(text: &str) -> Result<Vec<u8>, BaseError> {
    let raw = text.as_bytes();
    let body_len = raw.iter().rposition(|&c| c != PAD).map_or(0, |p| p + 1);
    let body = &raw[..body_len];

    // 1, 3 and 6 trailing characters never come out of the encoder.
    if matches!(body.len() % 8, 1 | 3 | 6) {
        return Err(BaseError::InvalidLength { base: Base::B32, len: body.len() });
    }

    let mut out = Vec::with_capacity(body.len() * 5 / 8);
    let mut buffer: u32 = 0;
    let mut bits: u32 = 0;

    for (index, &c) in body.iter().enumerate() {
        let v = value_of(c).ok_or(BaseError::InvalidCharacter {
            base: Base::B32,
            character: c as char,
            index,
        })?;
        buffer = (buffer << 5) | v;
        bits += 5;
        if bits >= 8 {
            bits -= 8;
            out.push((buffer >> bits) as u8);
        }
        buffer &= (1 << bits) - 1;
    }
    Ok(out)
}
