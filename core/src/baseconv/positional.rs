//! Big-integer positional conversion for small alphabets (base43).
//!
//! Leading zero bytes map to leading copies of the alphabet's zero character
//! and back.

use crate::baseconv::types::{Base, BaseError};

pub const B43_ALPHABET: &[u8; 43] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ$*+-./:";

pub fn encode(data: &[u8], alphabet: &[u8]) -> String {
    let base = alphabet.len() as u32;
    let zeros = data.iter().take_while(|&&b| b == 0).count();

    // Little-endian digits in `base`.
    let mut digits: Vec<u32> = Vec::with_capacity(data.len() * 2);
    for &byte in &data[zeros..] {
        let mut carry = byte as u32;
        for d in digits.iter_mut() {
            carry += *d << 8;
            *d = carry % base;
            carry /= base;
        }
        while carry > 0 {
            digits.push(carry % base);
            carry /= base;
        }
    }

    let mut out = String::with_capacity(zeros + digits.len());
    out.extend(std::iter::repeat(alphabet[0] as char).take(zeros));
    out.extend(digits.iter().rev().map(|&d| alphabet[d as usize] as char));
    out
}

pub fn decode(text: &str, alphabet: &[u8], tag: Base) -> Result<Vec<u8>, BaseError> {
    let base = alphabet.len() as u32;
    let zero = alphabet[0];
    let raw = text.as_bytes();
    let zeros = raw.iter().take_while(|&&c| c == zero).count();

    // Little-endian bytes.
    let mut bytes: Vec<u8> = Vec::with_capacity(raw.len());
    for (index, &c) in raw.iter().enumerate().skip(zeros) {
        let digit = alphabet
            .iter()
            .position(|&a| a == c)
            .ok_or(BaseError::InvalidCharacter { base: tag, character: c as char, index })?;
        let mut carry = digit as u32;
        for b in bytes.iter_mut() {
            carry += (*b as u32) * base;
            *b = (carry & 0xff) as u8;
            carry >>= 8;
        }
        while carry > 0 {
            bytes.push((carry & 0xff) as u8);
            carry >>= 8;
        }
    }

    let mut out = vec![0u8; zeros];
    out.extend(bytes.iter().rev());
    Ok(out)
}
