//! Best-effort guesses at how a scanned string is encoded.
//!
//! Character-range gates run first; the expensive decode checks only run for
//! encodings whose range already fits.

use crate::baseconv::types::{Base, Bech32Variant, Encoding};
use crate::baseconv::{base_decode, base_encode};

struct Range {
    min: char,
    max: char,
}

fn char_range(text: &str) -> Option<Range> {
    let min = text.chars().min()?;
    let max = text.chars().max()?;
    Some(Range { min, max })
}

/// Unverified hint: radix encodings whose alphabet range covers `text`.
pub fn hint_encodings(text: &str) -> Vec<Base> {
    let Some(r) = char_range(text) else {
        return Vec::new();
    };
    let mut out = Vec::new();
    if '2' <= r.min && r.max <= 'Z' {
        out.push(Base::B32);
    }
    if '$' <= r.min && r.max <= 'Z' {
        out.push(Base::B43);
    }
    if '1' <= r.min && r.max <= 'z' {
        out.push(Base::B58);
    }
    if '+' <= r.min && r.max <= 'z' {
        out.push(Base::B64);
    }
    out
}

/// Verified candidates for `text`, in priority order.
///
/// Always ends with `Ascii` (when every codepoint is <= 127) followed by
/// exactly one of `Latin1` or `Utf8`. Returns an empty list for empty input.
pub fn detect_encodings(text: &str) -> Vec<Encoding> {
    let Some(r) = char_range(text) else {
        return Vec::new();
    };
    let mut out = Vec::new();

    if text.len() % 2 == 0 && '0' <= r.min && hex::decode(text).is_ok() {
        if r.max <= 'F' {
            out.push(Encoding::HexUpper);
        } else if r.max <= 'f' {
            out.push(Encoding::Hex);
        }
    }

    if '!' <= r.min && r.max <= '~' && text.contains('1') {
        if let Ok((_, _, variant)) = bech32::decode(text) {
            out.push(Encoding::Bech32(match variant {
                bech32::Variant::Bech32 => Bech32Variant::Bech32,
                bech32::Variant::Bech32m => Bech32Variant::Bech32m,
            }));
        }
    }

    for base in hint_encodings(text) {
        let ok = match base {
            // base64 must survive a round trip, the alphabet alone is too permissive.
            Base::B64 => base_decode(text, base)
                .map(|bytes| base_encode(&bytes, base) == text)
                .unwrap_or(false),
            _ => base_decode(text, base).is_ok(),
        };
        if ok {
            out.push(match base {
                Base::B32 => Encoding::Base32,
                Base::B43 => Encoding::Base43,
                Base::B58 => Encoding::Base58,
                Base::B64 => Encoding::Base64,
            });
        }
    }

    let max = r.max as u32;
    if max <= 127 {
        out.push(Encoding::Ascii);
    }
    if (128..=255).contains(&max) {
        out.push(Encoding::Latin1);
    } else {
        out.push(Encoding::Utf8);
    }
    out
}
