use std::fmt;
use num_enum::TryFromPrimitive;

use crate::utils::enum_name_or_hex;

/// Supported radix encodings, keyed by their base number.
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, TryFromPrimitive)]
pub enum Base {
    B32 = 32,
    B43 = 43,
    B58 = 58,
    B64 = 64,
}

impl Base {
    pub fn verify(raw: u8) -> Result<(), BaseError> {
        match raw {
            x if x == Base::B32 as u8 => Ok(()),
            x if x == Base::B43 as u8 => Ok(()),
            x if x == Base::B58 as u8 => Ok(()),
            x if x == Base::B64 as u8 => Ok(()),
            _ => Err(BaseError::UnsupportedBase { raw }),
        }
    }

    pub fn from_raw(raw: u8) -> Result<Self, BaseError> {
        Base::try_from_primitive(raw).map_err(|_| BaseError::UnsupportedBase { raw })
    }
}

/// Bech32 checksum flavour (BIP-173 / BIP-350).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Bech32Variant {
    Bech32,
    Bech32m,
}

/// Candidate text encodings, declared in detection priority order
/// (cheapest and most restrictive first).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Encoding {
    HexUpper,
    Hex,
    Bech32(Bech32Variant),
    Base32,
    Base43,
    Base58,
    Base64,
    Ascii,
    Latin1,
    Utf8,
}

impl Encoding {
    /// The radix encoding behind this candidate, if it is one.
    pub fn base(&self) -> Option<Base> {
        match self {
            Encoding::Base32 => Some(Base::B32),
            Encoding::Base43 => Some(Base::B43),
            Encoding::Base58 => Some(Base::B58),
            Encoding::Base64 => Some(Base::B64),
            _ => None,
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Encoding::HexUpper => write!(f, "HEX"),
            Encoding::Hex => write!(f, "hex"),
            Encoding::Bech32(Bech32Variant::Bech32) => write!(f, "bech32"),
            Encoding::Bech32(Bech32Variant::Bech32m) => write!(f, "bech32m"),
            Encoding::Base32 => write!(f, "32"),
            Encoding::Base43 => write!(f, "43"),
            Encoding::Base58 => write!(f, "58"),
            Encoding::Base64 => write!(f, "64"),
            Encoding::Ascii => write!(f, "ascii"),
            Encoding::Latin1 => write!(f, "latin-1"),
            Encoding::Utf8 => write!(f, "utf8"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BaseError {
    /// Base number outside {32, 43, 58, 64}.
    UnsupportedBase { raw: u8 },

    /// Character not in the target alphabet.
    InvalidCharacter { base: Base, character: char, index: usize },

    /// Input length cannot be produced by the encoder.
    InvalidLength { base: Base, len: usize },

    /// Underlying decoder rejected the input.
    Decode { base: Base, msg: String },
}

impl fmt::Display for BaseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use BaseError::*;
        match self {
            UnsupportedBase { raw } =>
                write!(f, "unsupported base: {}", enum_name_or_hex::<Base>(*raw)),
            InvalidCharacter { base, character, index } =>
                write!(f, "forbidden character {:?} at {} for base {}", character, index, *base as u8),
            InvalidLength { base, len } =>
                write!(f, "invalid length {} for base {}", len, *base as u8),
            Decode { base, msg } =>
                write!(f, "base {} decode failed: {}", *base as u8, msg),
        }
    }
}

impl std::error::Error for BaseError {}
