//! bbqr/types.rs
//! Registries and value types for the BBQR frame header.
//!
//! Header layout (8 ASCII chars):
//!   `B$` | encoding(1) | file_type(1) | total(2, base36) | index(2, base36)

use std::fmt;
use num_enum::TryFromPrimitive;

use crate::baseconv::BaseError;
use crate::compression::CompressionError;
use crate::utils::enum_name_or_hex;

pub const BBQR_MAGIC: &str = "B$";

/// Body encoding flag.
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, TryFromPrimitive)]
pub enum BbqrEncoding {
    /// Upper-case hex, never compressed.
    Hex = b'H',
    /// Base32, uncompressed.
    Base32 = b'2',
    /// Raw DEFLATE, then base32.
    Deflate = b'Z',
}

impl BbqrEncoding {
    pub fn verify(raw: u8) -> Result<(), BbqrError> {
        match raw {
            x if x == BbqrEncoding::Hex as u8     => Ok(()),
            x if x == BbqrEncoding::Base32 as u8  => Ok(()),
            x if x == BbqrEncoding::Deflate as u8 => Ok(()),
            _ => Err(BbqrError::UnknownEncoding { raw }),
        }
    }

    pub fn from_raw(raw: u8) -> Result<Self, BbqrError> {
        BbqrEncoding::try_from_primitive(raw).map_err(|_| BbqrError::UnknownEncoding { raw })
    }

    pub fn as_char(self) -> char {
        self as u8 as char
    }
}

/// Payload content kind.
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, TryFromPrimitive)]
pub enum FileType {
    Psbt        = b'P',
    Transaction = b'T',
    Json        = b'J',
    Cbor        = b'C',
    UnicodeText = b'U',
    Executable  = b'X',
    Binary      = b'B',
}

impl FileType {
    pub fn verify(raw: u8) -> Result<(), BbqrError> {
        match raw {
            x if x == FileType::Psbt as u8        => Ok(()),
            x if x == FileType::Transaction as u8 => Ok(()),
            x if x == FileType::Json as u8        => Ok(()),
            x if x == FileType::Cbor as u8        => Ok(()),
            x if x == FileType::UnicodeText as u8 => Ok(()),
            x if x == FileType::Executable as u8  => Ok(()),
            x if x == FileType::Binary as u8      => Ok(()),
            _ => Err(BbqrError::UnknownFileType { raw }),
        }
    }

    pub fn from_raw(raw: u8) -> Result<Self, BbqrError> {
        FileType::try_from_primitive(raw).map_err(|_| BbqrError::UnknownFileType { raw })
    }

    pub fn as_char(self) -> char {
        self as u8 as char
    }

    /// Decoded payloads of these kinds are handed back as UTF-8 text.
    pub fn is_text(self) -> bool {
        matches!(self, FileType::UnicodeText | FileType::Json)
    }

    pub fn name(self) -> &'static str {
        match self {
            FileType::Psbt        => "PSBT",
            FileType::Transaction => "Transaction",
            FileType::Json        => "JSON",
            FileType::Cbor        => "CBOR",
            FileType::UnicodeText => "Unicode Text",
            FileType::Executable  => "Executable",
            FileType::Binary      => "Binary",
        }
    }
}

/// Parsed fixed-width header of one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BbqrHeader {
    pub encoding: BbqrEncoding,
    pub file_type: FileType,
    pub total: usize,
    /// 0-based.
    pub index: usize,
}

/// Encoded BBQR body (not yet split into frames).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BbqrCode {
    /// Upper-case, unpadded body text.
    pub payload: String,
    pub encoding: BbqrEncoding,
    pub file_type: FileType,
}

/// Reassembled BBQR content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BbqrData {
    Text(String),
    Bytes(Vec<u8>),
}

impl BbqrData {
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            BbqrData::Text(s) => s.as_bytes(),
            BbqrData::Bytes(b) => b,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BbqrError {
    /// Frame does not start with `B$` or is shorter than the header.
    InvalidHeader { frame_len: usize },

    /// Encoding flag outside {H, 2, Z}.
    UnknownEncoding { raw: u8 },

    /// File-type flag outside the registry.
    UnknownFileType { raw: u8 },

    /// Two-character base36 field is malformed.
    InvalidBase36 { field: String },

    /// Value does not fit two base36 digits.
    Base36Range { value: usize },

    /// Part index must be below the total.
    IndexOutOfRange { index: usize, total: usize },

    /// Hex body failed to decode.
    InvalidHex { msg: String },

    /// Base32 body failed to decode.
    Base(BaseError),

    /// DEFLATE stage failed.
    Compression(CompressionError),

    /// Text file type whose bytes are not UTF-8.
    InvalidUtf8,
}

impl fmt::Display for BbqrError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use BbqrError::*;
        match self {
            InvalidHeader { frame_len } =>
                write!(f, "invalid BBQR header (frame length {})", frame_len),
            UnknownEncoding { raw } =>
                write!(f, "invalid BBQR encoding: {}", enum_name_or_hex::<BbqrEncoding>(*raw)),
            UnknownFileType { raw } =>
                write!(f, "invalid BBQR file type: {}", enum_name_or_hex::<FileType>(*raw)),
            InvalidBase36 { field } =>
                write!(f, "invalid base36 field: {:?}", field),
            Base36Range { value } =>
                write!(f, "value {} does not fit two base36 digits", value),
            IndexOutOfRange { index, total } =>
                write!(f, "invalid part index {} for total {}", index, total),
            InvalidHex { msg } =>
                write!(f, "invalid hex body: {}", msg),
            Base(e) =>
                write!(f, "invalid base32 body: {}", e),
            Compression(e) =>
                write!(f, "{}", e),
            InvalidUtf8 =>
                write!(f, "text payload is not valid UTF-8"),
        }
    }
}

impl std::error::Error for BbqrError {}

impl From<BaseError> for BbqrError {
    fn from(e: BaseError) -> Self {
        BbqrError::Base(e)
    }
}

impl From<CompressionError> for BbqrError {
    fn from(e: CompressionError) -> Self {
        BbqrError::Compression(e)
    }
}
