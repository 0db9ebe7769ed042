//! kef/types.rs
//! Version table and error taxonomy for the KEF envelope.
//!
//! Version numbers are append-only: a number is never reassigned, and gaps
//! (2-4, 8-9, 13-19) are reserved.

use std::fmt;
use serde::{Deserialize, Serialize};

use crate::baseconv::BaseError;
use crate::compression::CompressionError;
use crate::constants::iv_lens;

/// AES-256 block mode.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    #[serde(rename = "AES-ECB")]
    Ecb,
    #[serde(rename = "AES-CBC")]
    Cbc,
    #[serde(rename = "AES-GCM")]
    Gcm,
}

impl Mode {
    pub fn iv_len(self) -> usize {
        match self {
            Mode::Ecb => iv_lens::ECB,
            Mode::Cbc => iv_lens::CBC,
            Mode::Gcm => iv_lens::GCM,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Mode::Ecb => "AES-ECB",
            Mode::Cbc => "AES-CBC",
            Mode::Gcm => "AES-GCM",
        }
    }

    pub fn from_name(name: &str) -> Result<Self, KefError> {
        match name {
            "AES-ECB" => Ok(Mode::Ecb),
            "AES-CBC" => Ok(Mode::Cbc),
            "AES-GCM" => Ok(Mode::Gcm),
            other => Err(KefError::UnknownMode { name: other.to_string() }),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Padding {
    /// Zero-fill to the block boundary (ambiguous with trailing NULs).
    Nul,
    /// PKCS#7, always at least one byte.
    Pkcs7,
    /// Stream mode, no padding.
    None,
}

/// Where the authentication bytes live and how many there are.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Auth {
    /// sha256(version || iv || plaintext || key), truncated, after the ciphertext.
    Appended(usize),
    /// sha256(plaintext), truncated, encrypted along with the plaintext.
    Inline(usize),
    /// GCM tag, truncated, after the ciphertext.
    Native(usize),
}

impl Auth {
    pub fn len(self) -> usize {
        match self {
            Auth::Appended(n) | Auth::Inline(n) | Auth::Native(n) => n,
        }
    }

    /// Bytes that sit after the ciphertext on the wire.
    pub fn trailing_len(self) -> usize {
        match self {
            Auth::Appended(n) | Auth::Native(n) => n,
            Auth::Inline(_) => 0,
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct KefVersion {
    pub number: u8,
    pub name: &'static str,
    pub mode: Mode,
    pub padding: Padding,
    pub auth: Auth,
    pub compress: bool,
}

impl KefVersion {
    /// Block modes carry a block-aligned ciphertext.
    pub fn is_padded(&self) -> bool {
        self.padding != Padding::None
    }

    /// Superseded by smaller encodings; decrypt-only in practice.
    pub fn is_legacy(&self) -> bool {
        matches!(self.auth, Auth::Inline(16))
    }
}

const fn v(
    number: u8,
    name: &'static str,
    mode: Mode,
    padding: Padding,
    auth: Auth,
    compress: bool,
) -> KefVersion {
    KefVersion { number, name, mode, padding, auth, compress }
}

pub static VERSIONS: [KefVersion; 10] = [
    // initial encrypted-mnemonic versions
    v(0,  "AES-ECB v1", Mode::Ecb, Padding::Nul,   Auth::Inline(16),  false),
    v(1,  "AES-CBC v1", Mode::Cbc, Padding::Nul,   Auth::Inline(16),  false),
    v(5,  "AES-ECB",    Mode::Ecb, Padding::Nul,   Auth::Appended(3), false),
    v(6,  "AES-ECB +p", Mode::Ecb, Padding::Pkcs7, Auth::Inline(4),   false),
    v(7,  "AES-ECB +c", Mode::Ecb, Padding::Pkcs7, Auth::Inline(4),   true),
    v(10, "AES-CBC",    Mode::Cbc, Padding::Nul,   Auth::Appended(4), false),
    v(11, "AES-CBC +p", Mode::Cbc, Padding::Pkcs7, Auth::Inline(4),   false),
    v(12, "AES-CBC +c", Mode::Cbc, Padding::Pkcs7, Auth::Inline(4),   true),
    v(20, "AES-GCM",    Mode::Gcm, Padding::None,  Auth::Native(4),   false),
    v(21, "AES-GCM +c", Mode::Gcm, Padding::None,  Auth::Native(4),   true),
];

pub fn version(number: u8) -> Result<&'static KefVersion, KefError> {
    VERSIONS
        .iter()
        .find(|v| v.number == number)
        .ok_or(KefError::UnknownVersion { raw: number })
}

impl KefVersion {
    pub fn verify(raw: u8) -> Result<(), KefError> {
        version(raw).map(|_| ())
    }
}

/// Coarse class of a `KefError`. Authentication failures are never errors.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum KefErrorKind {
    /// Malformed or truncated input, unknown registry value.
    Format,
    /// The encryptor refused to produce output for this plaintext.
    Policy,
    /// Caller passed arguments the version cannot use.
    Usage,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KefError {
    UnknownVersion { raw: u8 },
    UnknownMode { name: String },

    InvalidId { len: usize },
    InvalidIterations { value: u32 },
    Truncated { have: usize, need: usize },
    NotAligned { len: usize },
    TooShort { len: usize },
    InvalidPayload { len: usize },

    EmptyPlaintext,
    IvNotRequired { len: usize },
    WrongIvLen { expected: usize, actual: usize },

    UnsafePadding,
    DuplicateBlocks,

    Compression(CompressionError),
    Base(BaseError),
    Backend(String),
}

impl KefError {
    pub fn kind(&self) -> KefErrorKind {
        use KefError::*;
        match self {
            UnsafePadding | DuplicateBlocks => KefErrorKind::Policy,
            EmptyPlaintext | UnknownMode { .. } | IvNotRequired { .. } | WrongIvLen { .. }
            | Backend(_) => KefErrorKind::Usage,
            _ => KefErrorKind::Format,
        }
    }
}

impl fmt::Display for KefError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use KefError::*;
        match self {
            UnknownVersion { raw } =>
                write!(f, "invalid version: {}", raw),
            UnknownMode { name } =>
                write!(f, "unknown mode: {:?}", name),
            InvalidId { len } =>
                write!(f, "invalid ID (length {})", len),
            InvalidIterations { value } =>
                write!(f, "invalid iterations: {}", value),
            Truncated { have, need } =>
                write!(f, "invalid format: {} bytes, need at least {}", have, need),
            NotAligned { len } =>
                write!(f, "ciphertext is not aligned ({} bytes)", len),
            TooShort { len } =>
                write!(f, "ciphertext is too short ({} bytes)", len),
            InvalidPayload { len } =>
                write!(f, "invalid payload ({} bytes)", len),
            EmptyPlaintext =>
                write!(f, "plaintext is empty"),
            IvNotRequired { len } =>
                write!(f, "IV is not required (got {} bytes)", len),
            WrongIvLen { expected, actual } =>
                write!(f, "wrong IV length: expected={}, actual={}", expected, actual),
            UnsafePadding =>
                write!(f, "cannot validate decryption for this plaintext"),
            DuplicateBlocks =>
                write!(f, "duplicate blocks in ECB mode"),
            Compression(e) =>
                write!(f, "{}", e),
            Base(e) =>
                write!(f, "{}", e),
            Backend(msg) =>
                write!(f, "cipher failure: {}", msg),
        }
    }
}

impl std::error::Error for KefError {}

impl From<CompressionError> for KefError {
    fn from(e: CompressionError) -> Self {
        KefError::Compression(e)
    }
}

impl From<BaseError> for KefError {
    fn from(e: BaseError) -> Self {
        KefError::Base(e)
    }
}
