//! qr/types.rs
//! Formats, frames, results and errors for the QR transport.

use std::fmt;
use num_enum::TryFromPrimitive;
use serde::{Deserialize, Serialize};

use crate::bbqr::{BbqrCode, BbqrData, BbqrError};
use crate::utils::enum_name_or_hex;

/// Wire format of a QR sequence. Numbering follows the firmware registry.
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, TryFromPrimitive)]
pub enum QrFormat {
    None  = 0,
    Pmofn = 1,
    Ur    = 2,
    Bbqr  = 3,
}

impl QrFormat {
    pub fn verify(raw: u8) -> Result<(), QrError> {
        match raw {
            x if x == QrFormat::None as u8  => Ok(()),
            x if x == QrFormat::Pmofn as u8 => Ok(()),
            x if x == QrFormat::Ur as u8    => Ok(()),
            x if x == QrFormat::Bbqr as u8  => Ok(()),
            _ => Err(QrError::UnknownFormat { raw }),
        }
    }

    /// NONE and PMOFN count parts from 1; BBQR counts from 0.
    pub fn first_index(self) -> usize {
        match self {
            QrFormat::Bbqr => 0,
            _ => 1,
        }
    }
}

/// One decoded QR frame as delivered by the camera pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    Text(String),
    Bytes(Vec<u8>),
}

impl Frame {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Frame::Text(s) => Some(s),
            Frame::Bytes(_) => None,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Frame::Text(s) => s.len(),
            Frame::Bytes(b) => b.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<&str> for Frame {
    fn from(s: &str) -> Self {
        Frame::Text(s.to_string())
    }
}

impl From<String> for Frame {
    fn from(s: String) -> Self {
        Frame::Text(s)
    }
}

impl From<Vec<u8>> for Frame {
    fn from(b: Vec<u8>) -> Self {
        Frame::Bytes(b)
    }
}

/// Typed UR result handed back by the fountain decoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrPayload {
    pub ur_type: String,
    pub cbor: Vec<u8>,
}

/// Payload handed to the encoder side.
#[derive(Debug, Clone, Copy)]
pub enum QrData<'a> {
    Text(&'a str),
    Bytes(&'a [u8]),
    Bbqr(&'a BbqrCode),
    Ur(&'a UrPayload),
}

/// Reassembled result of a completed capture session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QrResult {
    Text(String),
    Bytes(Vec<u8>),
    Bbqr(BbqrData),
    Ur(UrPayload),
}

/// UR framing overheads used by the capacity solver and progress counts.
///
/// These approximate the external fountain encoder's framing and are kept
/// configurable for encoders with different overheads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UrTuning {
    /// Index prefix such as `ur:crypto-psbt/xxx-xx/`.
    pub generic_prefix: usize,
    /// CBOR part header, doubled by bytewords.
    pub cbor_prefix: usize,
    /// Bytewords CRC32, doubled by bytewords.
    pub bytewords_crc: usize,
    /// Smallest fragment handed to the encoder.
    pub min_fragment: usize,
}

impl Default for UrTuning {
    fn default() -> Self {
        Self {
            generic_prefix: 22,
            cbor_prefix: 14,
            bytewords_crc: 4,
            min_fragment: 10,
        }
    }
}

impl UrTuning {
    /// Characters lost per frame before any payload fits.
    pub fn overhead(&self) -> usize {
        self.generic_prefix + (self.cbor_prefix + self.bytewords_crc) * 2
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QrError {
    /// Raw format number outside the registry.
    UnknownFormat { raw: u8 },

    /// Operation has no meaning for this format (e.g. solving parts for NONE).
    InvalidFormat { format: QrFormat },

    /// Payload kind cannot be carried by the requested format.
    UnsupportedData { format: QrFormat },

    /// Nothing to encode.
    EmptyData,

    /// PMOFN frame without a parsable `p<i>of<n> ` header.
    MalformedPmofn,

    /// Part index outside the session's expected range.
    PartOutOfRange { index: usize, total: usize },

    /// Frame disagrees with the total recorded for the session.
    TotalMismatch { have: usize, expected: usize },

    /// Frame does not belong to the session's format.
    FormatMismatch { expected: QrFormat, got: QrFormat },

    /// BBQR frame with a different encoding or file type than the session.
    BbqrMismatch,

    /// BBQR header or body error.
    Bbqr(BbqrError),

    /// UR frame received without a fountain decoder or encoder.
    UrUnavailable,

    /// The external UR component rejected a frame.
    UrRejected { msg: String },

    /// `result()` called before the session completed.
    Incomplete { parsed: usize, total: Option<usize> },

    /// QR version too small for the format's fixed overhead.
    CapacityTooSmall { capacity: usize, overhead: usize },

    /// Solved part count does not fit the format's index field.
    TooManyParts { parts: usize, max: usize },
}

impl fmt::Display for QrError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use QrError::*;
        match self {
            UnknownFormat { raw } =>
                write!(f, "unknown QR format: {}", enum_name_or_hex::<QrFormat>(*raw)),
            InvalidFormat { format } =>
                write!(f, "invalid format type: {:?}", format),
            UnsupportedData { format } =>
                write!(f, "payload kind not supported by {:?}", format),
            EmptyData =>
                write!(f, "no data to encode"),
            MalformedPmofn =>
                write!(f, "malformed pMofN header"),
            PartOutOfRange { index, total } =>
                write!(f, "part index {} out of range for total {}", index, total),
            TotalMismatch { have, expected } =>
                write!(f, "part total {} does not match session total {}", have, expected),
            FormatMismatch { expected, got } =>
                write!(f, "frame format {:?} does not match session format {:?}", got, expected),
            BbqrMismatch =>
                write!(f, "BBQR encoding or file type changed mid-session"),
            Bbqr(e) =>
                write!(f, "{}", e),
            UrUnavailable =>
                write!(f, "no UR codec configured"),
            UrRejected { msg } =>
                write!(f, "UR part rejected: {}", msg),
            Incomplete { parsed, total } => match total {
                Some(t) => write!(f, "capture incomplete: {}/{}", parsed, t),
                None => write!(f, "capture incomplete: nothing parsed"),
            },
            CapacityTooSmall { capacity, overhead } =>
                write!(f, "QR capacity {} too small for overhead {}", capacity, overhead),
            TooManyParts { parts, max } =>
                write!(f, "{} parts exceed format maximum {}", parts, max),
        }
    }
}

impl std::error::Error for QrError {}

impl From<BbqrError> for QrError {
    fn from(e: BbqrError) -> Self {
        QrError::Bbqr(e)
    }
}
