//! airgap-codec
//!
//! QR transport codec and KEF encryption envelope for an offline signer.
//! Pure functions and one stateful capture session; no I/O, no threads.

#![forbid(unsafe_code)]

// Shared and top level
pub mod constants;
pub mod types;
pub mod utils;
pub mod config;

// Codecs
pub mod baseconv;
pub mod compression;
pub mod bbqr;

// Transport and envelope
pub mod qr;
pub mod kef;

// -----------------------------------------------------------------------------
// Prelude (Rust users)
// -----------------------------------------------------------------------------
pub mod prelude {
    pub use crate::types::CoreError;
    pub use crate::config::{CodecConfig, ConfigError, KefConfig, QrConfig};

    pub use crate::baseconv::{
        base_decode, base_encode, detect_encodings, hint_encodings, Base, BaseError, Encoding,
    };
    pub use crate::compression::{compress, decompress, CompressionError};
    pub use crate::bbqr::{decode_bbqr, encode_bbqr, BbqrCode, BbqrData, BbqrEncoding, BbqrError, FileType};

    pub use crate::qr::{
        detect_format, find_min_num_parts, to_qr_codes, Frame, QrData, QrError, QrFormat,
        QrPartParser, QrResult, UrDecoder, UrEncoder, UrEncoderFactory, UrPayload, UrTuning,
    };

    pub use crate::kef::{
        kef_decode, kef_encode, random_iv, suggest_versions, Cipher, KefEnvelope, KefError,
        KefErrorKind, Mode,
    };
}
