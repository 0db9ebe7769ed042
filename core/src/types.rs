use thiserror::Error;

use crate::{
    baseconv::BaseError,
    bbqr::BbqrError,
    compression::CompressionError,
    config::ConfigError,
    kef::KefError,
    qr::QrError,
};

/// Crate-wide error so callers can `?` across codec layers.
/// Module errors stay the primary API; this only wraps them.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("base conversion error: {0}")]
    Base(#[from] BaseError),

    #[error("compression error: {0}")]
    Compression(#[from] CompressionError),

    #[error("bbqr error: {0}")]
    Bbqr(#[from] BbqrError),

    #[error("qr error: {0}")]
    Qr(#[from] QrError),

    #[error("kef error: {0}")]
    Kef(#[from] KefError),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// Decryption ran but the secret did not authenticate.
    #[error("decryption failed")]
    DecryptionFailed,
}
