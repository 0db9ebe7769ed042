//! kef/kdf.rs
//! Key stretching for KEF envelopes.
//!
//! Design:
//! - PBKDF2-HMAC-SHA256(secret, salt = envelope id, iterations) -> 32-byte AES key.
//! - The key lives only inside a `Cipher` and is wiped on drop.

use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;
use zeroize::Zeroizing;

use crate::constants::KEY_LEN_32;
use crate::kef::types::KefError;

/// Summary: stretch `secret` into a 32-byte key bound to `salt`.
///
/// Errors:
/// - Zero iterations returns `KefError::InvalidIterations`.
#[inline]
pub fn derive_key_32(
    secret: &[u8],
    salt: &[u8],
    iterations: u32,
) -> Result<Zeroizing<[u8; KEY_LEN_32]>, KefError> {
    if iterations == 0 {
        return Err(KefError::InvalidIterations { value: iterations });
    }
    let mut key = Zeroizing::new([0u8; KEY_LEN_32]);
    pbkdf2_hmac::<Sha256>(secret, salt, iterations, key.as_mut());
    Ok(key)
}
