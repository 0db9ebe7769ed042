//! kef/envelope.rs
//! KEF wire container.
//!
//! Layout (big-endian):
//! ```text
//! u8 len_id | id[len_id] | u8 version | u24 iterations | payload
//! ```
//! - Iterations that are a multiple of 10000 are stored as the quotient (1..=10000),
//!   anything else verbatim (10000 < n < 2^24). On read, a stored value of at most
//!   10000 is scaled back up.
//! - For padded versions, `payload - iv - trailing auth` must be a positive
//!   multiple of the AES block size.

use std::fmt;

use byteorder::{BigEndian, ByteOrder};

use crate::baseconv::{base_decode, base_encode, Base};
use crate::constants::{kef_limits, AES_BLOCK_SIZE};
use crate::kef::cipher::Cipher;
use crate::kef::types::{version, KefError, KefVersion, Mode};
use crate::utils::fmt_bytes;

/// Bytes between the id and the payload: version (1) + iterations (3).
const FIXED_AFTER_ID: usize = 4;

fn pack_iterations(iterations: u32) -> Result<u32, KefError> {
    use kef_limits::*;
    let invalid = KefError::InvalidIterations { value: iterations };
    if iterations % ITERATION_UNIT == 0 {
        let q = iterations / ITERATION_UNIT;
        if (1..=MAX_PACKED_QUOTIENT).contains(&q) { Ok(q) } else { Err(invalid) }
    } else if iterations > ITERATION_UNIT && iterations <= MAX_RAW_ITERATIONS {
        Ok(iterations)
    } else {
        Err(invalid)
    }
}

fn unpack_iterations(stored: u32) -> Result<u32, KefError> {
    match stored {
        0 => Err(KefError::InvalidIterations { value: 0 }),
        n if n <= kef_limits::MAX_PACKED_QUOTIENT => Ok(n * kef_limits::ITERATION_UNIT),
        n => Ok(n),
    }
}

/// Whether `iterations` can be stored in an envelope.
pub fn iterations_packable(iterations: u32) -> bool {
    pack_iterations(iterations).is_ok()
}

fn check_payload(v: &KefVersion, payload: &[u8]) -> Result<(), KefError> {
    let extra = v.mode.iv_len() + v.auth.trailing_len();
    if v.is_padded() {
        let body = payload.len().checked_sub(extra).ok_or(KefError::TooShort { len: payload.len() })?;
        if body % AES_BLOCK_SIZE != 0 {
            return Err(KefError::NotAligned { len: body });
        }
        if body < AES_BLOCK_SIZE {
            return Err(KefError::TooShort { len: body });
        }
    } else if payload.len() <= extra {
        return Err(KefError::TooShort { len: payload.len() });
    }
    Ok(())
}

/// Serialize an envelope. Fails on an oversized id, an unknown version,
/// unpackable iterations or a misaligned payload.
pub fn kef_encode(id: &[u8], version_no: u8, iterations: u32, payload: &[u8]) -> Result<Vec<u8>, KefError> {
    if id.len() > kef_limits::MAX_ID_LEN {
        return Err(KefError::InvalidId { len: id.len() });
    }
    let v = version(version_no)?;
    let packed = pack_iterations(iterations)?;
    check_payload(v, payload)?;

    let mut out = vec![0u8; 1 + id.len() + FIXED_AFTER_ID + payload.len()];
    let mut i = 0usize;

    fn put_u8(out: &mut [u8], i: &mut usize, b: u8) { out[*i] = b; *i += 1; }
    fn put_u24(out: &mut [u8], i: &mut usize, v: u32) { BigEndian::write_u24(&mut out[*i..*i + 3], v); *i += 3; }
    fn put_bytes(out: &mut [u8], i: &mut usize, b: &[u8]) { out[*i..*i + b.len()].copy_from_slice(b); *i += b.len(); }

    put_u8(&mut out, &mut i, id.len() as u8);
    put_bytes(&mut out, &mut i, id);
    put_u8(&mut out, &mut i, version_no);
    put_u24(&mut out, &mut i, packed);
    put_bytes(&mut out, &mut i, payload);
    debug_assert_eq!(i, out.len());

    Ok(out)
}

/// Parse an envelope into `(id, version, iterations, payload)`.
pub fn kef_decode(bytes: &[u8]) -> Result<(Vec<u8>, u8, u32, Vec<u8>), KefError> {
    let env = KefEnvelope::decode(bytes)?;
    Ok((env.id, env.version, env.iterations, env.payload))
}

/// Owned KEF envelope. The id is also the key-stretching salt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KefEnvelope {
    pub id: Vec<u8>,
    pub version: u8,
    pub iterations: u32,
    pub payload: Vec<u8>,
}

impl KefEnvelope {
    pub fn encode(&self) -> Result<Vec<u8>, KefError> {
        kef_encode(&self.id, self.version, self.iterations, &self.payload)
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, KefError> {
        let len_id = *bytes.first().ok_or(KefError::Truncated { have: 0, need: 1 })? as usize;
        let need = 1 + len_id + FIXED_AFTER_ID;
        if bytes.len() < need {
            // version is read first so an unknown version wins over truncation
            if let Some(&raw) = bytes.get(1 + len_id) {
                version(raw)?;
            }
            return Err(KefError::Truncated { have: bytes.len(), need });
        }

        let version_no = bytes[1 + len_id];
        let v = version(version_no)?;
        let id = bytes[1..1 + len_id].to_vec();
        let iterations = unpack_iterations(BigEndian::read_u24(&bytes[2 + len_id..need]))?;
        let payload = &bytes[need..];
        check_payload(v, payload)?;

        Ok(Self { id, version: version_no, iterations, payload: payload.to_vec() })
    }

    pub fn version_info(&self) -> Result<&'static KefVersion, KefError> {
        version(self.version)
    }

    /// Encrypt `plaintext` under a key stretched from `secret` and `id`.
    pub fn seal(
        secret: &[u8],
        id: &[u8],
        version_no: u8,
        iterations: u32,
        plaintext: &[u8],
        iv: &[u8],
    ) -> Result<Self, KefError> {
        Self::seal_with(secret, id, version_no, iterations, plaintext, iv, true)
    }

    pub fn seal_with(
        secret: &[u8],
        id: &[u8],
        version_no: u8,
        iterations: u32,
        plaintext: &[u8],
        iv: &[u8],
        fail_unsafe: bool,
    ) -> Result<Self, KefError> {
        if id.len() > kef_limits::MAX_ID_LEN {
            return Err(KefError::InvalidId { len: id.len() });
        }
        version(version_no)?;
        pack_iterations(iterations)?;
        let cipher = Cipher::new(secret, id, iterations)?;
        let payload = cipher.encrypt_with(plaintext, version_no, iv, fail_unsafe)?;
        log::debug!(
            "kef: sealed v{} id_len={} payload_len={}",
            version_no,
            id.len(),
            payload.len()
        );
        Ok(Self { id: id.to_vec(), version: version_no, iterations, payload })
    }

    /// Plaintext, or `None` when `secret` does not authenticate.
    pub fn open(&self, secret: &[u8]) -> Result<Option<Vec<u8>>, KefError> {
        let cipher = Cipher::new(secret, &self.id, self.iterations)?;
        cipher.decrypt(&self.payload, self.version)
    }

    pub fn mode(&self) -> Result<Mode, KefError> {
        Ok(self.version_info()?.mode)
    }

    pub fn to_base(&self, base: Base) -> Result<String, KefError> {
        Ok(base_encode(&self.encode()?, base))
    }

    pub fn from_base(text: &str, base: Base) -> Result<Self, KefError> {
        Self::decode(&base_decode(text, base)?)
    }
}

impl fmt::Display for KefEnvelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = version(self.version).map_or("unknown", |v| v.name);
        write!(
            f,
            "KEF {} {} ({}) iterations={} payload={} bytes",
            fmt_bytes(&self.id),
            name,
            self.version,
            self.iterations,
            self.payload.len()
        )
    }
}
