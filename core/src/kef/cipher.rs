//! kef/cipher.rs
//! AES-256 encrypt/decrypt under the rules of a KEF version.
//!
//! Design notes:
//! - ECB and CBC carry a truncated sha256 checksum, either inline (encrypted
//!   with the plaintext) or appended (keyed with the derived key, in the clear).
//! - GCM uses its native tag truncated to the version's length. Decryption
//!   computes GHASH over the ciphertext and checks the truncated tag before
//!   running the CTR stage, since tags below 12 bytes are not accepted by AEAD
//!   APIs.
//! - Checksum and tag comparisons run in constant time.
//! - Authentication failure is `Ok(None)`; `Err` is reserved for format errors,
//!   policy refusals and misuse.

use aes::Aes256;
use aes::cipher::{generic_array::GenericArray, BlockDecrypt, BlockEncrypt, KeyInit};
use aes_gcm::aead::AeadInPlace;
use aes_gcm::{Aes256Gcm, Nonce};
use cbc::cipher::{block_padding::NoPadding, BlockDecryptMut, BlockEncryptMut, KeyIvInit, StreamCipher};
use ghash::universal_hash::UniversalHash;
use ghash::{Block, GHash};
use rand::RngCore;
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;
use zeroize::Zeroizing;

use crate::compression;
use crate::constants::{AES_BLOCK_SIZE, KEY_LEN_32};
use crate::kef::kdf::derive_key_32;
use crate::kef::padding::{pad, unpad};
use crate::kef::types::{version, Auth, KefError, KefVersion, Mode, Padding};
use crate::utils::unique_blocks;

/// Fresh random IV of the length `mode` requires (empty for ECB).
pub fn random_iv(mode: Mode) -> Vec<u8> {
    let mut iv = vec![0u8; mode.iv_len()];
    rand::thread_rng().fill_bytes(&mut iv);
    iv
}

fn backend(what: &str) -> KefError {
    KefError::Backend(what.to_string())
}

pub struct Cipher {
    key: Zeroizing<[u8; KEY_LEN_32]>,
}

impl Cipher {
    /// Stretch `secret` with `salt` (the envelope id) into the AES key.
    pub fn new(secret: &[u8], salt: &[u8], iterations: u32) -> Result<Self, KefError> {
        Ok(Self { key: derive_key_32(secret, salt, iterations)? })
    }

    /// Use an already derived key.
    pub fn from_key(key: [u8; KEY_LEN_32]) -> Self {
        Self { key: Zeroizing::new(key) }
    }

    /// `encrypt_with` refusing unsafe plaintexts.
    pub fn encrypt(&self, plain: &[u8], version_no: u8, iv: &[u8]) -> Result<Vec<u8>, KefError> {
        self.encrypt_with(plain, version_no, iv, true)
    }

    /// Returns `iv || ciphertext || trailing auth`.
    pub fn encrypt_with(
        &self,
        plain: &[u8],
        version_no: u8,
        iv: &[u8],
        fail_unsafe: bool,
    ) -> Result<Vec<u8>, KefError> {
        let v = version(version_no)?;
        if plain.is_empty() {
            return Err(KefError::EmptyPlaintext);
        }

        let mut buf = Zeroizing::new(if v.compress {
            compression::compress(plain)?
        } else {
            plain.to_vec()
        });

        let nul_padded = v.padding == Padding::Nul;
        if fail_unsafe && nul_padded && matches!(v.auth, Auth::Appended(_)) && buf.last() == Some(&0) {
            log::debug!("kef: v{} refused, trailing NUL", v.number);
            return Err(KefError::UnsafePadding);
        }

        let mut trailing = Vec::new();
        match v.auth {
            Auth::Appended(n) => trailing = self.keyed_checksum(v.number, iv, &buf, n),
            Auth::Inline(n) => {
                let auth = plain_checksum(&buf, n);
                if fail_unsafe && nul_padded && auth.last() == Some(&0) {
                    log::debug!("kef: v{} refused, checksum ends in NUL", v.number);
                    return Err(KefError::UnsafePadding);
                }
                buf.extend_from_slice(&auth);
            }
            Auth::Native(_) => {}
        }

        let padded = Zeroizing::new(pad(std::mem::take(&mut *buf), v.padding));

        if fail_unsafe && v.mode == Mode::Ecb
            && unique_blocks(&padded, AES_BLOCK_SIZE) != padded.len() / AES_BLOCK_SIZE
        {
            log::debug!("kef: v{} refused, duplicate ECB blocks", v.number);
            return Err(KefError::DuplicateBlocks);
        }

        check_iv(v, iv)?;

        let mut out = Vec::with_capacity(iv.len() + padded.len() + v.auth.trailing_len());
        out.extend_from_slice(iv);
        match v.mode {
            Mode::Ecb => {
                let mut ct = padded.to_vec();
                self.ecb(&mut ct, true)?;
                out.extend_from_slice(&ct);
            }
            Mode::Cbc => {
                let enc = cbc::Encryptor::<Aes256>::new_from_slices(&self.key[..], iv)
                    .map_err(|_| backend("CBC init"))?;
                out.extend_from_slice(&enc.encrypt_padded_vec_mut::<NoPadding>(&padded));
            }
            Mode::Gcm => {
                let mut ct = padded.to_vec();
                let tag = self.gcm_tag(iv, &mut ct)?;
                out.extend_from_slice(&ct);
                trailing = tag[..v.auth.len()].to_vec();
            }
        }
        out.extend_from_slice(&trailing);
        Ok(out)
    }

    /// Plaintext, `Ok(None)` when authentication fails.
    pub fn decrypt(&self, payload: &[u8], version_no: u8) -> Result<Option<Vec<u8>>, KefError> {
        let v = version(version_no)?;
        let iv_len = v.mode.iv_len();
        let trailing_len = v.auth.trailing_len();
        let min_ct = if v.is_padded() { AES_BLOCK_SIZE } else { 1 };

        if payload.len() < iv_len + trailing_len + min_ct {
            return Err(KefError::InvalidPayload { len: payload.len() });
        }
        let (iv, rest) = payload.split_at(iv_len);
        let (ct, auth) = rest.split_at(rest.len() - trailing_len);
        if v.is_padded() && ct.len() % AES_BLOCK_SIZE != 0 {
            return Err(KefError::NotAligned { len: ct.len() });
        }

        if v.mode == Mode::Gcm && !self.gcm_tag_matches(iv, ct, auth)? {
            log::debug!("kef: v{} authentication failed", v.number);
            return Ok(None);
        }

        let decrypted = match v.mode {
            Mode::Ecb => {
                let mut buf = ct.to_vec();
                self.ecb(&mut buf, false)?;
                buf
            }
            Mode::Cbc => {
                let dec = cbc::Decryptor::<Aes256>::new_from_slices(&self.key[..], iv)
                    .map_err(|_| backend("CBC init"))?;
                dec.decrypt_padded_vec_mut::<NoPadding>(ct)
                    .map_err(|_| backend("CBC decrypt"))?
            }
            Mode::Gcm => self.gcm_keystream(iv, ct)?,
        };

        let plain = match v.mode {
            Mode::Gcm => Some(decrypted),
            _ => self.authenticate(v, iv, decrypted, auth),
        };

        let Some(plain) = plain else {
            log::debug!("kef: v{} authentication failed", v.number);
            return Ok(None);
        };
        if v.compress {
            let plain = Zeroizing::new(plain);
            return Ok(Some(compression::decompress(&plain)?));
        }
        Ok(Some(plain))
    }

    /// Checksum verification for ECB/CBC, tolerating NUL padding that
    /// swallowed trailing zero bytes of the plaintext or inline checksum.
    fn authenticate(&self, v: &KefVersion, iv: &[u8], decrypted: Vec<u8>, trailing: &[u8]) -> Option<Vec<u8>> {
        let len_pre_unpad = decrypted.len();
        let mut plain = unpad(decrypted, v.padding);

        let n = v.auth.len();
        let mut auth = match v.auth {
            Auth::Inline(_) => plain.split_off(plain.len().saturating_sub(n)),
            _ => trailing.to_vec(),
        };

        let max_attempts = if v.padding == Padding::Nul {
            (len_pre_unpad - plain.len()).min(n + 1) + 1
        } else {
            1
        };

        for _ in 0..max_attempts {
            let cksum = match v.auth {
                Auth::Appended(_) => self.keyed_checksum(v.number, iv, &plain, n),
                _ => plain_checksum(&plain, n),
            };
            if bool::from(cksum[..].ct_eq(&auth[..])) {
                return Some(plain);
            }

            match v.auth {
                Auth::Inline(_) => {
                    // Assume unpad also stripped a NUL that belonged to the checksum.
                    if auth.is_empty() {
                        break;
                    }
                    plain.push(auth.remove(0));
                    auth.push(0);
                }
                _ => plain.push(0),
            }
        }
        None
    }

    /// Tag over `ct` with empty AAD: `GHASH_H(ct, lengths) ^ E_K(iv || 00000001)`,
    /// compared against the first `auth.len()` bytes.
    fn gcm_tag_matches(&self, iv: &[u8], ct: &[u8], auth: &[u8]) -> Result<bool, KefError> {
        let cipher = Aes256::new_from_slice(&self.key[..]).map_err(|_| backend("GCM init"))?;
        let mut h = Block::default();
        cipher.encrypt_block(&mut h);

        let mut ghash = GHash::new(&h);
        ghash.update_padded(ct);
        let mut lengths = Block::default();
        lengths[8..].copy_from_slice(&(ct.len() as u64 * 8).to_be_bytes());
        ghash.update(&[lengths]);
        let mut tag = ghash.finalize();

        let mut j0 = Block::default();
        j0[..iv.len()].copy_from_slice(iv);
        j0[AES_BLOCK_SIZE - 1] = 1;
        cipher.encrypt_block(&mut j0);
        for (t, m) in tag.iter_mut().zip(j0.iter()) {
            *t ^= m;
        }

        let Some(tag) = tag.get(..auth.len()) else {
            return Ok(false);
        };
        Ok(tag.ct_eq(auth).into())
    }

    fn ecb(&self, data: &mut [u8], encrypt: bool) -> Result<(), KefError> {
        let cipher = Aes256::new_from_slice(&self.key[..]).map_err(|_| backend("ECB init"))?;
        for block in data.chunks_exact_mut(AES_BLOCK_SIZE) {
            let block = GenericArray::from_mut_slice(block);
            if encrypt {
                cipher.encrypt_block(block);
            } else {
                cipher.decrypt_block(block);
            }
        }
        Ok(())
    }

    /// Encrypts `data` in place and returns the full 16-byte tag.
    fn gcm_tag(&self, iv: &[u8], data: &mut [u8]) -> Result<Vec<u8>, KefError> {
        let gcm = Aes256Gcm::new_from_slice(&self.key[..]).map_err(|_| backend("GCM init"))?;
        let tag = gcm
            .encrypt_in_place_detached(Nonce::from_slice(iv), b"", data)
            .map_err(|_| backend("GCM encrypt"))?;
        Ok(tag.to_vec())
    }

    /// GCM payload keystream: CTR32 starting at `iv || 00000002`.
    fn gcm_keystream(&self, iv: &[u8], ct: &[u8]) -> Result<Vec<u8>, KefError> {
        let mut counter = [0u8; AES_BLOCK_SIZE];
        counter[..iv.len()].copy_from_slice(iv);
        counter[AES_BLOCK_SIZE - 1] = 2;
        let mut stream = ctr::Ctr32BE::<Aes256>::new_from_slices(&self.key[..], &counter)
            .map_err(|_| backend("CTR init"))?;
        let mut buf = ct.to_vec();
        stream.apply_keystream(&mut buf);
        Ok(buf)
    }

    fn keyed_checksum(&self, version_no: u8, iv: &[u8], plain: &[u8], n: usize) -> Vec<u8> {
        let mut h = Sha256::new();
        h.update([version_no]);
        h.update(iv);
        h.update(plain);
        h.update(&self.key[..]);
        h.finalize()[..n].to_vec()
    }
}

fn plain_checksum(plain: &[u8], n: usize) -> Vec<u8> {
    Sha256::digest(plain)[..n].to_vec()
}

fn check_iv(v: &KefVersion, iv: &[u8]) -> Result<(), KefError> {
    let expected = v.mode.iv_len();
    if expected > 0 && iv.len() != expected {
        return Err(KefError::WrongIvLen { expected, actual: iv.len() });
    }
    if expected == 0 && !iv.is_empty() {
        return Err(KefError::IvNotRequired { len: iv.len() });
    }
    Ok(())
}
