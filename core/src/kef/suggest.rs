//! kef/suggest.rs
//! Version recommendation for a plaintext and a preferred mode.
//!
//! Rules only eliminate; whatever survives is returned in table order.
//! - ECB plaintext with repeated blocks must compress.
//! - Legacy (16-byte inline checksum) block versions are never suggested.
//! - Small plaintexts stay small: no PKCS#7 unless NUL-terminated, no compression.
//! - Larger plaintexts need unambiguous padding, and compress once they are big.
//! - NUL-terminated plaintexts never get NUL padding.

use crate::constants::{AES_BLOCK_SIZE, BIG_PLAINTEXT, SMALL_PLAINTEXT};
use crate::kef::types::{KefError, KefVersion, Mode, Padding, VERSIONS};
use crate::utils::unique_blocks;

struct Metrics {
    len: usize,
    duplicates: bool,
    nul_suffix: bool,
}

impl Metrics {
    fn of(plaintext: &[u8]) -> Self {
        let len = plaintext.len();
        Self {
            len,
            duplicates: unique_blocks(plaintext, AES_BLOCK_SIZE) * AES_BLOCK_SIZE < len,
            nul_suffix: plaintext.last() == Some(&0),
        }
    }
}

fn acceptable(v: &KefVersion, mode: Mode, m: &Metrics) -> bool {
    if v.mode != mode {
        return false;
    }
    let ecb_carve_out = mode == Mode::Ecb && m.duplicates;
    if ecb_carve_out && !v.compress {
        return false;
    }
    if matches!(mode, Mode::Ecb | Mode::Cbc) && v.is_legacy() {
        return false;
    }

    if m.len <= SMALL_PLAINTEXT {
        if !ecb_carve_out && ((v.padding == Padding::Pkcs7 && !m.nul_suffix) || v.compress) {
            return false;
        }
    } else {
        if v.padding == Padding::Nul {
            return false;
        }
        if !ecb_carve_out {
            let big = m.len >= BIG_PLAINTEXT;
            if v.compress != big {
                return false;
            }
        }
    }

    !(m.nul_suffix && v.padding == Padding::Nul)
}

/// Version numbers acceptable for `plaintext` under `mode`, smallest first.
/// Empty plaintext has no acceptable version.
pub fn suggest_versions(plaintext: &[u8], mode: Mode) -> Vec<u8> {
    if plaintext.is_empty() {
        return Vec::new();
    }
    let metrics = Metrics::of(plaintext);
    let picked: Vec<u8> = VERSIONS
        .iter()
        .filter(|v| acceptable(v, mode, &metrics))
        .map(|v| v.number)
        .collect();
    log::debug!(
        "kef: suggest {} for {} bytes (duplicates={}, nul_suffix={}): {:?}",
        mode.name(),
        metrics.len,
        metrics.duplicates,
        metrics.nul_suffix,
        picked
    );
    picked
}

/// `suggest_versions` keyed by mode name ("AES-ECB", "AES-CBC", "AES-GCM").
pub fn suggest_versions_by_name(plaintext: &[u8], mode_name: &str) -> Result<Vec<u8>, KefError> {
    Ok(suggest_versions(plaintext, Mode::from_name(mode_name)?))
}
