//! qr/capacity.rs
//! QR version capacity lookup and the part-count solver.
//!
//! Widths are in QR modules. The frame allowance is removed before mapping
//! `17 + 4 * version` back to a version, which is then clamped to 1..=20.

use crate::constants::{
    BBQR_HEADER_LEN, BBQR_MAX_PARTS, PMOFN_MAX_PARTS, PMOFN_PREFIX_1D, PMOFN_PREFIX_2D,
    QR_CAPACITY_ALNUM, QR_CAPACITY_BYTES, QR_FRAME_MODULES,
};
use crate::qr::types::{QrData, QrError, QrFormat, UrTuning};
use crate::utils::div_ceil;

/// QR version (1..=20) whose module width fits `max_width`.
pub fn qr_version(max_width: usize) -> usize {
    let width = max_width.saturating_sub(QR_FRAME_MODULES);
    let version = width.saturating_sub(17) / 4;
    version.clamp(1, QR_CAPACITY_BYTES.len())
}

/// Byte-mode capacity at `max_width`.
pub fn max_qr_bytes(max_width: usize) -> usize {
    QR_CAPACITY_BYTES[qr_version(max_width) - 1]
}

/// Alphanumeric-mode capacity at `max_width` (upper-case base32 bodies).
pub fn max_qr_alnum(max_width: usize) -> usize {
    QR_CAPACITY_ALNUM[qr_version(max_width) - 1]
}

/// Length the solver splits for `format`, in characters or bytes.
fn payload_len(data: &QrData<'_>, format: QrFormat) -> Result<usize, QrError> {
    let len = match (format, data) {
        (QrFormat::Pmofn, QrData::Text(s)) => s.chars().count(),
        (QrFormat::Bbqr, QrData::Bbqr(code)) => code.payload.len(),
        (QrFormat::Ur, QrData::Ur(ur)) => ur.cbor.len(),
        (QrFormat::None, _) => return Err(QrError::InvalidFormat { format }),
        _ => return Err(QrError::UnsupportedData { format }),
    };
    if len == 0 {
        return Err(QrError::EmptyData);
    }
    Ok(len)
}

/// Minimum `(num_parts, part_size)` for `data` at `max_width` in `format`.
pub fn find_min_num_parts(
    data: &QrData<'_>,
    max_width: usize,
    format: QrFormat,
) -> Result<(usize, usize), QrError> {
    find_min_num_parts_tuned(data, max_width, format, &UrTuning::default())
}

pub fn find_min_num_parts_tuned(
    data: &QrData<'_>,
    max_width: usize,
    format: QrFormat,
    tuning: &UrTuning,
) -> Result<(usize, usize), QrError> {
    let len = payload_len(data, format)?;
    let solved = match format {
        QrFormat::Pmofn => solve_pmofn(len, max_qr_bytes(max_width))?,
        QrFormat::Bbqr => solve_bbqr(len, max_qr_alnum(max_width))?,
        QrFormat::Ur => solve_ur(len, max_qr_bytes(max_width), tuning)?,
        QrFormat::None => return Err(QrError::InvalidFormat { format }),
    };
    log::debug!(
        "qr: {:?} {} units at width {} -> {} parts of {}",
        format, len, max_width, solved.0, solved.1
    );
    Ok(solved)
}

fn solve_pmofn(len: usize, capacity: usize) -> Result<(usize, usize), QrError> {
    if capacity <= PMOFN_PREFIX_2D {
        return Err(QrError::CapacityTooSmall { capacity, overhead: PMOFN_PREFIX_2D });
    }
    let mut num_parts = div_ceil(len, capacity - PMOFN_PREFIX_1D);
    if num_parts > 9 {
        // Two-digit part numbers widen the prefix.
        num_parts = div_ceil(len, capacity - PMOFN_PREFIX_2D);
    }
    if num_parts > PMOFN_MAX_PARTS {
        return Err(QrError::TooManyParts { parts: num_parts, max: PMOFN_MAX_PARTS });
    }
    Ok((num_parts, div_ceil(len, num_parts)))
}

fn solve_bbqr(len: usize, capacity: usize) -> Result<(usize, usize), QrError> {
    let max_part = capacity.saturating_sub(BBQR_HEADER_LEN);
    if len <= max_part {
        return Ok((1, len));
    }
    // Non-final parts must end on a base32 quantum.
    let max_part = max_part / 8 * 8;
    if max_part == 0 {
        return Err(QrError::CapacityTooSmall { capacity, overhead: BBQR_HEADER_LEN + 8 });
    }

    // Balance the parts, then re-derive the count from the rounded size.
    let num_parts = div_ceil(len, max_part);
    let part_size = div_ceil(div_ceil(len, num_parts), 8) * 8;
    let num_parts = div_ceil(len, part_size);

    if num_parts > BBQR_MAX_PARTS {
        return Err(QrError::TooManyParts { parts: num_parts, max: BBQR_MAX_PARTS });
    }
    Ok((num_parts, part_size))
}

fn solve_ur(cbor_len: usize, capacity: usize, tuning: &UrTuning) -> Result<(usize, usize), QrError> {
    let overhead = tuning.overhead();
    if capacity <= overhead {
        return Err(QrError::CapacityTooSmall { capacity, overhead });
    }
    // Bytewords doubles every byte.
    let num_parts = div_ceil(cbor_len * 2, capacity - overhead);
    let part_size = (cbor_len / num_parts).max(tuning.min_fragment);
    Ok((num_parts, part_size))
}
