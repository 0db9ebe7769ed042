use crate::baseconv::base32;
use crate::bbqr::types::{BbqrCode, BbqrEncoding, BbqrError, BbqrHeader, FileType, BBQR_MAGIC};
use crate::compression;
use crate::constants::{BBQR_ALWAYS_COMPRESS, BBQR_MAX_PARTS};

const B36: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Two-digit base36 for 0..=1295.
pub fn int_to_base36(value: usize) -> Result<String, BbqrError> {
    if value > BBQR_MAX_PARTS {
        return Err(BbqrError::Base36Range { value });
    }
    let hi = B36[value / 36] as char;
    let lo = B36[value % 36] as char;
    Ok([hi, lo].iter().collect())
}

/// Encode `data` as a BBQR body.
///
/// `Hex` bypasses compression. `Base32` never compresses. `Deflate` always
/// compresses above the size threshold; below it, compression is kept only
/// when it shrinks the data and the returned encoding falls back to `Base32`
/// otherwise.
pub fn encode_bbqr(
    data: &[u8],
    preferred: BbqrEncoding,
    file_type: FileType,
) -> Result<BbqrCode, BbqrError> {
    let (payload, encoding) = match preferred {
        BbqrEncoding::Hex => (hex::encode_upper(data), BbqrEncoding::Hex),
        BbqrEncoding::Base32 => (base32::encode(data), BbqrEncoding::Base32),
        BbqrEncoding::Deflate if data.len() > BBQR_ALWAYS_COMPRESS => {
            let packed = compression::compress(data)?;
            (base32::encode(&packed), BbqrEncoding::Deflate)
        }
        BbqrEncoding::Deflate => {
            let packed = compression::compress(data)?;
            if packed.len() >= data.len() {
                (base32::encode(data), BbqrEncoding::Base32)
            } else {
                (base32::encode(&packed), BbqrEncoding::Deflate)
            }
        }
    };

    log::debug!(
        "bbqr: {} bytes as {:?}/{:?} -> {} chars",
        data.len(), encoding, file_type, payload.len()
    );
    Ok(BbqrCode { payload, encoding, file_type })
}

/// Render the 8-character header for one frame.
pub fn bbqr_header(h: &BbqrHeader) -> Result<String, BbqrError> {
    if h.index >= h.total {
        return Err(BbqrError::IndexOutOfRange { index: h.index, total: h.total });
    }
    let mut out = String::with_capacity(8);
    out.push_str(BBQR_MAGIC);
    out.push(h.encoding.as_char());
    out.push(h.file_type.as_char());
    out.push_str(&int_to_base36(h.total)?);
    out.push_str(&int_to_base36(h.index)?);
    Ok(out)
}
