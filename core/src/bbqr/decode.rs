use crate::baseconv::base32;
use crate::bbqr::types::{BbqrData, BbqrEncoding, BbqrError, BbqrHeader, FileType, BBQR_MAGIC};
use crate::compression;
use crate::constants::BBQR_HEADER_LEN;

/// Inverse of `int_to_base36`; accepts either letter case.
pub fn base36_to_int(field: &str) -> Result<usize, BbqrError> {
    let bad = || BbqrError::InvalidBase36 { field: field.to_string() };
    if field.len() != 2 {
        return Err(bad());
    }
    let mut value = 0usize;
    for c in field.chars() {
        let digit = c.to_digit(36).ok_or_else(bad)?;
        value = value * 36 + digit as usize;
    }
    Ok(value)
}

/// Split one frame into its header and body.
pub fn parse_bbqr(frame: &str) -> Result<(BbqrHeader, &str), BbqrError> {
    let raw = frame.as_bytes();
    if raw.len() < BBQR_HEADER_LEN || !frame.starts_with(BBQR_MAGIC) {
        return Err(BbqrError::InvalidHeader { frame_len: raw.len() });
    }

    let encoding = BbqrEncoding::from_raw(raw[2])?;
    let file_type = FileType::from_raw(raw[3])?;

    let total_field = frame.get(4..6).ok_or(BbqrError::InvalidHeader { frame_len: raw.len() })?;
    let index_field = frame.get(6..8).ok_or(BbqrError::InvalidHeader { frame_len: raw.len() })?;
    let total = base36_to_int(total_field)?;
    let index = base36_to_int(index_field)?;
    if index >= total {
        return Err(BbqrError::IndexOutOfRange { index, total });
    }

    let body = frame.get(BBQR_HEADER_LEN..).ok_or(BbqrError::InvalidHeader { frame_len: raw.len() })?;
    Ok((BbqrHeader { encoding, file_type, total, index }, body))
}

/// Reassemble a BBQR payload from its bodies, given in index order.
///
/// Base32 bodies are padded to a multiple of 8 characters individually
/// since only the final part can end mid-quantum.
pub fn decode_bbqr<'a, I>(
    parts: I,
    encoding: BbqrEncoding,
    file_type: FileType,
) -> Result<BbqrData, BbqrError>
where
    I: IntoIterator<Item = &'a str>,
{
    let binary = match encoding {
        BbqrEncoding::Hex => {
            let joined: String = parts.into_iter().collect();
            hex::decode(joined).map_err(|e| BbqrError::InvalidHex { msg: e.to_string() })?
        }
        BbqrEncoding::Base32 | BbqrEncoding::Deflate => {
            let mut out = Vec::new();
            for part in parts {
                let padding = (8 - part.len() % 8) % 8;
                let mut padded = String::with_capacity(part.len() + padding);
                padded.push_str(part);
                padded.extend(std::iter::repeat(base32::PAD as char).take(padding));
                out.extend(base32::decode(&padded)?);
            }
            out
        }
    };

    let binary = if encoding == BbqrEncoding::Deflate {
        compression::decompress(&binary)?
    } else {
        binary
    };

    if file_type.is_text() {
        let text = String::from_utf8(binary).map_err(|_| BbqrError::InvalidUtf8)?;
        return Ok(BbqrData::Text(text));
    }
    Ok(BbqrData::Bytes(binary))
}
