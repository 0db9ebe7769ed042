//! qr/encoder.rs
//! Frame generator for the display loop.
//!
//! `QrCodes` never ends: it cycles through the parts until the caller stops
//! pulling, yielding `(frame, total_parts)` each time.

use crate::bbqr::{bbqr_header, encode_bbqr, BbqrCode, BbqrEncoding, BbqrHeader, FileType};
use crate::qr::capacity::find_min_num_parts_tuned;
use crate::qr::types::{Frame, QrData, QrError, QrFormat, UrTuning};
use crate::qr::ur::{UrEncoder, UrEncoderFactory};

enum Source {
    Single(Frame),
    Pmofn {
        text: String,
        /// Byte offsets of chunk boundaries, `num_parts + 1` entries.
        bounds: Vec<usize>,
    },
    Bbqr {
        code: BbqrCode,
        part_size: usize,
        /// One `B$` header per part, rendered up front.
        headers: Vec<String>,
    },
    Ur(Box<dyn UrEncoder>),
}

pub struct QrCodes {
    source: Source,
    cursor: usize,
    total: usize,
}

impl QrCodes {
    pub fn total(&self) -> usize {
        match &self.source {
            Source::Ur(enc) => enc.seq_len(),
            _ => self.total,
        }
    }

}

impl Iterator for QrCodes {
    type Item = (Frame, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.cursor;
        let frame = match &mut self.source {
            Source::Ur(enc) => {
                let part = enc.next_part();
                return Some((Frame::Text(part), enc.seq_len()));
            }
            Source::Single(frame) => frame.clone(),
            Source::Pmofn { text, bounds } => {
                let chunk = &text[bounds[index]..bounds[index + 1]];
                Frame::Text(format!("p{}of{} {}", index + 1, self.total, chunk))
            }
            Source::Bbqr { code, part_size, headers } => {
                let start = index * *part_size;
                let end = (start + *part_size).min(code.payload.len());
                Frame::Text(format!("{}{}", headers[index], &code.payload[start..end]))
            }
        };
        self.cursor = (index + 1) % self.total;
        Some((frame, self.total))
    }
}

/// Frames for `data` in `format` without UR support.
pub fn to_qr_codes(
    data: QrData<'_>,
    max_width: usize,
    format: QrFormat,
    file_type: Option<FileType>,
) -> Result<QrCodes, QrError> {
    to_qr_codes_with(data, max_width, format, file_type, None, &UrTuning::default())
}

pub fn to_qr_codes_with(
    data: QrData<'_>,
    max_width: usize,
    format: QrFormat,
    file_type: Option<FileType>,
    ur_factory: Option<&dyn UrEncoderFactory>,
    tuning: &UrTuning,
) -> Result<QrCodes, QrError> {
    match format {
        QrFormat::None => {
            let frame = match data {
                QrData::Text(s) => Frame::Text(s.to_string()),
                QrData::Bytes(b) => Frame::Bytes(b.to_vec()),
                _ => return Err(QrError::UnsupportedData { format }),
            };
            Ok(QrCodes { source: Source::Single(frame), cursor: 0, total: 1 })
        }
        QrFormat::Pmofn => {
            let QrData::Text(text) = data else {
                return Err(QrError::UnsupportedData { format });
            };
            let (num_parts, part_size) = find_min_num_parts_tuned(&data, max_width, format, tuning)?;
            let bounds = char_bounds(text, part_size, num_parts);
            Ok(QrCodes {
                source: Source::Pmofn { text: text.to_string(), bounds },
                cursor: 0,
                total: num_parts,
            })
        }
        QrFormat::Bbqr => {
            let code = match data {
                QrData::Bbqr(code) => code.clone(),
                QrData::Text(s) => encode_bbqr(
                    s.as_bytes(),
                    BbqrEncoding::Deflate,
                    file_type.unwrap_or(FileType::UnicodeText),
                )?,
                QrData::Bytes(b) => encode_bbqr(
                    b,
                    BbqrEncoding::Deflate,
                    file_type.unwrap_or(FileType::Psbt),
                )?,
                QrData::Ur(_) => return Err(QrError::UnsupportedData { format }),
            };
            let (num_parts, part_size) =
                find_min_num_parts_tuned(&QrData::Bbqr(&code), max_width, format, tuning)?;
            let headers = (0..num_parts)
                .map(|index| {
                    bbqr_header(&BbqrHeader {
                        encoding: code.encoding,
                        file_type: code.file_type,
                        total: num_parts,
                        index,
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            Ok(QrCodes {
                source: Source::Bbqr { code, part_size, headers },
                cursor: 0,
                total: num_parts,
            })
        }
        QrFormat::Ur => {
            let QrData::Ur(ur) = data else {
                return Err(QrError::UnsupportedData { format });
            };
            let factory = ur_factory.ok_or(QrError::UrUnavailable)?;
            let (_, part_size) = find_min_num_parts_tuned(&data, max_width, format, tuning)?;
            let encoder = factory
                .encoder(ur, part_size)
                .map_err(|e| QrError::UrRejected { msg: e.to_string() })?;
            let total = encoder.seq_len();
            Ok(QrCodes { source: Source::Ur(encoder), cursor: 0, total })
        }
    }
}

/// Byte offsets splitting `text` into `num_parts` runs of `part_size` chars,
/// the last run taking the remainder.
fn char_bounds(text: &str, part_size: usize, num_parts: usize) -> Vec<usize> {
    let mut bounds = Vec::with_capacity(num_parts + 1);
    bounds.push(0);
    let mut offsets = text.char_indices().map(|(i, _)| i).step_by(part_size).skip(1);
    for _ in 1..num_parts {
        bounds.push(offsets.next().unwrap_or(text.len()));
    }
    bounds.push(text.len());
    bounds
}
