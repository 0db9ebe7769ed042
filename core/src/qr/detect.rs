use crate::bbqr::BBQR_MAGIC;
use crate::constants::PMOFN_MAX_PARTS;
use crate::qr::types::{Frame, QrError, QrFormat};

/// Classify a text frame by its prefix.
pub fn detect_format(frame: &str) -> QrFormat {
    if frame.starts_with('p') && frame.find("of").map_or(false, |i| i <= 5) {
        return QrFormat::Pmofn;
    }
    if frame.get(..3).map_or(false, |p| p.eq_ignore_ascii_case("ur:")) {
        return QrFormat::Ur;
    }
    if frame.starts_with(BBQR_MAGIC) {
        return QrFormat::Bbqr;
    }
    QrFormat::None
}

/// Binary frames never carry a transport header.
pub fn detect_frame_format(frame: &Frame) -> QrFormat {
    match frame {
        Frame::Text(s) => detect_format(s),
        Frame::Bytes(_) => QrFormat::None,
    }
}

/// Split `p<index>of<total> <chunk>` into `(chunk, index, total)`; index is 1-based.
pub fn parse_pmofn_qr_part(frame: &str) -> Result<(&str, usize, usize), QrError> {
    let of_index = frame.find("of").ok_or(QrError::MalformedPmofn)?;
    let space_index = frame.find(' ').ok_or(QrError::MalformedPmofn)?;
    if !frame.starts_with('p') || space_index < of_index + 2 {
        return Err(QrError::MalformedPmofn);
    }

    let index: usize = frame[1..of_index].parse().map_err(|_| QrError::MalformedPmofn)?;
    let total: usize = frame[of_index + 2..space_index]
        .parse()
        .map_err(|_| QrError::MalformedPmofn)?;

    if total == 0 || total > PMOFN_MAX_PARTS || index == 0 || index > total {
        return Err(QrError::PartOutOfRange { index, total });
    }
    Ok((&frame[space_index + 1..], index, total))
}
