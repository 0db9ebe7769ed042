//! qr/parser.rs
//! Multi-part reassembly for one capture session.
//!
//! The session format is fixed by the first frame that parses. A frame that
//! fails to parse leaves the session untouched so capture can continue.

use std::collections::BTreeMap;

use crate::bbqr::{decode_bbqr, parse_bbqr, BbqrEncoding, FileType};
use crate::qr::detect::{detect_frame_format, parse_pmofn_qr_part};
use crate::qr::types::{Frame, QrError, QrFormat, QrResult};
use crate::qr::ur::UrDecoder;

pub struct QrPartParser {
    parts: BTreeMap<usize, Frame>,
    total: Option<usize>,
    format: Option<QrFormat>,
    decoder: Option<Box<dyn UrDecoder>>,
    bbqr: Option<(BbqrEncoding, FileType)>,
}

impl Default for QrPartParser {
    fn default() -> Self {
        Self::new()
    }
}

impl QrPartParser {
    /// Session without UR support.
    pub fn new() -> Self {
        Self {
            parts: BTreeMap::new(),
            total: None,
            format: None,
            decoder: None,
            bbqr: None,
        }
    }

    pub fn with_ur_decoder(decoder: Box<dyn UrDecoder>) -> Self {
        Self { decoder: Some(decoder), ..Self::new() }
    }

    pub fn format(&self) -> Option<QrFormat> {
        self.format
    }

    /// Encoding and file type fixed by the first BBQR frame.
    pub fn bbqr_params(&self) -> Option<(BbqrEncoding, FileType)> {
        self.bbqr
    }

    pub fn parse(&mut self, frame: impl Into<Frame>) -> Result<(), QrError> {
        let frame = frame.into();
        let detected = detect_frame_format(&frame);
        let mut format = self.format.unwrap_or(detected);

        let mut outcome = match format {
            QrFormat::None => Ok(()),
            QrFormat::Pmofn => self.parse_pmofn(&frame),
            QrFormat::Bbqr => self.parse_bbqr_frame(&frame),
            QrFormat::Ur => self.parse_ur(&frame, detected),
        };

        // Plain text that merely looks like `p..of` opens a NONE session.
        if self.format.is_none() && matches!(outcome, Err(QrError::MalformedPmofn)) {
            format = QrFormat::None;
            outcome = Ok(());
        }
        if format == QrFormat::None && outcome.is_ok() {
            self.parts.insert(1, frame);
            self.total = Some(1);
        }

        match &outcome {
            Ok(()) => {
                if self.format.is_none() {
                    log::debug!("qr: session format {:?}", format);
                    self.format = Some(format);
                }
            }
            Err(e) => log::debug!("qr: frame rejected: {}", e),
        }
        outcome
    }

    fn parse_pmofn(&mut self, frame: &Frame) -> Result<(), QrError> {
        let text = frame.as_text().ok_or(QrError::FormatMismatch {
            expected: QrFormat::Pmofn,
            got: QrFormat::None,
        })?;
        let (chunk, index, total) = parse_pmofn_qr_part(text)?;
        self.check_total(total)?;
        self.parts.insert(index, Frame::Text(chunk.to_string()));
        self.total = Some(total);
        Ok(())
    }

    fn parse_bbqr_frame(&mut self, frame: &Frame) -> Result<(), QrError> {
        let text = frame.as_text().ok_or(QrError::FormatMismatch {
            expected: QrFormat::Bbqr,
            got: QrFormat::None,
        })?;
        let (header, body) = parse_bbqr(text)?;
        if let Some(params) = self.bbqr {
            if params != (header.encoding, header.file_type) {
                return Err(QrError::BbqrMismatch);
            }
        }
        self.check_total(header.total)?;
        self.parts.insert(header.index, Frame::Text(body.to_string()));
        self.total = Some(header.total);
        self.bbqr = Some((header.encoding, header.file_type));
        Ok(())
    }

    fn parse_ur(&mut self, frame: &Frame, detected: QrFormat) -> Result<(), QrError> {
        if detected != QrFormat::Ur {
            return Err(QrError::FormatMismatch { expected: QrFormat::Ur, got: detected });
        }
        let decoder = self.decoder.as_mut().ok_or(QrError::UrUnavailable)?;
        let text = frame.as_text().ok_or(QrError::UrUnavailable)?;
        decoder
            .receive_part(text)
            .map_err(|e| QrError::UrRejected { msg: e.to_string() })
    }

    fn check_total(&self, total: usize) -> Result<(), QrError> {
        match self.total {
            Some(expected) if expected != total => Err(QrError::TotalMismatch { have: total, expected }),
            _ => Ok(()),
        }
    }

    fn is_ur(&self) -> bool {
        self.format == Some(QrFormat::Ur)
    }

    /// Parts received so far (blended with fountain progress for UR).
    pub fn parsed_count(&self) -> usize {
        if self.is_ur() {
            let Some(decoder) = self.decoder.as_ref() else {
                return 0;
            };
            if decoder.expected_part_count().is_none() {
                return usize::from(decoder.result().is_some());
            }
            let total = self.total_count().unwrap_or(0) as f64;
            let blended = (decoder.estimated_percent_complete() * total / 2.0).ceil() as usize;
            return blended + decoder.received_part_count();
        }
        self.parts.len()
    }

    pub fn processed_parts_count(&self) -> usize {
        if self.is_ur() {
            return self.decoder.as_ref().map_or(0, |d| d.processed_parts_count());
        }
        self.parts.len()
    }

    /// Expected part count; UR doubles the sequence length to cover the
    /// redundant phase of the fountain transmission.
    pub fn total_count(&self) -> Option<usize> {
        if self.is_ur() {
            let decoder = self.decoder.as_ref()?;
            return Some(decoder.expected_part_count().map_or(1, |n| n * 2));
        }
        self.total
    }

    pub fn is_complete(&self) -> bool {
        let Some(format) = self.format else {
            return false;
        };
        if format == QrFormat::Ur {
            return self.decoder.as_ref().map_or(false, |d| d.is_complete());
        }
        let Some(total) = self.total else {
            return false;
        };
        // Keys are distinct, so the right count between both bounds covers the range.
        let first = format.first_index();
        let Some(last) = (first + total).checked_sub(1) else {
            return false;
        };
        self.parts.len() == total
            && self.parts.keys().next() == Some(&first)
            && self.parts.keys().next_back() == Some(&last)
    }

    /// Combined payload of a completed session.
    pub fn result(&self) -> Result<QrResult, QrError> {
        if !self.is_complete() {
            return Err(QrError::Incomplete {
                parsed: self.parsed_count(),
                total: self.total_count(),
            });
        }
        match self.format {
            Some(QrFormat::Ur) => {
                let decoder = self.decoder.as_ref().ok_or(QrError::UrUnavailable)?;
                decoder.result().map(QrResult::Ur).ok_or(QrError::Incomplete {
                    parsed: self.parsed_count(),
                    total: self.total_count(),
                })
            }
            Some(QrFormat::Bbqr) => {
                let (encoding, file_type) = self.bbqr.ok_or(QrError::BbqrMismatch)?;
                let bodies = self.parts.values().filter_map(Frame::as_text);
                Ok(QrResult::Bbqr(decode_bbqr(bodies, encoding, file_type)?))
            }
            _ => {
                let mut code = String::new();
                for part in self.parts.values() {
                    match part {
                        // Binary frames are returned as-is, never concatenated.
                        Frame::Bytes(b) => return Ok(QrResult::Bytes(b.clone())),
                        Frame::Text(s) => code.push_str(s),
                    }
                }
                Ok(QrResult::Text(code))
            }
        }
    }
}
