//! Narrow seams to an external fountain-code (UR) implementation.
//!
//! The transport only needs progress and completion signals from the
//! decoder and a stream of part strings from the encoder.

use std::fmt;

use crate::qr::types::UrPayload;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrError(pub String);

impl fmt::Display for UrError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for UrError {}

pub trait UrDecoder: Send {
    /// Feed one `ur:` frame.
    fn receive_part(&mut self, part: &str) -> Result<(), UrError>;

    fn is_complete(&self) -> bool;

    /// Sequence length of a multi-part UR; `None` until known or for single-part URs.
    fn expected_part_count(&self) -> Option<usize>;

    /// Distinct fragment indexes received so far.
    fn received_part_count(&self) -> usize;

    /// Frames processed, including redundant mixed fragments.
    fn processed_parts_count(&self) -> usize;

    /// 0.0..=1.0
    fn estimated_percent_complete(&self) -> f64;

    fn result(&self) -> Option<UrPayload>;
}

pub trait UrEncoder: Send {
    fn next_part(&mut self) -> String;

    /// Number of pure fragments in one cycle.
    fn seq_len(&self) -> usize;
}

pub trait UrEncoderFactory {
    fn encoder(&self, ur: &UrPayload, max_fragment_len: usize) -> Result<Box<dyn UrEncoder>, UrError>;
}
