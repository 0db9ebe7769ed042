//! qr/mod.rs
//! QR transport: format detection, capacity solving, reassembly and frame
//! generation for NONE, PMOFN, BBQR and UR sequences.
//!
//! - Capture side: feed frames to a `QrPartParser`, poll `is_complete()`, take `result()`.
//! - Display side: `to_qr_codes` yields an endless cycle of `(frame, total_parts)`.
//! - UR fountain coding is external and plugs in through the traits in `ur`.

pub mod types;
pub mod ur;
pub mod detect;
pub mod capacity;
pub mod parser;
pub mod encoder;

pub use types::*;
pub use ur::{UrDecoder, UrEncoder, UrEncoderFactory, UrError};
pub use detect::{detect_format, detect_frame_format, parse_pmofn_qr_part};
pub use capacity::{find_min_num_parts, find_min_num_parts_tuned, max_qr_alnum, max_qr_bytes, qr_version};
pub use parser::QrPartParser;
pub use encoder::{to_qr_codes, to_qr_codes_with, QrCodes};
