//! bbqr/mod.rs
//! BBQR sub-codec: one fixed-width header per frame, base32 or hex body,
//! optional raw DEFLATE.
//!
//! Stateless per call. Frame splitting and part counting live in `qr`.

pub mod types;
pub mod encode;
pub mod decode;

pub use types::*;
pub use encode::*;
pub use decode::*;
