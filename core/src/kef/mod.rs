//! kef/mod.rs
//! KEF: versioned AES-256 envelope for secrets carried through QR codes or storage.
//!
//! - `types`: the immutable version table and `KefError`.
//! - `cipher`: encrypt/decrypt for one version; wrong keys yield `Ok(None)`.
//! - `suggest`: which versions suit a plaintext.
//! - `envelope`: `len_id | id | version | iterations | payload` (de)serialization.

pub mod types;
pub mod kdf;
pub mod padding;
pub mod cipher;
pub mod suggest;
pub mod envelope;

pub use types::*;
pub use kdf::derive_key_32;
pub use cipher::{random_iv, Cipher};
pub use suggest::{suggest_versions, suggest_versions_by_name};
pub use envelope::{iterations_packable, kef_decode, kef_encode, KefEnvelope};
