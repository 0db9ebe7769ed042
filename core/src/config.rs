//! config.rs
//! Tuning and policy knobs shared by the QR and KEF layers.
//!
//! Every field has a default, so `{}` is a valid configuration and partial
//! JSON documents only override what they name.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::QR_CAPACITY_BYTES;
use crate::kef::{iterations_packable, Mode};
use crate::qr::UrTuning;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Document is not valid JSON or has wrong field types.
    Json(String),
    /// Parsed but unusable values.
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Json(msg) => write!(f, "invalid config document: {}", msg),
            ConfigError::Invalid(msg) => write!(f, "invalid config value: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QrConfig {
    pub ur: UrTuning,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KefConfig {
    /// PBKDF2 rounds for newly sealed envelopes.
    pub iterations: u32,
    /// Refuse plaintexts that cannot be authenticated reliably or leak under ECB.
    pub fail_unsafe: bool,
    pub default_mode: Mode,
}

impl Default for KefConfig {
    fn default() -> Self {
        Self {
            iterations: 100_000,
            fail_unsafe: true,
            default_mode: Mode::Gcm,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    pub qr: QrConfig,
    pub kef: KefConfig,
}

impl CodecConfig {
    /// Parse and validate a JSON document.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let cfg: Self = serde_json::from_str(text).map_err(|e| ConfigError::Json(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::Json(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !iterations_packable(self.kef.iterations) {
            return Err(ConfigError::Invalid(format!(
                "kef.iterations={} cannot be stored in an envelope",
                self.kef.iterations
            )));
        }

        let ur = &self.qr.ur;
        let largest = QR_CAPACITY_BYTES[QR_CAPACITY_BYTES.len() - 1];
        if ur.overhead() >= largest {
            return Err(ConfigError::Invalid(format!(
                "qr.ur overhead {} leaves no room in a {}-byte QR",
                ur.overhead(),
                largest
            )));
        }
        if ur.min_fragment == 0 {
            return Err(ConfigError::Invalid("qr.ur.min_fragment must be positive".into()));
        }
        Ok(())
    }
}
