//! Engine configuration
//!
//! Fixed for the lifetime of an engine. Can be built in code or read from TOML:
//!
//! ```toml
//! window_size = 102
//! window = "multitaper"
//! sample_rate = 256.0
//! num_tapers = 5
//!
//! [tapers]
//! vectors = "dpss_E_102_5"
//! values = "dpss_V_102_5"
//! ```

use crate::error::{Result, SpectrogramError};
use crate::window::{DpssFiles, WindowFunction};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Spectrogram engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Frame length N in samples (>= 2)
    pub window_size: usize,

    /// Weighting applied to each frame
    pub window: WindowFunction,

    /// Sample rate in Hz
    pub sample_rate: f64,

    /// Number of DPSS tapers K (multitaper only)
    pub num_tapers: usize,

    /// Taper files (multitaper only)
    pub tapers: DpssFiles,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            window_size: 102,
            window: WindowFunction::Hamming,
            sample_rate: 256.0,
            num_tapers: 5,
            tapers: DpssFiles::default(),
        }
    }
}

impl EngineConfig {
    pub fn new(window_size: usize, window: WindowFunction, sample_rate: f64) -> Self {
        Self {
            window_size,
            window,
            sample_rate,
            ..Self::default()
        }
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(text).map_err(|e| SpectrogramError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read a TOML configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .map_err(|e| SpectrogramError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&text)
    }

    /// Check everything that does not need the taper files
    pub fn validate(&self) -> Result<()> {
        if self.window_size < 2 {
            return Err(SpectrogramError::InvalidWindowSize(self.window_size));
        }
        if !self.sample_rate.is_finite() || self.sample_rate <= 0.0 {
            return Err(SpectrogramError::InvalidSampleRate(self.sample_rate));
        }
        if self.window.uses_tapers() && self.num_tapers == 0 {
            return Err(SpectrogramError::InvalidTaperCount(self.num_tapers));
        }
        Ok(())
    }

    /// Number of output bins, N/2 + 1
    pub fn num_bins(&self) -> usize {
        self.window_size / 2 + 1
    }
}
