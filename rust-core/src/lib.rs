//! Streaming Spectrogram - Power/Phase Estimation Core
//!
//! Sliding-window spectral analysis of a sample stream with rectangular,
//! Hamming, Blackman-Harris or DPSS multitaper weighting.

pub mod buffer;
pub mod config;
pub mod error;
pub mod spectrum;
pub mod window;

pub use config::EngineConfig;
pub use error::{Result, SpectrogramError};
pub use spectrum::SpectrogramEngine;
pub use window::{DpssFiles, TaperSet, TaperSource, WindowFunction};
