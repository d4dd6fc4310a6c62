//! Error types for the spectrogram engine

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SpectrogramError {
    #[error("Window size must be at least 2 samples (got {0})")]
    InvalidWindowSize(usize),

    #[error("Sample rate must be finite and positive (got {0} Hz)")]
    InvalidSampleRate(f64),

    #[error("Multitaper estimation needs at least one taper (got {0})")]
    InvalidTaperCount(usize),

    #[error("Failed to read taper file {path:?}: {source}")]
    TaperIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid number {token:?} in taper data at line {line}")]
    TaperParse { line: usize, token: String },

    #[error("Taper data has {found} {what}, expected {expected}")]
    TaperShape {
        what: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("No spectral estimate available yet (window not filled)")]
    NoEstimate,

    #[error("Output buffer has {found} bins, expected {expected}")]
    OutputLength { expected: usize, found: usize },

    #[error("FFT processing failed: {0}")]
    Transform(String),
}

pub type Result<T> = std::result::Result<T, SpectrogramError>;
