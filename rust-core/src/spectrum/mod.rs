//! Spectral estimation with FFT

pub mod fft;
pub mod extract;
pub mod engine;

pub use fft::FftEngine;
pub use extract::{phase_shift_ramp, phase_spectrum, power_spectrum, to_db};
pub use engine::SpectrogramEngine;
