//! Window functions for spectral analysis
//!
//! Weights applied to a frame before the FFT to reduce spectral leakage.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Window function types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WindowFunction {
    /// No tapering: every sample weighted by 1.0
    #[serde(alias = "none")]
    Rectangular,

    /// Hamming window: w[n] = 0.54 - 0.46*cos(2πn/(N-1))
    /// Sidelobe attenuation: ~43 dB
    Hamming,

    /// 4-term Blackman-Harris window
    /// Sidelobe attenuation: ~92 dB
    BlackmanHarris,

    /// Weighted average over a set of DPSS tapers loaded at construction
    Multitaper,
}

impl WindowFunction {
    /// True if this variant needs externally supplied tapers
    pub fn uses_tapers(&self) -> bool {
        matches!(self, WindowFunction::Multitaper)
    }
}

/// Generate window coefficients
///
/// # Arguments
/// * `window` - Window function
/// * `length` - Number of samples (N >= 2)
///
/// # Returns
/// w[n] for n = 0..N-1, or `None` for `Multitaper`, which has no single
/// coefficient vector
pub fn generate_window(window: WindowFunction, length: usize) -> Option<Vec<f64>> {
    let denom = (length as f64 - 1.0).max(1.0);
    let angle = |n: usize| 2.0 * PI * n as f64 / denom;

    let coefficients = match window {
        WindowFunction::Rectangular => vec![1.0; length],

        WindowFunction::Hamming => (0..length)
            .map(|n| 0.54 - 0.46 * angle(n).cos())
            .collect(),

        WindowFunction::BlackmanHarris => (0..length)
            .map(|n| {
                let a = angle(n);
                0.35875 - 0.48829 * a.cos() + 0.14128 * (2.0 * a).cos()
                    - 0.01168 * (3.0 * a).cos()
            })
            .collect(),

        WindowFunction::Multitaper => return None,
    };

    Some(coefficients)
}
