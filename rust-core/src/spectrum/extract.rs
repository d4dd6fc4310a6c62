//! Power and phase extraction from a complex spectral estimate

use crate::error::{Result, SpectrogramError};
use num_complex::Complex;
use std::f64::consts::PI;

fn check_len(expected: usize, found: usize) -> Result<()> {
    if expected != found {
        return Err(SpectrogramError::OutputLength { expected, found });
    }
    Ok(())
}

/// Normalised magnitude per bin: |X[k]| / divisor
pub fn power_spectrum(estimate: &[Complex<f64>], divisor: f64, out: &mut [f64]) -> Result<()> {
    check_len(estimate.len(), out.len())?;

    for (p, x) in out.iter_mut().zip(estimate) {
        *p = x.norm() / divisor;
    }
    Ok(())
}

/// Phase per bin with the running-index ramp removed
///
/// phase[k] = arg(X[k]) - (sample_index mod N) / N² · k · 2π
///
/// # Arguments
/// * `estimate` - Spectral estimate of a frame of `window_size` samples
/// * `sample_index` - Index of the sample that completed the frame
/// * `out` - One value per bin
pub fn phase_spectrum(
    estimate: &[Complex<f64>],
    window_size: usize,
    sample_index: u64,
    out: &mut [f64],
) -> Result<()> {
    if window_size < 2 {
        return Err(SpectrogramError::InvalidWindowSize(window_size));
    }
    check_len(estimate.len(), out.len())?;

    let n = window_size as u64;
    let offset = (sample_index % n) as f64 / (window_size * window_size) as f64;

    for (k, (phase, x)) in out.iter_mut().zip(estimate).enumerate() {
        *phase = x.im.atan2(x.re) - offset * k as f64 * 2.0 * PI;
    }
    Ok(())
}

/// Linear ramp π·k/(bins-1), used as a phase reference when plotting
pub fn phase_shift_ramp(out: &mut [f64]) {
    let last = out.len().saturating_sub(1).max(1) as f64;
    for (k, shift) in out.iter_mut().enumerate() {
        *shift = PI * k as f64 / last;
    }
}

/// Convert magnitudes to dB: 20*log10(|x|/reference)
pub fn to_db(values: &[f64], reference: f64) -> Vec<f64> {
    values
        .iter()
        .map(|&v| {
            let clamped = v.max(1e-10); // Avoid log(0)
            20.0 * (clamped / reference).log10()
        })
        .collect()
}
