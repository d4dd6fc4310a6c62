//! FFT engine using realfft for real-valued signals
//!
//! Planned once for a fixed frame length; every buffer it touches is
//! allocated up front so `execute` is allocation free.

use crate::error::{Result, SpectrogramError};
use num_complex::Complex;
use realfft::{RealFftPlanner, RealToComplex};
use std::sync::Arc;

/// FFT engine for real-valued signals
pub struct FftEngine {
    /// FFT size (number of samples)
    fft_size: usize,

    /// Real FFT processor
    r2c: Arc<dyn RealToComplex<f64>>,

    /// Reusable input buffer (overwritten by each transform)
    input_buffer: Vec<f64>,

    /// Reusable output buffer (complex spectrum)
    output_buffer: Vec<Complex<f64>>,

    scratch: Vec<Complex<f64>>,
}

impl FftEngine {
    /// Create new FFT engine
    ///
    /// # Arguments
    /// * `fft_size` - FFT size (number of samples)
    pub fn new(fft_size: usize) -> Self {
        let mut planner = RealFftPlanner::<f64>::new();
        let r2c = planner.plan_fft_forward(fft_size);

        let input_buffer = r2c.make_input_vec();
        let output_buffer = r2c.make_output_vec();
        let scratch = r2c.make_scratch_vec();

        Self {
            fft_size,
            r2c,
            input_buffer,
            output_buffer,
            scratch,
        }
    }

    /// Fill the input buffer with `samples[n] * weights[n]`
    ///
    /// Both sequences must cover the full frame.
    pub fn load_weighted<'a, W>(&mut self, samples: &[f64], weights: W)
    where
        W: IntoIterator<Item = &'a f64>,
    {
        for ((dst, &s), &w) in self.input_buffer.iter_mut().zip(samples).zip(weights) {
            *dst = s * w;
        }
    }

    /// Transform the loaded input
    ///
    /// # Returns
    /// X[k] for k = 0..fft_size/2 (positive frequencies only)
    pub fn execute(&mut self) -> Result<&[Complex<f64>]> {
        self.r2c
            .process_with_scratch(
                &mut self.input_buffer,
                &mut self.output_buffer,
                &mut self.scratch,
            )
            .map_err(|e| SpectrogramError::Transform(e.to_string()))?;

        Ok(&self.output_buffer)
    }

    /// Get FFT size
    pub fn fft_size(&self) -> usize {
        self.fft_size
    }

    /// Get number of frequency bins (fft_size/2 + 1 for real FFT)
    pub fn num_bins(&self) -> usize {
        self.fft_size / 2 + 1
    }

    /// Convert bin index to Hz
    pub fn bin_to_hz(&self, bin: usize, sample_rate: f64) -> f64 {
        bin as f64 * sample_rate / self.fft_size as f64
    }
}
