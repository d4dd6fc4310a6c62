//! Streaming spectrogram engine
//!
//! Samples are pushed one at a time. Once N samples are buffered every
//! `process` call transforms the most recent N samples and replaces the
//! stored spectral estimate, which `power` and `phase` then read.

use super::extract::{phase_shift_ramp, phase_spectrum, power_spectrum};
use super::fft::FftEngine;
use crate::buffer::SampleBuffer;
use crate::config::EngineConfig;
use crate::error::{Result, SpectrogramError};
use crate::window::{TaperSource, Weighting};
use num_complex::Complex;

/// Streaming power/phase spectrogram
///
/// Not meant to be shared between threads while processing; run one engine
/// per channel instead.
pub struct SpectrogramEngine {
    config: EngineConfig,
    buffer: SampleBuffer,
    weighting: Weighting,
    fft_engine: FftEngine,

    /// Most recent spectral estimate, N/2 + 1 bins
    estimate: Vec<Complex<f64>>,

    has_estimate: bool,
}

impl SpectrogramEngine {
    /// Create an engine, reading multitaper coefficients from the files
    /// named in `config.tapers` when the multitaper window is selected
    pub fn new(config: EngineConfig) -> Result<Self> {
        let files = config.tapers.clone();
        Self::with_taper_source(config, &files)
    }

    /// Create an engine taking multitaper coefficients from `source`
    pub fn with_taper_source(config: EngineConfig, source: &dyn TaperSource) -> Result<Self> {
        config.validate()?;

        let weighting = Weighting::new(
            config.window,
            config.window_size,
            config.num_tapers,
            source,
        )?;
        let fft_engine = FftEngine::new(config.window_size);
        let estimate = vec![Complex::new(0.0, 0.0); fft_engine.num_bins()];

        tracing::debug!(
            "Spectrogram engine: window={:?} size={} bins={} tapers={} sample_rate={}",
            config.window,
            config.window_size,
            fft_engine.num_bins(),
            weighting.num_tapers(),
            config.sample_rate
        );

        Ok(Self {
            buffer: SampleBuffer::new(config.window_size),
            config,
            weighting,
            fft_engine,
            estimate,
            has_estimate: false,
        })
    }

    /// Push one sample into the analysis window
    pub fn add_point(&mut self, sample: f64) {
        self.buffer.push(sample);
    }

    /// Transform the current window if it is full
    ///
    /// # Returns
    /// `false` while fewer than N samples have been pushed, `true` once a
    /// new estimate has been stored
    pub fn process(&mut self) -> Result<bool> {
        if !self.buffer.is_full() {
            return Ok(false);
        }

        let samples = self.buffer.linearize();
        self.weighting
            .apply(samples, &mut self.fft_engine, &mut self.estimate)?;

        if !self.has_estimate {
            tracing::info!(
                "Analysis window filled ({} samples), producing estimates",
                self.config.window_size
            );
            self.has_estimate = true;
        }

        Ok(true)
    }

    /// Write normalised power per bin into `out` (N/2 + 1 values)
    pub fn power(&self, out: &mut [f64]) -> Result<()> {
        let estimate = self.current()?;
        power_spectrum(estimate, self.weighting.normalization_divisor(), out)
    }

    /// Write index-corrected phase per bin into `out` (N/2 + 1 values)
    ///
    /// # Arguments
    /// * `sample_index` - Running index of the last pushed sample
    /// * `phase_shift` - Optionally filled with the π·k/(bins-1) reference ramp
    pub fn phase(
        &self,
        out: &mut [f64],
        sample_index: u64,
        phase_shift: Option<&mut [f64]>,
    ) -> Result<()> {
        let estimate = self.current()?;
        phase_spectrum(estimate, self.config.window_size, sample_index, out)?;

        if let Some(shift) = phase_shift {
            if shift.len() != estimate.len() {
                return Err(SpectrogramError::OutputLength {
                    expected: estimate.len(),
                    found: shift.len(),
                });
            }
            phase_shift_ramp(shift);
        }
        Ok(())
    }

    /// Allocating variant of [`power`](Self::power)
    pub fn power_vec(&self) -> Result<Vec<f64>> {
        let mut out = vec![0.0; self.num_bins()];
        self.power(&mut out)?;
        Ok(out)
    }

    /// Allocating variant of [`phase`](Self::phase)
    pub fn phase_vec(&self, sample_index: u64) -> Result<Vec<f64>> {
        let mut out = vec![0.0; self.num_bins()];
        self.phase(&mut out, sample_index, None)?;
        Ok(out)
    }

    /// Raw complex estimate of the last processed window
    pub fn estimate(&self) -> Result<&[Complex<f64>]> {
        self.current()
    }

    fn current(&self) -> Result<&[Complex<f64>]> {
        if !self.has_estimate {
            return Err(SpectrogramError::NoEstimate);
        }
        Ok(&self.estimate)
    }

    /// Get frequency of each bin in Hz
    pub fn frequency_bins_hz(&self) -> Vec<f64> {
        (0..self.num_bins())
            .map(|bin| self.fft_engine.bin_to_hz(bin, self.config.sample_rate))
            .collect()
    }

    /// True once the window holds N samples
    pub fn is_ready(&self) -> bool {
        self.buffer.is_full()
    }

    /// Get number of frequency bins
    pub fn num_bins(&self) -> usize {
        self.fft_engine.num_bins()
    }

    pub fn window_size(&self) -> usize {
        self.config.window_size
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}
