//! Per-frame weighting strategy
//!
//! Selected once from the configured [`WindowFunction`]; owns whatever
//! coefficients the variant needs and knows how to normalise its output.

use super::functions::{generate_window, WindowFunction};
use super::taper::{TaperSet, TaperSource};
use crate::error::{Result, SpectrogramError};
use crate::spectrum::fft::FftEngine;
use num_complex::Complex;

#[derive(Debug)]
pub enum Weighting {
    /// Single coefficient vector (rectangular, Hamming, Blackman-Harris)
    Window {
        coefficients: Vec<f64>,
        divisor: f64,
    },

    /// Weighted average over K tapers
    Multitaper(TaperSet),
}

impl Weighting {
    /// Build the weighting for a frame of `window_size` samples
    ///
    /// Tapers are only requested from `source` for `WindowFunction::Multitaper`.
    pub fn new(
        window: WindowFunction,
        window_size: usize,
        num_tapers: usize,
        source: &dyn TaperSource,
    ) -> Result<Self> {
        if window_size < 2 {
            return Err(SpectrogramError::InvalidWindowSize(window_size));
        }

        let num_bins = window_size / 2 + 1;

        match generate_window(window, window_size) {
            Some(coefficients) => {
                let divisor = match window {
                    // Amplitude-free normalisation by bin count
                    WindowFunction::Rectangular => num_bins as f64,
                    // Coherent gain: |X| / sum * 2
                    _ => coefficients.iter().sum::<f64>() / 2.0,
                };
                Ok(Weighting::Window {
                    coefficients,
                    divisor,
                })
            }
            None => {
                if num_tapers == 0 {
                    return Err(SpectrogramError::InvalidTaperCount(num_tapers));
                }
                let tapers = source.load(num_tapers, window_size)?;
                Ok(Weighting::Multitaper(tapers))
            }
        }
    }

    /// Divisor applied to |X[k]| when extracting power
    pub fn normalization_divisor(&self) -> f64 {
        match self {
            Weighting::Window { divisor, .. } => *divisor,
            Weighting::Multitaper(_) => 2.0,
        }
    }

    /// Weight `samples`, transform, and write the spectral estimate
    ///
    /// # Arguments
    /// * `samples` - One full frame, oldest sample first
    /// * `fft` - Engine planned for `samples.len()`
    /// * `estimate` - Output, `fft.num_bins()` long
    pub fn apply(
        &self,
        samples: &[f64],
        fft: &mut FftEngine,
        estimate: &mut [Complex<f64>],
    ) -> Result<()> {
        match self {
            Weighting::Window { coefficients, .. } => {
                fft.load_weighted(samples, coefficients);
                estimate.copy_from_slice(fft.execute()?);
            }
            Weighting::Multitaper(tapers) => {
                let count = tapers.num_tapers() as f64;
                estimate.fill(Complex::new(0.0, 0.0));

                for (taper, weight) in tapers.iter() {
                    fft.load_weighted(samples, &taper);
                    let scale = weight / count;
                    for (acc, x) in estimate.iter_mut().zip(fft.execute()?) {
                        *acc += *x * scale;
                    }
                }
            }
        }

        Ok(())
    }

    pub fn num_tapers(&self) -> usize {
        match self {
            Weighting::Window { .. } => 1,
            Weighting::Multitaper(tapers) => tapers.num_tapers(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn no_tapers() -> TaperSet {
        TaperSet::new(array![[1.0, 1.0]], vec![1.0]).unwrap()
    }

    #[test]
    fn test_rectangular_divisor_is_bin_count() {
        let weighting = Weighting::new(WindowFunction::Rectangular, 8, 0, &no_tapers()).unwrap();
        assert_eq!(weighting.normalization_divisor(), 5.0);
    }

    #[test]
    fn test_hamming_divisor_is_half_sum() {
        let weighting = Weighting::new(WindowFunction::Hamming, 64, 0, &no_tapers()).unwrap();
        let sum: f64 = generate_window(WindowFunction::Hamming, 64).unwrap().iter().sum();

        assert!((weighting.normalization_divisor() - sum / 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_window_size_below_two_is_rejected() {
        for size in [0, 1] {
            let err = Weighting::new(WindowFunction::Hamming, size, 0, &no_tapers()).unwrap_err();
            assert!(matches!(err, SpectrogramError::InvalidWindowSize(s) if s == size));
        }
    }

    #[test]
    fn test_multitaper_weighted_average() {
        // Second taper halves the frame but carries twice the weight,
        // so the average equals the plain transform
        let tapers = TaperSet::new(
            array![[1.0, 1.0, 1.0, 1.0], [0.5, 0.5, 0.5, 0.5]],
            vec![1.0, 2.0],
        )
        .unwrap();
        let weighting = Weighting::new(WindowFunction::Multitaper, 4, 2, &tapers).unwrap();
        assert_eq!(weighting.num_tapers(), 2);
        assert_eq!(weighting.normalization_divisor(), 2.0);

        let mut fft = FftEngine::new(4);
        let mut estimate = vec![Complex::new(0.0, 0.0); 3];
        weighting
            .apply(&[1.0, 0.0, -1.0, 0.0], &mut fft, &mut estimate)
            .unwrap();

        assert!(estimate[0].norm() < 1e-12);
        assert!((estimate[1].re - 2.0).abs() < 1e-12);
        assert!(estimate[1].im.abs() < 1e-12);
        assert!(estimate[2].norm() < 1e-12);
    }

    #[test]
    fn test_multitaper_needs_tapers() {
        let err = Weighting::new(WindowFunction::Multitaper, 2, 0, &no_tapers()).unwrap_err();
        assert!(matches!(err, SpectrogramError::InvalidTaperCount(0)));
    }
}
