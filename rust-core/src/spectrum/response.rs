//! Frequency response of designed coefficients
//!
//! Direct DTFT evaluation for a handful of frequencies, and a realfft-based
//! analyzer for dense magnitude plots.

use num_complex::Complex64;
use realfft::{RealFftPlanner, RealToComplex};
use std::f64::consts::PI;
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("FFT size must be greater than 0")]
    InvalidFftSize,

    #[error("{taps} coefficients do not fit in an FFT of size {fft_size}")]
    TooManyCoefficients { taps: usize, fft_size: usize },

    #[error("FFT processing failed: {0}")]
    Fft(String),
}

/// Calculate frequency response at given frequencies
///
/// # Arguments
/// * `h` - Filter coefficients
/// * `frequencies` - Normalized frequencies (units of π rad/sample)
///
/// # Returns
/// Complex frequency response H(e^jω)
pub fn frequency_response(h: &[f64], frequencies: &[f64]) -> Vec<Complex64> {
    frequencies
        .iter()
        .map(|&omega| {
            let omega_rad = omega * PI;
            h.iter()
                .enumerate()
                .map(|(n, &h_n)| h_n * Complex64::from_polar(1.0, -(omega_rad * n as f64)))
                .sum::<Complex64>()
        })
        .collect()
}

/// Zero-phase amplitude response of a symmetric filter
///
/// A(ω) = Σ h[n] cos(π (n - α) f), with α = (M-1)/2 and f in units of π
/// rad/sample. For linear-phase coefficients this is H(e^jω) with the
/// delay removed, so it is real and keeps its sign.
pub fn amplitude_response(h: &[f64], freq: f64) -> f64 {
    let alpha = (h.len() as f64 - 1.0) / 2.0;
    h.iter()
        .enumerate()
        .map(|(n, &h_n)| h_n * (PI * (n as f64 - alpha) * freq).cos())
        .sum()
}

/// Calculate magnitude response in dB
pub fn magnitude_response_db(h: &[f64], frequencies: &[f64]) -> Vec<f64> {
    frequency_response(h, frequencies)
        .iter()
        .map(|c| 20.0 * c.norm().max(1e-10).log10())
        .collect()
}

/// Evenly spaced frequencies covering [low, high], at least two points
fn band_grid(band: (f64, f64), points: usize) -> Vec<f64> {
    let points = points.max(2);
    let (low, high) = band;
    let step = (high - low) / (points - 1) as f64;
    (0..points).map(|k| low + step * k as f64).collect()
}

/// Largest deviation from 0 dB inside a passband
///
/// # Arguments
/// * `h` - Filter coefficients
/// * `band` - Passband edges (units of π rad/sample)
/// * `points` - Number of frequencies sampled across the band
pub fn passband_ripple_db(h: &[f64], band: (f64, f64), points: usize) -> f64 {
    magnitude_response_db(h, &band_grid(band, points))
        .into_iter()
        .map(f64::abs)
        .fold(0.0, f64::max)
}

/// Minimum attenuation inside a stopband, in positive dB
pub fn stopband_attenuation_db(h: &[f64], band: (f64, f64), points: usize) -> f64 {
    let peak = magnitude_response_db(h, &band_grid(band, points))
        .into_iter()
        .fold(f64::NEG_INFINITY, f64::max);
    -peak
}

/// Magnitude response over a uniform grid using a real FFT
pub struct ResponseAnalyzer {
    /// FFT size (number of samples)
    fft_size: usize,

    /// Real FFT processor
    r2c: Arc<dyn RealToComplex<f64>>,

    /// Reusable input buffer
    input_buffer: Vec<f64>,

    /// Reusable output buffer (complex spectrum)
    output_buffer: Vec<Complex64>,
}

impl ResponseAnalyzer {
    /// Create new analyzer
    ///
    /// # Arguments
    /// * `fft_size` - FFT size; the response has fft_size/2 + 1 bins
    pub fn new(fft_size: usize) -> Result<Self, AnalysisError> {
        if fft_size == 0 {
            return Err(AnalysisError::InvalidFftSize);
        }

        let mut planner = RealFftPlanner::<f64>::new();
        let r2c = planner.plan_fft_forward(fft_size);

        Ok(Self {
            fft_size,
            r2c,
            input_buffer: vec![0.0; fft_size],
            output_buffer: vec![Complex64::new(0.0, 0.0); fft_size / 2 + 1],
        })
    }

    /// Magnitude response |H[k]| for k = 0..fft_size/2
    ///
    /// Coefficients are zero-padded to the FFT size.
    pub fn magnitude(&mut self, h: &[f64]) -> Result<Vec<f64>, AnalysisError> {
        if h.len() > self.fft_size {
            return Err(AnalysisError::TooManyCoefficients {
                taps: h.len(),
                fft_size: self.fft_size,
            });
        }

        self.input_buffer[..h.len()].copy_from_slice(h);
        self.input_buffer[h.len()..].fill(0.0);

        self.r2c
            .process(&mut self.input_buffer, &mut self.output_buffer)
            .map_err(|e| AnalysisError::Fft(e.to_string()))?;

        Ok(self.output_buffer.iter().map(|c| c.norm()).collect())
    }

    /// Magnitude response in dB: 20*log10(|H[k]|), floored at -200 dB
    pub fn magnitude_db(&mut self, h: &[f64]) -> Result<Vec<f64>, AnalysisError> {
        Ok(self
            .magnitude(h)?
            .into_iter()
            .map(|mag| 20.0 * mag.max(1e-10).log10())
            .collect())
    }

    /// Get FFT size
    pub fn fft_size(&self) -> usize {
        self.fft_size
    }

    /// Get number of frequency bins (fft_size/2 + 1 for real FFT)
    pub fn num_bins(&self) -> usize {
        self.fft_size / 2 + 1
    }

    /// Convert bin index to normalized frequency (units of π rad/sample)
    pub fn bin_to_frequency(&self, bin: usize) -> f64 {
        2.0 * bin as f64 / self.fft_size as f64
    }

    /// Frequency axis in normalized units (0 to 1, where 1 = π rad/sample)
    pub fn frequency_axis(&self) -> Vec<f64> {
        (0..self.num_bins())
            .map(|bin| self.bin_to_frequency(bin))
            .collect()
    }

    /// Convert normalized frequency to Hz
    pub fn normalized_to_hz(normalized_freq: f64, sample_rate: f64) -> f64 {
        normalized_freq * sample_rate / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::{design_lowpass_fir, WindowKind};

    #[test]
    fn test_amplitude_matches_dtft_magnitude() {
        let h = design_lowpass_fir(31, 2.0, 0.4, WindowKind::Hamming).unwrap();
        let freqs = [0.0, 0.1, 0.3, 0.7];
        let dtft = frequency_response(&h, &freqs);

        for (&f, c) in freqs.iter().zip(dtft.iter()) {
            assert!((amplitude_response(&h, f).abs() - c.norm()).abs() < 1e-12);
        }
    }

    #[test]
    fn test_dc_response_is_sum() {
        let h = vec![0.1, 0.2, 0.4, 0.2, 0.1];
        let response = frequency_response(&h, &[0.0]);
        assert!((response[0].re - 1.0).abs() < 1e-12);
        assert!(response[0].im.abs() < 1e-12);
        assert!((amplitude_response(&h, 0.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_analyzer_matches_direct_evaluation() {
        let h = design_lowpass_fir(51, 2.0, 0.25, WindowKind::Blackman).unwrap();
        let mut analyzer = ResponseAnalyzer::new(256).unwrap();
        let magnitude = analyzer.magnitude(&h).unwrap();
        let freqs = analyzer.frequency_axis();

        assert_eq!(magnitude.len(), 129);
        assert_eq!(freqs.len(), 129);
        assert_eq!(freqs[0], 0.0);
        assert!((freqs[128] - 1.0).abs() < 1e-12);

        let direct = frequency_response(&h, &freqs);
        for (m, c) in magnitude.iter().zip(direct.iter()) {
            assert!((m - c.norm()).abs() < 1e-9);
        }
    }

    #[test]
    fn test_analyzer_rejects_bad_sizes() {
        assert!(matches!(ResponseAnalyzer::new(0), Err(AnalysisError::InvalidFftSize)));

        let mut analyzer = ResponseAnalyzer::new(8).unwrap();
        assert_eq!(
            analyzer.magnitude(&[0.0; 9]),
            Err(AnalysisError::TooManyCoefficients { taps: 9, fft_size: 8 })
        );
    }

    #[test]
    fn test_ripple_and_attenuation() {
        let h = design_lowpass_fir(101, 2.0, 0.5, WindowKind::Hamming).unwrap();

        // Hamming: ~0.02 dB passband ripple, ~53 dB stopband
        assert!(passband_ripple_db(&h, (0.0, 0.4), 64) < 0.1);
        assert!(stopband_attenuation_db(&h, (0.6, 1.0), 64) > 45.0);
    }

    #[test]
    fn test_normalized_to_hz() {
        assert_eq!(ResponseAnalyzer::normalized_to_hz(0.5, 48000.0), 12000.0);
        assert_eq!(ResponseAnalyzer::normalized_to_hz(1.0, 1000.0), 500.0);
    }
}
