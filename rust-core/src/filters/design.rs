//! Multiband FIR filter design using the windowing method
//!
//! A design runs three in-place passes over one `numtaps`-long buffer:
//! ideal sinc-difference synthesis, windowing, and gain normalization at a
//! reference frequency chosen from the first passband.

use super::error::DesignError;
use super::windows::WindowKind;
use crate::spectrum::amplitude_response;
use log::{debug, warn};
use std::f64::consts::PI;

/// Normalization scales smaller than this are treated as a spectral null
const SCALE_EPSILON: f64 = 1e-10;

/// Filter specification for a window-method design
#[derive(Debug, Clone, PartialEq)]
pub struct FilterSpec {
    /// Number of taps (filter length M)
    pub numtaps: usize,

    /// Sampling rate in Hz
    pub sampling_rate: f64,

    /// Passband edges in Hz; each consecutive pair is one passband
    pub cutoffs: Vec<f64>,

    /// Window used to taper the ideal response
    pub window: WindowKind,
}

impl FilterSpec {
    /// Create a multiband spec from raw passband edges
    pub fn new(numtaps: usize, sampling_rate: f64, cutoffs: Vec<f64>, window: WindowKind) -> Self {
        Self {
            numtaps,
            sampling_rate,
            cutoffs,
            window,
        }
    }

    /// Lowpass: single passband `[0, cutoff]`
    pub fn lowpass(numtaps: usize, sampling_rate: f64, cutoff: f64, window: WindowKind) -> Self {
        Self::new(numtaps, sampling_rate, vec![0.0, cutoff], window)
    }

    /// Highpass: single passband `[cutoff, nyquist]`
    pub fn highpass(numtaps: usize, sampling_rate: f64, cutoff: f64, window: WindowKind) -> Self {
        Self::new(numtaps, sampling_rate, vec![cutoff, sampling_rate / 2.0], window)
    }

    /// Bandpass: single passband `[low, high]`
    pub fn bandpass(
        numtaps: usize,
        sampling_rate: f64,
        low: f64,
        high: f64,
        window: WindowKind,
    ) -> Self {
        Self::new(numtaps, sampling_rate, vec![low, high], window)
    }

    /// Nyquist frequency in Hz
    pub fn nyquist(&self) -> f64 {
        self.sampling_rate / 2.0
    }

    /// Group delay alpha = (M-1)/2, the center of symmetry
    pub fn group_delay(&self) -> f64 {
        (self.numtaps as f64 - 1.0) / 2.0
    }

    /// Passbands as `(left, right)` pairs normalized to the Nyquist frequency
    pub fn bands(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        let nyquist = self.nyquist();
        self.cutoffs
            .chunks_exact(2)
            .map(move |pair| (pair[0] / nyquist, pair[1] / nyquist))
    }

    /// Check the spec before any coefficient is computed
    ///
    /// Rejects empty or odd-length cutoff lists, non-increasing cutoffs,
    /// cutoffs outside `[0, nyquist]`, and an even tap count whose last
    /// passband ends exactly at Nyquist (structural null there).
    pub fn validate(&self) -> Result<(), DesignError> {
        if self.numtaps == 0 {
            return Err(DesignError::InvalidSpec {
                reason: "numtaps must be greater than 0",
            });
        }

        if !(self.sampling_rate.is_finite() && self.sampling_rate > 0.0) {
            return Err(DesignError::InvalidSpec {
                reason: "sampling rate must be positive and finite",
            });
        }

        if self.cutoffs.is_empty() {
            return Err(DesignError::InvalidSpec {
                reason: "at least one passband is required",
            });
        }

        if self.cutoffs.len() % 2 != 0 {
            return Err(DesignError::InvalidSpec {
                reason: "cutoffs must come in passband pairs",
            });
        }

        for (index, pair) in self.cutoffs.windows(2).enumerate() {
            if pair[1] <= pair[0] {
                return Err(DesignError::InvalidCutoffOrdering {
                    index: index + 1,
                    previous: pair[0],
                    current: pair[1],
                });
            }
        }

        let nyquist = self.nyquist();
        for (index, &value) in self.cutoffs.iter().enumerate() {
            // NaN fails `contains` as well
            if !(0.0..=nyquist).contains(&value) {
                return Err(DesignError::CutoffOutOfRange {
                    index,
                    value,
                    nyquist,
                });
            }
        }

        let ends_at_nyquist = self.cutoffs.last() == Some(&nyquist);
        if ends_at_nyquist && self.numtaps % 2 == 0 {
            return Err(DesignError::UnrealizableNyquistResponse {
                numtaps: self.numtaps,
            });
        }

        Ok(())
    }

    /// Reference frequency for gain normalization (units of π rad/sample)
    ///
    /// DC when the first passband starts at 0, Nyquist when it ends there,
    /// otherwise the center of the first passband. `None` when there is no
    /// complete first passband.
    pub fn reference_frequency(&self) -> Option<f64> {
        let nyquist = self.nyquist();
        let first = self.cutoffs.get(..2)?;
        let (low, high) = (first[0], first[1]);

        let freq = if low == 0.0 {
            0.0
        } else if high == nyquist {
            1.0
        } else {
            0.5 * (low + high) / nyquist
        };

        Some(freq)
    }
}

/// Options that change how a valid spec is turned into coefficients
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DesignOptions {
    /// Scale coefficients to unit gain at the reference frequency
    pub scale: bool,
}

impl Default for DesignOptions {
    fn default() -> Self {
        Self { scale: true }
    }
}

/// Normalized sinc: sin(πx)/(πx), exactly 1 at x = 0
#[inline]
pub fn sinc(x: f64) -> f64 {
    if x == 0.0 {
        1.0
    } else {
        (PI * x).sin() / (PI * x)
    }
}

/// Write the ideal multiband impulse response into `h`
///
/// # Arguments
/// * `h` - Output buffer; its length is the tap count
/// * `bands` - Passband edges normalized to Nyquist, each in [0, 1]
///
/// Each band contributes right*sinc(right*m) - left*sinc(left*m) with
/// m = n - (M-1)/2, i.e. the inverse transform of a rectangular band.
pub fn synthesize_ideal<I>(h: &mut [f64], bands: I)
where
    I: IntoIterator<Item = (f64, f64)>,
{
    let alpha = (h.len() as f64 - 1.0) / 2.0;
    h.fill(0.0);

    for (left, right) in bands {
        for (n, h_n) in h.iter_mut().enumerate() {
            let m = n as f64 - alpha;
            *h_n += right * sinc(right * m) - left * sinc(left * m);
        }
    }
}

/// Scale `h` so its amplitude response at `scale_freq` is 1
///
/// # Returns
/// The divisor that was applied. A response within 1e-10 of zero is a
/// spectral null; the coefficients are then left as they are and 1 is
/// returned.
pub fn normalize(h: &mut [f64], scale_freq: f64) -> f64 {
    let mut scale = amplitude_response(h, scale_freq);

    if scale.abs() < SCALE_EPSILON {
        warn!(
            "Response at reference frequency {} is {:e}; skipping normalization",
            scale_freq, scale
        );
        scale = 1.0;
    }

    for h_n in h.iter_mut() {
        *h_n /= scale;
    }

    scale
}

/// Zeroed coefficient buffer, reporting allocation failure as an error
fn alloc_taps(numtaps: usize) -> Result<Vec<f64>, DesignError> {
    let mut h = Vec::new();
    h.try_reserve_exact(numtaps)
        .map_err(|_| DesignError::Allocation { numtaps })?;
    h.resize(numtaps, 0.0);
    Ok(h)
}

/// Ideal (unwindowed, unnormalized) response for a spec
pub fn ideal_response(spec: &FilterSpec) -> Result<Vec<f64>, DesignError> {
    spec.validate()?;

    let mut h = alloc_taps(spec.numtaps)?;
    synthesize_ideal(&mut h, spec.bands());
    Ok(h)
}

/// Design a FIR filter into a caller-owned buffer
///
/// `out` must hold exactly `spec.numtaps` samples. On error it is not
/// modified.
pub fn firwin_into(
    spec: &FilterSpec,
    options: DesignOptions,
    out: &mut [f64],
) -> Result<(), DesignError> {
    spec.validate()?;

    if out.len() != spec.numtaps {
        return Err(DesignError::BufferLength {
            expected: spec.numtaps,
            actual: out.len(),
        });
    }

    debug!(
        "Designing {} taps, {} passband(s), {} window",
        spec.numtaps,
        spec.cutoffs.len() / 2,
        spec.window
    );

    // 1. Ideal multiband response
    synthesize_ideal(out, spec.bands());

    // 2. Taper
    spec.window.apply(out);

    // 3. Unit gain at the reference frequency
    if options.scale {
        let scale_freq = spec
            .reference_frequency()
            .ok_or(DesignError::InvalidSpec {
                reason: "at least one passband is required",
            })?;
        let scale = normalize(out, scale_freq);
        debug!("Normalized at {}π rad/sample (scale {})", scale_freq, scale);
    }

    Ok(())
}

/// Design a FIR filter using the windowing method
///
/// # Algorithm
/// 1. Sum sinc differences for every passband (ideal response)
/// 2. Multiply by the window
/// 3. Divide by the amplitude response at the reference frequency
///
/// # Returns
/// Vector of filter coefficients h[n] for n = 0..M-1
pub fn firwin(spec: &FilterSpec, options: DesignOptions) -> Result<Vec<f64>, DesignError> {
    spec.validate()?;

    let mut h = alloc_taps(spec.numtaps)?;
    firwin_into(spec, options, &mut h)?;
    Ok(h)
}

/// Design a lowpass filter with unit DC gain
pub fn design_lowpass_fir(
    numtaps: usize,
    sampling_rate: f64,
    cutoff: f64,
    window: WindowKind,
) -> Result<Vec<f64>, DesignError> {
    firwin(
        &FilterSpec::lowpass(numtaps, sampling_rate, cutoff, window),
        DesignOptions::default(),
    )
}

/// Design a highpass filter with unit gain at Nyquist
pub fn design_highpass_fir(
    numtaps: usize,
    sampling_rate: f64,
    cutoff: f64,
    window: WindowKind,
) -> Result<Vec<f64>, DesignError> {
    firwin(
        &FilterSpec::highpass(numtaps, sampling_rate, cutoff, window),
        DesignOptions::default(),
    )
}

/// Design a bandpass filter with unit gain at the band center
pub fn design_bandpass_fir(
    numtaps: usize,
    sampling_rate: f64,
    low: f64,
    high: f64,
    window: WindowKind,
) -> Result<Vec<f64>, DesignError> {
    firwin(
        &FilterSpec::bandpass(numtaps, sampling_rate, low, high, window),
        DesignOptions::default(),
    )
}
