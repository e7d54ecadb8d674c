//! Window functions for FIR filter design
//!
//! Every window is symmetric over its `length` samples so that a windowed
//! linear-phase response stays linear-phase.

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Window function types
///
/// Declaration order matches the numeric selector codes `0..=11`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WindowKind {
    /// Rectangular (boxcar) window: w[n] = 1
    Rectangular,

    /// Hamming window: w[n] = 0.54 - 0.46*cos(2πn/N)
    Hamming,

    /// Blackman window: w[n] = 0.42 - 0.5*cos(2πn/N) + 0.08*cos(4πn/N)
    Blackman,

    /// Triangular window, non-zero endpoints: w[n] = 1 - |n - N/2| / (M/2)
    Triangular,

    /// Parzen window (piecewise cubic, de la Vallée Poussin)
    Parzen,

    /// Bohman window: w = (1-x)*cos(πx) + sin(πx)/π with x = |2n/N - 1|
    Bohman,

    /// Nuttall window (minimum 4-term Blackman-Harris)
    Nuttall,

    /// Minimum 4-term Blackman-Harris window
    BlackmanHarris,

    /// Flat top window, 5-term cosine sum
    Flattop,

    /// Bartlett window, zero endpoints: w[n] = 1 - |2n/N - 1|
    Bartlett,

    /// Hann window: w[n] = 0.5*(1 - cos(2πn/N))
    Hann,

    /// Cosine (sine) window: w[n] = sin(π(n + 0.5)/M)
    Cosine,
}

const HAMMING: [f64; 2] = [0.54, 0.46];
const BLACKMAN: [f64; 3] = [0.42, 0.5, 0.08];
const HANN: [f64; 2] = [0.5, 0.5];
const NUTTALL: [f64; 4] = [0.3635819, 0.4891775, 0.1365995, 0.0106411];
const BLACKMAN_HARRIS: [f64; 4] = [0.35875, 0.48829, 0.14128, 0.01168];
const FLATTOP: [f64; 5] = [
    0.21557895,
    0.41663158,
    0.277263158,
    0.083578947,
    0.006947368,
];

impl WindowKind {
    /// All variants, indexed by their numeric code
    pub const ALL: [WindowKind; 12] = [
        WindowKind::Rectangular,
        WindowKind::Hamming,
        WindowKind::Blackman,
        WindowKind::Triangular,
        WindowKind::Parzen,
        WindowKind::Bohman,
        WindowKind::Nuttall,
        WindowKind::BlackmanHarris,
        WindowKind::Flattop,
        WindowKind::Bartlett,
        WindowKind::Hann,
        WindowKind::Cosine,
    ];

    /// Numeric selector code (0..=11)
    pub fn code(self) -> usize {
        self as usize
    }

    /// Look up a window by numeric selector code
    pub fn from_code(code: usize) -> Option<Self> {
        Self::ALL.get(code).copied()
    }

    /// Human-readable name
    pub fn name(self) -> &'static str {
        match self {
            WindowKind::Rectangular => "Rectangular (boxcar)",
            WindowKind::Hamming => "Hamming",
            WindowKind::Blackman => "Blackman",
            WindowKind::Triangular => "Triangular",
            WindowKind::Parzen => "Parzen",
            WindowKind::Bohman => "Bohman",
            WindowKind::Nuttall => "Nuttall",
            WindowKind::BlackmanHarris => "Blackman-Harris",
            WindowKind::Flattop => "Flat-top",
            WindowKind::Bartlett => "Bartlett",
            WindowKind::Hann => "Hann",
            WindowKind::Cosine => "Cosine (sine)",
        }
    }

    /// Window weight at sample `index` of a `length`-sample window
    ///
    /// A single-sample window has weight 1 for every variant, since most of
    /// the closed forms divide by `length - 1`.
    ///
    /// # Arguments
    /// * `index` - Sample index n, 0 <= n < length
    /// * `length` - Window length M
    pub fn weight(self, index: usize, length: usize) -> f64 {
        if length <= 1 {
            return 1.0;
        }

        let i = index as f64;
        let m = length as f64;
        let n = m - 1.0;

        match self {
            WindowKind::Rectangular => 1.0,
            WindowKind::Hamming => cosine_sum(&HAMMING, 2.0 * PI * i / n),
            WindowKind::Blackman => cosine_sum(&BLACKMAN, 2.0 * PI * i / n),
            WindowKind::Triangular => 1.0 - (i - n / 2.0).abs() / (m / 2.0),
            WindowKind::Parzen => {
                let half = n / 2.0;
                let x = ((i - half) / half).abs();
                if x <= 0.5 {
                    1.0 - 6.0 * x * x * (1.0 - x)
                } else {
                    2.0 * (1.0 - x).powi(3)
                }
            }
            WindowKind::Bohman => {
                let x = (2.0 * i / n - 1.0).abs();
                (1.0 - x) * (PI * x).cos() + (PI * x).sin() / PI
            }
            WindowKind::Nuttall => cosine_sum(&NUTTALL, 2.0 * PI * i / n),
            WindowKind::BlackmanHarris => cosine_sum(&BLACKMAN_HARRIS, 2.0 * PI * i / n),
            WindowKind::Flattop => cosine_sum(&FLATTOP, 2.0 * PI * i / n),
            WindowKind::Bartlett => 1.0 - (2.0 * i / n - 1.0).abs(),
            WindowKind::Hann => cosine_sum(&HANN, 2.0 * PI * i / n),
            WindowKind::Cosine => (PI * (i + 0.5) / m).sin(),
        }
    }

    /// Generate the full window
    pub fn generate(self, length: usize) -> Vec<f64> {
        generate_window(self, length)
    }

    /// Multiply the window into `data` in place, using `data.len()` as length
    pub fn apply(self, data: &mut [f64]) {
        apply_window(data, self)
    }
}

/// Generalized cosine sum with alternating signs:
/// a0 - a1*cos(x) + a2*cos(2x) - a3*cos(3x) + ...
fn cosine_sum(coeffs: &[f64], x: f64) -> f64 {
    coeffs
        .iter()
        .enumerate()
        .map(|(k, &a)| {
            let sign = if k % 2 == 0 { 1.0 } else { -1.0 };
            sign * a * (k as f64 * x).cos()
        })
        .sum()
}

/// Generate window coefficients
///
/// # Arguments
/// * `window_kind` - Type of window function
/// * `length` - Number of samples (M)
///
/// # Returns
/// Vector of window coefficients w[n] for n = 0..M-1
pub fn generate_window(window_kind: WindowKind, length: usize) -> Vec<f64> {
    (0..length)
        .map(|n| window_kind.weight(n, length))
        .collect()
}

/// Apply window in-place
pub fn apply_window(data: &mut [f64], window_kind: WindowKind) {
    if window_kind == WindowKind::Rectangular {
        return;
    }

    let length = data.len();
    for (n, sample) in data.iter_mut().enumerate() {
        *sample *= window_kind.weight(n, length);
    }
}

impl fmt::Display for WindowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unrecognized window selector
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid window type '{0}': expected 0..11 or a window name")]
pub struct ParseWindowError(pub String);

impl FromStr for WindowKind {
    type Err = ParseWindowError;

    /// Accepts a numeric code or a case-insensitive window name
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Codes are matched verbatim, so "+1" or "01" are rejected
        if let Some(&kind) = WindowKind::ALL.iter().find(|k| k.code().to_string() == s) {
            return Ok(kind);
        }

        let kind = match s.to_ascii_lowercase().as_str() {
            "rectangular" | "boxcar" => WindowKind::Rectangular,
            "hamming" => WindowKind::Hamming,
            "blackman" => WindowKind::Blackman,
            "triangular" => WindowKind::Triangular,
            "parzen" => WindowKind::Parzen,
            "bohman" => WindowKind::Bohman,
            "nuttall" => WindowKind::Nuttall,
            "blackmanharris" | "blackman-harris" => WindowKind::BlackmanHarris,
            "flattop" => WindowKind::Flattop,
            "bartlett" => WindowKind::Bartlett,
            "hann" => WindowKind::Hann,
            "cosine" => WindowKind::Cosine,
            _ => return Err(ParseWindowError(s.to_string())),
        };

        Ok(kind)
    }
}
