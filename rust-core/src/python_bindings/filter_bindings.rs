//! Python bindings for FIR filter design

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use numpy::PyArray1;
use crate::filters::{DesignOptions, FilterSpec, WindowKind};

/// Window type enum exposed to Python
#[pyclass(name = "WindowKind")]
#[derive(Clone, Copy)]
pub enum PyWindowKind {
    Rectangular,
    Hamming,
    Blackman,
    Triangular,
    Parzen,
    Bohman,
    Nuttall,
    BlackmanHarris,
    Flattop,
    Bartlett,
    Hann,
    Cosine,
}

impl From<PyWindowKind> for WindowKind {
    fn from(py_win: PyWindowKind) -> Self {
        match py_win {
            PyWindowKind::Rectangular => WindowKind::Rectangular,
            PyWindowKind::Hamming => WindowKind::Hamming,
            PyWindowKind::Blackman => WindowKind::Blackman,
            PyWindowKind::Triangular => WindowKind::Triangular,
            PyWindowKind::Parzen => WindowKind::Parzen,
            PyWindowKind::Bohman => WindowKind::Bohman,
            PyWindowKind::Nuttall => WindowKind::Nuttall,
            PyWindowKind::BlackmanHarris => WindowKind::BlackmanHarris,
            PyWindowKind::Flattop => WindowKind::Flattop,
            PyWindowKind::Bartlett => WindowKind::Bartlett,
            PyWindowKind::Hann => WindowKind::Hann,
            PyWindowKind::Cosine => WindowKind::Cosine,
        }
    }
}

impl From<WindowKind> for PyWindowKind {
    fn from(kind: WindowKind) -> Self {
        match kind {
            WindowKind::Rectangular => PyWindowKind::Rectangular,
            WindowKind::Hamming => PyWindowKind::Hamming,
            WindowKind::Blackman => PyWindowKind::Blackman,
            WindowKind::Triangular => PyWindowKind::Triangular,
            WindowKind::Parzen => PyWindowKind::Parzen,
            WindowKind::Bohman => PyWindowKind::Bohman,
            WindowKind::Nuttall => PyWindowKind::Nuttall,
            WindowKind::BlackmanHarris => PyWindowKind::BlackmanHarris,
            WindowKind::Flattop => PyWindowKind::Flattop,
            WindowKind::Bartlett => PyWindowKind::Bartlett,
            WindowKind::Hann => PyWindowKind::Hann,
            WindowKind::Cosine => PyWindowKind::Cosine,
        }
    }
}

#[pymethods]
impl PyWindowKind {
    /// Parse a window selector
    ///
    /// Args:
    ///     selector: Numeric code "0".."11" or a case-insensitive name
    ///
    /// Raises:
    ///     ValueError: unrecognized selector
    #[staticmethod]
    fn parse(selector: &str) -> PyResult<Self> {
        selector
            .parse::<WindowKind>()
            .map(Self::from)
            .map_err(|e| PyValueError::new_err(e.to_string()))
    }

    /// Display name
    fn name(&self) -> &'static str {
        WindowKind::from(*self).name()
    }

    /// Window coefficients of the given length
    fn generate<'py>(&self, py: Python<'py>, length: usize) -> &'py PyArray1<f64> {
        PyArray1::from_vec(py, WindowKind::from(*self).generate(length))
    }
}

/// Design a FIR filter using the windowing method
///
/// Args:
///     numtaps: Number of taps
///     fs: Sampling frequency in Hz
///     cutoffs: Passband edges in Hz, in pairs
///     window: Window type
///     scale: Normalize to unit gain in the first passband
///
/// Returns:
///     Filter coefficients as numpy array
///
/// Raises:
///     ValueError: the specification was rejected
#[pyfunction]
#[pyo3(signature = (numtaps, fs, cutoffs, window=PyWindowKind::Hamming, scale=true))]
pub fn firwin<'py>(
    py: Python<'py>,
    numtaps: usize,
    fs: f64,
    cutoffs: Vec<f64>,
    window: PyWindowKind,
    scale: bool,
) -> PyResult<&'py PyArray1<f64>> {
    let spec = FilterSpec::new(numtaps, fs, cutoffs, window.into());
    let coeffs = crate::filters::firwin(&spec, DesignOptions { scale })
        .map_err(|e| PyValueError::new_err(e.to_string()))?;

    Ok(PyArray1::from_vec(py, coeffs))
}
