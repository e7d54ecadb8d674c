//! Python bindings for frequency response analysis

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use numpy::{PyArray1, PyReadonlyArray1};
use crate::spectrum::ResponseAnalyzer;

/// Magnitude response of FIR coefficients
///
/// Args:
///     h: Filter coefficients as numpy array
///     fft_size: FFT size (at least len(h))
///
/// Returns:
///     (frequencies, magnitude_db): frequencies in units of π rad/sample
#[pyfunction]
#[pyo3(signature = (h, fft_size=1024))]
pub fn freqz<'py>(
    py: Python<'py>,
    h: PyReadonlyArray1<f64>,
    fft_size: usize,
) -> PyResult<(&'py PyArray1<f64>, &'py PyArray1<f64>)> {
    let coeffs = h
        .as_slice()
        .map_err(|e| PyValueError::new_err(e.to_string()))?;

    let mut analyzer =
        ResponseAnalyzer::new(fft_size).map_err(|e| PyValueError::new_err(e.to_string()))?;
    let magnitude_db = analyzer
        .magnitude_db(coeffs)
        .map_err(|e| PyValueError::new_err(e.to_string()))?;

    Ok((
        PyArray1::from_vec(py, analyzer.frequency_axis()),
        PyArray1::from_vec(py, magnitude_db),
    ))
}
