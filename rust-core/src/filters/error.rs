//! Errors raised while validating and designing a filter

use thiserror::Error;

/// Reasons a filter design request is rejected
///
/// Every variant is a hard rejection: no coefficients are produced and a
/// caller-supplied output buffer is left untouched.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DesignError {
    #[error("Invalid filter specification: {reason}")]
    InvalidSpec { reason: &'static str },

    #[error("Cutoffs must be strictly increasing (cutoff {index} = {current} Hz follows {previous} Hz)")]
    InvalidCutoffOrdering {
        index: usize,
        previous: f64,
        current: f64,
    },

    #[error("Cutoff {index} = {value} Hz lies outside [0, {nyquist}] Hz")]
    CutoffOutOfRange {
        index: usize,
        value: f64,
        nyquist: f64,
    },

    #[error("An even number of taps ({numtaps}) cannot pass the Nyquist frequency")]
    UnrealizableNyquistResponse { numtaps: usize },

    #[error("Cannot allocate {numtaps} taps")]
    Allocation { numtaps: usize },

    #[error("Output buffer holds {actual} samples but {expected} taps were requested")]
    BufferLength { expected: usize, actual: usize },
}
