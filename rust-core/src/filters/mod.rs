//! Window-method FIR filter design

pub mod design;
pub mod error;
pub mod windows;

pub use design::{
    design_bandpass_fir, design_highpass_fir, design_lowpass_fir, firwin, firwin_into,
    ideal_response, normalize, sinc, synthesize_ideal, DesignOptions, FilterSpec,
};
pub use error::DesignError;
pub use windows::{apply_window, generate_window, ParseWindowError, WindowKind};
