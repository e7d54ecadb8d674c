//! FIR Workbench - Window-Method Filter Design Core
//!
//! Multiband linear-phase FIR design from passband edges and one of twelve
//! window functions, with frequency-response analysis and Python bindings.

// Suppress PyO3 non-local impl warnings (harmless macro-generated code)
#![cfg_attr(feature = "python", allow(non_local_definitions))]

pub mod filters;
pub mod spectrum;
#[cfg(feature = "python")]
pub mod python_bindings;

pub use filters::{firwin, firwin_into, DesignError, DesignOptions, FilterSpec, WindowKind};
pub use spectrum::ResponseAnalyzer;
