//! Frequency-domain analysis of designed filters

pub mod response;

pub use response::{
    amplitude_response, frequency_response, magnitude_response_db, passband_ripple_db,
    stopband_attenuation_db, AnalysisError, ResponseAnalyzer,
};
