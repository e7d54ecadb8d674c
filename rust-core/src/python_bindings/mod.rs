//! PyO3 bindings for Python integration

use pyo3::prelude::*;

mod filter_bindings;
mod spectrum_bindings;

/// Python module definition
#[pymodule]
fn firwin(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_class::<filter_bindings::PyWindowKind>()?;
    m.add_function(wrap_pyfunction!(filter_bindings::firwin, m)?)?;
    m.add_function(wrap_pyfunction!(spectrum_bindings::freqz, m)?)?;

    Ok(())
}
