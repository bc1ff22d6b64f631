//! drought_indices — SPI estimation and feature engineering with Python bindings.
//!
//! Purpose
//! -------
//! Serve as the crate root for Rust callers and as the PyO3 bridge that
//! exposes the Standardized Precipitation Index routine to Python via the
//! `_drought_indices` extension module. When the `python-bindings` feature
//! is enabled, this module defines the Python-facing classes and submodules
//! used by the `drought_indices` package.
//!
//! Key behaviors
//! -------------
//! - Re-export the core Rust modules (`spi` and `features`) as the public
//!   crate surface.
//! - Define the `#[pyclass]` wrapper [`Spi`] and the `#[pymodule]`
//!   initializer for the `_drought_indices` Python extension.
//! - Create and register the `spi` Python submodule under
//!   `drought_indices` so that dot-notation imports work as expected.
//!
//! Invariants & assumptions
//! ------------------------
//! - All heavy numerical work is implemented in the inner Rust modules;
//!   this file performs only FFI glue, input validation, and error
//!   mapping.
//! - When `python-bindings` is enabled, the Python-visible [`Spi`] class
//!   mirrors the invariants and signature of
//!   [`SpiOutcome`](spi::estimator::SpiOutcome).
//! - On successful conversion from Python objects to Rust slices, the
//!   invariants documented in the core modules are assumed to hold.
//!
//! Conventions
//! -----------
//! - Python-exposed classes live under `_drought_indices.spi` and are
//!   typically wrapped by thin pure-Python facades in the top-level
//!   `drought_indices` package.
//! - Missing observations cross the boundary as `NaN`, matching the
//!   crate-wide encoding documented in the `spi` subtree.
//! - Errors from core Rust code are propagated as rich error types
//!   internally and converted to `PyErr` values at the PyO3 boundary.
//! - The tabular feature builders under [`features`] are a Rust-facing
//!   surface; Python pipelines already have a dataframe library and bind
//!   only the numerical core.
//!
//! Downstream usage
//! ----------------
//! - Native Rust code should usually depend directly on the inner modules
//!   and can ignore the PyO3 items guarded by the `python-bindings`
//!   feature.
//! - The Python packaging layer imports the `_drought_indices` module
//!   defined here and wraps its classes in user-facing Python APIs.
//!
//! Testing notes
//! -------------
//! - Core numerical behavior is covered by unit tests in the inner modules
//!   and by the integration suite under `tests/`.
//! - Smoke tests for the PyO3 bindings verify that [`Spi`] can be
//!   constructed and read back correctly from Python.

pub mod features;
pub mod spi;
pub mod utils;

#[cfg(feature = "python-bindings")]
use numpy::PyReadonlyArray1;

#[cfg(feature = "python-bindings")]
use pyo3::{exceptions::PyValueError, prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::{spi::estimator::SpiOutcome, utils::extract_f64_array};

/// Spi — Python-facing wrapper for the Standardized Precipitation Index.
///
/// Purpose
/// -------
/// Represent the result of one SPI computation when called from Python and
/// forward all computation to [`SpiOutcome`].
///
/// Key behaviors
/// -------------
/// - Validate and convert Python inputs into a contiguous `f64` slice.
/// - Run the pipeline via [`SpiOutcome::compute`] and store the outcome
///   internally.
/// - Expose the accumulated series, fit parameters, CDF values, and the
///   index itself as Python properties.
///
/// Parameters
/// ----------
/// Constructed from Python via `Spi(series, thresh)`:
/// - `series`: `&PyAny`
///   One-dimensional array-like of `f64` precipitation values; `NaN`
///   encodes missing observations.
/// - `thresh`: `usize`
///   Accumulation window; must satisfy `1 ≤ thresh ≤ len(series)`.
///
/// Fields
/// ------
/// - `inner`: [`SpiOutcome`]
///   Rust-side container holding the full outcome used by the accessors.
///
/// Invariants
/// ----------
/// - `inner` always corresponds to a successful fit: α > 0, β > 0, and
///   every derived series aligned with the input.
///
/// Performance
/// -----------
/// - At most one allocation is performed to copy Python data into a Rust
///   buffer when needed; each property access clones one series into a
///   Python-owned list.
///
/// Notes
/// -----
/// - This type is primarily intended to be used from Python; native Rust
///   code should prefer calling [`SpiOutcome::compute`] directly.
#[cfg(feature = "python-bindings")]
#[pyclass(module = "drought_indices.spi")]
pub struct Spi {
    /// The SPI outcome struct.
    inner: SpiOutcome,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl Spi {
    /// Standardized Precipitation Index of `series` at scale `thresh`.
    ///
    /// CDF values saturating at 0 or 1 yield −inf / +inf index entries;
    /// missing inputs propagate as NaN.
    #[new]
    #[pyo3(text_signature = "(series, thresh, /)")]
    pub fn compute<'py>(
        py: Python<'py>, series: &Bound<'py, PyAny>, thresh: usize,
    ) -> PyResult<Spi> {
        let arr: PyReadonlyArray1<f64> = extract_f64_array(py, series)?;
        let data: &[f64] = arr.as_slice().map_err(|_| {
            PyValueError::new_err("series must be a 1-D contiguous float64 array or sequence")
        })?;

        let outcome = SpiOutcome::compute(data, thresh)?;
        Ok(Spi { inner: outcome })
    }

    /// Trailing rolling mean of the input plus the 1e-4 offset.
    #[getter]
    pub fn accumulated(&self) -> Vec<f64> {
        self.inner.accumulated().to_vec()
    }

    /// Natural log of the accumulated series (infinities converted to NaN).
    #[getter]
    pub fn log_accumulated(&self) -> Vec<f64> {
        self.inner.log_accumulated().to_vec()
    }

    /// NaN-ignoring mean of the accumulated series.
    #[getter]
    pub fn mean(&self) -> f64 {
        self.inner.mean()
    }

    /// NaN-ignoring sum of the log-accumulated series.
    #[getter]
    pub fn log_sum(&self) -> f64 {
        self.inner.log_sum()
    }

    /// Effective sample size used in the moment fit.
    #[getter]
    pub fn n(&self) -> usize {
        self.inner.n()
    }

    /// Thom's log-moment statistic A.
    #[getter]
    pub fn a(&self) -> f64 {
        self.inner.a()
    }

    /// Fitted gamma shape parameter.
    #[getter]
    pub fn alpha(&self) -> f64 {
        self.inner.alpha()
    }

    /// Fitted gamma scale parameter.
    #[getter]
    pub fn beta(&self) -> f64 {
        self.inner.beta()
    }

    /// Gamma CDF of every accumulated entry.
    #[getter]
    pub fn cdf(&self) -> Vec<f64> {
        self.inner.cdf().to_vec()
    }

    /// The standardized index itself.
    #[getter]
    pub fn spi(&self) -> Vec<f64> {
        self.inner.spi().to_vec()
    }
}

/// _drought_indices — PyO3 module initializer for the Python extension.
///
/// Purpose
/// -------
/// Define the `_drought_indices` Python module and register the `spi`
/// submodule used by the public `drought_indices` package.
///
/// Parameters
/// ----------
/// - `_py`: [`Python`]
///   GIL token provided by PyO3 during module initialization.
/// - `m`: `&Bound<PyModule>`
///   Module object representing `_drought_indices`.
///
/// Returns
/// -------
/// `PyResult<()>`
///   `Ok(())` on success, or a Python exception if registration fails.
///
/// Notes
/// -----
/// - The submodule is added to `sys.modules` manually so that dotted
///   imports (`drought_indices.spi`) resolve as expected.
/// - This function is invoked automatically by Python when importing the
///   compiled extension; it is not called directly by user code.
#[cfg(feature = "python-bindings")]
#[pymodule]
fn _drought_indices<'py>(_py: Python<'py>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    let spi_mod = PyModule::new(_py, "spi")?;
    spi_mod.add_class::<Spi>()?;
    m.add_submodule(&spi_mod)?;

    // Manually add the submodule into sys.modules to allow for dot notation.
    _py.import("sys")?.getattr("modules")?.set_item("drought_indices.spi", spi_mod)?;
    Ok(())
}
