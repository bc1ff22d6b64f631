//! spi::errors — shared error types and Python bridges for the SPI estimator.
//!
//! Purpose
//! -------
//! Provide the error enum and result alias used by the Standardized
//! Precipitation Index estimator and its validation helpers, together with a
//! conversion layer to Python exceptions for PyO3-based bindings. This keeps
//! estimator-specific validation and fit failures localized while exposing a
//! clean error surface to both Rust and Python.
//!
//! Key behaviors
//! -------------
//! - Define [`SpiResult`] and [`SpiError`] as the canonical result and error
//!   types for [`SpiOutcome::compute`](crate::spi::estimator::SpiOutcome::compute)
//!   and its validation helpers.
//! - Attach human-readable `Display` messages to each error variant so that
//!   diagnostics and logs are meaningful without additional context.
//! - Implement `From<SpiError> for PyErr` to map Rust-side validation and
//!   fit errors into `PyValueError` values visible to Python callers.
//!
//! Invariants & assumptions
//! ------------------------
//! - Estimator modules which use this error type validate their inputs
//!   (window bounds, sample counts, moment finiteness) and return
//!   [`SpiResult<T>`] instead of panicking.
//! - `SpiError` values are small, cheap to clone, and suitable for use in
//!   both unit tests and higher-level orchestration code.
//! - The Python-facing conversion preserves the Rust error message verbatim
//!   inside the `PyValueError` string representation.
//!
//! Conventions
//! -----------
//! - This module is focused on SPI errors; feature-engineering error types
//!   live in their own `errors` module under the `features` subtree.
//! - Error messages are phrased in terms of domain constraints (e.g.,
//!   "1 ≤ thresh ≤ n") rather than low-level details.
//! - A saturated gamma CDF (exactly 0 or 1) is *not* an error: the resulting
//!   ±∞ index values are legitimate tail outputs and pass through untouched.
//!
//! Downstream usage
//! ----------------
//! - The estimator module and its input validation helpers return
//!   [`SpiResult<T>`] to propagate failures cleanly to callers.
//! - Python bindings expose functions which return results or raise
//!   `ValueError` instances; they do not pattern-match on [`SpiError`]
//!   directly.
//! - Higher-level Rust code may choose to match on [`SpiError`] variants to
//!   implement custom recovery or logging behavior.
//!
//! Testing notes
//! -------------
//! - Unit tests in this module verify that each [`SpiError`] variant's
//!   `Display` message embeds its payload (offending window, sample count,
//!   or moment value).
//! - Integration tests in the estimator module exercise these errors
//!   indirectly via input validation and degenerate fits.

#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

pub type SpiResult<T> = Result<T, SpiError>;

/// SpiError — error conditions for the SPI estimator.
///
/// Purpose
/// -------
/// Represent all validation and fit failures that can occur when computing
/// the Standardized Precipitation Index, including malformed inputs,
/// degenerate samples, and a failed Thom moment fit.
///
/// Variants
/// --------
/// - `EmptySeries`
///   The input series contains no observations at all.
/// - `InvalidThreshold { thresh, len }`
///   The accumulation window violates `1 ≤ thresh ≤ len`, where
///   `len = series.len()`.
/// - `InvalidData(value: f64)`
///   A data element is infinite (±∞) and cannot be used in the rolling
///   accumulation. `NaN` entries are *not* invalid — they encode missing
///   observations and propagate through the pipeline.
/// - `InsufficientData { n: usize }`
///   Fewer than two valid accumulated observations survive the rolling
///   window, or the accumulated mean is non-finite or non-positive, so the
///   log-moment statistics are undefined.
/// - `FailedFit { a: f64 }`
///   Thom's estimator produced a degenerate result: the log-moment
///   statistic `A` is exactly zero (division by zero in the shape formula)
///   or the derived shape / scale is non-finite or non-positive.
///
/// Invariants
/// ----------
/// - Each variant carries just enough information (offending value, window,
///   or count) to allow downstream logging and debugging without leaking
///   large data structures.
/// - `FailedFit { a }` is only emitted after validation has passed, i.e.,
///   with `n ≥ 2` and a strictly positive accumulated mean.
///
/// Notes
/// -----
/// - This enum implements [`std::error::Error`] and [`std::fmt::Display`]
///   so it can be used with idiomatic `?`-based error propagation in Rust.
/// - A blanket [`From<SpiError> for PyErr`] implementation maps all of
///   these cases to `PyValueError` at the Python boundary, with the
///   human-readable message taken from the `Display` implementation.
#[derive(Debug, Clone, PartialEq)]
pub enum SpiError {
    //------ Input validation errors ------
    EmptySeries,
    InvalidThreshold { thresh: usize, len: usize },
    InvalidData(f64),
    //------ Estimation errors ------
    InsufficientData { n: usize },
    FailedFit { a: f64 },
}

impl std::error::Error for SpiError {}

impl std::fmt::Display for SpiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SpiError::EmptySeries => {
                write!(f, "Input series is empty; need at least one observation.")
            }
            SpiError::InvalidThreshold { thresh, len } => {
                write!(
                    f,
                    "Invalid accumulation window: {thresh}. Must satisfy 1 ≤ thresh ≤ {len} (series length)."
                )
            }
            SpiError::InvalidData(value) => {
                write!(f, "Invalid data value: {value}. Must be finite or NaN (missing).")
            }
            SpiError::InsufficientData { n } => {
                write!(
                    f,
                    "Insufficient valid observations ({n}) to estimate gamma moments; need at least 2 and a positive accumulated mean."
                )
            }
            SpiError::FailedFit { a } => {
                write!(
                    f,
                    "Gamma moment fit failed: log-moment statistic A = {a} yields a degenerate shape parameter."
                )
            }
        }
    }
}

#[cfg(feature = "python-bindings")]
impl From<SpiError> for PyErr {
    fn from(err: SpiError) -> PyErr {
        PyValueError::new_err(format!("SpiError: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Basic `Display` formatting for SpiError variants.
    // - Embedding of payload values (thresh, n, A) into error messages.
    //
    // They intentionally DO NOT cover:
    // - The `From<SpiError> for PyErr` conversion, since exercising it
    //   requires linking against the Python C API and is better handled
    //   by Python-level tests.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify that `SpiError::EmptySeries` formats to a non-empty,
    // human-readable message.
    //
    // Given
    // -----
    // - An `SpiError::EmptySeries` value.
    //
    // Expect
    // ------
    // - `format!("{err}")` is non-empty.
    fn spi_error_empty_series_has_nonempty_display_message() {
        // Arrange
        let err = SpiError::EmptySeries;

        // Act
        let msg = err.to_string();

        // Assert
        assert!(!msg.trim().is_empty(), "Display message for EmptySeries should not be empty.");
    }

    #[test]
    // Purpose
    // -------
    // Verify that `SpiError::InvalidThreshold` includes both the offending
    // window and the series length in its `Display` representation.
    //
    // Given
    // -----
    // - An `SpiError::InvalidThreshold` with thresh = 12 and len = 5.
    //
    // Expect
    // ------
    // - `format!("{err}")` contains "12" and "5".
    fn spi_error_invalid_threshold_includes_payload_in_display() {
        // Arrange
        let err = SpiError::InvalidThreshold { thresh: 12, len: 5 };

        // Act
        let msg = err.to_string();

        // Assert
        assert!(
            msg.contains("12") && msg.contains('5'),
            "Display message should include offending window and length.\nGot: {msg}"
        );
    }

    #[test]
    // Purpose
    // -------
    // Verify that `SpiError::InsufficientData` includes the observed
    // valid-sample count in its `Display` representation.
    //
    // Given
    // -----
    // - An `SpiError::InsufficientData` with n = 1.
    //
    // Expect
    // ------
    // - `format!("{err}")` contains "1".
    fn spi_error_insufficient_data_includes_count_in_display() {
        // Arrange
        let err = SpiError::InsufficientData { n: 1 };

        // Act
        let msg = err.to_string();

        // Assert
        assert!(msg.contains('1'), "Display message should include the sample count.\nGot: {msg}");
    }

    #[test]
    // Purpose
    // -------
    // Ensure that `SpiError::FailedFit` reports the degenerate log-moment
    // statistic in its `Display` representation.
    //
    // Given
    // -----
    // - An `SpiError::FailedFit` with a = 0.0.
    //
    // Expect
    // ------
    // - `format!("{err}")` contains "0".
    fn spi_error_failed_fit_includes_statistic_in_display() {
        // Arrange
        let err = SpiError::FailedFit { a: 0.0 };

        // Act
        let msg = err.to_string();

        // Assert
        assert!(
            msg.contains('0'),
            "Display message should include the offending A statistic.\nGot: {msg}"
        );
    }
}
