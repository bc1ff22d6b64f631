//! features::errors — shared error types for tabular feature engineering.
//!
//! Purpose
//! -------
//! Provide the error enum and result alias used by the feature-engineering
//! subtree: table construction, rolling-window features, lag features, and
//! declarative column substitution. A conversion layer to Python exceptions
//! is included for PyO3-based bindings.
//!
//! Key behaviors
//! -------------
//! - Define [`FeatureResult`] and [`FeatureError`] as the canonical result
//!   and error types for every `features` operation.
//! - Attach human-readable `Display` messages to each error variant so that
//!   diagnostics are meaningful without additional context.
//! - Implement `From<FeatureError> for PyErr` to map Rust-side failures
//!   into `PyValueError` values visible to Python callers.
//!
//! Invariants & assumptions
//! ------------------------
//! - Feature builders validate their inputs (window lists, lag lists,
//!   column alignment) and return [`FeatureResult<T>`] instead of
//!   panicking.
//! - `FeatureError` values are small, cheap to clone, and suitable for use
//!   in both unit tests and higher-level orchestration code.
//!
//! Conventions
//! -----------
//! - This module covers tabular feature errors only; the SPI estimator has
//!   its own `errors` module under the `spi` subtree.
//! - Error messages name the offending column, location, window, or lag so
//!   pipeline authors can locate bad configuration quickly.
//!
//! Downstream usage
//! ----------------
//! - Table constructors and builder methods on
//!   [`FeatureTable`](crate::features::table::FeatureTable) return
//!   [`FeatureResult<T>`] to propagate failures cleanly to callers.
//! - Python bindings rely on `From<FeatureError> for PyErr` to raise
//!   `ValueError` instances.
//!
//! Testing notes
//! -------------
//! - Unit tests in this module verify that each variant's `Display`
//!   message embeds its payload (column name, window, lag, or counts).
//! - The builder modules exercise these errors indirectly through their
//!   own validation tests.

#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

pub type FeatureResult<T> = Result<T, FeatureError>;

/// FeatureError — error conditions for tabular feature engineering.
///
/// Purpose
/// -------
/// Represent all validation failures that can occur when constructing a
/// [`FeatureTable`](crate::features::table::FeatureTable) or deriving
/// rolling, lag, or substituted columns from one.
///
/// Variants
/// --------
/// - `DuplicateColumn(name)`
///   Two columns with the same name were supplied at construction.
/// - `UnknownColumn(name)`
///   A referenced column does not exist in the relevant table.
/// - `UnknownLocation(name)`
///   A substitution rule references a location absent from the provided
///   reference dataset.
/// - `LengthMismatch { column, expected, actual }`
///   A column's length disagrees with the table's row count.
/// - `EmptyWindows` / `EmptyLags`
///   The caller supplied no windows / lags, so there is nothing to build.
/// - `ZeroWindow` / `ZeroLag`
///   A window or lag of zero periods was supplied; both are degenerate
///   (a zero-length window has no observations, a zero lag duplicates the
///   column verbatim).
/// - `LabelCountMismatch { windows, labels }`
///   The rolling builder received differing numbers of windows and labels,
///   so derived column names cannot be formed.
///
/// Invariants
/// ----------
/// - Each variant carries just enough information (offending name, counts)
///   to allow downstream logging and debugging without leaking table
///   contents.
///
/// Notes
/// -----
/// - This enum implements [`std::error::Error`] and [`std::fmt::Display`]
///   so it can be used with idiomatic `?`-based error propagation in Rust.
/// - A blanket [`From<FeatureError> for PyErr`] implementation maps all of
///   these cases to `PyValueError` at the Python boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum FeatureError {
    //------ Table construction errors ------
    DuplicateColumn(String),
    UnknownColumn(String),
    UnknownLocation(String),
    LengthMismatch { column: String, expected: usize, actual: usize },
    //------ Builder configuration errors ------
    EmptyWindows,
    EmptyLags,
    ZeroWindow,
    ZeroLag,
    LabelCountMismatch { windows: usize, labels: usize },
}

impl std::error::Error for FeatureError {}

impl std::fmt::Display for FeatureError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeatureError::DuplicateColumn(name) => {
                write!(f, "Duplicate column name: {name:?}.")
            }
            FeatureError::UnknownColumn(name) => {
                write!(f, "Unknown column: {name:?}.")
            }
            FeatureError::UnknownLocation(name) => {
                write!(f, "Unknown location in reference dataset: {name:?}.")
            }
            FeatureError::LengthMismatch { column, expected, actual } => {
                write!(
                    f,
                    "Column {column:?} has length {actual}, expected {expected} to align with the table."
                )
            }
            FeatureError::EmptyWindows => {
                write!(f, "No rolling windows supplied; need at least one.")
            }
            FeatureError::EmptyLags => {
                write!(f, "No lag offsets supplied; need at least one.")
            }
            FeatureError::ZeroWindow => {
                write!(f, "Rolling window of 0 periods is not allowed; windows must be ≥ 1.")
            }
            FeatureError::ZeroLag => {
                write!(f, "Lag of 0 periods is not allowed; lags must be ≥ 1.")
            }
            FeatureError::LabelCountMismatch { windows, labels } => {
                write!(f, "Got {windows} windows but {labels} labels; counts must match.")
            }
        }
    }
}

#[cfg(feature = "python-bindings")]
impl From<FeatureError> for PyErr {
    fn from(err: FeatureError) -> PyErr {
        PyValueError::new_err(format!("FeatureError: {err}"))
    }
}
