//! spi — Standardized Precipitation Index estimation and helpers.
//!
//! Purpose
//! -------
//! Collect the Standardized Precipitation Index routines and their shared
//! infrastructure. This subtree implements the full SPI pipeline — rolling
//! accumulation, Thom's closed-form gamma fit, the gamma-CDF
//! probability-integral transform, and the standard-normal quantile mapping
//! — together with common input validation and error handling, including
//! Python bridges for PyO3-based bindings.
//!
//! Key behaviors
//! -------------
//! - Expose the SPI pipeline via [`SpiOutcome`] and its constructor
//!   [`SpiOutcome::compute`](estimator::SpiOutcome::compute).
//! - Centralize input guards in [`validate_input`], ensuring series length,
//!   finiteness, and window bounds are checked once in a consistent way.
//! - Provide a dedicated error type [`SpiError`] and result alias
//!   [`SpiResult`], plus a conversion layer to Python exceptions when the
//!   `python-bindings` feature is enabled.
//!
//! Invariants & assumptions
//! ------------------------
//! - Precipitation inputs are real-valued and expected non-negative;
//!   missing observations are encoded as `NaN` and propagate through every
//!   derived series rather than being silently filled.
//! - Routines in this subtree report failures via [`SpiResult`] and never
//!   panic on user-facing invalid inputs; panics indicate programming
//!   errors (e.g., out-of-range indexing not caught by validation).
//! - Fitted gamma parameters are global to the series and satisfy α > 0,
//!   β > 0 whenever estimation succeeds.
//! - At the Python boundary, all [`SpiError`] values are mapped into a
//!   single exception class (`PyValueError`) with the Rust `Display`
//!   message preserved verbatim.
//!
//! Conventions
//! -----------
//! - This subtree is focused on the *index computation*; tabular feature
//!   builders that consume or accompany the index live under the
//!   `features` subtree with their own error types.
//! - Error messages are phrased in terms of domain constraints such as
//!   "1 ≤ thresh ≤ n" rather than low-level details.
//! - The public entry point
//!   [`SpiOutcome::compute`](estimator::SpiOutcome::compute) is a thin
//!   wrapper that delegates shape checks to [`validate_input`] and
//!   propagates [`SpiError`] via [`SpiResult`].
//!
//! Downstream usage
//! ----------------
//! - Typical Rust code imports the main surface as:
//!
//!   ```rust
//!   use drought_indices::spi::{SpiOutcome, SpiResult};
//!
//!   # fn run(precip: &[f64]) -> SpiResult<()> {
//!   let outcome: SpiOutcome = SpiOutcome::compute(precip, 3)?;
//!   # Ok(()) }
//!   ```
//!
//!   and only refers to `spi::errors` or `spi::validation` directly when
//!   matching on [`SpiError`] or reusing [`validate_input`].
//! - Station-level pipelines are expected to call
//!   [`SpiOutcome::compute`](estimator::SpiOutcome::compute) once per
//!   (series, scale) pair and then read the accumulated series, fit
//!   parameters, and index from [`SpiOutcome`].
//! - Python bindings expose thin wrappers around the same Rust entry
//!   points; they rely on `From<SpiError> for PyErr` to raise `ValueError`
//!   instances instead of returning [`SpiResult`] explicitly.
//!
//! Testing notes
//! -------------
//! - Unit tests in [`errors`] verify `Display` messages and payload
//!   embedding for [`SpiError`] variants.
//! - Unit tests in [`validation`] exercise all branches of
//!   [`validate_input`], including empty series, invalid windows, and
//!   infinite values.
//! - Unit tests in [`estimator`] cover low-level helper correctness
//!   (rolling mean, NaN-ignoring moments, Thom's fit), the concrete
//!   reference scenario, NaN propagation, and degenerate windows; the
//!   integration suite under `tests/` adds monotonicity and
//!   simulation-based standardization checks.

pub mod errors;
pub mod estimator;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::errors::{SpiError, SpiResult};
pub use self::estimator::SpiOutcome;
pub use self::validation::validate_input;

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use drought_indices::spi::prelude::*;
//
// to import the main SPI surface in a single line.

pub mod prelude {
    pub use super::errors::{SpiError, SpiResult};
    pub use super::estimator::SpiOutcome;
}
