//! spi::estimator — Standardized Precipitation Index via Thom's gamma fit.
//!
//! Purpose
//! -------
//! Implement the Standardized Precipitation Index (McKee, Doesken & Kleist,
//! 1993) for an accumulated precipitation series: a trailing rolling mean at
//! a caller-chosen scale, a two-parameter gamma fit using Thom's (1958)
//! closed-form log-moment approximation, a gamma-CDF probability-integral
//! transform, and a standard-normal quantile mapping into drought scores.
//!
//! Key behaviors
//! -------------
//! - Accumulate the raw series with a trailing mean over `thresh` periods,
//!   offset by a small constant (1e-4) so the log transform never sees an
//!   exact zero.
//! - Estimate global gamma parameters (shape α, scale β) once per series
//!   from the log-moment statistic A = ln(μ) − (Σ ln x̄ᵢ)/n.
//! - Map every accumulated value through Gamma(α, β).cdf and then through
//!   the standard-normal quantile function, yielding one standardized
//!   anomaly per time step.
//! - Expose a compact [`SpiOutcome`] value holding every intermediate of
//!   the pipeline (accumulated series, log series, moments, fit parameters,
//!   CDF values, and the index), suitable for both Rust and Python
//!   bindings.
//!
//! Invariants & assumptions
//! ------------------------
//! - Missing observations are encoded as `NaN` and propagate: any rolling
//!   window containing a `NaN` yields a `NaN` accumulated value, which in
//!   turn yields `NaN` CDF and index entries at that position.
//! - The first `thresh − 1` entries of every derived series are `NaN`
//!   because the trailing window is incomplete there.
//! - The effective sample size `n` counts non-missing accumulated entries
//!   from index `thresh − 1` onward. It deliberately does *not* re-exclude
//!   entries whose *log* became missing in the transform step; this mirrors
//!   the reference formulation exactly (see the note on [`calc_valid_count`]).
//! - Fit parameters are global to the series: α > 0 and β > 0 whenever
//!   [`SpiOutcome::compute`] succeeds.
//! - Input validation (window bounds, finiteness) is delegated to
//!   `spi::validation::validate_input`, which returns [`SpiResult`] rather
//!   than panicking.
//!
//! Conventions
//! -----------
//! - Indexing is 0-based; derived series are index-aligned with the input.
//! - CDF values of exactly 0 or 1 map to −∞ / +∞ by definition of the
//!   quantile function. These are legitimate tail outputs, never clamped
//!   and never treated as errors.
//! - `statrs` parameterizes the gamma distribution by shape and *rate*;
//!   the scale β estimated here is therefore inverted at construction.
//! - Error handling uses the dedicated [`SpiError`] type from
//!   `spi::errors` and the result alias [`SpiResult`].
//!
//! Downstream usage
//! ----------------
//! - Call [`SpiOutcome::compute`] once per (station, scale) pair; the
//!   computation is pure and independent across invocations, so callers
//!   may trivially parallelize over stations and scales.
//! - Feature-engineering pipelines typically feed the resulting index into
//!   [`FeatureTable`](crate::features::table::FeatureTable) columns for
//!   downstream modeling.
//! - Python bindings expose only the [`SpiOutcome`] surface, leaving the
//!   helper functions private to the Rust crate.
//!
//! Testing notes
//! -------------
//! - Unit tests in this module verify the low-level helpers (rolling mean,
//!   NaN-ignoring moments, Thom's fit) on small synthetic series, the
//!   concrete reference scenario, NaN propagation, and the degenerate
//!   single-window case.
//! - Monotonicity of the CDF / index in the accumulated value and the
//!   simulation-based standardization check (mean ≈ 0, variance ≈ 1 on an
//!   exact gamma sample) live in the integration suite under `tests/`.

use ndarray::Array1;
use statrs::distribution::{ContinuousCDF, Gamma, Normal};

use crate::spi::errors::{SpiError, SpiResult};
use crate::spi::validation::validate_input;

/// Additive offset applied to every accumulated value before the log
/// transform, so that an all-dry window (mean 0) stays strictly positive.
const LOG_OFFSET: f64 = 1e-4;

/// SpiOutcome — full output of one Standardized Precipitation Index run.
///
/// Purpose
/// -------
/// Represent the outcome of a single SPI computation: the accumulated and
/// log-accumulated series, the global log-moment statistics, the fitted
/// gamma parameters, and the per-step CDF and standardized-index series.
///
/// Key behaviors
/// -------------
/// - Holds every intermediate of the SPI pipeline so callers can inspect
///   the fit (e.g., α, β) alongside the final index.
/// - All series are index-aligned with the input and share its length.
/// - Provides lightweight accessor methods for each field so that
///   downstream code (including Python bindings) does not need to depend
///   on the internal layout.
///
/// Parameters
/// ----------
/// Constructed via [`SpiOutcome::compute`]:
/// - `series`: `&[f64]`
///   Input precipitation series. Values are expected non-negative; `NaN`
///   encodes a missing observation and propagates. Must satisfy the
///   validation rules enforced by `validate_input`.
/// - `thresh`: `usize`
///   Accumulation window (the "n-period" SPI scale); `1 ≤ thresh ≤ len`.
///
/// Fields
/// ------
/// - `accumulated`: `Array1<f64>`
///   Trailing `thresh`-period mean of the input plus the 1e-4 offset;
///   first `thresh − 1` entries are `NaN`.
/// - `log_accumulated`: `Array1<f64>`
///   Natural log of `accumulated`, with infinite results converted to
///   `NaN`.
/// - `mean`: `f64`
///   NaN-ignoring arithmetic mean of `accumulated`.
/// - `log_sum`: `f64`
///   NaN-ignoring sum of `log_accumulated`.
/// - `n`: `usize`
///   Count of non-missing accumulated entries from index `thresh − 1` on.
/// - `a`: `f64`
///   Thom's log-moment statistic, `ln(mean) − log_sum / n`.
/// - `alpha`: `f64`
///   Fitted gamma shape, strictly positive on success.
/// - `beta`: `f64`
///   Fitted gamma scale, strictly positive on success.
/// - `cdf`: `Array1<f64>`
///   Gamma(α, β) CDF evaluated at every accumulated entry.
/// - `spi`: `Array1<f64>`
///   Standard-normal quantile of every CDF entry — the index itself.
///
/// Invariants
/// ----------
/// - `accumulated.len() == log_accumulated.len() == cdf.len() == spi.len()`
///   and all equal the input length.
/// - `alpha > 0.0` and `beta > 0.0` whenever construction succeeds.
/// - `cdf` entries lie in [0, 1] or are `NaN`; `spi` entries are finite,
///   ±∞ (saturated tails), or `NaN` (missing positions).
///
/// Performance
/// -----------
/// - Owns four `Array1<f64>` buffers of the input length; no other heap
///   allocations. Construction is O(len × thresh) in the rolling step and
///   O(len) everywhere else.
///
/// Notes
/// -----
/// - Designed as a value object; it does not retain the caller's input.
/// - Safe to expose as a public return type both in Rust and in Python
///   bindings.
#[derive(Debug, Clone)]
pub struct SpiOutcome {
    accumulated: Array1<f64>,
    log_accumulated: Array1<f64>,
    mean: f64,
    log_sum: f64,
    n: usize,
    a: f64,
    alpha: f64,
    beta: f64,
    cdf: Array1<f64>,
    spi: Array1<f64>,
}

impl SpiOutcome {
    /// Compute the Standardized Precipitation Index at a given scale.
    ///
    /// Parameters
    /// ----------
    /// - `series`: `&[f64]`
    ///   Input precipitation series of length ≥ `thresh`. Values are
    ///   expected non-negative; `NaN` encodes missing observations and
    ///   propagates through every derived series. The input is never
    ///   mutated.
    /// - `thresh`: `usize`
    ///   Accumulation window; must satisfy `1 ≤ thresh ≤ series.len()`.
    ///
    /// Returns
    /// -------
    /// `SpiResult<SpiOutcome>`
    ///   - `Ok(SpiOutcome)` on success, with all derived series aligned to
    ///     the input and the fitted parameters satisfying α > 0, β > 0.
    ///   - `Err(SpiError)` when validation fails, too few valid windows
    ///     survive accumulation, or Thom's fit degenerates.
    ///
    /// Errors
    /// ------
    /// - `SpiError::EmptySeries`, `SpiError::InvalidThreshold`,
    ///   `SpiError::InvalidData`
    ///   Returned by `validate_input` when the series or window violate
    ///   documented constraints.
    /// - `SpiError::InsufficientData { n }`
    ///   Returned when fewer than two valid accumulated observations exist
    ///   (this includes `thresh == series.len()`, which leaves exactly one
    ///   window), or when the accumulated mean is non-finite or ≤ 0.
    /// - `SpiError::FailedFit { a }`
    ///   Returned when A = 0 exactly (division by zero in the shape
    ///   formula) or when α or β come out non-finite or non-positive.
    ///
    /// Panics
    /// ------
    /// - Never panics under normal operation; all user-facing invalid
    ///   inputs are surfaced as `SpiError` values.
    ///
    /// Notes
    /// -----
    /// - Deterministic: identical `(series, thresh)` inputs always produce
    ///   bit-identical outputs; there is no randomness anywhere in the
    ///   pipeline.
    /// - CDF values of exactly 0 or 1 map to −∞ / +∞ in the index. These
    ///   saturated tail values are expected outputs at distribution
    ///   extremes and are passed through unclamped.
    ///
    /// Examples
    /// --------
    /// ```rust
    /// use drought_indices::spi::estimator::SpiOutcome;
    ///
    /// let series = vec![10.0, 0.0, 5.0, 20.0, 0.0, 15.0, 10.0, 5.0, 25.0, 0.0];
    /// let outcome = SpiOutcome::compute(&series, 3).unwrap();
    ///
    /// assert_eq!(outcome.spi().len(), series.len());
    /// assert!(outcome.accumulated()[0].is_nan());
    /// assert!((outcome.accumulated()[2] - 5.0001).abs() < 1e-12);
    /// assert!(outcome.alpha() > 0.0 && outcome.beta() > 0.0);
    /// ```
    pub fn compute(series: &[f64], thresh: usize) -> SpiResult<Self> {
        validate_input(series, thresh)?;

        let accumulated = calc_rolling_mean(series, thresh);
        let log_accumulated = calc_log_accumulated(&accumulated);
        let mean = calc_nan_mean(&accumulated);
        let log_sum = calc_nan_sum(&log_accumulated);
        let n = calc_valid_count(&accumulated, thresh);

        if n < 2 || !mean.is_finite() || mean <= 0.0 {
            return Err(SpiError::InsufficientData { n });
        }

        let (a, alpha, beta) = calc_thom_fit(mean, log_sum, n)?;

        // statrs takes shape and *rate*; β here is a scale.
        let gamma = Gamma::new(alpha, 1.0 / beta).map_err(|_| SpiError::FailedFit { a })?;
        let cdf = calc_gamma_cdf(&accumulated, &gamma);
        let spi = calc_normal_quantiles(&cdf);

        Ok(SpiOutcome { accumulated, log_accumulated, mean, log_sum, n, a, alpha, beta, cdf, spi })
    }

    /// Trailing rolling mean of the input plus the 1e-4 offset.
    pub fn accumulated(&self) -> &Array1<f64> {
        &self.accumulated
    }

    /// Natural log of the accumulated series (infinities converted to NaN).
    pub fn log_accumulated(&self) -> &Array1<f64> {
        &self.log_accumulated
    }

    /// NaN-ignoring mean of the accumulated series.
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// NaN-ignoring sum of the log-accumulated series.
    pub fn log_sum(&self) -> f64 {
        self.log_sum
    }

    /// Effective sample size used in the moment fit.
    pub fn n(&self) -> usize {
        self.n
    }

    /// Thom's log-moment statistic A = ln(μ) − log_sum / n.
    pub fn a(&self) -> f64 {
        self.a
    }

    /// Fitted gamma shape parameter (α > 0).
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Fitted gamma scale parameter (β > 0).
    pub fn beta(&self) -> f64 {
        self.beta
    }

    /// Gamma CDF of every accumulated entry.
    pub fn cdf(&self) -> &Array1<f64> {
        &self.cdf
    }

    /// The standardized index: standard-normal quantile of every CDF entry.
    pub fn spi(&self) -> &Array1<f64> {
        &self.spi
    }
}

//
// ---------- Private helpers (compact docs) ----------
//

/// Compute the trailing rolling mean over `thresh` periods, offset by 1e-4.
///
/// Parameters
/// ----------
/// - `series`: `&[f64]`
///   Input series of length ≥ `thresh` (guaranteed by validation).
/// - `thresh`: `usize`
///   Window length, `1 ≤ thresh ≤ series.len()`.
///
/// Returns
/// -------
/// `Array1<f64>`
///   Same length as the input. Entry `i ≥ thresh − 1` is
///   `mean(series[i−thresh+1 ..= i]) + 1e-4`; earlier entries are `NaN`.
///   A window containing any `NaN` sums to `NaN`, so missing observations
///   propagate without special-casing.
///
/// Panics
/// ------
/// - Panics if `thresh == 0` or `thresh > series.len()` due to slice
///   bounds. Public entry points rely on `validate_input` to prevent this.
#[inline]
fn calc_rolling_mean(series: &[f64], thresh: usize) -> Array1<f64> {
    let len = series.len();
    let mut out = Array1::from_elem(len, f64::NAN);

    for i in (thresh - 1)..len {
        let window = &series[i + 1 - thresh..=i];
        let sum: f64 = window.iter().sum();
        out[i] = sum / thresh as f64 + LOG_OFFSET;
    }
    out
}

/// Take the natural log of every accumulated entry, mapping infinities to NaN.
///
/// Parameters
/// ----------
/// - `accumulated`: `&Array1<f64>`
///   Accumulated series from [`calc_rolling_mean`].
///
/// Returns
/// -------
/// `Array1<f64>`
///   Element-wise `ln`, with `±∞` results (from a zero argument) converted
///   to `NaN` so they are ignored by the moment sums rather than poisoning
///   them. `ln` of a negative or `NaN` argument is already `NaN`.
#[inline]
fn calc_log_accumulated(accumulated: &Array1<f64>) -> Array1<f64> {
    accumulated.mapv(|v| {
        let log = v.ln();
        if log.is_infinite() { f64::NAN } else { log }
    })
}

/// NaN-ignoring arithmetic mean; `NaN` when no valid entries exist.
#[inline]
fn calc_nan_mean(values: &Array1<f64>) -> f64 {
    let mut sum = 0.0_f64;
    let mut count = 0_usize;
    for &v in values {
        if !v.is_nan() {
            sum += v;
            count += 1;
        }
    }
    if count == 0 { f64::NAN } else { sum / count as f64 }
}

/// NaN-ignoring sum; `0.0` when no valid entries exist.
#[inline]
fn calc_nan_sum(values: &Array1<f64>) -> f64 {
    values.iter().filter(|v| !v.is_nan()).sum()
}

/// Count non-missing accumulated entries from index `thresh − 1` onward.
///
/// Notes
/// -----
/// - This count excludes the initial incomplete-window positions and any
///   accumulated entry that is missing because the input was missing, but
///   it does *not* re-exclude entries whose log became missing in
///   [`calc_log_accumulated`]. The reference formulation behaves the same
///   way, and the asymmetry is preserved here on purpose; with
///   non-negative inputs the two counts coincide because the 1e-4 offset
///   keeps every valid accumulated value strictly positive.
#[inline]
fn calc_valid_count(accumulated: &Array1<f64>, thresh: usize) -> usize {
    accumulated.iter().skip(thresh - 1).filter(|v| !v.is_nan()).count()
}

/// Fit gamma parameters with Thom's closed-form log-moment approximation.
///
/// Parameters
/// ----------
/// - `mean`: `f64`
///   NaN-ignoring mean of the accumulated series; must be finite and > 0
///   (guaranteed by the caller's `InsufficientData` guard).
/// - `log_sum`: `f64`
///   NaN-ignoring sum of the log-accumulated series.
/// - `n`: `usize`
///   Effective sample size; must be ≥ 2.
///
/// Returns
/// -------
/// `SpiResult<(f64, f64, f64)>`
///   - `Ok((a, alpha, beta))` where
///     `a = ln(mean) − log_sum / n`,
///     `alpha = (1 / 4a) · (1 + √(1 + 4a/3))`, and
///     `beta = mean / alpha`.
///   - `Err(SpiError::FailedFit { a })` when `a == 0` exactly, `a` is
///     non-finite, or the derived α / β are non-finite or non-positive
///     (e.g., a strongly negative `a` drives the square root complex).
#[inline]
fn calc_thom_fit(mean: f64, log_sum: f64, n: usize) -> SpiResult<(f64, f64, f64)> {
    let a = mean.ln() - log_sum / n as f64;
    if a == 0.0 || !a.is_finite() {
        return Err(SpiError::FailedFit { a });
    }

    let alpha = (1.0 / (4.0 * a)) * (1.0 + (1.0 + (4.0 * a) / 3.0).sqrt());
    let beta = mean / alpha;
    if !alpha.is_finite() || !beta.is_finite() || alpha <= 0.0 || beta <= 0.0 {
        return Err(SpiError::FailedFit { a });
    }

    Ok((a, alpha, beta))
}

/// Evaluate the gamma CDF at every accumulated entry, propagating NaN.
#[inline]
fn calc_gamma_cdf(accumulated: &Array1<f64>, gamma: &Gamma) -> Array1<f64> {
    accumulated.mapv(|v| if v.is_nan() { f64::NAN } else { gamma.cdf(v) })
}

/// Map CDF values through the standard-normal quantile function.
///
/// Notes
/// -----
/// - Probabilities of exactly 0 and 1 map to −∞ and +∞ respectively; the
///   saturation is made explicit here rather than relying on the library's
///   boundary behavior, so the tails stay deterministic across versions.
#[inline]
fn calc_normal_quantiles(cdf: &Array1<f64>) -> Array1<f64> {
    let normal = Normal::new(0.0, 1.0).expect("unit normal");
    cdf.mapv(|p| {
        if p.is_nan() {
            f64::NAN
        } else if p <= 0.0 {
            f64::NEG_INFINITY
        } else if p >= 1.0 {
            f64::INFINITY
        } else {
            normal.inverse_cdf(p)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spi::errors::SpiError;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Correct computation of the rolling mean, NaN-ignoring moments, and
    //   Thom's fit on small synthetic series.
    // - The concrete reference scenario (10-point series, thresh = 3).
    // - NaN propagation from missing inputs into every derived series.
    // - Degenerate cases: thresh = 1 (no averaging), thresh = len (single
    //   window → InsufficientData), and A = 0 (FailedFit).
    //
    // They intentionally DO NOT cover:
    // - Monotonicity of the CDF / index and the simulation-based
    //   standardization check, which live in the integration suite under
    //   `tests/`.
    // - Statistical quality of Thom's approximation itself (a literature
    //   question, not a unit-test question).
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify the concrete reference scenario: a 10-point series at
    // thresh = 3 produces accumulated[2] = mean(10, 0, 5) + 1e-4, NaN in
    // the first two positions, and an effective sample size of 8.
    //
    // Given
    // -----
    // - series = [10, 0, 5, 20, 0, 15, 10, 5, 25, 0], thresh = 3.
    //
    // Expect
    // ------
    // - accumulated[0] and accumulated[1] are NaN.
    // - accumulated[2] ≈ 5.0001.
    // - n = 8 (indices 2..9).
    // - All derived series have length 10.
    fn compute_reference_scenario_matches_expected_values() {
        // Arrange
        let series = vec![10.0_f64, 0.0, 5.0, 20.0, 0.0, 15.0, 10.0, 5.0, 25.0, 0.0];

        // Act
        let outcome = SpiOutcome::compute(&series, 3).expect("fit should succeed");

        // Assert
        assert!(outcome.accumulated()[0].is_nan());
        assert!(outcome.accumulated()[1].is_nan());
        assert!(
            (outcome.accumulated()[2] - 5.0001).abs() < 1e-12,
            "accumulated[2] should be mean(10, 0, 5) + 1e-4, got {}",
            outcome.accumulated()[2]
        );
        assert_eq!(outcome.n(), 8);
        assert_eq!(outcome.accumulated().len(), series.len());
        assert_eq!(outcome.log_accumulated().len(), series.len());
        assert_eq!(outcome.cdf().len(), series.len());
        assert_eq!(outcome.spi().len(), series.len());
        assert!(outcome.alpha() > 0.0 && outcome.beta() > 0.0);
    }

    #[test]
    // Purpose
    // -------
    // Verify that thresh = 1 degenerates to no rolling average: the
    // accumulated series is exactly the input plus the 1e-4 offset, with
    // no NaN head.
    //
    // Given
    // -----
    // - A short positive series and thresh = 1.
    //
    // Expect
    // ------
    // - accumulated[i] = series[i] + 1e-4 for every i.
    fn compute_thresh_one_degenerates_to_offset_series() {
        // Arrange
        let series = vec![3.0_f64, 7.0, 1.0, 4.0, 6.0];

        // Act
        let outcome = SpiOutcome::compute(&series, 1).expect("fit should succeed");

        // Assert
        for (i, (&acc, &raw)) in outcome.accumulated().iter().zip(&series).enumerate() {
            assert!(
                (acc - (raw + 1e-4)).abs() < 1e-12,
                "accumulated[{i}] should equal series[{i}] + 1e-4, got {acc}"
            );
        }
    }

    #[test]
    // Purpose
    // -------
    // Ensure that thresh = series.len() leaves exactly one valid window
    // and is reported as InsufficientData rather than attempting a fit on
    // a single observation.
    //
    // Given
    // -----
    // - A series of length 4 and thresh = 4.
    //
    // Expect
    // ------
    // - `SpiOutcome::compute` returns `Err(SpiError::InsufficientData { n: 1 })`.
    fn compute_full_length_window_returns_insufficient_data() {
        // Arrange
        let series = vec![10.0_f64, 0.0, 5.0, 20.0];

        // Act
        let result = SpiOutcome::compute(&series, 4);

        // Assert
        match result {
            Err(SpiError::InsufficientData { n }) => assert_eq!(n, 1),
            other => panic!("expected InsufficientData {{ n: 1 }}, got {other:?}"),
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify that missing inputs propagate: every rolling window touching
    // a NaN observation yields NaN in the accumulated, CDF, and index
    // series, while untouched windows stay finite.
    //
    // Given
    // -----
    // - A 8-point series with a NaN at index 3 and thresh = 2.
    //
    // Expect
    // ------
    // - accumulated[3] and accumulated[4] are NaN (windows covering index 3).
    // - cdf and spi are NaN exactly where accumulated is NaN.
    // - accumulated[2] and accumulated[6] are finite.
    fn compute_missing_input_propagates_through_all_series() {
        // Arrange
        let series = vec![10.0_f64, 4.0, 6.0, f64::NAN, 8.0, 2.0, 9.0, 5.0];

        // Act
        let outcome = SpiOutcome::compute(&series, 2).expect("fit should succeed");

        // Assert
        assert!(outcome.accumulated()[3].is_nan());
        assert!(outcome.accumulated()[4].is_nan());
        assert!(outcome.accumulated()[2].is_finite());
        assert!(outcome.accumulated()[6].is_finite());
        for i in 0..series.len() {
            assert_eq!(
                outcome.accumulated()[i].is_nan(),
                outcome.cdf()[i].is_nan(),
                "cdf[{i}] should be NaN exactly where accumulated[{i}] is NaN"
            );
            assert_eq!(
                outcome.accumulated()[i].is_nan(),
                outcome.spi()[i].is_nan(),
                "spi[{i}] should be NaN exactly where accumulated[{i}] is NaN"
            );
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify that missing accumulated entries reduce the effective sample
    // size: n counts only non-missing windows past the initial burn-in.
    //
    // Given
    // -----
    // - The same 8-point series with a NaN at index 3 and thresh = 2.
    //
    // Expect
    // ------
    // - Indices 1..=7 hold 7 windows, of which 2 (indices 3 and 4) are
    //   missing, so n = 5.
    fn compute_missing_windows_reduce_effective_sample_size() {
        // Arrange
        let series = vec![10.0_f64, 4.0, 6.0, f64::NAN, 8.0, 2.0, 9.0, 5.0];

        // Act
        let outcome = SpiOutcome::compute(&series, 2).expect("fit should succeed");

        // Assert
        assert_eq!(outcome.n(), 5);
    }

    #[test]
    // Purpose
    // -------
    // Check the low-level rolling mean helper directly: window placement,
    // NaN head length, and the additive offset.
    //
    // Given
    // -----
    // - series = [1, 2, 3, 4] and thresh = 2.
    //
    // Expect
    // ------
    // - out[0] is NaN; out[1..] = [1.5, 2.5, 3.5] + 1e-4.
    fn calc_rolling_mean_places_windows_and_offset_correctly() {
        // Arrange
        let series = vec![1.0_f64, 2.0, 3.0, 4.0];

        // Act
        let out = calc_rolling_mean(&series, 2);

        // Assert
        assert!(out[0].is_nan());
        for (i, expected) in [(1_usize, 1.5_f64), (2, 2.5), (3, 3.5)] {
            assert!(
                (out[i] - (expected + 1e-4)).abs() < 1e-12,
                "out[{i}] should be {expected} + 1e-4, got {}",
                out[i]
            );
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify that the log transform converts −∞ (from a zero argument) to
    // NaN instead of letting it poison the moment sums.
    //
    // Given
    // -----
    // - An accumulated array containing 0.0, a positive value, and NaN.
    //
    // Expect
    // ------
    // - log(0.0) becomes NaN, log(e) stays 1.0, NaN stays NaN.
    fn calc_log_accumulated_converts_infinity_to_nan() {
        // Arrange
        let accumulated = Array1::from(vec![0.0_f64, std::f64::consts::E, f64::NAN]);

        // Act
        let logs = calc_log_accumulated(&accumulated);

        // Assert
        assert!(logs[0].is_nan(), "log(0) should become NaN, got {}", logs[0]);
        assert!((logs[1] - 1.0).abs() < 1e-12);
        assert!(logs[2].is_nan());
    }

    #[test]
    // Purpose
    // -------
    // Verify that the NaN-ignoring mean skips missing entries and that an
    // all-missing array yields NaN.
    //
    // Given
    // -----
    // - [2.0, NaN, 4.0] and an all-NaN array.
    //
    // Expect
    // ------
    // - Mean of the first is 3.0; mean of the second is NaN.
    fn calc_nan_mean_ignores_missing_entries() {
        // Arrange
        let mixed = Array1::from(vec![2.0_f64, f64::NAN, 4.0]);
        let all_missing = Array1::from(vec![f64::NAN, f64::NAN]);

        // Act & Assert
        assert!((calc_nan_mean(&mixed) - 3.0).abs() < 1e-12);
        assert!(calc_nan_mean(&all_missing).is_nan());
    }

    #[test]
    // Purpose
    // -------
    // Ensure that a constant series drives Thom's statistic to exactly
    // zero and is surfaced as FailedFit rather than a division by zero.
    //
    // Given
    // -----
    // - mean = c and log_sum = n · ln(c), so A = ln(c) − ln(c) = 0.
    //
    // Expect
    // ------
    // - `calc_thom_fit` returns `Err(SpiError::FailedFit { a: 0.0 })`.
    fn calc_thom_fit_zero_statistic_returns_failed_fit() {
        // Arrange
        let mean = 5.0_f64;
        let n = 4_usize;
        let log_sum = n as f64 * mean.ln();

        // Act
        let result = calc_thom_fit(mean, log_sum, n);

        // Assert
        match result {
            Err(SpiError::FailedFit { a }) => assert_eq!(a, 0.0),
            other => panic!("expected FailedFit {{ a: 0.0 }}, got {other:?}"),
        }
    }

    #[test]
    // Purpose
    // -------
    // Sanity-check Thom's closed form on hand-computed moments.
    //
    // Given
    // -----
    // - mean = 4.0, log_sum chosen so that A = 0.25, n = 4.
    //
    // Expect
    // ------
    // - alpha = (1 / 1) · (1 + √(4/3)) and beta = mean / alpha, both
    //   strictly positive and matching the closed form to 1e-12.
    fn calc_thom_fit_matches_closed_form() {
        // Arrange
        let mean = 4.0_f64;
        let n = 4_usize;
        let a_target = 0.25_f64;
        let log_sum = (mean.ln() - a_target) * n as f64;

        // Act
        let (a, alpha, beta) = calc_thom_fit(mean, log_sum, n).expect("fit should succeed");

        // Assert
        let expected_alpha = (1.0 / (4.0 * a_target)) * (1.0 + (1.0 + 4.0 * a_target / 3.0).sqrt());
        assert!((a - a_target).abs() < 1e-12);
        assert!((alpha - expected_alpha).abs() < 1e-12, "alpha mismatch: {alpha}");
        assert!((beta - mean / expected_alpha).abs() < 1e-12, "beta mismatch: {beta}");
    }

    #[test]
    // Purpose
    // -------
    // Verify the explicit tail handling of the quantile mapping: CDF
    // values of exactly 0 and 1 map to −∞ and +∞, NaN stays NaN, and an
    // interior probability maps to a finite quantile.
    //
    // Given
    // -----
    // - cdf = [0.0, 0.5, 1.0, NaN].
    //
    // Expect
    // ------
    // - spi = [−∞, ≈0.0, +∞, NaN].
    fn calc_normal_quantiles_saturates_tails_and_propagates_nan() {
        // Arrange
        let cdf = Array1::from(vec![0.0_f64, 0.5, 1.0, f64::NAN]);

        // Act
        let spi = calc_normal_quantiles(&cdf);

        // Assert
        assert_eq!(spi[0], f64::NEG_INFINITY);
        assert!(spi[1].abs() < 1e-12, "Φ⁻¹(0.5) should be 0, got {}", spi[1]);
        assert_eq!(spi[2], f64::INFINITY);
        assert!(spi[3].is_nan());
    }

    #[test]
    // Purpose
    // -------
    // Confirm determinism: two runs on identical inputs produce
    // bit-identical index series (NaN positions included).
    //
    // Given
    // -----
    // - The reference 10-point series at thresh = 3, computed twice.
    //
    // Expect
    // ------
    // - Every pair of corresponding spi entries has identical bit
    //   patterns.
    fn compute_is_deterministic_across_runs() {
        // Arrange
        let series = vec![10.0_f64, 0.0, 5.0, 20.0, 0.0, 15.0, 10.0, 5.0, 25.0, 0.0];

        // Act
        let first = SpiOutcome::compute(&series, 3).expect("fit should succeed");
        let second = SpiOutcome::compute(&series, 3).expect("fit should succeed");

        // Assert
        for (i, (x, y)) in first.spi().iter().zip(second.spi()).enumerate() {
            assert_eq!(x.to_bits(), y.to_bits(), "spi[{i}] differs between runs");
        }
    }

    #[test]
    // Purpose
    // -------
    // Ensure the caller's input buffer is left untouched by a computation.
    //
    // Given
    // -----
    // - A series cloned before the call.
    //
    // Expect
    // ------
    // - The series compares bit-equal to its pre-call copy.
    fn compute_does_not_mutate_input() {
        // Arrange
        let series = vec![10.0_f64, 0.0, 5.0, 20.0, 0.0, 15.0];
        let before = series.clone();

        // Act
        let _ = SpiOutcome::compute(&series, 2).expect("fit should succeed");

        // Assert
        for (x, y) in series.iter().zip(&before) {
            assert_eq!(x.to_bits(), y.to_bits());
        }
    }
}
