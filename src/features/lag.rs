//! features::lag — shifted-copy lag features.
//!
//! Purpose
//! -------
//! Derive lagged copies of every column of a [`FeatureTable`], one per
//! caller-supplied integer offset, named by the lag value. Lag features let
//! downstream models condition on an entity's recent history without the
//! model itself handling time.
//!
//! Key behaviors
//! -------------
//! - For each existing column `c` and each lag `k`, appends a column
//!   `"{c} lag{k}"` where entry `i` holds `c[i − k]`; the first `k` entries
//!   are `NaN`.
//! - The receiver is never mutated; a new table is returned.
//!
//! Invariants & assumptions
//! ------------------------
//! - Lags must be ≥ 1; a zero lag would duplicate the column verbatim and
//!   is rejected. A lag ≥ the table length yields an all-`NaN` column.
//! - Only the columns present when the call starts are lagged; derived
//!   columns are never re-lagged within the same call.
//!
//! Conventions
//! -----------
//! - Derived names use the `" lag{k}"` suffix (e.g., `"precip lag2"`),
//!   mirroring the naming scheme of the datasets this crate was built for.
//!
//! Downstream usage
//! ----------------
//! - Typically called after rolling features so that aggregates can be
//!   lagged as well; call order is up to the pipeline author.
//!
//! Testing notes
//! -------------
//! - Unit tests cover shifted values, `NaN` heads, oversized lags, naming,
//!   receiver immutability, and the error branches.

use ndarray::Array1;

use crate::features::errors::{FeatureError, FeatureResult};
use crate::features::table::FeatureTable;

impl FeatureTable {
    /// Append one shifted copy per (column, lag).
    ///
    /// Parameters
    /// ----------
    /// - `lags`: `&[usize]`
    ///   Shift offsets in periods; each must be ≥ 1.
    ///
    /// Returns
    /// -------
    /// `FeatureResult<FeatureTable>`
    ///   A new table containing every original column followed by the
    ///   lagged columns, grouped by source column in lag order.
    ///
    /// Errors
    /// ------
    /// - `FeatureError::EmptyLags`
    ///   Returned when `lags` is empty.
    /// - `FeatureError::ZeroLag`
    ///   Returned when any lag is 0.
    ///
    /// Examples
    /// --------
    /// ```rust
    /// use drought_indices::features::table::FeatureTable;
    ///
    /// let table = FeatureTable::new(vec![("precip".to_string(), vec![1.0, 2.0, 3.0, 4.0])])
    ///     .unwrap();
    /// let features = table.with_lag_features(&[1]).unwrap();
    ///
    /// assert_eq!(features.column_names(), vec!["precip", "precip lag1"]);
    /// assert!(features.column("precip lag1").unwrap()[0].is_nan());
    /// assert_eq!(features.column("precip lag1").unwrap()[1], 1.0);
    /// ```
    pub fn with_lag_features(&self, lags: &[usize]) -> FeatureResult<FeatureTable> {
        if lags.is_empty() {
            return Err(FeatureError::EmptyLags);
        }
        if lags.contains(&0) {
            return Err(FeatureError::ZeroLag);
        }

        let base_columns: Vec<String> =
            self.column_names().iter().map(|name| name.to_string()).collect();

        let mut out = self.clone();
        for column in &base_columns {
            let values = out.column(column).expect("snapshotted column exists").clone();
            for &lag in lags {
                let shifted = calc_shifted(&values, lag);
                out = out.with_column(&format!("{column} lag{lag}"), shifted)?;
            }
        }
        Ok(out)
    }
}

/// Shift a column forward by `lag` positions, filling the head with NaN.
#[inline]
fn calc_shifted(values: &Array1<f64>, lag: usize) -> Array1<f64> {
    let len = values.len();
    let mut out = Array1::from_elem(len, f64::NAN);
    for i in lag..len {
        out[i] = values[i - lag];
    }
    out
}
