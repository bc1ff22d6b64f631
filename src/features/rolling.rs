//! features::rolling — trailing-window aggregation features.
//!
//! Purpose
//! -------
//! Derive rolling-sum and rolling-mean columns from every column of a
//! [`FeatureTable`], one per caller-supplied window, named by a
//! caller-supplied label scheme. Rolling sums are the conventional choice
//! for precipitation and conflict counts; rolling means for prices and
//! other level series.
//!
//! Key behaviors
//! -------------
//! - For each existing column `c`, each window `w` with label `l` appends a
//!   column `"{c} {l}"` holding the trailing aggregate of `c` over `w`
//!   observations.
//! - The first `w − 1` entries of a derived column are `NaN` (incomplete
//!   window), and any window containing a `NaN` aggregates to `NaN`.
//! - The receiver is never mutated; a new table is returned.
//!
//! Invariants & assumptions
//! ------------------------
//! - Windows must be ≥ 1; a window longer than the table simply yields an
//!   all-`NaN` column rather than an error, matching trailing-window
//!   semantics on short series.
//! - Labels and windows are paired positionally, so their counts must
//!   match.
//! - Only the columns present when the call starts are aggregated; derived
//!   columns are never re-aggregated within the same call.
//!
//! Conventions
//! -----------
//! - Derived names use a single space between the source column and the
//!   label (e.g., `"precip 3m"`), mirroring the naming scheme of the
//!   datasets this crate was built for.
//!
//! Downstream usage
//! ----------------
//! - Typically called once per entity table before lag features are added
//!   and the result is handed to a model-preparation step.
//!
//! Testing notes
//! -------------
//! - Unit tests cover sum and mean aggregation values, `NaN` heads and
//!   propagation, oversized windows, label pairing, and the error
//!   branches.

use ndarray::Array1;

use crate::features::errors::{FeatureError, FeatureResult};
use crate::features::table::FeatureTable;

/// Which trailing aggregate a rolling feature column holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RollingMode {
    /// Trailing sum over the window.
    Sum,
    /// Trailing arithmetic mean over the window.
    Mean,
}

impl FeatureTable {
    /// Append one trailing-window aggregate column per (column, window).
    ///
    /// Parameters
    /// ----------
    /// - `windows`: `&[usize]`
    ///   Window lengths in periods; each must be ≥ 1.
    /// - `mode`: [`RollingMode`]
    ///   Whether derived columns hold trailing sums or means.
    /// - `labels`: `&[&str]`
    ///   One label per window, used to name derived columns as
    ///   `"{column} {label}"`. Must have the same length as `windows`.
    ///
    /// Returns
    /// -------
    /// `FeatureResult<FeatureTable>`
    ///   A new table containing every original column followed by the
    ///   derived columns, grouped by source column in window order.
    ///
    /// Errors
    /// ------
    /// - `FeatureError::EmptyWindows`
    ///   Returned when `windows` is empty.
    /// - `FeatureError::ZeroWindow`
    ///   Returned when any window is 0.
    /// - `FeatureError::LabelCountMismatch`
    ///   Returned when `windows.len() != labels.len()`.
    ///
    /// Notes
    /// -----
    /// - A derived name that collides with an existing column replaces it,
    ///   following the append-or-replace semantics of
    ///   [`FeatureTable::with_column`].
    ///
    /// Examples
    /// --------
    /// ```rust
    /// use drought_indices::features::rolling::RollingMode;
    /// use drought_indices::features::table::FeatureTable;
    ///
    /// let table = FeatureTable::new(vec![("precip".to_string(), vec![1.0, 2.0, 3.0, 4.0])])
    ///     .unwrap();
    /// let features = table
    ///     .with_rolling_features(&[2], RollingMode::Sum, &["2m"])
    ///     .unwrap();
    ///
    /// assert_eq!(features.column_names(), vec!["precip", "precip 2m"]);
    /// assert!(features.column("precip 2m").unwrap()[0].is_nan());
    /// assert_eq!(features.column("precip 2m").unwrap()[1], 3.0);
    /// ```
    pub fn with_rolling_features(
        &self, windows: &[usize], mode: RollingMode, labels: &[&str],
    ) -> FeatureResult<FeatureTable> {
        if windows.is_empty() {
            return Err(FeatureError::EmptyWindows);
        }
        if windows.contains(&0) {
            return Err(FeatureError::ZeroWindow);
        }
        if windows.len() != labels.len() {
            return Err(FeatureError::LabelCountMismatch {
                windows: windows.len(),
                labels: labels.len(),
            });
        }

        let base_columns: Vec<String> =
            self.column_names().iter().map(|name| name.to_string()).collect();

        let mut out = self.clone();
        for column in &base_columns {
            // Base columns always resolve; the snapshot was taken from self.
            let values = out.column(column).expect("snapshotted column exists").clone();
            for (&window, &label) in windows.iter().zip(labels) {
                let derived = calc_window_aggregate(&values, window, mode);
                out = out.with_column(&format!("{column} {label}"), derived)?;
            }
        }
        Ok(out)
    }
}

/// Compute one trailing-window aggregate series.
///
/// Parameters
/// ----------
/// - `values`: `&Array1<f64>`
///   Source column.
/// - `window`: `usize`
///   Window length, ≥ 1 (validated by the caller).
/// - `mode`: [`RollingMode`]
///   Sum or mean.
///
/// Returns
/// -------
/// `Array1<f64>`
///   Same length as `values`; entry `i ≥ window − 1` aggregates
///   `values[i−window+1 ..= i]`, earlier entries are `NaN`, and a window
///   containing any `NaN` aggregates to `NaN`.
#[inline]
fn calc_window_aggregate(values: &Array1<f64>, window: usize, mode: RollingMode) -> Array1<f64> {
    let len = values.len();
    let mut out = Array1::from_elem(len, f64::NAN);
    if window > len {
        return out;
    }

    for i in (window - 1)..len {
        let sum: f64 = values.slice(ndarray::s![i + 1 - window..=i]).sum();
        out[i] = match mode {
            RollingMode::Sum => sum,
            RollingMode::Mean => sum / window as f64,
        };
    }
    out
}
