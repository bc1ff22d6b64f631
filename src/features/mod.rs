//! features — tabular feature engineering for modeling pipelines.
//!
//! Purpose
//! -------
//! Collect the feature-engineering utilities used to prepare market,
//! conflict, and climate datasets for downstream modeling: an immutable
//! named-column table, trailing rolling-window aggregation features, lag
//! features, and declarative cross-location column substitution.
//!
//! Key behaviors
//! -------------
//! - Expose [`FeatureTable`] as the shared tabular container; every
//!   builder is a pure operation returning a new table.
//! - Derive rolling sums / means per (column, window) via
//!   [`FeatureTable::with_rolling_features`](table::FeatureTable::with_rolling_features)
//!   and shifted copies per (column, lag) via
//!   [`FeatureTable::with_lag_features`](table::FeatureTable::with_lag_features).
//! - Patch sparse locations from an explicit reference dataset with
//!   [`substitute_columns`], driven by a declarative
//!   [`SubstitutionRule`] set instead of per-location branching.
//! - Provide a dedicated error type [`FeatureError`] and result alias
//!   [`FeatureResult`], plus a conversion layer to Python exceptions when
//!   the `python-bindings` feature is enabled.
//!
//! Invariants & assumptions
//! ------------------------
//! - Columns within a table are equal-length and uniquely named; missing
//!   values are encoded as `NaN` and propagate through every builder.
//! - No builder mutates its receiver or any shared state; substitution
//!   resolves sources only through the reference dataset passed in.
//! - Builders report failures via [`FeatureResult`] and never panic on
//!   user-facing invalid inputs.
//!
//! Conventions
//! -----------
//! - Derived column names follow the source datasets' scheme:
//!   `"{column} {label}"` for rolling features and `"{column} lag{k}"` for
//!   lag features.
//! - Row alignment across tables (e.g., by date) is the caller's
//!   responsibility; this subtree checks lengths only.
//!
//! Downstream usage
//! ----------------
//! - Typical Rust code imports the main surface as:
//!
//!   ```rust
//!   use drought_indices::features::{FeatureTable, RollingMode};
//!
//!   # fn run() -> drought_indices::features::FeatureResult<()> {
//!   let table = FeatureTable::new(vec![("precip".to_string(), vec![1.0, 2.0, 3.0])])?;
//!   let features = table
//!       .with_rolling_features(&[2], RollingMode::Sum, &["2m"])?
//!       .with_lag_features(&[1])?;
//!   # let _ = features; Ok(()) }
//!   ```
//!
//! - The SPI estimator under the `spi` subtree typically supplies one of
//!   the columns fed into these builders.
//!
//! Testing notes
//! -------------
//! - Unit tests live alongside each module: construction and lookup in
//!   [`table`], aggregation semantics in [`rolling`], shifting in [`lag`],
//!   and rule application in [`substitution`]; the integration suite under
//!   `tests/` chains the builders end to end with the SPI output.

pub mod errors;
pub mod lag;
pub mod rolling;
pub mod substitution;
pub mod table;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::errors::{FeatureError, FeatureResult};
pub use self::rolling::RollingMode;
pub use self::substitution::{ReferenceTables, SubstitutionRule, substitute_columns};
pub use self::table::FeatureTable;

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use drought_indices::features::prelude::*;
//
// to import the main feature-engineering surface in a single line.

pub mod prelude {
    pub use super::errors::{FeatureError, FeatureResult};
    pub use super::rolling::RollingMode;
    pub use super::substitution::{ReferenceTables, SubstitutionRule, substitute_columns};
    pub use super::table::FeatureTable;
}
