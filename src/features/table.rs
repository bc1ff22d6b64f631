//! features::table — immutable named-column tables for feature pipelines.
//!
//! Purpose
//! -------
//! Provide the tabular container shared by every feature builder in this
//! crate: an ordered collection of equal-length, named `f64` columns.
//! Builders never mutate a table in place; each operation returns a new
//! table, which removes the aliasing hazards of shared mutable frames.
//!
//! Key behaviors
//! -------------
//! - Validate column alignment and name uniqueness at construction.
//! - Preserve insertion order of columns so derived-feature layouts are
//!   deterministic.
//! - Offer a single append-or-replace primitive ([`FeatureTable::with_column`])
//!   on which the rolling, lag, and substitution builders are layered.
//!
//! Invariants & assumptions
//! ------------------------
//! - All columns of a constructed table have identical length.
//! - Column names are unique within a table.
//! - Missing values are encoded as `NaN`, consistent with the `spi`
//!   subtree; the table itself attaches no semantics to them.
//!
//! Conventions
//! -----------
//! - Rows are aligned by position; callers that need date alignment are
//!   expected to index their tables consistently before combining them
//!   (e.g., in the substitution builder).
//! - Lookup by name is a linear scan. Tables in this domain carry tens of
//!   columns, not thousands, so a map index would buy nothing.
//!
//! Downstream usage
//! ----------------
//! - Construct via [`FeatureTable::new`] from `(name, values)` pairs, then
//!   derive features with
//!   [`with_rolling_features`](crate::features::rolling),
//!   [`with_lag_features`](crate::features::lag), or
//!   [`substitute_columns`](crate::features::substitution::substitute_columns).
//!
//! Testing notes
//! -------------
//! - Unit tests in this module cover construction validation (length and
//!   duplicate checks), lookup, and the append vs replace behavior of
//!   [`FeatureTable::with_column`].

use ndarray::Array1;

use crate::features::errors::{FeatureError, FeatureResult};

/// FeatureTable — an ordered set of equal-length named `f64` columns.
///
/// Purpose
/// -------
/// Represent one entity's tabular record (e.g., a district's market,
/// conflict, and climate series) during feature engineering. All derived
/// operations are pure: they return a new table and leave the receiver
/// untouched.
///
/// Key behaviors
/// -------------
/// - Construction validates that every column has the same length and that
///   no two columns share a name.
/// - [`with_column`](Self::with_column) appends a new column or replaces an
///   existing one of the same name, returning a new table either way.
/// - Column order is stable and deterministic.
///
/// Parameters
/// ----------
/// Constructed via [`FeatureTable::new`]:
/// - `columns`: `Vec<(String, Vec<f64>)>`
///   Ordered `(name, values)` pairs; all value vectors must share one
///   length, and names must be unique.
///
/// Fields
/// ------
/// - `columns`: `Vec<(String, Array1<f64>)>`
///   The column storage, in insertion order.
/// - `len`: `usize`
///   The common row count of every column (0 for a column-less table).
///
/// Invariants
/// ----------
/// - `columns[i].1.len() == len` for every `i`.
/// - Column names are pairwise distinct.
///
/// Performance
/// -----------
/// - `column` / `with_column` scan names linearly; cloning a table copies
///   all column buffers. Builders clone once per derived table, not per
///   derived column.
///
/// Notes
/// -----
/// - The table is a plain value object with no interior mutability; it is
///   `Clone` and safe to share across threads by reference.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureTable {
    columns: Vec<(String, Array1<f64>)>,
    len: usize,
}

impl FeatureTable {
    /// Build a table from ordered `(name, values)` pairs.
    ///
    /// Parameters
    /// ----------
    /// - `columns`: `Vec<(String, Vec<f64>)>`
    ///   Column names and their values, in the order they should appear.
    ///   An empty vector yields an empty table with zero rows.
    ///
    /// Returns
    /// -------
    /// `FeatureResult<FeatureTable>`
    ///   - `Ok(table)` when all columns share one length and names are
    ///     unique.
    ///   - `Err(FeatureError)` otherwise.
    ///
    /// Errors
    /// ------
    /// - `FeatureError::LengthMismatch`
    ///   Returned when a column's length differs from the first column's.
    /// - `FeatureError::DuplicateColumn`
    ///   Returned when two columns share a name.
    ///
    /// Examples
    /// --------
    /// ```rust
    /// use drought_indices::features::table::FeatureTable;
    ///
    /// let table = FeatureTable::new(vec![
    ///     ("precip".to_string(), vec![10.0, 0.0, 5.0]),
    ///     ("conflict".to_string(), vec![1.0, 3.0, 2.0]),
    /// ])
    /// .unwrap();
    ///
    /// assert_eq!(table.len(), 3);
    /// assert_eq!(table.column_names(), vec!["precip", "conflict"]);
    /// ```
    pub fn new(columns: Vec<(String, Vec<f64>)>) -> FeatureResult<Self> {
        let len = columns.first().map_or(0, |(_, values)| values.len());
        let mut out: Vec<(String, Array1<f64>)> = Vec::with_capacity(columns.len());

        for (name, values) in columns {
            if values.len() != len {
                return Err(FeatureError::LengthMismatch {
                    column: name,
                    expected: len,
                    actual: values.len(),
                });
            }
            if out.iter().any(|(existing, _)| *existing == name) {
                return Err(FeatureError::DuplicateColumn(name));
            }
            out.push((name, Array1::from(values)));
        }

        Ok(FeatureTable { columns: out, len })
    }

    /// Number of rows shared by every column.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the table has zero rows.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of columns.
    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    /// Column names in insertion order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// Look up a column by name.
    pub fn column(&self, name: &str) -> Option<&Array1<f64>> {
        self.columns.iter().find(|(existing, _)| existing == name).map(|(_, values)| values)
    }

    /// Return a new table with `values` stored under `name`.
    ///
    /// Parameters
    /// ----------
    /// - `name`: `&str`
    ///   Column name. If it already exists, the column is replaced in
    ///   place (position preserved); otherwise it is appended at the end.
    /// - `values`: `Array1<f64>`
    ///   Column values; must match the table's row count.
    ///
    /// Returns
    /// -------
    /// `FeatureResult<FeatureTable>`
    ///   A new table; the receiver is never modified.
    ///
    /// Errors
    /// ------
    /// - `FeatureError::LengthMismatch`
    ///   Returned when `values.len() != self.len()`.
    pub fn with_column(&self, name: &str, values: Array1<f64>) -> FeatureResult<Self> {
        if values.len() != self.len {
            return Err(FeatureError::LengthMismatch {
                column: name.to_string(),
                expected: self.len,
                actual: values.len(),
            });
        }

        let mut out = self.clone();
        match out.columns.iter_mut().find(|(existing, _)| existing == name) {
            Some((_, slot)) => *slot = values,
            None => out.columns.push((name.to_string(), values)),
        }
        Ok(out)
    }
}
