//! features::substitution — declarative cross-location column substitution.
//!
//! Purpose
//! -------
//! Overwrite selected columns of one location's table with aligned values
//! from another location's table, driven by an explicit rule set instead of
//! per-location branching. The original pipelines this crate grew out of
//! patched sparse district market data by hand (e.g., a district borrowing
//! a neighbour's water price series); here the same behavior is expressed
//! as data: a reference dataset passed in by the caller plus a declarative
//! table of `{target location, target column} → {source location, source
//! column}` rules, iterated uniformly.
//!
//! Key behaviors
//! -------------
//! - [`substitute_columns`] applies, in order, every rule whose target
//!   location matches the table being prepared, copying the source
//!   location's source column over the target column.
//! - Rules for other locations are skipped, so one global rule set can
//!   serve a whole dataset.
//! - The input table is never mutated; a new table is returned.
//!
//! Invariants & assumptions
//! ------------------------
//! - Tables in the reference dataset are row-aligned with the target table
//!   (same index, e.g., by date); alignment is the caller's responsibility
//!   and only lengths are checked here.
//! - Source locations and source columns named by applicable rules must
//!   exist; a missing one is an error, not a silent skip.
//! - The target column need not pre-exist: substitution follows the
//!   append-or-replace semantics of
//!   [`FeatureTable::with_column`](crate::features::table::FeatureTable::with_column).
//!
//! Conventions
//! -----------
//! - [`ReferenceTables`] stores locations in a sorted map so iteration and
//!   error behavior are deterministic.
//! - Rules are applied in their listed order; a later rule targeting the
//!   same column wins.
//!
//! Downstream usage
//! ----------------
//! - Build one [`ReferenceTables`] per dataset and one `Vec<SubstitutionRule>`
//!   from configuration, then call [`substitute_columns`] once per entity
//!   table before feature building.
//!
//! Testing notes
//! -------------
//! - Unit tests cover rule application, skipping of non-matching rules,
//!   ordering of conflicting rules, receiver immutability, and the error
//!   branches (unknown location, unknown column, length mismatch).

use std::collections::BTreeMap;

use crate::features::errors::{FeatureError, FeatureResult};
use crate::features::table::FeatureTable;

/// SubstitutionRule — one declarative column-substitution directive.
///
/// Purpose
/// -------
/// Express "location X's column A is taken from location Y's column B" as
/// plain data, so substitution policies live in configuration rather than
/// code branches.
///
/// Fields
/// ------
/// - `target_location`: `String`
///   Location whose table receives the substitution.
/// - `target_column`: `String`
///   Column to overwrite (or append) in the target table.
/// - `source_location`: `String`
///   Location in the reference dataset to copy from.
/// - `source_column`: `String`
///   Column of the source location's table to copy.
///
/// Notes
/// -----
/// - The common case of borrowing the same-named column from a neighbour
///   is covered by the [`SubstitutionRule::same_column`] convenience
///   constructor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubstitutionRule {
    pub target_location: String,
    pub target_column: String,
    pub source_location: String,
    pub source_column: String,
}

impl SubstitutionRule {
    /// Build a rule with independently named target and source columns.
    pub fn new(
        target_location: &str, target_column: &str, source_location: &str, source_column: &str,
    ) -> Self {
        SubstitutionRule {
            target_location: target_location.to_string(),
            target_column: target_column.to_string(),
            source_location: source_location.to_string(),
            source_column: source_column.to_string(),
        }
    }

    /// Build a rule that borrows the same-named column from another location.
    pub fn same_column(target_location: &str, column: &str, source_location: &str) -> Self {
        SubstitutionRule::new(target_location, column, source_location, column)
    }
}

/// ReferenceTables — explicit location-keyed reference dataset.
///
/// Purpose
/// -------
/// Carry the tables that substitution rules may draw from, passed
/// explicitly into [`substitute_columns`] instead of being resolved from
/// implicit shared state.
///
/// Key behaviors
/// -------------
/// - Maps location names to row-aligned [`FeatureTable`]s.
/// - Insertion replaces any previous table under the same location.
///
/// Invariants
/// ----------
/// - Lookup order and iteration are deterministic (sorted by location).
///
/// Notes
/// -----
/// - The dataset is a plain value object; it can be built once and shared
///   by reference across every per-location substitution call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReferenceTables {
    tables: BTreeMap<String, FeatureTable>,
}

impl ReferenceTables {
    /// Create an empty reference dataset.
    pub fn new() -> Self {
        ReferenceTables { tables: BTreeMap::new() }
    }

    /// Insert (or replace) a location's table, returning the dataset for
    /// chained construction.
    pub fn with_table(mut self, location: &str, table: FeatureTable) -> Self {
        self.tables.insert(location.to_string(), table);
        self
    }

    /// Look up a location's table by name.
    pub fn table(&self, location: &str) -> Option<&FeatureTable> {
        self.tables.get(location)
    }

    /// Number of locations in the dataset.
    pub fn n_locations(&self) -> usize {
        self.tables.len()
    }
}

/// Apply every matching substitution rule to one location's table.
///
/// Parameters
/// ----------
/// - `location`: `&str`
///   Name of the location whose table is being prepared; selects which
///   rules apply.
/// - `table`: `&FeatureTable`
///   The table to substitute into. Never mutated.
/// - `reference`: `&ReferenceTables`
///   Explicit dataset that source locations are resolved against.
/// - `rules`: `&[SubstitutionRule]`
///   The full declarative rule set; rules whose `target_location` differs
///   from `location` are skipped.
///
/// Returns
/// -------
/// `FeatureResult<FeatureTable>`
///   A new table with every applicable rule applied in listed order. When
///   no rule matches, the result is an unmodified copy.
///
/// Errors
/// ------
/// - `FeatureError::UnknownLocation`
///   Returned when an applicable rule names a source location absent from
///   `reference`.
/// - `FeatureError::UnknownColumn`
///   Returned when an applicable rule names a source column absent from
///   the source location's table.
/// - `FeatureError::LengthMismatch`
///   Returned when the source column's length differs from the target
///   table's row count (misaligned reference data).
///
/// Examples
/// --------
/// ```rust
/// use drought_indices::features::substitution::{
///     ReferenceTables, SubstitutionRule, substitute_columns,
/// };
/// use drought_indices::features::table::FeatureTable;
///
/// let market = FeatureTable::new(vec![("Water Drum Price".to_string(), vec![f64::NAN, f64::NAN])])
///     .unwrap();
/// let neighbour =
///     FeatureTable::new(vec![("Water Drum Price".to_string(), vec![3.0, 4.0])]).unwrap();
///
/// let reference = ReferenceTables::new().with_table("Diinsoor", neighbour);
/// let rules = vec![SubstitutionRule::same_column("Baardheere", "Water Drum Price", "Diinsoor")];
///
/// let patched = substitute_columns("Baardheere", &market, &reference, &rules).unwrap();
/// assert_eq!(patched.column("Water Drum Price").unwrap()[0], 3.0);
/// ```
pub fn substitute_columns(
    location: &str, table: &FeatureTable, reference: &ReferenceTables, rules: &[SubstitutionRule],
) -> FeatureResult<FeatureTable> {
    let mut out = table.clone();

    for rule in rules.iter().filter(|rule| rule.target_location == location) {
        let source_table = reference
            .table(&rule.source_location)
            .ok_or_else(|| FeatureError::UnknownLocation(rule.source_location.clone()))?;
        let source_values = source_table
            .column(&rule.source_column)
            .ok_or_else(|| FeatureError::UnknownColumn(rule.source_column.clone()))?;

        out = out.with_column(&rule.target_column, source_values.clone())?;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn market_table() -> FeatureTable {
        FeatureTable::new(vec![
            ("Water Drum Price".to_string(), vec![f64::NAN, f64::NAN, f64::NAN]),
            ("Cattle Price".to_string(), vec![100.0, 110.0, 105.0]),
        ])
        .expect("construction should succeed")
    }

    fn reference_dataset() -> ReferenceTables {
        let neighbour = FeatureTable::new(vec![
            ("Water Drum Price".to_string(), vec![3.0, 4.0, 5.0]),
            ("Camel Price".to_string(), vec![900.0, 950.0, 920.0]),
        ])
        .expect("construction should succeed");
        ReferenceTables::new().with_table("Diinsoor", neighbour)
    }

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Application of matching rules and skipping of non-matching ones.
    // - Cross-named substitution (target and source columns differing).
    // - Later-rule-wins ordering on conflicting targets.
    // - Receiver immutability.
    // - Error branches: unknown source location, unknown source column,
    //   misaligned reference data.
    //
    // They intentionally DO NOT cover:
    // - Date-alignment policy, which is the caller's responsibility by
    //   contract.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify that a matching rule overwrites the target column with the
    // source location's values and leaves other columns untouched.
    //
    // Given
    // -----
    // - A market table with an all-NaN "Water Drum Price" and a reference
    //   table for "Diinsoor" with real values.
    // - One same-column rule targeting "Baardheere".
    //
    // Expect
    // ------
    // - The patched table carries Diinsoor's values; "Cattle Price" is
    //   unchanged; the input table still holds NaN.
    fn substitute_columns_applies_matching_rule() {
        // Arrange
        let market = market_table();
        let reference = reference_dataset();
        let rules =
            vec![SubstitutionRule::same_column("Baardheere", "Water Drum Price", "Diinsoor")];

        // Act
        let patched = substitute_columns("Baardheere", &market, &reference, &rules)
            .expect("substitution should succeed");

        // Assert
        let water = patched.column("Water Drum Price").expect("column should exist");
        assert_eq!(water[0], 3.0);
        assert_eq!(water[2], 5.0);
        assert_eq!(patched.column("Cattle Price").expect("column should exist")[0], 100.0);
        assert!(
            market.column("Water Drum Price").expect("column should exist")[0].is_nan(),
            "input table must stay unchanged"
        );
    }

    #[test]
    // Purpose
    // -------
    // Verify that rules targeting other locations are skipped entirely.
    //
    // Given
    // -----
    // - The same rule set, but substitution run for "Qoryooley".
    //
    // Expect
    // ------
    // - The result equals the input table.
    fn substitute_columns_skips_rules_for_other_locations() {
        // Arrange
        let market = market_table();
        let reference = reference_dataset();
        let rules =
            vec![SubstitutionRule::same_column("Baardheere", "Water Drum Price", "Diinsoor")];

        // Act
        let untouched = substitute_columns("Qoryooley", &market, &reference, &rules)
            .expect("substitution should succeed");

        // Assert
        assert_eq!(untouched, market);
    }

    #[test]
    // Purpose
    // -------
    // Verify cross-named substitution and that a later conflicting rule
    // wins over an earlier one.
    //
    // Given
    // -----
    // - Two rules for "Baardheere" both writing "Water Drum Price": first
    //   from "Camel Price", then from "Water Drum Price".
    //
    // Expect
    // ------
    // - The final column holds the second rule's source values.
    fn substitute_columns_applies_rules_in_order_with_later_winning() {
        // Arrange
        let market = market_table();
        let reference = reference_dataset();
        let rules = vec![
            SubstitutionRule::new("Baardheere", "Water Drum Price", "Diinsoor", "Camel Price"),
            SubstitutionRule::same_column("Baardheere", "Water Drum Price", "Diinsoor"),
        ];

        // Act
        let patched = substitute_columns("Baardheere", &market, &reference, &rules)
            .expect("substitution should succeed");

        // Assert
        assert_eq!(patched.column("Water Drum Price").expect("column should exist")[0], 3.0);
    }

    #[test]
    // Purpose
    // -------
    // Exercise the error branches: a rule naming a missing source
    // location, a missing source column, and a misaligned reference table.
    //
    // Given
    // -----
    // - Rules pointing at "Marka" (absent), at a column absent from
    //   "Diinsoor", and at a shorter reference table.
    //
    // Expect
    // ------
    // - `UnknownLocation`, `UnknownColumn`, and `LengthMismatch`
    //   respectively.
    fn substitute_columns_invalid_rules_return_errors() {
        // Arrange
        let market = market_table();
        let reference = reference_dataset();

        // Act & Assert: unknown source location
        let rules = vec![SubstitutionRule::same_column("Baardheere", "Water Drum Price", "Marka")];
        match substitute_columns("Baardheere", &market, &reference, &rules) {
            Err(FeatureError::UnknownLocation(name)) => assert_eq!(name, "Marka"),
            other => panic!("expected UnknownLocation error, got {other:?}"),
        }

        // Act & Assert: unknown source column
        let rules = vec![SubstitutionRule::same_column("Baardheere", "Cowpeas Price", "Diinsoor")];
        match substitute_columns("Baardheere", &market, &reference, &rules) {
            Err(FeatureError::UnknownColumn(name)) => assert_eq!(name, "Cowpeas Price"),
            other => panic!("expected UnknownColumn error, got {other:?}"),
        }

        // Act & Assert: misaligned reference table
        let short = FeatureTable::new(vec![("Water Drum Price".to_string(), vec![3.0, 4.0])])
            .expect("construction should succeed");
        let short_reference = ReferenceTables::new().with_table("Diinsoor", short);
        let rules =
            vec![SubstitutionRule::same_column("Baardheere", "Water Drum Price", "Diinsoor")];
        match substitute_columns("Baardheere", &market, &short_reference, &rules) {
            Err(FeatureError::LengthMismatch { expected, actual, .. }) => {
                assert_eq!(expected, 3);
                assert_eq!(actual, 2);
            }
            other => panic!("expected LengthMismatch error, got {other:?}"),
        }
    }
}
