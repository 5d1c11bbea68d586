//! Assertion functions for comparing tables and rows.

use crate::row::Row;
use crate::table::Table;
use crate::value::Value;

/// Largest difference tolerated between two floats that print the same with
/// six decimals.
pub const FLOAT_TOLERANCE: f64 = 5e-7;

/// Assert that two tables have the same columns and exactly equal rows.
///
/// # Panics
///
/// Panics if the column names, column types, sizes or any row differ.
///
/// # Example
///
/// ```
/// use emtable::{Column, Table, Value};
/// use emtable::testing::assert_tables_equal;
///
/// let mut a = Table::new([Column::int("n")]).unwrap();
/// a.add_row([Value::from(1)]).unwrap();
/// let mut b = Table::new([Column::int("n")]).unwrap();
/// b.add_row([Value::from(1)]).unwrap();
/// assert_tables_equal(&a, &b);
/// ```
pub fn assert_tables_equal(actual: &Table, expected: &Table) {
    assert_same_shape(actual, expected);
    for (i, (a, e)) in actual.iter().zip(expected.iter()).enumerate() {
        assert_eq!(
            a, e,
            "Row mismatch at index {i}:\n  Expected: {e:?}\n  Actual: {a:?}"
        );
    }
}

/// Assert that two tables match, comparing floats with [`FLOAT_TOLERANCE`].
///
/// This is the comparison a write/read round trip satisfies.
///
/// # Panics
///
/// Panics if the shapes differ or any pair of rows is not close.
pub fn assert_tables_close(actual: &Table, expected: &Table) {
    assert_same_shape(actual, expected);
    for (a, e) in actual.iter().zip(expected.iter()) {
        assert_rows_close(a, e);
    }
}

/// Assert that two rows hold the same values, floats within [`FLOAT_TOLERANCE`].
///
/// # Panics
///
/// Panics on differing arity, differing value kinds, or values that differ.
pub fn assert_rows_close(actual: &Row, expected: &Row) {
    assert_eq!(
        actual.len(),
        expected.len(),
        "Row arity mismatch:\n  Expected: {expected:?}\n  Actual: {actual:?}"
    );
    for (i, (a, e)) in actual.iter().zip(expected.iter()).enumerate() {
        let close = match (a, e) {
            (Value::Float(x), Value::Float(y)) => (x - y).abs() <= FLOAT_TOLERANCE,
            _ => a == e,
        };
        assert!(
            close,
            "Value mismatch at field {i}: expected {e:?}, got {a:?}\n  Expected row: {expected:?}\n  Actual row: {actual:?}"
        );
    }
}

fn assert_same_shape(actual: &Table, expected: &Table) {
    assert_eq!(
        actual.column_names(),
        expected.column_names(),
        "Column names differ"
    );
    let types = |t: &Table| t.columns().iter().map(|c| c.column_type()).collect::<Vec<_>>();
    assert_eq!(types(actual), types(expected), "Column types differ");
    assert_eq!(
        actual.size(),
        expected.size(),
        "Table size mismatch:\n  Expected: {}\n  Actual: {}",
        expected.size(),
        actual.size()
    );
}
