//! Immutable rows of typed values.

use serde::{Deserialize, Serialize};
use std::ops::Index;

use crate::column::Columns;
use crate::error::{Result, StarError};
use crate::value::Value;

/// An ordered, fixed-arity tuple of values aligned to a table's columns.
///
/// Rows never change after construction; column algebra on a
/// [`Table`](crate::Table) rebuilds new rows instead. Equality is value-wise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    values: Vec<Value>,
}

impl Row {
    /// Wrap values as a row. Arity is checked when the row joins a table.
    pub fn new(values: Vec<Value>) -> Self {
        Self { values }
    }

    /// Parse whitespace-split fields against `columns`.
    ///
    /// # Errors
    /// [`StarError::FieldCountMismatch`] if the arity differs from the column
    /// count, [`StarError::TypeMismatch`] if a field does not parse as its
    /// column type.
    pub fn parse(columns: &Columns, fields: &[&str], line: usize) -> Result<Row> {
        if fields.len() != columns.len() {
            return Err(StarError::FieldCountMismatch {
                line,
                expected: columns.len(),
                actual: fields.len(),
            });
        }
        let values = columns
            .iter()
            .zip(fields)
            .map(|(col, raw)| col.column_type().parse(col.name(), raw))
            .collect::<Result<Vec<_>>>()?;
        Ok(Row { values })
    }

    /// Coerce loose values into a row shaped by `columns`.
    pub(crate) fn coerce(columns: &Columns, values: Vec<Value>) -> Result<Row> {
        if values.len() != columns.len() {
            return Err(StarError::FieldCountMismatch {
                line: 0,
                expected: columns.len(),
                actual: values.len(),
            });
        }
        let values = columns
            .iter()
            .zip(values)
            .map(|(col, v)| col.column_type().coerce(col.name(), v))
            .collect::<Result<Vec<_>>>()?;
        Ok(Row { values })
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True for a row of a column-less table.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Field at `index`, in column order.
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    /// All fields, in column order.
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Fields in column order.
    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.values.iter()
    }

    /// Take the fields out of the row.
    pub fn into_values(self) -> Vec<Value> {
        self.values
    }

    /// New row holding the values at `positions`, in that order.
    pub(crate) fn project(&self, positions: &[usize]) -> Row {
        Row {
            values: positions.iter().map(|&i| self.values[i].clone()).collect(),
        }
    }
}

impl Index<usize> for Row {
    type Output = Value;

    fn index(&self, index: usize) -> &Value {
        &self.values[index]
    }
}

impl<'a> IntoIterator for &'a Row {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}
