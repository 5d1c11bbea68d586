//! Columns: names, scalar types and the ordered column set of a table.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::ops::Index;

use crate::error::{Result, StarError};
use crate::row::Row;
use crate::value::Value;

/// Scalar type shared by every value of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnType {
    Integer,
    Float,
    Text,
}

impl ColumnType {
    /// Infer a type from one sample value: integer, then float, else text.
    ///
    /// ```
    /// use emtable::ColumnType;
    ///
    /// assert_eq!(ColumnType::infer("16"), ColumnType::Integer);
    /// assert_eq!(ColumnType::infer("-2.92664e-04"), ColumnType::Float);
    /// assert_eq!(ColumnType::infer("000001@particles.stk"), ColumnType::Text);
    /// ```
    pub fn infer(raw: &str) -> ColumnType {
        if raw.parse::<i64>().is_ok() {
            ColumnType::Integer
        } else if raw.parse::<f64>().is_ok() {
            ColumnType::Float
        } else {
            ColumnType::Text
        }
    }

    /// Parse a raw field of the column named `column`.
    ///
    /// # Errors
    /// Returns [`StarError::TypeMismatch`] when `raw` is not a valid literal of this type.
    pub fn parse(self, column: &str, raw: &str) -> Result<Value> {
        let parsed = match self {
            ColumnType::Integer => raw.parse::<i64>().ok().map(Value::Int),
            ColumnType::Float => raw.parse::<f64>().ok().map(Value::Float),
            ColumnType::Text => Some(Value::Text(raw.to_string())),
        };
        parsed.ok_or_else(|| self.mismatch(column, raw))
    }

    /// Convert an already typed value to this column type.
    ///
    /// Integers widen into float columns and anything can become text; a float
    /// is never narrowed into an integer column.
    ///
    /// # Errors
    /// Returns [`StarError::TypeMismatch`] when no lossless conversion exists.
    pub fn coerce(self, column: &str, value: Value) -> Result<Value> {
        match (self, value) {
            (ColumnType::Integer, v @ Value::Int(_)) => Ok(v),
            (ColumnType::Float, v @ Value::Float(_)) => Ok(v),
            (ColumnType::Float, Value::Int(i)) => Ok(Value::Float(i as f64)),
            (ColumnType::Text, v @ Value::Text(_)) => Ok(v),
            (ColumnType::Text, v) => Ok(Value::Text(v.to_string())),
            (ty, Value::Text(s)) => ty.parse(column, &s),
            (ty, v) => Err(ty.mismatch(column, &v.to_string())),
        }
    }

    fn mismatch(self, column: &str, raw: &str) -> StarError {
        StarError::TypeMismatch {
            column: column.to_string(),
            value: raw.to_string(),
            expected: self,
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColumnType::Integer => "integer",
            ColumnType::Float => "float",
            ColumnType::Text => "text",
        };
        f.write_str(name)
    }
}

/// A named, typed column.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Column {
    name: String,
    ty: ColumnType,
}

impl Column {
    /// Column `name` holding values of type `ty`.
    pub fn new(name: impl Into<String>, ty: ColumnType) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }

    /// Integer column.
    pub fn int(name: impl Into<String>) -> Self {
        Self::new(name, ColumnType::Integer)
    }

    /// Float column.
    pub fn float(name: impl Into<String>) -> Self {
        Self::new(name, ColumnType::Float)
    }

    /// Text column.
    pub fn text(name: impl Into<String>) -> Self {
        Self::new(name, ColumnType::Text)
    }

    /// Label without the leading `_`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Type every value in this column has.
    pub fn column_type(&self) -> ColumnType {
        self.ty
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Ordered set of columns with a name-to-position index.
///
/// Row fields are looked up by name through this index, never by reflection
/// on the row itself.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Columns {
    columns: Vec<Column>,
    index: HashMap<String, usize>,
}

impl Columns {
    /// Build a column set, rejecting duplicate names.
    ///
    /// # Errors
    /// Returns [`StarError::ColumnConflict`] if two columns share a name.
    pub fn new(columns: impl IntoIterator<Item = Column>) -> Result<Self> {
        let mut set = Columns::default();
        for col in columns {
            set.push(col)?;
        }
        Ok(set)
    }

    /// Append a column and return its position.
    ///
    /// # Errors
    /// Returns [`StarError::ColumnConflict`] if the name is already taken.
    pub fn push(&mut self, column: Column) -> Result<usize> {
        if self.index.contains_key(column.name()) {
            return Err(StarError::ColumnConflict(format!(
                "column '{}' already exists",
                column.name()
            )));
        }
        let pos = self.columns.len();
        self.index.insert(column.name().to_string(), pos);
        self.columns.push(column);
        Ok(pos)
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// True when there are no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Columns in declaration order.
    pub fn iter(&self) -> std::slice::Iter<'_, Column> {
        self.columns.iter()
    }

    /// Column names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(Column::name)
    }

    /// Whether a column called `name` exists.
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Position of `name` within a row, if the column exists.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Column named `name`.
    pub fn get(&self, name: &str) -> Option<&Column> {
        self.index_of(name).map(|i| &self.columns[i])
    }

    /// Value of the column `name` in `row`, if the column exists.
    pub fn value_of<'r>(&self, row: &'r Row, name: &str) -> Option<&'r Value> {
        self.index_of(name).and_then(|i| row.get(i))
    }

    /// Keep only the columns at `positions`, in that order.
    pub(crate) fn project(&self, positions: &[usize]) -> Columns {
        let kept = positions.iter().map(|&i| self.columns[i].clone());
        let mut set = Columns::default();
        for col in kept {
            set.index.insert(col.name().to_string(), set.columns.len());
            set.columns.push(col);
        }
        set
    }
}

impl Index<usize> for Columns {
    type Output = Column;

    fn index(&self, index: usize) -> &Column {
        &self.columns[index]
    }
}

impl<'a> IntoIterator for &'a Columns {
    type Item = &'a Column;
    type IntoIter = std::slice::Iter<'a, Column>;

    fn into_iter(self) -> Self::IntoIter {
        self.columns.iter()
    }
}
