//! Read and write configuration.
//!
//! Both structs are plain data with builder-style setters and serde support, so
//! they can be embedded in a caller's own configuration files.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::column::ColumnType;

/// How a block is read into a [`Table`](crate::Table).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadOptions {
    /// Keep the source open and produce rows lazily instead of loading them.
    pub header_only: bool,
    /// Explicit column types; columns not listed here are inferred from the
    /// first data line.
    pub types: BTreeMap<String, ColumnType>,
}

impl ReadOptions {
    /// Default options: materialize, infer every type.
    pub fn new() -> Self {
        Self::default()
    }

    /// Produce a Streaming table backed by the open source.
    pub fn header_only(mut self) -> Self {
        self.header_only = true;
        self
    }

    /// Declare the type of one column instead of inferring it.
    pub fn with_type(mut self, column: impl Into<String>, ty: ColumnType) -> Self {
        self.types.insert(column.into(), ty);
        self
    }
}

/// How a [`Table`](crate::Table) is serialized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WriteOptions {
    /// Write `_label value` lines instead of a `loop_` block. Only valid for
    /// tables with at most one row.
    pub single_row: bool,
    /// Write the `data_`, `loop_` and label lines but no rows.
    pub header_only: bool,
    /// Append ` #<n>` (1-based) to each label line.
    pub label_ordinals: bool,
}

impl WriteOptions {
    /// Default options: looped output without ordinals.
    pub fn new() -> Self {
        Self::default()
    }

    /// Write `_label value` lines instead of a loop.
    pub fn single_row(mut self) -> Self {
        self.single_row = true;
        self
    }

    /// Stop after the label lines; rows go through [`Table::write_row`](crate::Table::write_row).
    pub fn header_only(mut self) -> Self {
        self.header_only = true;
        self
    }

    /// Number the label lines.
    pub fn label_ordinals(mut self) -> Self {
        self.label_ordinals = true;
        self
    }
}
