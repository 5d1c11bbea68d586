//! Parsing of derived-column specs (`newName=expr`).

use regex::Regex;
use std::sync::LazyLock;

use crate::error::{Result, StarError};

static SPEC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*([A-Za-z_][A-Za-z0-9_.]*)\s*=\s*(\S+)\s*$").expect("valid column spec regex")
});

/// One `newName=expr` item of [`Table::add_columns`](crate::Table::add_columns).
///
/// `expr` is either the name of a column (existing, or added earlier in the
/// same batch) to copy, or a literal constant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpec {
    pub name: String,
    pub expr: String,
}

impl ColumnSpec {
    /// # Errors
    /// [`StarError::InvalidColumnSpec`] when `spec` is not of the form `name=expr`.
    pub fn parse(spec: &str) -> Result<Self> {
        let caps = SPEC
            .captures(spec)
            .ok_or_else(|| StarError::InvalidColumnSpec(spec.to_string()))?;
        Ok(ColumnSpec {
            name: caps[1].to_string(),
            expr: caps[2].to_string(),
        })
    }
}
