//! Sort keys for tables and sorted row iteration.
//!
//! Sorting is always stable: rows that compare equal keep their encounter
//! order, also when the order is reversed.

use std::cmp::Ordering;
use std::fmt;

use crate::column::Columns;
use crate::error::{Result, StarError};
use crate::row::Row;

type Compare = Box<dyn Fn(&Row, &Row) -> Ordering>;

enum SortBy {
    Column(String),
    Compare(Compare),
}

/// What to order rows by: a column name or a custom comparison.
///
/// ```
/// use emtable::SortKey;
///
/// let by_defocus = SortKey::column("rlnDefocusU").reversed();
/// let custom = SortKey::by(|a, b| a.len().cmp(&b.len()));
/// let from_name: SortKey = "rlnImageId".into();
/// ```
pub struct SortKey {
    by: SortBy,
    reverse: bool,
}

impl SortKey {
    /// Order by the values of one column (see [`Value::total_cmp`](crate::Value::total_cmp)).
    pub fn column(name: impl Into<String>) -> Self {
        SortKey {
            by: SortBy::Column(name.into()),
            reverse: false,
        }
    }

    /// Order with a custom comparison over whole rows.
    pub fn by<F>(compare: F) -> Self
    where
        F: Fn(&Row, &Row) -> Ordering + 'static,
    {
        SortKey {
            by: SortBy::Compare(Box::new(compare)),
            reverse: false,
        }
    }

    /// Sort descending instead of ascending.
    pub fn reversed(mut self) -> Self {
        self.reverse = !self.reverse;
        self
    }

    /// Whether this key sorts in descending order.
    pub fn is_reversed(&self) -> bool {
        self.reverse
    }

    /// Stable in-place sort of `rows` shaped by `columns`.
    ///
    /// # Errors
    /// [`StarError::MissingColumn`] if a column key names an unknown column.
    pub(crate) fn sort_rows(&self, columns: &Columns, rows: &mut [Row]) -> Result<()> {
        let reverse = self.reverse;
        let directed = |ord: Ordering| if reverse { ord.reverse() } else { ord };
        match &self.by {
            SortBy::Column(name) => {
                let idx = columns
                    .index_of(name)
                    .ok_or_else(|| StarError::MissingColumn(name.clone()))?;
                rows.sort_by(|a, b| directed(a[idx].total_cmp(&b[idx])));
            }
            SortBy::Compare(compare) => rows.sort_by(|a, b| directed(compare(a, b))),
        }
        Ok(())
    }
}

impl From<&str> for SortKey {
    fn from(name: &str) -> Self {
        SortKey::column(name)
    }
}

impl From<String> for SortKey {
    fn from(name: String) -> Self {
        SortKey::column(name)
    }
}

impl fmt::Debug for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let by = match &self.by {
            SortBy::Column(name) => name.as_str(),
            SortBy::Compare(_) => "<fn>",
        };
        f.debug_struct("SortKey")
            .field("by", &by)
            .field("reverse", &self.reverse)
            .finish()
    }
}
