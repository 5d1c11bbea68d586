//! The [`Table`]: an ordered column set plus its rows.
//!
//! A table is either *Materialized* (every row resident) or *Streaming* (rows
//! are pulled lazily, once, from an open source). Column algebra and sorting
//! need resident rows; call [`Table::materialize`] first on a streaming table.

use log::debug;
use std::collections::BTreeMap;
use std::fmt;
use std::fs::{File, create_dir_all};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::ops::Index;
use std::path::Path;

use crate::column::{Column, ColumnType, Columns};
use crate::derive::ColumnSpec;
use crate::error::{Result, StarError};
use crate::options::{ReadOptions, WriteOptions};
use crate::row::Row;
use crate::scanner::BlockScanner;
use crate::sort::SortKey;
use crate::stream::{BlockCursor, RowIter};
use crate::value::Value;
use crate::writer;

/// Row iterator over a source owned by a streaming [`Table`].
pub type OwnedRowIter = RowIter<Box<dyn BufRead>>;

enum Rows {
    Materialized(Vec<Row>),
    /// `None` once the stream has been handed out.
    Streaming(Option<OwnedRowIter>),
}

/// Tabular data of one STAR block.
///
/// # Example
/// ```
/// use emtable::{Column, Table, Value, WriteOptions};
///
/// # fn main() -> emtable::Result<()> {
/// let mut table = Table::new([
///     Column::int("rlnImageSizeX"),
///     Column::int("rlnImageSizeY"),
///     Column::text("rlnMicrographMovieName"),
/// ])?;
/// table.add_row([
///     Value::from(3710),
///     Value::from(3838),
///     Value::from("Movies/mic_0001.mrc"),
/// ])?;
///
/// let mut out = Vec::new();
/// table.write_star(&mut out, Some("general"), &WriteOptions::new().single_row())?;
/// assert!(String::from_utf8_lossy(&out).contains("_rlnImageSizeX"));
/// # Ok(())
/// # }
/// ```
pub struct Table {
    columns: Columns,
    rows: Rows,
}

impl Default for Table {
    fn default() -> Self {
        Table {
            columns: Columns::default(),
            rows: Rows::Materialized(Vec::new()),
        }
    }
}

impl Table {
    // --------- Construction ----------

    /// Empty, materialized table with the given columns.
    ///
    /// # Errors
    /// [`StarError::ColumnConflict`] on duplicate column names.
    pub fn new(columns: impl IntoIterator<Item = Column>) -> Result<Self> {
        Ok(Table {
            columns: Columns::new(columns)?,
            rows: Rows::Materialized(Vec::new()),
        })
    }

    /// Load a block from a file. `None` selects the first block.
    ///
    /// The file is closed before this returns, on success and on error.
    pub fn from_file(path: impl AsRef<Path>, block: Option<&str>) -> Result<Self> {
        Self::open(path, block, &ReadOptions::default())
    }

    /// Load a block from a file with explicit options.
    ///
    /// With [`ReadOptions::header_only`] the table takes ownership of the open
    /// file and streams rows from it; the file is released when the stream is
    /// drained or the table is dropped.
    ///
    /// # Errors
    /// [`StarError::Open`] if the file cannot be opened, plus any parse error.
    pub fn open(path: impl AsRef<Path>, block: Option<&str>, options: &ReadOptions) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| StarError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("reading {}", path.display());
        Self::from_reader(BufReader::new(file), block, options)
    }

    /// Load a block from a reader the table takes ownership of.
    ///
    /// To read several blocks from one source in sequence, keep a
    /// [`BlockScanner`] and use [`Table::read_star`] instead.
    pub fn from_reader<R>(reader: R, block: Option<&str>, options: &ReadOptions) -> Result<Self>
    where
        R: BufRead + 'static,
    {
        let reader: Box<dyn BufRead> = Box::new(reader);
        let mut iter = RowIter::new(reader, block, options)?;
        let columns = iter.columns().clone();
        if options.header_only {
            return Ok(Table {
                columns,
                rows: Rows::Streaming(Some(iter)),
            });
        }
        let rows = iter.by_ref().collect::<Result<Vec<_>>>()?;
        debug!("materialized {} rows x {} columns", rows.len(), columns.len());
        Ok(Table {
            columns,
            rows: Rows::Materialized(rows),
        })
    }

    /// Replace this table with a block read from a caller-held source.
    ///
    /// The scanner is left right after the block, so the next call can read a
    /// following block. The source is never closed here. On error the table
    /// keeps its previous contents.
    pub fn read_star<R: BufRead>(
        &mut self,
        source: &mut BlockScanner<R>,
        block: Option<&str>,
    ) -> Result<()> {
        self.read_star_with(source, block, &BTreeMap::new())
    }

    /// [`Table::read_star`] with explicit column types.
    pub fn read_star_with<R: BufRead>(
        &mut self,
        source: &mut BlockScanner<R>,
        block: Option<&str>,
        types: &BTreeMap<String, ColumnType>,
    ) -> Result<()> {
        let mut cursor = BlockCursor::open(source, block, types)?;
        let mut rows = Vec::new();
        while let Some(row) = cursor.next_row(source)? {
            rows.push(row);
        }
        debug!(
            "read {} rows x {} columns",
            rows.len(),
            cursor.columns().len()
        );
        self.columns = cursor.into_columns();
        self.rows = Rows::Materialized(rows);
        Ok(())
    }

    /// Replace this table with a block loaded from a file.
    pub fn read(&mut self, path: impl AsRef<Path>, block: Option<&str>) -> Result<()> {
        *self = Self::from_file(path, block)?;
        Ok(())
    }

    /// Drop all columns and rows, releasing any held source.
    pub fn clear(&mut self) {
        *self = Table::default();
    }

    /// Remove all rows but keep the columns. A streaming table becomes an
    /// empty materialized one.
    pub fn clear_rows(&mut self) {
        self.rows = Rows::Materialized(Vec::new());
    }

    // --------- Mode ----------

    /// True for a table read with [`ReadOptions::header_only`] whose rows
    /// still live in the source.
    pub fn is_streaming(&self) -> bool {
        matches!(self.rows, Rows::Streaming(_))
    }

    /// Drain a streaming table into memory. No-op when already materialized.
    pub fn materialize(&mut self) -> Result<()> {
        if let Rows::Streaming(stream) = &mut self.rows {
            let rows = match stream.take() {
                Some(iter) => iter.collect::<Result<Vec<_>>>()?,
                None => return Err(StarError::invalid_state("row stream already consumed")),
            };
            self.rows = Rows::Materialized(rows);
        }
        Ok(())
    }

    /// Hand out the single-pass row stream of a streaming table.
    ///
    /// # Errors
    /// [`StarError::InvalidState`] if the table is materialized or the stream
    /// was already taken.
    pub fn stream(&mut self) -> Result<OwnedRowIter> {
        match &mut self.rows {
            Rows::Streaming(stream) => stream
                .take()
                .ok_or_else(|| StarError::invalid_state("row stream already consumed")),
            Rows::Materialized(_) => Err(StarError::invalid_state(
                "table is materialized; iterate it with iter()",
            )),
        }
    }

    fn rows_mut(&mut self, op: &str) -> Result<&mut Vec<Row>> {
        match &mut self.rows {
            Rows::Materialized(rows) => Ok(rows),
            Rows::Streaming(_) => Err(StarError::invalid_state(format!(
                "{op} requires a materialized table"
            ))),
        }
    }

    // --------- Rows ----------

    /// Number of resident rows; 0 for a streaming table.
    pub fn size(&self) -> usize {
        self.rows().len()
    }

    /// Same as [`Table::size`].
    pub fn len(&self) -> usize {
        self.size()
    }

    /// True when no rows are resident.
    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Resident rows; empty for a streaming table.
    pub fn rows(&self) -> &[Row] {
        match &self.rows {
            Rows::Materialized(rows) => rows,
            Rows::Streaming(_) => &[],
        }
    }

    /// Row at `index`, or `None` when out of range or streaming.
    pub fn get(&self, index: usize) -> Option<&Row> {
        self.rows().get(index)
    }

    /// Resident rows in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Row> {
        self.rows().iter()
    }

    /// Append a row, coercing each value to its column type.
    ///
    /// # Errors
    /// [`StarError::FieldCountMismatch`] on wrong arity,
    /// [`StarError::TypeMismatch`] if a value does not fit its column, and
    /// [`StarError::InvalidState`] on a streaming table.
    pub fn add_row(&mut self, values: impl IntoIterator<Item = Value>) -> Result<()> {
        let row = Row::coerce(&self.columns, values.into_iter().collect())?;
        self.rows_mut("add_row")?.push(row);
        Ok(())
    }

    /// Append an already built row; same checks as [`Table::add_row`].
    pub fn push_row(&mut self, row: Row) -> Result<()> {
        self.add_row(row.into_values())
    }

    /// Replace the row at `index`.
    ///
    /// # Errors
    /// [`StarError::InvalidState`] if `index` is out of range or the table is
    /// streaming, plus the checks of [`Table::add_row`].
    pub fn set_row(&mut self, index: usize, row: Row) -> Result<()> {
        let row = Row::coerce(&self.columns, row.into_values())?;
        let rows = self.rows_mut("set_row")?;
        let len = rows.len();
        let slot = rows.get_mut(index).ok_or_else(|| {
            StarError::invalid_state(format!("row index {index} out of range for {len} rows"))
        })?;
        *slot = row;
        Ok(())
    }

    /// Value of column `name` in the row at `index`.
    pub fn value(&self, index: usize, name: &str) -> Option<&Value> {
        self.get(index)
            .and_then(|row| self.columns.value_of(row, name))
    }

    /// All values of one column, in row order.
    ///
    /// # Errors
    /// [`StarError::MissingColumn`] if the column does not exist.
    pub fn column_values(&self, name: &str) -> Result<Vec<&Value>> {
        let idx = self
            .columns
            .index_of(name)
            .ok_or_else(|| StarError::MissingColumn(name.to_string()))?;
        Ok(self.iter().map(|row| &row[idx]).collect())
    }

    // --------- Columns ----------

    /// Column set, in declaration order.
    pub fn columns(&self) -> &Columns {
        &self.columns
    }

    /// Column names, in declaration order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.names().collect()
    }

    /// Whether a column called `name` exists.
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.contains(name)
    }

    /// True when every name in `names` is a column. Empty `names` is true.
    pub fn has_all_columns<S: AsRef<str>>(&self, names: &[S]) -> bool {
        names.iter().all(|n| self.has_column(n.as_ref()))
    }

    /// True when at least one name in `names` is a column.
    pub fn has_any_column<S: AsRef<str>>(&self, names: &[S]) -> bool {
        names.iter().any(|n| self.has_column(n.as_ref()))
    }

    /// Append derived columns given as `newName=expr` specs.
    ///
    /// `expr` copies a column (one that exists, or one added earlier in the
    /// same call, so `B=A` followed by `C=B` works) and inherits its type;
    /// anything else is a constant whose type is inferred. New columns follow
    /// the existing ones in spec order and every row is rebuilt. Nothing
    /// changes if any spec fails.
    ///
    /// A misspelled column name silently becomes a text constant here; use
    /// [`Table::add_columns_strict`] when that matters.
    ///
    /// # Errors
    /// [`StarError::InvalidColumnSpec`], [`StarError::ColumnConflict`] when a
    /// new name is taken, [`StarError::InvalidState`] on a streaming table.
    pub fn add_columns<S: AsRef<str>>(&mut self, specs: &[S]) -> Result<()> {
        self.derive_columns(specs, false)
    }

    /// [`Table::add_columns`], where text constants are not allowed: every
    /// `expr` must name a column or be a numeric literal.
    ///
    /// # Errors
    /// [`StarError::MissingColumn`] naming the first `expr` that is neither,
    /// plus everything [`Table::add_columns`] can return.
    pub fn add_columns_strict<S: AsRef<str>>(&mut self, specs: &[S]) -> Result<()> {
        self.derive_columns(specs, true)
    }

    fn derive_columns<S: AsRef<str>>(&mut self, specs: &[S], strict: bool) -> Result<()> {
        enum Source {
            Copy(usize),
            Const(Value),
        }

        self.rows_mut("add_columns")?;
        let mut columns = self.columns.clone();
        let mut sources = Vec::with_capacity(specs.len());
        for spec in specs {
            let ColumnSpec { name, expr } = ColumnSpec::parse(spec.as_ref())?;
            let (ty, source) = match columns.index_of(&expr) {
                Some(idx) => (columns[idx].column_type(), Source::Copy(idx)),
                None => {
                    let ty = ColumnType::infer(&expr);
                    if strict && ty == ColumnType::Text {
                        return Err(StarError::MissingColumn(expr));
                    }
                    (ty, Source::Const(ty.parse(&name, &expr)?))
                }
            };
            columns.push(Column::new(name, ty))?;
            sources.push(source);
        }

        let rows = self.rows_mut("add_columns")?;
        let rebuilt = rows
            .iter()
            .map(|row| {
                let mut values = row.values().to_vec();
                for source in &sources {
                    let v = match source {
                        Source::Copy(idx) => values[*idx].clone(),
                        Source::Const(v) => v.clone(),
                    };
                    values.push(v);
                }
                Row::new(values)
            })
            .collect();
        *rows = rebuilt;
        self.columns = columns;
        Ok(())
    }

    /// Drop the named columns from the column set and every row.
    ///
    /// Names that do not exist are ignored; check with
    /// [`Table::has_all_columns`] first, or use
    /// [`Table::remove_columns_strict`], when that matters.
    pub fn remove_columns<S: AsRef<str>>(&mut self, names: &[S]) -> Result<()> {
        let keep: Vec<usize> = (0..self.columns.len())
            .filter(|&i| !names.iter().any(|n| n.as_ref() == self.columns[i].name()))
            .collect();
        if keep.len() == self.columns.len() {
            return Ok(());
        }
        let rows = self.rows_mut("remove_columns")?;
        let rebuilt = rows.iter().map(|row| row.project(&keep)).collect();
        *rows = rebuilt;
        self.columns = self.columns.project(&keep);
        Ok(())
    }

    /// [`Table::remove_columns`], failing if any name does not exist.
    ///
    /// # Errors
    /// [`StarError::MissingColumn`] naming the first unknown column.
    pub fn remove_columns_strict<S: AsRef<str>>(&mut self, names: &[S]) -> Result<()> {
        if let Some(missing) = names.iter().find(|n| !self.has_column(n.as_ref())) {
            return Err(StarError::MissingColumn(missing.as_ref().to_string()));
        }
        self.remove_columns(names)
    }

    // --------- Sorting ----------

    /// Stable in-place sort by a column name or a [`SortKey`].
    ///
    /// # Errors
    /// [`StarError::InvalidState`] on a streaming table,
    /// [`StarError::MissingColumn`] for an unknown key column.
    pub fn sort(&mut self, key: impl Into<SortKey>) -> Result<()> {
        let key = key.into();
        let Rows::Materialized(rows) = &mut self.rows else {
            return Err(StarError::invalid_state("sort requires a materialized table"));
        };
        key.sort_rows(&self.columns, rows)
    }

    // --------- Output ----------

    /// Serialize as a STAR block to an open sink. The sink is not closed.
    ///
    /// # Errors
    /// [`StarError::InvalidState`] for a streaming table, or for single-row
    /// mode on a table with more than one row; [`StarError::TypeMismatch`] for
    /// text the format cannot hold.
    pub fn write_star<W: Write>(
        &self,
        sink: &mut W,
        name: Option<&str>,
        options: &WriteOptions,
    ) -> Result<()> {
        if self.is_streaming() && !options.header_only {
            return Err(StarError::invalid_state(
                "a streaming table can only write its header",
            ));
        }
        writer::write_block(sink, &self.columns, self.rows(), name, options)
    }

    /// Write one data line, after a header-only [`Table::write_star`].
    pub fn write_row<W: Write>(&self, sink: &mut W, row: &Row) -> Result<()> {
        writer::write_row(sink, &self.columns, self.rows(), row)
    }

    /// Serialize to a new file, creating parent directories as needed.
    pub fn write(&self, path: impl AsRef<Path>, name: Option<&str>, options: &WriteOptions) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            create_dir_all(parent).map_err(|source| StarError::Open {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let file = File::create(path).map_err(|source| StarError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let mut w = BufWriter::new(file);
        self.write_star(&mut w, name, options)?;
        w.flush()?;
        Ok(())
    }

    /// Serialize to standard output.
    pub fn print_star(&self, name: Option<&str>, options: &WriteOptions) -> Result<()> {
        let stdout = io::stdout();
        let mut lock = stdout.lock();
        self.write_star(&mut lock, name, options)?;
        lock.flush()?;
        Ok(())
    }
}

impl PartialEq for Table {
    /// Same columns (names, order, types) and equal resident rows. A streaming
    /// table equals nothing, since its rows are not known.
    fn eq(&self, other: &Self) -> bool {
        match (&self.rows, &other.rows) {
            (Rows::Materialized(a), Rows::Materialized(b)) => self.columns == other.columns && a == b,
            _ => false,
        }
    }
}

impl fmt::Debug for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Table")
            .field("columns", &self.column_names())
            .field("streaming", &self.is_streaming())
            .field("size", &self.size())
            .finish()
    }
}

impl Index<usize> for Table {
    type Output = Row;

    fn index(&self, index: usize) -> &Row {
        &self.rows()[index]
    }
}

impl<'a> IntoIterator for &'a Table {
    type Item = &'a Row;
    type IntoIter = std::slice::Iter<'a, Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
