//! Streaming row production over a [`BlockScanner`].
//!
//! [`RowIter`] is a forward-only, single-pass producer of rows. It owns its
//! scanner, so the memory it holds is one line plus the column set. The one
//! exception is sorted iteration: ordering rows requires seeing all of them,
//! so [`RowIter::sorted`] drains the block in one pass and yields from memory.

use log::debug;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::column::{Column, ColumnType, Columns};
use crate::error::{Result, StarError};
use crate::options::ReadOptions;
use crate::row::Row;
use crate::scanner::{BlockEncoding, BlockScanner, Header};
use crate::sort::SortKey;

/// Column set of one located block plus what is left to read from it.
///
/// The cursor does not hold the scanner; every call takes it explicitly, so
/// the same scanner can go on to the next block once this one is done.
#[derive(Debug)]
pub(crate) struct BlockCursor {
    columns: Columns,
    state: CursorState,
}

#[derive(Debug)]
enum CursorState {
    Single(Option<Row>),
    Looped,
    Done,
}

impl BlockCursor {
    /// Locate `block`, classify its header and type its columns.
    pub(crate) fn open<R: BufRead>(
        scanner: &mut BlockScanner<R>,
        block: Option<&str>,
        types: &BTreeMap<String, ColumnType>,
    ) -> Result<Self> {
        scanner.find_block(block)?;
        let header = scanner.read_header()?;
        let columns = infer_columns(&header, types)?;

        let state = if columns.is_empty() {
            CursorState::Done
        } else {
            match header.encoding {
                BlockEncoding::SingleRow => {
                    let fields: Vec<&str> = header.values.iter().map(String::as_str).collect();
                    CursorState::Single(Some(Row::parse(&columns, &fields, header.line)?))
                }
                BlockEncoding::Looped => CursorState::Looped,
            }
        };
        Ok(BlockCursor { columns, state })
    }

    pub(crate) fn columns(&self) -> &Columns {
        &self.columns
    }

    pub(crate) fn into_columns(self) -> Columns {
        self.columns
    }

    /// Produce the next row, or `None` once the block is exhausted.
    pub(crate) fn next_row<R: BufRead>(
        &mut self,
        scanner: &mut BlockScanner<R>,
    ) -> Result<Option<Row>> {
        match &mut self.state {
            CursorState::Single(row) => {
                let row = row.take();
                self.state = CursorState::Done;
                Ok(row)
            }
            CursorState::Looped => match scanner.next_data_line()? {
                Some(line) => {
                    let fields: Vec<&str> = line.text.split_whitespace().collect();
                    match Row::parse(&self.columns, &fields, line.number) {
                        Ok(row) => Ok(Some(row)),
                        Err(e) => {
                            self.state = CursorState::Done;
                            Err(e)
                        }
                    }
                }
                None => {
                    self.state = CursorState::Done;
                    Ok(None)
                }
            },
            CursorState::Done => Ok(None),
        }
    }
}

/// Type each header column: explicit type first, then the sample value.
///
/// The sample is the inline value list of a single-row block or the split
/// first data line of a looped one. Columns without a sample are text.
fn infer_columns(header: &Header, types: &BTreeMap<String, ColumnType>) -> Result<Columns> {
    let sample: Vec<&str> = match header.encoding {
        BlockEncoding::SingleRow => header.values.iter().map(String::as_str).collect(),
        BlockEncoding::Looped => header
            .first_data_line
            .as_deref()
            .map(|line| line.split_whitespace().collect())
            .unwrap_or_default(),
    };
    let columns = header.names.iter().enumerate().map(|(i, name)| {
        let ty = types
            .get(name)
            .copied()
            .or_else(|| sample.get(i).map(|raw| ColumnType::infer(raw)))
            .unwrap_or(ColumnType::Text);
        Column::new(name.clone(), ty)
    });
    Columns::new(columns)
}

/// Forward-only iterator over the rows of one block.
///
/// Yields `Err` at most once; after an error the iterator is exhausted.
pub struct RowIter<R> {
    scanner: BlockScanner<R>,
    cursor: BlockCursor,
    buffered: Option<std::vec::IntoIter<Row>>,
    failed: bool,
}

impl<R: BufRead> RowIter<R> {
    /// Locate `block` in `reader` and prepare to stream its rows.
    ///
    /// # Errors
    /// [`StarError::BlockNotFound`], [`StarError::MalformedHeader`], or an
    /// error parsing the inline values of a single-row block.
    pub fn new(reader: R, block: Option<&str>, options: &ReadOptions) -> Result<Self> {
        Self::from_scanner(BlockScanner::new(reader), block, options)
    }

    /// Like [`RowIter::new`], continuing from an existing scanner position.
    pub fn from_scanner(
        mut scanner: BlockScanner<R>,
        block: Option<&str>,
        options: &ReadOptions,
    ) -> Result<Self> {
        let cursor = BlockCursor::open(&mut scanner, block, &options.types)?;
        Ok(RowIter {
            scanner,
            cursor,
            buffered: None,
            failed: false,
        })
    }

    /// Columns of the block being iterated.
    pub fn columns(&self) -> &Columns {
        self.cursor.columns()
    }

    /// Drain the remaining rows in one pass and yield them ordered by `key`.
    ///
    /// # Errors
    /// The first parse error of the block, or [`StarError::MissingColumn`]
    /// for an unknown key column.
    pub fn sorted(mut self, key: &SortKey) -> Result<Self> {
        let mut rows = self.by_ref().collect::<Result<Vec<_>>>()?;
        key.sort_rows(self.cursor.columns(), &mut rows)?;
        debug!("buffered {} rows for sorted iteration", rows.len());
        self.buffered = Some(rows.into_iter());
        Ok(self)
    }

    /// Give back the scanner, positioned after the rows consumed so far.
    pub fn into_scanner(self) -> BlockScanner<R> {
        self.scanner
    }
}

impl<R: BufRead> Iterator for RowIter<R> {
    type Item = Result<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(buffered) = self.buffered.as_mut() {
            return buffered.next().map(Ok);
        }
        if self.failed {
            return None;
        }
        match self.cursor.next_row(&mut self.scanner) {
            Ok(row) => row.map(Ok),
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}

/// Iterate the rows of a block in a file without building a [`Table`](crate::Table).
///
/// With `key`, rows come out in stable sorted order; this buffers the whole
/// block in memory but still reads the file only once. Without it, rows are
/// streamed with constant memory.
///
/// # Errors
/// [`StarError::Open`] if the file cannot be opened, plus everything
/// [`RowIter::new`] and [`RowIter::sorted`] can return.
///
/// # Example
/// ```no_run
/// use emtable::{iter_rows, SortKey};
///
/// # fn main() -> emtable::Result<()> {
/// for row in iter_rows("particles.star", Some("particles"), Some(SortKey::column("rlnImageId")))? {
///     let row = row?;
///     println!("{}", row[0]);
/// }
/// # Ok(())
/// # }
/// ```
pub fn iter_rows(
    path: impl AsRef<Path>,
    block: Option<&str>,
    key: Option<SortKey>,
) -> Result<RowIter<BufReader<File>>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| StarError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let iter = RowIter::new(BufReader::new(file), block, &ReadOptions::default())?;
    match key {
        Some(key) => iter.sorted(&key),
        None => Ok(iter),
    }
}
