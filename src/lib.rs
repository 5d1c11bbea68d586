//! # emtable
//!
//! Reader, writer and in-memory model for **STAR** metadata files, the
//! self-describing text tables that cryo-EM pipelines (RELION and friends) use
//! to store per-particle and per-micrograph records.
//!
//! ## Key Features
//!
//! - **Block location** - read any named block (`data_<name>`) of a multi-block file
//! - **Both encodings** - looped blocks (`loop_` + labels + data lines) and
//!   single-row blocks (`_label value`)
//! - **Type inference** - integer, float or text per column, from the first data line
//! - **Streaming** - iterate huge blocks with constant memory, or sorted in one pass
//! - **Column algebra** - add derived/constant columns, remove columns, sort rows
//! - **Faithful output** - column order preserved, six-decimal floats, aligned fields
//!
//! ## Quick Start
//!
//! ```
//! use emtable::{Table, Value, WriteOptions};
//! use emtable::testing::{star_source, ONE_MICROGRAPH_MC};
//!
//! # fn main() -> emtable::Result<()> {
//! let mut source = star_source(ONE_MICROGRAPH_MC);
//!
//! // Blocks are read in sequence from the same source
//! let mut general = Table::default();
//! general.read_star(&mut source, Some("general"))?;
//! assert_eq!(general.value(0, "rlnImageSizeX"), Some(&Value::Int(3710)));
//!
//! let mut shifts = Table::default();
//! shifts.read_star(&mut source, Some("global_shift"))?;
//! assert_eq!(shifts.size(), 19);
//!
//! // Derive columns and write the result back out
//! shifts.add_columns(&["rlnShiftXCopy=rlnMicrographShiftX", "rlnGroup=1"])?;
//! let mut out = Vec::new();
//! shifts.write_star(&mut out, Some("global_shift"), &WriteOptions::default())?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Core Concepts
//!
//! ### Table
//!
//! A [`Table`] owns an ordered [`Columns`] set and its rows, either
//! *materialized* (all resident) or *streaming* (pulled lazily from an open
//! source, exactly once). Streaming tables report size 0.
//!
//! ### Rows and values
//!
//! A [`Row`] is an immutable tuple of [`Value`]s aligned to the table's
//! columns. Look fields up by name through [`Columns::value_of`] or
//! [`Table::value`].
//!
//! ### Sources
//!
//! A [`BlockScanner`] is the explicit cursor over an open text source. Hand the
//! same scanner to [`Table::read_star`] repeatedly to read consecutive blocks.
//! For one-shot streaming without a table, use [`iter_rows`] or [`RowIter`].
//!
//! ## Module Overview
//!
//! - [`scanner`] - block location and header classification
//! - [`stream`] - streaming and sorted row iteration
//! - [`table`] - the table model, column algebra and sorting
//! - `writer` - STAR serialization (internal; reached through [`Table`])
//! - [`options`] - read/write configuration
//! - [`testing`] - fixtures and assertions for tests

pub mod column;
pub mod derive;
pub mod error;
pub mod options;
pub mod row;
pub mod scanner;
pub mod sort;
pub mod stream;
pub mod table;
pub mod testing;
pub mod value;
mod writer;

pub use column::{Column, ColumnType, Columns};
pub use derive::ColumnSpec;
pub use error::{Result, StarError};
pub use options::{ReadOptions, WriteOptions};
pub use row::Row;
pub use scanner::{BlockEncoding, BlockScanner, Header, Line};
pub use sort::SortKey;
pub use stream::{RowIter, iter_rows};
pub use table::{OwnedRowIter, Table};
pub use value::Value;
