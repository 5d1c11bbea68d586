//! Testing utilities for code that reads and writes STAR tables.
//!
//! - **Fixtures**: verbatim RELION blocks ([`fixtures`]) and a helper to drop
//!   them into a temporary directory
//! - **Assertions**: table and row comparisons with useful failure messages,
//!   including a float tolerance matching the six-decimal output format
//!
//! # Quick Start
//!
//! ```
//! use emtable::Table;
//! use emtable::testing::*;
//!
//! # fn main() -> emtable::Result<()> {
//! let mut source = star_source(ONE_MICROGRAPH_MC);
//! let mut table = Table::default();
//! table.read_star(&mut source, Some("global_shift"))?;
//! assert_eq!(table.size(), 19);
//! # Ok(())
//! # }
//! ```

pub mod assertions;
pub mod fixtures;

pub use assertions::*;
pub use fixtures::*;

use crate::scanner::BlockScanner;
use std::io::Cursor;

/// Scanner over an in-memory STAR text.
#[must_use]
pub fn star_source(text: &str) -> BlockScanner<Cursor<&str>> {
    BlockScanner::new(Cursor::new(text))
}
