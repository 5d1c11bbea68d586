//! Line-oriented block scanner for STAR sources.
//!
//! [`BlockScanner`] is the explicit cursor over an open text source. It owns
//! the reader, the last line it looked at but did not consume (a one-line
//! lookahead) and a flag telling whether the current block's data stream is
//! still open. Keeping those three together lets a caller read several blocks
//! from one source in sequence without any block leaking into the next.
//!
//! # Format
//!
//! ```text
//! data_<name>
//!
//! loop_
//! _<col1> #1
//! _<col2> #2
//! <field1> <field2>
//! ...
//! <blank line or end of source>
//! ```
//!
//! A block without `loop_` is single-row: each label line carries its value
//! inline (`_<col> <value>`).
//!
//! # Precondition
//!
//! Nothing else may read from the underlying reader while a scanner wraps it.
//! Interleaved reads are undefined and not detected.

use log::{debug, trace};
use std::io::BufRead;

use crate::error::{Result, StarError};

const DATA_PREFIX: &str = "data_";
const LOOP_PREFIX: &str = "loop_";

/// How a block encodes its rows; decided once while reading the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockEncoding {
    /// `_label value` lines, exactly one implied row.
    SingleRow,
    /// `loop_`, label lines, then one data line per row.
    Looped,
}

/// A trimmed source line and its 1-based position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub number: usize,
    pub text: String,
}

/// Result of classifying a block header.
#[derive(Debug, Clone, PartialEq)]
pub struct Header {
    /// Column names in declaration order, without the leading `_`.
    pub names: Vec<String>,
    pub encoding: BlockEncoding,
    /// Inline values of a single-row block, aligned with `names`. Empty when looped.
    pub values: Vec<String>,
    /// The data line that ended a looped header, if the block has any rows.
    /// It stays unconsumed in the scanner.
    pub first_data_line: Option<String>,
    /// Line number of the first label, or 0 when the block declares no columns.
    pub line: usize,
}

impl Header {
    fn empty(encoding: BlockEncoding) -> Self {
        Header {
            names: Vec::new(),
            encoding,
            values: Vec::new(),
            first_data_line: None,
            line: 0,
        }
    }
}

/// Stateful cursor that locates blocks and hands out their lines.
pub struct BlockScanner<R> {
    reader: R,
    line_buf: String,
    pending: Option<Line>,
    line_number: usize,
    in_block: bool,
}

impl<R: BufRead> BlockScanner<R> {
    /// Scanner positioned before the first line of `reader`.
    pub fn new(reader: R) -> Self {
        BlockScanner {
            reader,
            line_buf: String::with_capacity(256),
            pending: None,
            line_number: 0,
            in_block: false,
        }
    }

    /// Number of lines read from the source so far.
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Release the underlying reader. Any lookahead line is lost.
    pub fn into_inner(self) -> R {
        self.reader
    }

    /// Advance past the `data_` line of the requested block.
    ///
    /// * `None` selects the next block whatever its name.
    /// * `Some("")` selects the next anonymous block (`data_` alone).
    /// * `Some(name)` selects the next line starting with `data_<name>`.
    ///
    /// # Errors
    /// [`StarError::BlockNotFound`] when the source ends first.
    pub fn find_block(&mut self, name: Option<&str>) -> Result<()> {
        self.in_block = false;
        while let Some(line) = self.next_line()? {
            let Some(rest) = line.text.strip_prefix(DATA_PREFIX) else {
                continue;
            };
            let hit = match name {
                None => true,
                Some("") => rest.is_empty(),
                Some(name) => rest.starts_with(name),
            };
            if hit {
                debug!("found block '{}' at line {}", line.text, line.number);
                self.in_block = true;
                return Ok(());
            }
        }
        Err(StarError::BlockNotFound {
            name: name.unwrap_or_default().to_string(),
        })
    }

    /// Read the label lines following the current block's `data_` line.
    ///
    /// Blank and comment lines before the first label are skipped; any `loop_`
    /// line marks the block as looped. The header ends at the first line that
    /// is neither a label nor `loop_`. A block that reaches the next `data_`
    /// line or the end of the source without a label has no columns.
    ///
    /// # Errors
    /// [`StarError::MalformedHeader`] for an empty label, a repeated label, or a
    /// single-row label without a value.
    pub fn read_header(&mut self) -> Result<Header> {
        if !self.in_block {
            return Err(StarError::invalid_state("no block located before reading a header"));
        }
        let mut encoding = BlockEncoding::SingleRow;

        let first = loop {
            match self.next_line()? {
                None => {
                    self.in_block = false;
                    return Ok(Header::empty(encoding));
                }
                Some(line) if line.text.starts_with(DATA_PREFIX) => {
                    self.push_back(line);
                    self.in_block = false;
                    return Ok(Header::empty(encoding));
                }
                Some(line) if line.text.starts_with(LOOP_PREFIX) => {
                    encoding = BlockEncoding::Looped;
                }
                Some(line) if line.text.starts_with('_') => break line,
                Some(_) => {}
            }
        };

        let header_line = first.number;
        let mut names: Vec<String> = Vec::new();
        // line number and inline value of each label
        let mut inline: Vec<(usize, Option<String>)> = Vec::new();
        let mut terminator = None;
        let mut current = Some(first);

        while let Some(line) = current {
            if line.text.starts_with(LOOP_PREFIX) {
                encoding = BlockEncoding::Looped;
            } else if line.text.starts_with('_') {
                let mut tokens = line.text.split_whitespace();
                let name = tokens.next().unwrap_or_default().trim_start_matches('_');
                if name.is_empty() {
                    return Err(StarError::malformed(line.number, "label without a name"));
                }
                if names.iter().any(|n| n == name) {
                    return Err(StarError::malformed(
                        line.number,
                        format!("label '_{name}' declared twice"),
                    ));
                }
                names.push(name.to_string());
                inline.push((line.number, tokens.next().map(str::to_string)));
            } else {
                terminator = Some(line);
                break;
            }
            current = self.next_line()?;
        }

        let mut header = Header {
            names,
            encoding,
            values: Vec::new(),
            first_data_line: None,
            line: header_line,
        };

        match encoding {
            BlockEncoding::SingleRow => {
                header.values = inline
                    .into_iter()
                    .zip(&header.names)
                    .map(|((number, value), name)| {
                        value.ok_or_else(|| {
                            StarError::malformed(number, format!("label '_{name}' has no value"))
                        })
                    })
                    .collect::<Result<Vec<_>>>()?;
                if let Some(line) = terminator
                    && line.text.starts_with(DATA_PREFIX)
                {
                    self.push_back(line);
                }
                self.in_block = false;
            }
            BlockEncoding::Looped => match terminator {
                Some(line) if line.text.is_empty() => self.in_block = false,
                Some(line) if line.text.starts_with(DATA_PREFIX) => {
                    self.push_back(line);
                    self.in_block = false;
                }
                Some(line) => {
                    header.first_data_line = Some(line.text.clone());
                    self.push_back(line);
                }
                None => self.in_block = false,
            },
        }

        debug!(
            "header at line {}: {} columns, {:?}",
            header.line,
            header.names.len(),
            header.encoding
        );
        Ok(header)
    }

    /// Next data line of the current looped block.
    ///
    /// Returns `None` at the first blank line, at the next `data_` line (left
    /// unconsumed) or at the end of the source, and keeps returning `None`
    /// until another block is located.
    pub fn next_data_line(&mut self) -> Result<Option<Line>> {
        if !self.in_block {
            return Ok(None);
        }
        match self.next_line()? {
            Some(line) if line.text.is_empty() => {
                self.in_block = false;
                Ok(None)
            }
            Some(line) if line.text.starts_with(DATA_PREFIX) => {
                self.push_back(line);
                self.in_block = false;
                Ok(None)
            }
            Some(line) => {
                trace!("data line {}", line.number);
                Ok(Some(line))
            }
            None => {
                self.in_block = false;
                Ok(None)
            }
        }
    }

    fn next_line(&mut self) -> Result<Option<Line>> {
        if let Some(line) = self.pending.take() {
            return Ok(Some(line));
        }
        self.line_buf.clear();
        if self.reader.read_line(&mut self.line_buf)? == 0 {
            return Ok(None);
        }
        self.line_number += 1;
        Ok(Some(Line {
            number: self.line_number,
            text: self.line_buf.trim().to_string(),
        }))
    }

    fn push_back(&mut self, line: Line) {
        self.pending = Some(line);
    }
}
