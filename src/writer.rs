//! STAR serialization of a column set and its rows.
//!
//! Loop mode aligns fields by right-padding every column to the widest value
//! seen in the first, middle and last rows. This sampling keeps formatting to
//! a constant number of extra passes on large tables; a column whose widest
//! value sits elsewhere simply comes out ragged. Output compatibility depends
//! on it, so it is kept as is.
//!
//! Label lines carry a trailing space (`_name `) and a single-row block is
//! followed by two newlines, matching what RELION tools emit.

use log::debug;
use std::io::Write;

use crate::column::{ColumnType, Columns};
use crate::error::{Result, StarError};
use crate::options::WriteOptions;
use crate::row::Row;
use crate::value::Value;

/// Padding added to the longest label in single-row mode.
const SINGLE_ROW_LABEL_PAD: usize = 5;
/// Minimum width of values in single-row mode.
const SINGLE_ROW_VALUE_WIDTH: usize = 10;
/// Line starts the reader takes as structure rather than data.
const RESERVED_PREFIXES: [&str; 3] = ["_", "loop_", "data_"];

pub(crate) fn write_block<W: Write>(
    sink: &mut W,
    columns: &Columns,
    rows: &[Row],
    name: Option<&str>,
    options: &WriteOptions,
) -> Result<()> {
    if options.single_row && options.header_only {
        return Err(StarError::invalid_state(
            "a single-row block has no header separate from its values",
        ));
    }
    if options.single_row && rows.len() > 1 {
        return Err(StarError::invalid_state(format!(
            "single-row mode cannot hold {} rows",
            rows.len()
        )));
    }

    write!(sink, "\ndata_{}\n\n", name.unwrap_or_default())?;

    if options.single_row {
        if let Some(row) = rows.first() {
            write_single_row(sink, columns, row)?;
        }
        return Ok(());
    }

    if columns.is_empty() || (rows.is_empty() && !options.header_only) {
        return Ok(());
    }

    writeln!(sink, "loop_")?;
    for (i, col) in columns.iter().enumerate() {
        if options.label_ordinals {
            writeln!(sink, "_{} #{}", col.name(), i + 1)?;
        } else {
            writeln!(sink, "_{} ", col.name())?;
        }
    }
    if options.header_only {
        return Ok(());
    }

    let widths = sampled_widths(columns, rows)?;
    for row in rows {
        let fields = format_fields(columns, row)?;
        write_line(sink, &fields, &widths)?;
    }
    writeln!(sink)?;
    debug!(
        "wrote {} rows x {} columns to data_{}",
        rows.len(),
        columns.len(),
        name.unwrap_or_default()
    );
    Ok(())
}

/// Write one data line for incremental emission after a header-only write.
///
/// Widths come from the sampled rows of `rows` when there are any, otherwise
/// each field takes its own width.
pub(crate) fn write_row<W: Write>(
    sink: &mut W,
    columns: &Columns,
    rows: &[Row],
    row: &Row,
) -> Result<()> {
    if row.len() != columns.len() {
        return Err(StarError::FieldCountMismatch {
            line: 0,
            expected: columns.len(),
            actual: row.len(),
        });
    }
    let fields = format_fields(columns, row)?;
    let widths = if rows.is_empty() {
        fields.iter().map(String::len).collect()
    } else {
        sampled_widths(columns, rows)?
    };
    write_line(sink, &fields, &widths)
}

fn write_single_row<W: Write>(sink: &mut W, columns: &Columns, row: &Row) -> Result<()> {
    let label_width = columns.names().map(str::len).max().unwrap_or(0) + SINGLE_ROW_LABEL_PAD;
    let fields = format_fields(columns, row)?;
    for (name, field) in columns.names().zip(&fields) {
        writeln!(
            sink,
            "_{name:<label_width$} {field:>width$}",
            width = SINGLE_ROW_VALUE_WIDTH
        )?;
    }
    write!(sink, "\n\n")?;
    Ok(())
}

/// Column widths taken from the first, middle and last rows.
fn sampled_widths(columns: &Columns, rows: &[Row]) -> Result<Vec<usize>> {
    let mut widths = vec![0; columns.len()];
    let Some(last) = rows.len().checked_sub(1) else {
        return Ok(widths);
    };
    for index in [0, rows.len() / 2, last] {
        for (w, field) in widths.iter_mut().zip(format_fields(columns, &rows[index])?) {
            *w = (*w).max(field.len());
        }
    }
    Ok(widths)
}

fn write_line<W: Write>(sink: &mut W, fields: &[String], widths: &[usize]) -> Result<()> {
    let line = fields
        .iter()
        .zip(widths)
        .map(|(field, w)| format!("{field:>width$} ", width = w + 1))
        .collect::<Vec<_>>()
        .join(" ");
    writeln!(sink, "{line}")?;
    Ok(())
}

/// Whether `text` reads back as exactly one data field.
///
/// Empty text and text with whitespace would change the field count; text
/// starting with `_`, `loop_` or `data_` would be taken for a label, a loop
/// marker or the next block when it opens a line.
fn is_writable_text(text: &str) -> bool {
    !text.is_empty()
        && !text.contains(char::is_whitespace)
        && !RESERVED_PREFIXES.iter().any(|p| text.starts_with(p))
}

/// Format each value, rejecting text the format cannot hold.
fn format_fields(columns: &Columns, row: &Row) -> Result<Vec<String>> {
    columns
        .iter()
        .zip(row)
        .map(|(col, value)| match value {
            Value::Text(s) if !is_writable_text(s) => {
                Err(StarError::TypeMismatch {
                    column: col.name().to_string(),
                    value: s.clone(),
                    expected: ColumnType::Text,
                })
            }
            v => Ok(v.to_string()),
        })
        .collect()
}
