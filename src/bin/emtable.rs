//! emtable CLI - copy, truncate or print one table of a STAR file.
//!
//! # Usage
//!
//! ```bash
//! # Print the first block of a file
//! emtable particles.star
//!
//! # Copy the first 100 rows of the `particles` block into a new file
//! emtable particles@run_data.star subset.star --limit 100
//!
//! # The table may also follow the file name
//! emtable run_data.star@particles
//! ```
//!
//! Logging goes to standard error and is controlled by `RUST_LOG`
//! (default `warn`) or `-v`/`-vv`.

use anyhow::{Context, Result, bail};
use clap::Parser;
use flexi_logger::{Logger, LoggerHandle};
use log::{debug, info};
use std::path::{Path, PathBuf};

use emtable::{ReadOptions, Table, WriteOptions};

#[derive(Parser, Debug)]
#[command(name = "emtable", version, about = "Copy or print one table of a STAR metadata file.")]
struct Args {
    /// Input file, optionally naming a table: `table@file` or `file@table`
    input: String,

    /// Output file; the table is printed to standard output when omitted
    output: Option<PathBuf>,

    /// Limit the number of rows processed (0 copies everything)
    #[arg(short, long, default_value_t = 0)]
    limit: usize,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) -> Result<LoggerHandle> {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let handle = Logger::try_with_env_or_str(default)
        .context("configure logger")?
        .start()
        .context("start logger")?;
    Ok(handle)
}

/// Split `input` into an optional table name and a file path.
///
/// `table@file` is the primary form; `file@table` is accepted when only the
/// left-hand side names an existing file.
fn split_input(input: &str) -> (Option<String>, PathBuf) {
    match input.split_once('@') {
        None => (None, PathBuf::from(input)),
        Some((left, right)) => {
            if !Path::new(right).exists() && Path::new(left).exists() {
                (Some(right.to_string()), PathBuf::from(left))
            } else {
                (Some(left.to_string()), PathBuf::from(right))
            }
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let _logger = init_logging(args.verbose)?;

    let (table_name, path) = split_input(&args.input);
    if !path.exists() {
        bail!("Input file '{}' does not exist.", path.display());
    }
    debug!("input {} table {:?}", path.display(), table_name);

    let mut input = Table::open(&path, table_name.as_deref(), &ReadOptions::new().header_only())
        .with_context(|| format!("read {}", path.display()))?;
    let mut output = Table::new(input.columns().iter().cloned())?;

    let limit = if args.limit == 0 { usize::MAX } else { args.limit };
    for (i, row) in input.stream()?.take(limit).enumerate() {
        let row = row.with_context(|| format!("read row #{} of {}", i + 1, path.display()))?;
        output.push_row(row)?;
    }
    info!("copied {} rows x {} columns", output.size(), output.columns().len());

    let options = WriteOptions::default();
    match &args.output {
        Some(out) => output
            .write(out, table_name.as_deref(), &options)
            .with_context(|| format!("write {}", out.display()))?,
        None => output.print_star(table_name.as_deref(), &options)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_before_file_is_the_default_form() {
        let (table, path) = split_input("particles@/nonexistent/run_data.star");
        assert_eq!(table.as_deref(), Some("particles"));
        assert_eq!(path, PathBuf::from("/nonexistent/run_data.star"));
    }

    #[test]
    fn file_before_table_is_recognised_when_file_exists() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let file = dir.path().join("run_data.star");
        std::fs::write(&file, "data_particles\n")?;
        let input = format!("{}@particles", file.display());
        let (table, path) = split_input(&input);
        assert_eq!(table.as_deref(), Some("particles"));
        assert_eq!(path, file);
        Ok(())
    }

    #[test]
    fn plain_path_has_no_table() {
        let (table, path) = split_input("run_data.star");
        assert!(table.is_none());
        assert_eq!(path, PathBuf::from("run_data.star"));
    }
}
