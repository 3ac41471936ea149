//! Delimited-text output for assembled candle tables.
//!
//! The layout is one header row followed by one row per candle:
//! `time,Open,High,Low,Close,Volume,Complete`. Timestamps are RFC 3339 in UTC
//! and the completion flag is written as `True`/`False`.

use std::io;
use std::path::Path;

use chrono::SecondsFormat;
use oandata_core::{CandleTable, OandataError};

/// Column labels following the index column.
pub const VALUE_COLUMNS: [&str; 6] = ["Open", "High", "Low", "Close", "Volume", "Complete"];

/// Options for [`write_csv`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvOptions {
    /// Header label of the timestamp column.
    pub index_label: String,
    /// Field separator.
    pub delimiter: u8,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            index_label: "time".to_string(),
            delimiter: b',',
        }
    }
}

fn output_err(e: impl std::fmt::Display) -> OandataError {
    OandataError::Output(e.to_string())
}

/// Write `table` to `writer`. An empty table produces only the header row.
///
/// # Errors
/// Returns `Output` if writing or flushing fails.
pub fn write_csv<W: io::Write>(
    table: &CandleTable,
    writer: W,
    options: &CsvOptions,
) -> Result<(), OandataError> {
    let mut w = csv::WriterBuilder::new()
        .delimiter(options.delimiter)
        .from_writer(writer);

    let mut header = vec![options.index_label.as_str()];
    header.extend(VALUE_COLUMNS);
    w.write_record(&header).map_err(output_err)?;

    for row in table.rows() {
        w.write_record([
            row.time.to_rfc3339_opts(SecondsFormat::Secs, true),
            row.open.to_string(),
            row.high.to_string(),
            row.low.to_string(),
            row.close.to_string(),
            row.volume.to_string(),
            if row.complete { "True" } else { "False" }.to_string(),
        ])
        .map_err(output_err)?;
    }
    w.flush().map_err(output_err)
}

/// Create (or truncate) the file at `path` and write `table` to it.
///
/// # Errors
/// Returns `Output` if the file cannot be created or written.
pub fn write_csv_path(
    table: &CandleTable,
    path: impl AsRef<Path>,
    options: &CsvOptions,
) -> Result<(), OandataError> {
    let path = path.as_ref();
    let file = std::fs::File::create(path)
        .map_err(|e| OandataError::Output(format!("{}: {e}", path.display())))?;
    write_csv(table, io::BufWriter::new(file), options)
}
