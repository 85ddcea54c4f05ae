//! CSV serialization for catalog records.
//!
//! # Responsibility
//! - Write the record list to a UTF-8 CSV file with a fixed header.
//! - Re-parse previously exported files for verification flows.
//!
//! # Invariants
//! - Row order matches the supplied record order.
//! - An existing file at the target path is overwritten without prompt.

use crate::model::book::Book;
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;
use std::time::Instant;

/// Header row kept stable for compatibility with existing catalog exports.
pub const CSV_HEADER: [&str; 4] = ["ID", "Judul", "Pengarang", "Tahun"];

pub type ExportResult<T> = Result<T, ExportError>;

/// Export-layer error for file I/O and CSV shape problems.
#[derive(Debug)]
pub enum ExportError {
    Io(std::io::Error),
    /// CSV content that cannot be interpreted as catalog rows.
    Malformed {
        line: u64,
        message: String,
    },
}

impl Display for ExportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "{err}"),
            Self::Malformed { line, message } => {
                write!(f, "malformed csv data at line {line}: {message}")
            }
        }
    }
}

impl Error for ExportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Malformed { .. } => None,
        }
    }
}

impl From<std::io::Error> for ExportError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<csv::Error> for ExportError {
    fn from(value: csv::Error) -> Self {
        let message = value.to_string();
        let line = value.position().map_or(0, |pos| pos.line());
        match value.into_kind() {
            csv::ErrorKind::Io(err) => Self::Io(err),
            _ => Self::Malformed { line, message },
        }
    }
}

/// Writes `records` to `path` as CSV, header first, in input order.
///
/// # Side effects
/// - Overwrites any existing file at `path`.
/// - Emits `csv_export` logging events with row count and duration.
pub fn write_csv(path: impl AsRef<Path>, records: &[Book]) -> ExportResult<()> {
    let started_at = Instant::now();
    match write_records(path.as_ref(), records) {
        Ok(()) => {
            info!(
                "event=csv_export module=export status=ok rows={} duration_ms={}",
                records.len(),
                started_at.elapsed().as_millis()
            );
            Ok(())
        }
        Err(err) => {
            error!(
                "event=csv_export module=export status=error duration_ms={} error={err}",
                started_at.elapsed().as_millis()
            );
            Err(err)
        }
    }
}

/// Parses a previously exported CSV file back into records.
///
/// # Errors
/// - `Malformed` when the header or any row deviates from the export
///   shape.
/// - `Io` when the file cannot be read.
pub fn read_csv(path: impl AsRef<Path>) -> ExportResult<Vec<Book>> {
    let mut reader = csv::Reader::from_path(path)?;

    let headers = reader.headers()?;
    if headers.iter().ne(CSV_HEADER.iter().copied()) {
        return Err(ExportError::Malformed {
            line: 1,
            message: format!(
                "expected header {expected}, got {got}",
                expected = CSV_HEADER.join(","),
                got = headers.iter().collect::<Vec<_>>().join(",")
            ),
        });
    }

    let mut books = Vec::new();
    for result in reader.records() {
        let record = result?;
        let line = record.position().map_or(0, |pos| pos.line());

        if record.len() != CSV_HEADER.len() {
            return Err(ExportError::Malformed {
                line,
                message: format!(
                    "expected {} fields, got {}",
                    CSV_HEADER.len(),
                    record.len()
                ),
            });
        }

        let id = parse_number(&record[0], "id", line)?;
        let year = parse_number(&record[3], "year", line)?;
        books.push(Book {
            id,
            title: record[1].to_string(),
            author: record[2].to_string(),
            year,
        });
    }

    Ok(books)
}

fn write_records(path: &Path, records: &[Book]) -> ExportResult<()> {
    let mut writer = csv::Writer::from_path(path)?;

    writer.write_record(CSV_HEADER)?;
    for book in records {
        writer.write_record([
            book.id.to_string(),
            book.title.clone(),
            book.author.clone(),
            book.year.to_string(),
        ])?;
    }
    writer.flush()?;

    Ok(())
}

fn parse_number(raw: &str, field: &str, line: u64) -> ExportResult<i64> {
    raw.trim().parse::<i64>().map_err(|_| ExportError::Malformed {
        line,
        message: format!("invalid {field} value `{raw}`"),
    })
}
