//! CSV ingestion.
//!
//! Files are comma-separated with a mandatory header row. Every cell is
//! parsed as `f32`; cells that are empty, `NA`, or otherwise non-numeric
//! become `f32::NAN`. Categorical columns therefore survive ingestion as
//! all-NaN columns and are simply never selected by the feature contract.

use std::path::Path;

use super::frame::{Column, ColumnFrame};

/// Errors raised while reading a CSV file.
#[derive(Debug, thiserror::Error)]
pub enum CsvError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        source: csv::Error,
    },

    #[error("{path} has no header row")]
    EmptyFile { path: String },
}

/// Read a CSV file into a [`ColumnFrame`].
///
/// Fails on unreadable files and structurally malformed rows (the reader is
/// strict about field counts). Unparseable cell contents are not an error;
/// they become missing values.
pub fn read_csv(path: impl AsRef<Path>) -> Result<ColumnFrame, CsvError> {
    let path = path.as_ref();
    let display = path.display().to_string();

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .map_err(|source| CsvError::Read {
            path: display.clone(),
            source,
        })?;

    let headers = reader
        .headers()
        .map_err(|source| CsvError::Read {
            path: display.clone(),
            source,
        })?
        .clone();
    if headers.is_empty() {
        return Err(CsvError::EmptyFile { path: display });
    }

    let mut columns: Vec<Column> = headers
        .iter()
        .map(|name| Column {
            name: name.to_string(),
            values: Vec::new(),
        })
        .collect();

    let mut n_rows = 0usize;
    for record in reader.records() {
        let record = record.map_err(|source| CsvError::Read {
            path: display.clone(),
            source,
        })?;
        for (column, cell) in columns.iter_mut().zip(record.iter()) {
            column.values.push(parse_cell(cell));
        }
        n_rows += 1;
    }

    Ok(ColumnFrame::from_columns(columns, n_rows))
}

/// Parse one cell; missing markers and non-numeric text map to NaN.
fn parse_cell(cell: &str) -> f32 {
    let trimmed = cell.trim();
    if trimmed.is_empty() || trimmed == "NA" {
        return f32::NAN;
    }
    trimmed.parse::<f32>().unwrap_or(f32::NAN)
}
