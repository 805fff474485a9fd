//! CSV ingest for wide weather files.
//!
//! The expected layout is one timestamp column (`utc_timestamp`, otherwise the
//! first column) followed by one `<CODE>_temperature` column per country.
//! Each row becomes a [`Sample`] whose period label is the timestamp's year.
//!
//! Design goals:
//! - **Strict schema** for the header (clear errors + exit code 2)
//! - **Row-level validation** (skip bad rows, but report what happened)
//! - **File order preserved** (the aggregator relies on it for open/close)

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use csv::StringRecord;

use crate::domain::{Sample, country_code};
use crate::error::AppError;

const TIMESTAMP_COLUMN: &str = "utc_timestamp";
const TEMPERATURE_MARKER: &str = "_temperature";

/// A row-level error encountered during ingest.
#[derive(Debug, Clone)]
pub struct RowError {
    pub line: usize,
    pub message: String,
}

/// Ingest output for one country column.
#[derive(Debug, Clone)]
pub struct IngestedSeries {
    pub column: String,
    pub samples: Vec<Sample>,
    pub row_errors: Vec<RowError>,
    pub rows_read: usize,
}

impl IngestedSeries {
    fn new(column: &str) -> Self {
        Self {
            column: column.to_string(),
            samples: Vec::new(),
            row_errors: Vec::new(),
            rows_read: 0,
        }
    }

    pub fn rows_used(&self) -> usize {
        self.samples.len()
    }
}

/// List the country temperature columns of a CSV file (header order).
pub fn list_temperature_columns(path: &Path) -> Result<Vec<String>, AppError> {
    let mut reader = open_reader(path)?;
    let headers = read_headers(&mut reader)?;
    let columns = temperature_columns(&headers);
    if columns.is_empty() {
        return Err(AppError::new(
            2,
            format!(
                "No country temperature columns (`*{TEMPERATURE_MARKER}`) found in '{}'.",
                path.display()
            ),
        ));
    }
    Ok(columns)
}

/// Columns whose name contains `_temperature`, in header order.
pub fn temperature_columns(headers: &StringRecord) -> Vec<String> {
    headers
        .iter()
        .map(clean_header_name)
        .filter(|name| name.contains(TEMPERATURE_MARKER))
        .map(str::to_string)
        .collect()
}

/// Resolve a user query (`AT`, `at`, `AT_temperature`) to a column name.
pub fn resolve_column(columns: &[String], query: &str) -> Result<String, AppError> {
    let query = query.trim();
    columns
        .iter()
        .find(|col| col.eq_ignore_ascii_case(query) || country_code(col).eq_ignore_ascii_case(query))
        .cloned()
        .ok_or_else(|| {
            let codes: Vec<&str> = columns.iter().map(|c| country_code(c)).collect();
            AppError::new(
                2,
                format!("Unknown country '{query}'. Available: {}", codes.join(", ")),
            )
        })
}

/// Load one country column from a CSV file.
///
/// Fails (exit code 3) when no usable rows remain.
pub fn load_series(path: &Path, column: &str) -> Result<IngestedSeries, AppError> {
    let file = open_file(path)?;
    let series = read_series(file, column)?;
    log::info!(
        "ingested '{}' from '{}': {} rows read, {} used, {} skipped",
        series.column,
        path.display(),
        series.rows_read,
        series.rows_used(),
        series.row_errors.len()
    );
    if series.samples.is_empty() {
        return Err(AppError::new(
            3,
            format!("No valid rows for column '{column}' in '{}'.", path.display()),
        ));
    }
    Ok(series)
}

/// Load several country columns from a CSV file in one pass.
pub fn load_columns(path: &Path, columns: &[String]) -> Result<Vec<IngestedSeries>, AppError> {
    read_columns(open_file(path)?, columns)
}

/// Read a single column from any CSV source.
pub fn read_series<R: Read>(reader: R, column: &str) -> Result<IngestedSeries, AppError> {
    let mut out = read_columns(reader, &[column.to_string()])?;
    out.pop()
        .ok_or_else(|| AppError::new(4, "Internal error: no series produced by ingest."))
}

/// Read several columns from any CSV source, preserving row order.
///
/// Rows with an unparsable timestamp are skipped for every column; an empty
/// or non-numeric cell only affects its own column.
pub fn read_columns<R: Read>(reader: R, columns: &[String]) -> Result<Vec<IngestedSeries>, AppError> {
    let mut reader = csv_reader(reader);
    let headers = read_headers(&mut reader)?;
    let header_map = build_header_map(&headers);

    let ts_idx = header_map.get(TIMESTAMP_COLUMN).copied().unwrap_or(0);
    let targets = columns
        .iter()
        .map(|col| {
            header_map
                .get(&col.trim().to_ascii_lowercase())
                .copied()
                .ok_or_else(|| AppError::new(2, format!("Missing column in CSV: `{col}`")))
        })
        .collect::<Result<Vec<usize>, AppError>>()?;

    let mut out: Vec<IngestedSeries> = columns.iter().map(|c| IngestedSeries::new(c)).collect();

    for (idx, result) in reader.records().enumerate() {
        // +2 because:
        // - records() starts at line 1 after headers
        // - CSV is 1-based line numbers
        let line = idx + 2;
        for series in out.iter_mut() {
            series.rows_read += 1;
        }

        let record = match result {
            Ok(r) => r,
            Err(e) => {
                push_error_all(&mut out, line, format!("CSV parse error: {e}"));
                continue;
            }
        };

        let period = match record.get(ts_idx).map(str::trim).filter(|s| !s.is_empty()) {
            Some(raw) => match period_label(raw) {
                Ok(p) => p,
                Err(e) => {
                    push_error_all(&mut out, line, e);
                    continue;
                }
            },
            None => {
                push_error_all(&mut out, line, "Missing timestamp.".to_string());
                continue;
            }
        };

        for (series, &col_idx) in out.iter_mut().zip(&targets) {
            match parse_value(record.get(col_idx)) {
                Ok(value) => series.samples.push(Sample::new(period.clone(), value)),
                Err(message) => series.row_errors.push(RowError { line, message }),
            }
        }
    }

    for series in &out {
        if !series.row_errors.is_empty() {
            log::warn!(
                "skipped {} row(s) for '{}' (first: line {}: {})",
                series.row_errors.len(),
                series.column,
                series.row_errors[0].line,
                series.row_errors[0].message
            );
        }
    }

    Ok(out)
}

fn push_error_all(out: &mut [IngestedSeries], line: usize, message: String) {
    for series in out.iter_mut() {
        series.row_errors.push(RowError {
            line,
            message: message.clone(),
        });
    }
}

fn open_file(path: &Path) -> Result<File, AppError> {
    File::open(path).map_err(|e| AppError::new(2, format!("Failed to open CSV '{}': {e}", path.display())))
}

fn open_reader(path: &Path) -> Result<csv::Reader<File>, AppError> {
    Ok(csv_reader(open_file(path)?))
}

fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader)
}

fn read_headers<R: Read>(reader: &mut csv::Reader<R>) -> Result<StringRecord, AppError> {
    reader
        .headers()
        .cloned()
        .map_err(|e| AppError::new(2, format!("Failed to read CSV headers: {e}")))
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (clean_header_name(name).to_ascii_lowercase(), idx))
        .collect()
}

fn clean_header_name(name: &str) -> &str {
    // Excel and other tools sometimes emit UTF-8 CSVs with a BOM prefix on the
    // first header. If we don't strip it, column lookups fail.
    name.trim().trim_start_matches('\u{feff}')
}

/// Year label (`"1994"`) of a timestamp cell.
///
/// Accepts RFC 3339 (`1994-03-01T00:00:00Z`), naive date-times, plain dates
/// and bare 4-digit years.
fn period_label(raw: &str) -> Result<String, String> {
    const DATETIME_FMTS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"];

    let year = if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        dt.year()
    } else if let Some(dt) = DATETIME_FMTS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
    {
        dt.year()
    } else if let Ok(d) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        d.year()
    } else if raw.len() == 4 && raw.chars().all(|c| c.is_ascii_digit()) {
        raw.parse::<i32>().map_err(|e| format!("Invalid year '{raw}': {e}"))?
    } else {
        return Err(format!(
            "Invalid timestamp '{raw}'. Expected RFC 3339, YYYY-MM-DD[ HH:MM:SS] or YYYY."
        ));
    };

    Ok(format!("{year:04}"))
}

fn parse_value(cell: Option<&str>) -> Result<f64, String> {
    let cell = cell
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| "Missing temperature value.".to_string())?;
    let v = cell
        .parse::<f64>()
        .map_err(|_| format!("Invalid temperature value '{cell}'."))?;
    if v.is_finite() {
        Ok(v)
    } else {
        Err("Non-finite temperature value.".to_string())
    }
}
