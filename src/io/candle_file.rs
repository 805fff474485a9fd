//! Read/write candlestick JSON files.
//!
//! A candle file is the portable form of one series (observed or forecast)
//! so it can be re-plotted later with `wx plot --from-json`. The schema is
//! defined by `domain::CandleFile`.

use std::fs::File;
use std::path::Path;

use crate::domain::{CandleFile, Candlestick, SeriesKind};
use crate::error::AppError;

/// Tool name recorded in saved files.
pub const TOOL_NAME: &str = "wx";

impl CandleFile {
    pub fn new(column: &str, country: &str, kind: SeriesKind, candlesticks: Vec<Candlestick>) -> Self {
        Self {
            tool: TOOL_NAME.to_string(),
            column: column.to_string(),
            country: country.to_string(),
            kind,
            candlesticks,
        }
    }
}

/// Write a candle JSON file.
pub fn write_candle_file(path: &Path, file: &CandleFile) -> Result<(), AppError> {
    let out = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create candle JSON '{}': {e}", path.display())))?;
    serde_json::to_writer_pretty(out, file)
        .map_err(|e| AppError::new(4, format!("Failed to write candle JSON: {e}")))?;
    log::info!("wrote {} candlesticks to '{}'", file.candlesticks.len(), path.display());
    Ok(())
}

/// Read a candle JSON file.
pub fn read_candle_file(path: &Path) -> Result<CandleFile, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open candle JSON '{}': {e}", path.display())))?;
    serde_json::from_reader(file).map_err(|e| AppError::new(2, format!("Invalid candle JSON: {e}")))
}
