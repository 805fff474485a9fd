//! Export candlesticks to CSV.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream scripts.

use std::io::Write;
use std::path::Path;

use crate::domain::Candlestick;
use crate::error::AppError;

/// Write candlesticks to a CSV file (`period,open,high,low,close`).
pub fn write_candles_csv(path: &Path, candles: &[Candlestick]) -> Result<(), AppError> {
    let writer = csv::Writer::from_path(path)
        .map_err(|e| AppError::new(2, format!("Failed to create export CSV '{}': {e}", path.display())))?;
    write_candles(writer, candles)?;
    log::info!("wrote {} candlesticks to '{}'", candles.len(), path.display());
    Ok(())
}

/// Write candlesticks as CSV to any writer.
pub fn write_candles<W: Write>(mut writer: csv::Writer<W>, candles: &[Candlestick]) -> Result<(), AppError> {
    for candle in candles {
        writer
            .serialize(candle)
            .map_err(|e| AppError::new(4, format!("Failed to write export CSV row: {e}")))?;
    }
    writer
        .flush()
        .map_err(|e| AppError::new(4, format!("Failed to flush export CSV: {e}")))
}
