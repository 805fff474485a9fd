//! Shared domain types.
//!
//! Candlesticks are intentionally plain and serializable so they can be:
//!
//! - produced by the aggregator or synthesized by the forecaster
//! - exported to CSV/JSON
//! - reloaded later for plotting

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::CandleError;

/// First year covered by the bundled weather dataset.
pub const FIRST_YEAR: i32 = 1980;
/// Last year covered by the bundled weather dataset.
pub const LAST_YEAR: i32 = 2019;

/// Default chart height (rows) used by the CLI.
pub const DEFAULT_PLOT_HEIGHT: usize = 20;

/// A single raw observation: period label + temperature.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub period: String,
    pub value: f64,
}

impl Sample {
    pub fn new(period: impl Into<String>, value: f64) -> Self {
        Self {
            period: period.into(),
            value,
        }
    }
}

/// OHLC summary of all values observed within one period.
///
/// Field order matters: it is the column order of CSV exports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candlestick {
    pub period: String,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl Candlestick {
    pub fn new(period: impl Into<String>, open: f64, high: f64, low: f64, close: f64) -> Self {
        Self {
            period: period.into(),
            open,
            high,
            low,
            close,
        }
    }

    /// Parse the period label as an integer year.
    pub fn year(&self) -> Result<i32, CandleError> {
        parse_year(&self.period)
    }
}

/// Parse a period label (e.g. `"1994"`) as an integer year.
pub fn parse_year(label: &str) -> Result<i32, CandleError> {
    label
        .trim()
        .parse::<i32>()
        .map_err(|_| CandleError::InvalidPeriod(label.to_string()))
}

/// Validated, inclusive year range within the dataset's domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearRange {
    pub start: i32,
    pub end: i32,
}

impl YearRange {
    pub fn new(start: i32, end: i32) -> Result<Self, CandleError> {
        let in_domain = |y: i32| (FIRST_YEAR..=LAST_YEAR).contains(&y);
        if !in_domain(start) || !in_domain(end) {
            return Err(CandleError::InvalidRange(format!(
                "years must lie within {FIRST_YEAR}-{LAST_YEAR} (got {start}-{end})"
            )));
        }
        if start > end {
            return Err(CandleError::InvalidRange(format!(
                "start year {start} is after end year {end}"
            )));
        }
        Ok(Self { start, end })
    }
}

impl Default for YearRange {
    fn default() -> Self {
        Self {
            start: FIRST_YEAR,
            end: LAST_YEAR,
        }
    }
}

/// Validated, inclusive closing-temperature range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TempRange {
    pub min: f64,
    pub max: f64,
}

impl TempRange {
    pub fn new(min: f64, max: f64) -> Result<Self, CandleError> {
        if !(min.is_finite() && max.is_finite()) {
            return Err(CandleError::InvalidRange(
                "temperature bounds must be finite".to_string(),
            ));
        }
        if min > max {
            return Err(CandleError::InvalidRange(format!(
                "minimum temperature {min} is greater than maximum {max}"
            )));
        }
        Ok(Self { min, max })
    }
}

/// Whether a candlestick series was observed or synthesized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesKind {
    Observed,
    Forecast,
}

/// A saved candlestick series (JSON).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandleFile {
    pub tool: String,
    pub column: String,
    pub country: String,
    pub kind: SeriesKind,
    pub candlesticks: Vec<Candlestick>,
}

/// How a chart is presented on the terminal.
#[derive(Debug, Clone)]
pub struct ChartConfig {
    /// Requested grid height; the plotter enforces a minimum.
    pub height: usize,
    /// Wait for Enter between pages (only when attached to a terminal).
    pub pause: bool,
}

/// Optional exports requested for a candlestick series.
#[derive(Debug, Clone, Default)]
pub struct ExportConfig {
    pub csv: Option<PathBuf>,
    pub json: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_year_accepts_padded_labels() {
        assert_eq!(parse_year(" 1994 ").unwrap(), 1994);
        assert_eq!(
            parse_year("1994-01"),
            Err(CandleError::InvalidPeriod("1994-01".to_string()))
        );
    }

    #[test]
    fn year_range_validates_domain_and_order() {
        assert_eq!(YearRange::new(1990, 2000).unwrap(), YearRange { start: 1990, end: 2000 });
        assert!(YearRange::new(1979, 2000).is_err());
        assert!(YearRange::new(1990, 2020).is_err());
        assert!(YearRange::new(2001, 2000).is_err());
        assert_eq!(YearRange::default(), YearRange { start: 1980, end: 2019 });
    }

    #[test]
    fn temp_range_rejects_inverted_bounds() {
        assert!(TempRange::new(-5.0, 5.0).is_ok());
        assert!(TempRange::new(5.0, 5.0).is_ok());
        assert!(TempRange::new(5.0, -5.0).is_err());
        assert!(TempRange::new(f64::NAN, 5.0).is_err());
    }
}
