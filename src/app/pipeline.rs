//! Shared candlestick pipeline used by every subcommand.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! CSV ingest -> aggregation -> optional filters / forecast
//!
//! The command handlers can then focus on presentation.

use std::path::Path;

use crate::candles::{compute_candlesticks, filter_by_close_range, filter_by_year_range};
use crate::domain::{Candlestick, CountryNames, TempRange, YearRange};
use crate::error::{AppError, CandleError};
use crate::forecast::predict_temperatures;
use crate::io::ingest::{IngestedSeries, load_series};

/// One country's aggregated series.
#[derive(Debug, Clone)]
pub struct LoadedSeries {
    pub column: String,
    pub country: String,
    pub ingest: IngestedSeries,
    pub candles: Vec<Candlestick>,
}

/// Ingest a country column and aggregate it into yearly candlesticks.
pub fn load_candles(path: &Path, column: &str, names: &CountryNames) -> Result<LoadedSeries, AppError> {
    let ingest = load_series(path, column)?;
    let candles = compute_candlesticks(&ingest.samples)?;
    Ok(LoadedSeries {
        column: column.to_string(),
        country: names.display_name(column),
        ingest,
        candles,
    })
}

/// Apply the optional year and closing-temperature filters (in that order).
pub fn apply_filters(
    candles: &[Candlestick],
    years: Option<YearRange>,
    temps: Option<TempRange>,
) -> Vec<Candlestick> {
    let mut out = candles.to_vec();
    if let Some(range) = years {
        out = filter_by_year_range(&out, range.start, range.end);
    }
    if let Some(range) = temps {
        out = filter_by_close_range(&out, range.min, range.max);
    }
    log::debug!("filters kept {} of {} candlesticks", out.len(), candles.len());
    out
}

/// Forecast `[start_year, end_year]` from the full history.
///
/// The range is validated here; the forecaster itself accepts any ordering.
pub fn forecast(history: &[Candlestick], start_year: i32, end_year: i32) -> Result<Vec<Candlestick>, AppError> {
    if start_year > end_year {
        return Err(CandleError::InvalidRange(format!(
            "start year {start_year} must be less than or equal to end year {end_year}"
        ))
        .into());
    }
    Ok(predict_temperatures(history, start_year, end_year)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history() -> Vec<Candlestick> {
        (1980..=2019)
            .map(|y| {
                let close = 8.0 + 0.03 * f64::from(y - 1980);
                Candlestick::new(y.to_string(), close, close + 10.0, close - 12.0, close)
            })
            .collect()
    }

    #[test]
    fn filters_compose_in_either_order() {
        let years = YearRange::new(1990, 2010).unwrap();
        let temps = TempRange::new(8.5, 9.0).unwrap();
        let both = apply_filters(&history(), Some(years), Some(temps));
        let reversed = filter_by_year_range(
            &filter_by_close_range(&history(), temps.min, temps.max),
            years.start,
            years.end,
        );
        assert_eq!(both, reversed);
        assert!(!both.is_empty());
        assert_eq!(apply_filters(&history(), None, None), history());
    }

    #[test]
    fn forecast_rejects_reversed_range() {
        let err = forecast(&history(), 2025, 2020).unwrap_err();
        assert_eq!(err.exit_code(), 2);

        let out = forecast(&history(), 2020, 2022).unwrap();
        assert_eq!(out.len(), 3);
        assert!((out[0].close - (8.0 + 0.03 * 40.0)).abs() < 1e-6);
    }

    #[test]
    fn forecast_without_history_is_a_no_data_error() {
        assert_eq!(forecast(&[], 2020, 2021).unwrap_err().exit_code(), 3);
    }
}
