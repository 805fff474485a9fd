//! Candlestick range filters.
//!
//! Both filters are plain predicates over independent fields, so they can be
//! chained in either order. Bounds are validated by callers (see
//! `domain::YearRange` / `domain::TempRange`); the filters only select.

use crate::domain::Candlestick;

/// Keep candlesticks whose period year lies in `[start_year, end_year]`.
///
/// Candlesticks whose period is not an integer year never match.
pub fn filter_by_year_range(candles: &[Candlestick], start_year: i32, end_year: i32) -> Vec<Candlestick> {
    candles
        .iter()
        .filter(|c| match c.year() {
            Ok(year) => year >= start_year && year <= end_year,
            Err(err) => {
                log::debug!("excluding candlestick from year filter: {err}");
                false
            }
        })
        .cloned()
        .collect()
}

/// Keep candlesticks whose `close` lies in `[min_temp, max_temp]`.
pub fn filter_by_close_range(candles: &[Candlestick], min_temp: f64, max_temp: f64) -> Vec<Candlestick> {
    candles
        .iter()
        .filter(|c| c.close >= min_temp && c.close <= max_temp)
        .cloned()
        .collect()
}
