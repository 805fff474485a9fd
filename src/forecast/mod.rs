//! Linear-trend temperature forecasting.
//!
//! History is reduced to `(year, close)` pairs and fitted with OLS; future
//! years get a synthetic candlestick centred on the fitted line.

use crate::domain::Candlestick;
use crate::error::CandleError;
use crate::math::{RegressionModel, fit_line};

/// Half-width of the synthetic high/low band around a predicted close.
const PREDICTION_BAND: f64 = 1.0;

/// Fit `close ≈ slope * year + intercept` over historical candlesticks.
pub fn fit_trend(history: &[Candlestick]) -> Result<RegressionModel, CandleError> {
    if history.is_empty() {
        return Err(CandleError::InsufficientData);
    }
    let points = history
        .iter()
        .map(|c| Ok((f64::from(c.year()?), c.close)))
        .collect::<Result<Vec<_>, CandleError>>()?;
    fit_line(&points)
}

/// Synthesize one candlestick per year in `[start_year, end_year]`.
///
/// A reversed range yields no candlesticks; callers validate ordering.
pub fn forecast_years(model: &RegressionModel, start_year: i32, end_year: i32) -> Vec<Candlestick> {
    (start_year..=end_year)
        .map(|year| {
            let close = model.predict(f64::from(year));
            Candlestick::new(
                year.to_string(),
                close,
                close + PREDICTION_BAND,
                close - PREDICTION_BAND,
                close,
            )
        })
        .collect()
}

/// Fit the historical trend and project it over `[start_year, end_year]`.
pub fn predict_temperatures(
    history: &[Candlestick],
    start_year: i32,
    end_year: i32,
) -> Result<Vec<Candlestick>, CandleError> {
    let model = fit_trend(history)?;
    log::debug!(
        "trend fit over {} years: slope={:.5} intercept={:.3}",
        model.n,
        model.slope,
        model.intercept
    );
    Ok(forecast_years(&model, start_year, end_year))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn linear_history(slope: f64, intercept: f64, years: std::ops::RangeInclusive<i32>) -> Vec<Candlestick> {
        years
            .map(|y| {
                let close = slope * f64::from(y) + intercept;
                Candlestick::new(y.to_string(), close - 0.5, close + 3.0, close - 3.0, close)
            })
            .collect()
    }

    #[test]
    fn recovers_known_line() {
        let history = linear_history(2.0, 10.0, 2000..=2010);
        let model = fit_trend(&history).unwrap();
        assert!((model.slope - 2.0).abs() < 1e-9, "slope {}", model.slope);
        assert!((model.intercept - 10.0).abs() < 1e-6, "intercept {}", model.intercept);
    }

    #[test]
    fn predictions_follow_line_with_fixed_band() {
        let history = linear_history(2.0, 10.0, 2000..=2010);
        let predicted = predict_temperatures(&history, 2020, 2025).unwrap();
        assert_eq!(predicted.len(), 6);
        for c in &predicted {
            let year = f64::from(c.year().unwrap());
            assert!((c.close - (2.0 * year + 10.0)).abs() < 1e-6);
            assert_eq!(c.open, c.close);
            assert!((c.high - c.low - 2.0).abs() < 1e-9);
        }
        assert_eq!(predicted[0].period, "2020");
        assert_eq!(predicted[5].period, "2025");
    }

    #[test]
    fn reversed_range_is_empty() {
        let history = linear_history(0.1, 5.0, 1980..=1990);
        assert!(predict_temperatures(&history, 2025, 2020).unwrap().is_empty());
    }

    #[test]
    fn errors_are_reported_per_call() {
        assert_eq!(predict_temperatures(&[], 2020, 2021), Err(CandleError::InsufficientData));

        let same_year = vec![
            Candlestick::new("2000", 1.0, 2.0, 0.0, 1.5),
            Candlestick::new("2000", 2.0, 3.0, 1.0, 2.5),
        ];
        assert_eq!(
            predict_temperatures(&same_year, 2020, 2021),
            Err(CandleError::DegenerateFit { n: 2 })
        );

        let bad_label = vec![Candlestick::new("20x0", 1.0, 2.0, 0.0, 1.5)];
        assert_eq!(
            predict_temperatures(&bad_label, 2020, 2021),
            Err(CandleError::InvalidPeriod("20x0".to_string()))
        );
    }
}
