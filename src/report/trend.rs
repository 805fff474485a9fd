//! Per-country warming trends.
//!
//! Every country column is aggregated and fitted independently, so the work
//! is spread across threads with rayon. A country whose fit fails is reported
//! as skipped; it never aborts the others.

use rayon::prelude::*;

use crate::candles::compute_candlesticks;
use crate::domain::CountryNames;
use crate::error::CandleError;
use crate::forecast::fit_trend;
use crate::io::ingest::IngestedSeries;
use crate::math::RegressionModel;

#[derive(Debug, Clone)]
pub struct TrendRow {
    pub column: String,
    pub country: String,
    pub model: RegressionModel,
    /// Latest year in the fitted history.
    pub last_year: i32,
}

#[derive(Debug, Clone)]
pub struct TrendReport {
    /// Sorted by slope, steepest warming first.
    pub rows: Vec<TrendRow>,
    /// `(column, reason)` for countries that could not be fitted.
    pub skipped: Vec<(String, String)>,
}

/// Fit a yearly-close trend for every series and rank by slope.
pub fn rank_trends(series: &[IngestedSeries], names: &CountryNames) -> TrendReport {
    let results: Vec<(String, Result<TrendRow, CandleError>)> = series
        .par_iter()
        .map(|s| (s.column.clone(), trend_for(s, names)))
        .collect();

    let mut rows = Vec::new();
    let mut skipped = Vec::new();
    for (column, result) in results {
        match result {
            Ok(row) => rows.push(row),
            Err(err) => {
                log::debug!("trend skipped for {column}: {err}");
                skipped.push((column, err.to_string()));
            }
        }
    }

    rows.sort_by(|a, b| {
        b.model
            .slope
            .partial_cmp(&a.model.slope)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    TrendReport { rows, skipped }
}

fn trend_for(series: &IngestedSeries, names: &CountryNames) -> Result<TrendRow, CandleError> {
    let candles = compute_candlesticks(&series.samples)?;
    let model = fit_trend(&candles)?;
    let last_year = candles
        .iter()
        .try_fold(i32::MIN, |acc, c| c.year().map(|y| acc.max(y)))?;

    Ok(TrendRow {
        column: series.column.clone(),
        country: names.display_name(&series.column),
        model,
        last_year,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Sample;

    fn series(column: &str, slope: f64) -> IngestedSeries {
        let samples = (1980..=1989)
            .flat_map(|y| {
                let base = slope * f64::from(y - 1980);
                [Sample::new(y.to_string(), base - 5.0), Sample::new(y.to_string(), base)]
            })
            .collect();
        IngestedSeries {
            column: column.to_string(),
            samples,
            row_errors: Vec::new(),
            rows_read: 20,
        }
    }

    #[test]
    fn ranks_by_slope_and_reports_failures() {
        let mut empty = series("XX_temperature", 0.0);
        empty.samples.clear();

        let input = vec![
            series("AT_temperature", 0.02),
            empty,
            series("ES_temperature", 0.08),
            series("FI_temperature", -0.01),
        ];
        let report = rank_trends(&input, &CountryNames::default());

        let order: Vec<&str> = report.rows.iter().map(|r| r.column.as_str()).collect();
        assert_eq!(order, vec!["ES_temperature", "AT_temperature", "FI_temperature"]);
        assert!((report.rows[0].model.slope - 0.08).abs() < 1e-9);
        assert_eq!(report.rows[0].country, "Spain Temperature");
        assert_eq!(report.rows[0].last_year, 1989);

        assert_eq!(
            report.skipped,
            vec![("XX_temperature".to_string(), "no samples to aggregate".to_string())]
        );
    }
}
