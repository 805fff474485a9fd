//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the aggregation/forecast code stays clean and testable
//! - output changes are localized (golden tests live here)

use crate::domain::Candlestick;
use crate::io::ingest::IngestedSeries;
use crate::report::trend::TrendReport;

/// Format candlesticks as a `Year / Open / High / Low / Close` table.
pub fn format_candle_table(candles: &[Candlestick]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:>15}{:>10}{:>10}{:>10}{:>10}\n",
        "Year", "Open", "High", "Low", "Close"
    ));
    out.push_str(&"-".repeat(55));
    out.push('\n');

    for c in candles {
        out.push_str(&format!(
            "{:>15}{:>10.3}{:>10.3}{:>10.3}{:>10.3}\n",
            c.period, c.open, c.high, c.low, c.close
        ));
    }

    out
}

/// Summary header for a loaded country series.
pub fn format_series_summary(country: &str, series: &IngestedSeries, candles: &[Candlestick]) -> String {
    let mut out = String::new();
    out.push_str(&format!("=== wx - {country} ===\n"));
    out.push_str(&format!(
        "Rows: read={} used={} skipped={}\n",
        series.rows_read,
        series.rows_used(),
        series.row_errors.len()
    ));

    if let (Some(first), Some(last)) = (candles.first(), candles.last()) {
        let low = candles.iter().map(|c| c.low).fold(f64::INFINITY, f64::min);
        let high = candles.iter().map(|c| c.high).fold(f64::NEG_INFINITY, f64::max);
        out.push_str(&format!(
            "Candlesticks: n={} | periods=[{}, {}] | range=[{low:.2}, {high:.2}]\n",
            candles.len(),
            first.period,
            last.period,
        ));
    } else {
        out.push_str("Candlesticks: n=0\n");
    }

    out
}

/// Format the per-country warming trend ranking (top `top_n`).
pub fn format_trend_table(report: &TrendReport, top_n: usize) -> String {
    let mut out = String::new();
    out.push_str("Warming trend by country (least-squares slope of yearly close):\n");
    out.push_str(&format!(
        "{:<4} {:<28} {:>12} {:>10} {:>6}\n",
        "#", "country", "°C/decade", "fit@last", "years"
    ));
    out.push_str(&format!("{:-<4} {:-<28} {:->12} {:->10} {:->6}\n", "", "", "", "", ""));

    for (rank, row) in report.rows.iter().take(top_n).enumerate() {
        out.push_str(&format!(
            "{:<4} {:<28} {:>+12.3} {:>10.2} {:>6}\n",
            rank + 1,
            truncate(&row.country, 28),
            row.model.slope * 10.0,
            row.model.predict(f64::from(row.last_year)),
            row.model.n,
        ));
    }

    for (column, reason) in &report.skipped {
        out.push_str(&format!("  (skipped {column}) {reason}\n"));
    }

    out
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}
