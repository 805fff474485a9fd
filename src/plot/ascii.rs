//! Text-mode candlestick chart.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual inspection in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! One 5-character column per candlestick, one row per discretized value
//! level, top row = global maximum. Cell markers:
//! - wick / range line: `|`
//! - open == close: `=`
//! - open: `+`
//! - close: `-`
//!
//! Rendering is pure: the chart is returned as pages and the caller decides
//! how (and whether) to pace them.

use std::fmt;

use crate::domain::Candlestick;
use crate::math::normalize;

/// Candlesticks per rendered page.
pub const PAGE_SIZE: usize = 20;
/// Smallest grid height the plotter will render.
pub const MIN_SCALE_HEIGHT: usize = 10;

const CELL_WIDTH: usize = 5;
/// Width of the `"{value:>6.1} | "` axis prefix.
const AXIS_WIDTH: usize = 9;

/// Classification of one grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Wick,
    Flat,
    Open,
    Close,
    Blank,
}

impl Cell {
    pub fn marker(self) -> &'static str {
        match self {
            Cell::Wick => "|    ",
            Cell::Flat => "=    ",
            Cell::Open => "+    ",
            Cell::Close => "-    ",
            Cell::Blank => "     ",
        }
    }
}

/// Vertical scale shared by every page of a chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotScale {
    pub min: f64,
    pub max: f64,
    pub height: usize,
}

impl PlotScale {
    /// Global min low / max high across all candlesticks.
    ///
    /// Returns `None` for an empty slice.
    pub fn from_candles(candles: &[Candlestick], requested_height: usize) -> Option<Self> {
        let first = candles.first()?;
        let (min, max) = candles
            .iter()
            .fold((first.low, first.high), |(lo, hi), c| (lo.min(c.low), hi.max(c.high)));
        Some(Self {
            min,
            max,
            height: requested_height.max(MIN_SCALE_HEIGHT),
        })
    }

    /// Value represented by a grid row (row 0 = `min`).
    pub fn row_value(&self, row: usize) -> f64 {
        if self.height < 2 {
            return self.min;
        }
        self.min + (self.max - self.min) * row as f64 / (self.height - 1) as f64
    }

    fn row_of(&self, value: f64) -> usize {
        normalize(value, self.min, self.max, self.height)
    }
}

/// Grid rows of one candlestick's four prices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CandleRows {
    high: usize,
    low: usize,
    open: usize,
    close: usize,
}

impl CandleRows {
    fn new(candle: &Candlestick, scale: &PlotScale) -> Self {
        Self {
            high: scale.row_of(candle.high),
            low: scale.row_of(candle.low),
            open: scale.row_of(candle.open),
            close: scale.row_of(candle.close),
        }
    }

    /// Wick endpoints win over body markers, so `high == open` draws `|`.
    fn classify(&self, row: usize) -> Cell {
        if row == self.high || row == self.low {
            Cell::Wick
        } else if row == self.open && row == self.close {
            Cell::Flat
        } else if row == self.open {
            Cell::Open
        } else if row == self.close {
            Cell::Close
        } else if row > self.low && row < self.high {
            Cell::Wick
        } else {
            Cell::Blank
        }
    }
}

/// One rendered page: grid rows (top to bottom), separator and label row.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartPage {
    pub rows: Vec<String>,
    /// `CELL_WIDTH` dashes per candlestick on the page.
    pub separator: String,
    pub labels: String,
}

impl ChartPage {
    /// All output lines, with the separator and labels indented under the grid.
    pub fn lines(&self) -> Vec<String> {
        let indent = " ".repeat(AXIS_WIDTH);
        let mut out = self.rows.clone();
        out.push(format!("{indent}{}", self.separator));
        out.push(format!("{indent}{}", self.labels));
        out
    }
}

impl fmt::Display for ChartPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.lines() {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

/// Render one page of candlesticks against a (global) scale.
pub fn render_page(page: &[Candlestick], scale: &PlotScale) -> ChartPage {
    let positions: Vec<CandleRows> = page.iter().map(|c| CandleRows::new(c, scale)).collect();

    let rows = (0..scale.height)
        .rev()
        .map(|row| {
            let mut line = format!("{:>6.1} | ", scale.row_value(row));
            for pos in &positions {
                line.push_str(pos.classify(row).marker());
            }
            line
        })
        .collect();

    let labels = page
        .iter()
        .map(|c| {
            let label: String = c.period.chars().take(CELL_WIDTH).collect();
            format!("{label:>width$}", width = CELL_WIDTH)
        })
        .collect::<String>();

    ChartPage {
        rows,
        separator: "-".repeat(page.len() * CELL_WIDTH),
        labels,
    }
}

/// Render a full chart as `PAGE_SIZE`-candlestick pages on a shared scale.
///
/// Empty input produces no pages (and a warning), not an error.
pub fn render_chart(candles: &[Candlestick], scale_height: usize) -> Vec<ChartPage> {
    let Some(scale) = PlotScale::from_candles(candles, scale_height) else {
        log::warn!("No candlestick data to plot.");
        return Vec::new();
    };
    candles
        .chunks(PAGE_SIZE)
        .map(|page| render_page(page, &scale))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Expand a compact marker string (`|=+- `) into a full grid row.
    fn row(axis: &str, markers: &str) -> String {
        let mut line = format!("{axis} | ");
        for ch in markers.chars() {
            line.push_str(match ch {
                '|' => Cell::Wick.marker(),
                '=' => Cell::Flat.marker(),
                '+' => Cell::Open.marker(),
                '-' => Cell::Close.marker(),
                _ => Cell::Blank.marker(),
            });
        }
        line
    }

    fn candles(n: usize) -> Vec<Candlestick> {
        (0..n)
            .map(|i| {
                let base = i as f64;
                Candlestick::new((1980 + i).to_string(), base, base + 2.0, base - 1.0, base + 1.0)
            })
            .collect()
    }

    #[test]
    fn page_golden_snapshot() {
        let page = vec![
            Candlestick::new("1980", 2.0, 4.0, 0.0, 3.0),
            Candlestick::new("1981", 1.0, 1.0, 1.0, 1.0),
            Candlestick::new("1982", 4.0, 4.0, 2.0, 2.0),
            Candlestick::new("1983", 2.2, 3.0, 0.5, 2.2),
        ];
        let scale = PlotScale::from_candles(&page, 3).unwrap();
        assert_eq!(scale.height, MIN_SCALE_HEIGHT);

        let rendered = render_page(&page, &scale);
        let expected = vec![
            row("   4.0", "| | "),
            row("   3.6", "| | "),
            row("   3.1", "- ||"),
            row("   2.7", "| ||"),
            row("   2.2", "+ |="),
            row("   1.8", "|  |"),
            row("   1.3", "|  |"),
            row("   0.9", "|| |"),
            row("   0.4", "|  |"),
            row("   0.0", "|   "),
        ];
        assert_eq!(rendered.rows, expected);
        assert_eq!(rendered.separator, "-".repeat(20));
        assert_eq!(rendered.labels, " 1980 1981 1982 1983");

        let lines = rendered.lines();
        assert_eq!(lines.len(), 12);
        assert_eq!(lines[10], format!("         {}", "-".repeat(20)));
    }

    #[test]
    fn wick_endpoints_take_precedence_over_body_markers() {
        let pos = CandleRows { high: 8, low: 2, open: 8, close: 2 };
        assert_eq!(pos.classify(8), Cell::Wick);
        assert_eq!(pos.classify(2), Cell::Wick);
        assert_eq!(pos.classify(5), Cell::Wick);
        assert_eq!(pos.classify(9), Cell::Blank);

        let pos = CandleRows { high: 8, low: 2, open: 5, close: 5 };
        assert_eq!(pos.classify(5), Cell::Flat);

        let pos = CandleRows { high: 8, low: 2, open: 6, close: 3 };
        assert_eq!(pos.classify(6), Cell::Open);
        assert_eq!(pos.classify(3), Cell::Close);
        assert_eq!(pos.classify(4), Cell::Wick);
        assert_eq!(pos.classify(1), Cell::Blank);
    }

    #[test]
    fn forty_five_candles_make_three_pages() {
        let pages = render_chart(&candles(45), 20);
        let sizes: Vec<usize> = pages.iter().map(|p| p.separator.len() / 5).collect();
        assert_eq!(sizes, vec![20, 20, 5]);
        for page in &pages {
            assert_eq!(page.rows.len(), 20);
        }
        assert_eq!(pages[2].separator.len(), 25);
        assert_eq!(pages[2].labels, " 2020 2021 2022 2023 2024");
    }

    #[test]
    fn every_page_uses_the_global_scale() {
        let pages = render_chart(&candles(25), 10);
        // Global max high = 24 + 2, global min low = -1.
        for page in &pages {
            assert!(page.rows[0].starts_with("  26.0 | "));
            assert!(page.rows[9].starts_with("  -1.0 | "));
        }
    }

    #[test]
    fn empty_input_renders_nothing() {
        assert!(render_chart(&[], 20).is_empty());
        assert_eq!(PlotScale::from_candles(&[], 20), None);
    }

    #[test]
    fn flat_series_sits_on_bottom_row() {
        let flat = vec![Candlestick::new("2000", 5.0, 5.0, 5.0, 5.0)];
        let pages = render_chart(&flat, 10);
        assert_eq!(pages[0].rows[9], row("   5.0", "|"));
        assert_eq!(pages[0].rows[0], row("   5.0", " "));
    }

    #[test]
    fn long_labels_are_truncated_to_the_column() {
        let page = vec![Candlestick::new("1980-01-01", 1.0, 2.0, 0.0, 1.0)];
        let scale = PlotScale::from_candles(&page, 10).unwrap();
        assert_eq!(render_page(&page, &scale).labels, "1980-");
    }
}
