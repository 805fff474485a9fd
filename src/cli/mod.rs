//! Command-line parsing for the weather candlestick tool.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the aggregation/plotting code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::{DEFAULT_PLOT_HEIGHT, FIRST_YEAR, LAST_YEAR};

pub mod pager;
pub mod picker;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "wx", version, about = "Temperature candlesticks: aggregate, filter, plot and forecast")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the yearly candlestick table for a country.
    Table(SourceArgs),
    /// Plot yearly candlesticks as a paginated text chart.
    Plot(PlotArgs),
    /// Filter candlesticks by year and/or closing temperature, then print and plot them.
    Filter(FilterArgs),
    /// Forecast future years from the linear trend of yearly closes.
    Predict(PredictArgs),
    /// List the country columns available in the data file.
    Countries(FileArgs),
    /// Rank every country by its warming trend.
    Trend(TrendArgs),
    /// Write a synthetic weather CSV (for demos and testing).
    Sample(SampleArgs),
}

/// Data file selection.
#[derive(Debug, Args, Clone)]
pub struct FileArgs {
    /// Weather CSV (`utc_timestamp,<CODE>_temperature,...`).
    #[arg(short = 'f', long, env = "WX_DATA", default_value = "weather_data.csv")]
    pub file: PathBuf,
}

/// Data file + country selection.
#[derive(Debug, Args, Clone)]
pub struct SourceArgs {
    #[command(flatten)]
    pub file: FileArgs,

    /// Country code (`AT`) or column name (`AT_temperature`). Prompts when omitted.
    #[arg(short = 'c', long)]
    pub country: Option<String>,
}

/// Chart presentation options.
#[derive(Debug, Args, Clone)]
pub struct ChartArgs {
    /// Chart height in rows (minimum 10).
    #[arg(long, default_value_t = DEFAULT_PLOT_HEIGHT)]
    pub height: usize,

    /// Print all chart pages without waiting for Enter.
    #[arg(long)]
    pub no_pause: bool,
}

/// Optional exports of the resulting candlesticks.
#[derive(Debug, Args, Clone)]
pub struct ExportArgs {
    /// Export candlesticks to CSV.
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Export candlesticks to JSON (re-plot with `wx plot --from-json`).
    #[arg(long = "export-json")]
    pub export_json: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct PlotArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub chart: ChartArgs,

    /// Plot a previously exported candle JSON instead of reading the CSV.
    #[arg(long, value_name = "JSON")]
    pub from_json: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct FilterArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// First year to keep (1980-2019). Requires --end-year.
    #[arg(long, requires = "end_year")]
    pub start_year: Option<i32>,

    /// Last year to keep (1980-2019). Requires --start-year.
    #[arg(long, requires = "start_year")]
    pub end_year: Option<i32>,

    /// Minimum closing temperature. Requires --max-temp.
    #[arg(long, requires = "max_temp", allow_negative_numbers = true)]
    pub min_temp: Option<f64>,

    /// Maximum closing temperature. Requires --min-temp.
    #[arg(long, requires = "min_temp", allow_negative_numbers = true)]
    pub max_temp: Option<f64>,

    #[command(flatten)]
    pub chart: ChartArgs,

    #[command(flatten)]
    pub export: ExportArgs,
}

#[derive(Debug, Args)]
pub struct PredictArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// First year to forecast.
    #[arg(long, default_value_t = LAST_YEAR + 1)]
    pub start_year: i32,

    /// Last year to forecast.
    #[arg(long, default_value_t = LAST_YEAR + 6)]
    pub end_year: i32,

    #[command(flatten)]
    pub chart: ChartArgs,

    #[command(flatten)]
    pub export: ExportArgs,
}

#[derive(Debug, Args)]
pub struct TrendArgs {
    #[command(flatten)]
    pub file: FileArgs,

    /// Show the top-N countries.
    #[arg(long, default_value_t = 30)]
    pub top: usize,
}

#[derive(Debug, Args)]
pub struct SampleArgs {
    /// Output CSV path.
    #[arg(short = 'o', long, default_value = "weather_data.csv")]
    pub out: PathBuf,

    /// Comma-separated country codes.
    #[arg(long, value_delimiter = ',', default_value = "AT,DE,ES,FI,FR,GB,IT,NO,PL,SE")]
    pub countries: Vec<String>,

    #[arg(long, default_value_t = FIRST_YEAR)]
    pub start_year: i32,

    #[arg(long, default_value_t = LAST_YEAR)]
    pub end_year: i32,

    /// Random seed.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Hours between readings.
    #[arg(long, default_value_t = 24)]
    pub step_hours: u32,

    /// Std dev of reading noise (°C).
    #[arg(long, default_value_t = 2.0)]
    pub noise: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_ranges_must_come_in_pairs() {
        let ok = Cli::try_parse_from(["wx", "filter", "-c", "AT", "--start-year", "1990", "--end-year", "2000"]);
        assert!(ok.is_ok());

        let missing = Cli::try_parse_from(["wx", "filter", "-c", "AT", "--start-year", "1990"]);
        assert!(missing.is_err());
    }

    #[test]
    fn negative_temperatures_parse() {
        let cli = Cli::try_parse_from(["wx", "filter", "--min-temp", "-5.5", "--max-temp", "3"]).unwrap();
        match cli.command {
            Command::Filter(args) => {
                assert_eq!(args.min_temp, Some(-5.5));
                assert_eq!(args.max_temp, Some(3.0));
                assert_eq!(args.chart.height, DEFAULT_PLOT_HEIGHT);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn sample_countries_split_on_commas() {
        let cli = Cli::try_parse_from(["wx", "sample", "--countries", "AT,DE", "--seed", "3"]).unwrap();
        match cli.command {
            Command::Sample(args) => {
                assert_eq!(args.countries, vec!["AT", "DE"]);
                assert_eq!(args.seed, 3);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
