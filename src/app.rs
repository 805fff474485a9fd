//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and initialises logging
//! - parses CLI arguments
//! - runs the candlestick pipeline
//! - prints tables/charts
//! - writes optional exports

use std::fs::File;
use std::io::{BufWriter, IsTerminal};

use clap::Parser;

use crate::cli::pager::{PageAction, is_interactive, wait_for_next_page};
use crate::cli::{
    ChartArgs, Command, ExportArgs, FileArgs, FilterArgs, PlotArgs, PredictArgs, SampleArgs, SourceArgs,
    TrendArgs,
};
use crate::data::{SampleConfig, generate_weather_csv};
use crate::domain::{
    CandleFile, Candlestick, ChartConfig, CountryNames, ExportConfig, SeriesKind, TempRange, YearRange,
};
use crate::error::AppError;
use crate::io::ingest::{list_temperature_columns, load_columns, resolve_column};
use crate::plot::render_chart;

pub mod pipeline;

/// Entry point for the `wx` binary.
pub fn run() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .try_init();

    // We want `wx -c AT` to behave like `wx table -c AT`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);
    let names = CountryNames::default();

    match cli.command {
        Command::Table(args) => handle_table(args, &names),
        Command::Plot(args) => handle_plot(args, &names),
        Command::Filter(args) => handle_filter(args, &names),
        Command::Predict(args) => handle_predict(args, &names),
        Command::Countries(args) => handle_countries(args, &names),
        Command::Trend(args) => handle_trend(args, &names),
        Command::Sample(args) => handle_sample(args),
    }
}

fn handle_table(args: SourceArgs, names: &CountryNames) -> Result<(), AppError> {
    let column = select_column(&args, names)?;
    let loaded = pipeline::load_candles(&args.file.file, &column, names)?;

    println!(
        "{}",
        crate::report::format_series_summary(&loaded.country, &loaded.ingest, &loaded.candles)
    );
    println!("{}", crate::report::format_candle_table(&loaded.candles));
    Ok(())
}

fn handle_plot(args: PlotArgs, names: &CountryNames) -> Result<(), AppError> {
    let chart = chart_config(&args.chart);

    if let Some(path) = &args.from_json {
        let file = crate::io::read_candle_file(path)?;
        println!("{} ({:?}, {} candlesticks)", file.country, file.kind, file.candlesticks.len());
        return print_chart(&file.candlesticks, &chart);
    }

    let column = select_column(&args.source, names)?;
    let loaded = pipeline::load_candles(&args.source.file.file, &column, names)?;
    println!("Plotting {}:", loaded.country);
    print_chart(&loaded.candles, &chart)
}

fn handle_filter(args: FilterArgs, names: &CountryNames) -> Result<(), AppError> {
    // Validate user-supplied bounds before touching the data.
    let years = match (args.start_year, args.end_year) {
        (Some(start), Some(end)) => Some(YearRange::new(start, end)?),
        _ => None,
    };
    let temps = match (args.min_temp, args.max_temp) {
        (Some(min), Some(max)) => Some(TempRange::new(min, max)?),
        _ => None,
    };
    if years.is_none() && temps.is_none() {
        log::warn!("no filter bounds given; showing every candlestick");
    }

    let column = select_column(&args.source, names)?;
    let loaded = pipeline::load_candles(&args.source.file.file, &column, names)?;
    let filtered = pipeline::apply_filters(&loaded.candles, years, temps);

    println!(
        "Filtered {} of {} candlesticks for {}.",
        filtered.len(),
        loaded.candles.len(),
        loaded.country
    );
    if filtered.is_empty() {
        println!("No data matches the specified filters.");
        return Ok(());
    }

    println!("\n{}", crate::report::format_candle_table(&filtered));
    print_chart(&filtered, &chart_config(&args.chart))?;

    write_exports(
        &export_config(&args.export),
        CandleFile::new(&loaded.column, &loaded.country, SeriesKind::Observed, filtered),
    )
}

fn handle_predict(args: PredictArgs, names: &CountryNames) -> Result<(), AppError> {
    let column = select_column(&args.source, names)?;
    let loaded = pipeline::load_candles(&args.source.file.file, &column, names)?;
    let predictions = pipeline::forecast(&loaded.candles, args.start_year, args.end_year)?;

    println!(
        "Predicted {} ({}-{}) from {} years of history:",
        loaded.country,
        args.start_year,
        args.end_year,
        loaded.candles.len()
    );
    println!("\n{}", crate::report::format_candle_table(&predictions));
    print_chart(&predictions, &chart_config(&args.chart))?;

    write_exports(
        &export_config(&args.export),
        CandleFile::new(&loaded.column, &loaded.country, SeriesKind::Forecast, predictions),
    )
}

fn handle_countries(args: FileArgs, names: &CountryNames) -> Result<(), AppError> {
    let columns = list_temperature_columns(&args.file)?;
    for (idx, column) in columns.iter().enumerate() {
        println!("{:>3}) {:<16} {}", idx + 1, column, names.display_name(column));
    }
    Ok(())
}

fn handle_trend(args: TrendArgs, names: &CountryNames) -> Result<(), AppError> {
    let columns = list_temperature_columns(&args.file.file)?;
    let series = load_columns(&args.file.file, &columns)?;
    let report = crate::report::rank_trends(&series, names);
    println!("{}", crate::report::format_trend_table(&report, args.top));
    Ok(())
}

fn handle_sample(args: SampleArgs) -> Result<(), AppError> {
    let config = SampleConfig {
        countries: args.countries,
        start_year: args.start_year,
        end_year: args.end_year,
        seed: args.seed,
        step_hours: args.step_hours,
        noise_sigma: args.noise,
    };

    let file = File::create(&args.out)
        .map_err(|e| AppError::new(2, format!("Failed to create '{}': {e}", args.out.display())))?;
    let summary = generate_weather_csv(&config, BufWriter::new(file))?;

    println!(
        "Wrote {} rows x {} countries to {}",
        summary.rows,
        summary.columns.len(),
        args.out.display()
    );
    Ok(())
}

/// Resolve `--country`, or ask interactively when it was omitted.
fn select_column(args: &SourceArgs, names: &CountryNames) -> Result<String, AppError> {
    let columns = list_temperature_columns(&args.file.file)?;
    match &args.country {
        Some(query) => resolve_column(&columns, query),
        None if std::io::stdin().is_terminal() => crate::cli::picker::prompt_for_country(&columns, names),
        None => Err(AppError::new(
            2,
            "No country given. Pass `-c <CODE>` (see `wx countries`).",
        )),
    }
}

/// Print every chart page, pausing between pages when interactive.
fn print_chart(candles: &[Candlestick], chart: &ChartConfig) -> Result<(), AppError> {
    let pages = render_chart(candles, chart.height);
    let total = pages.len();
    let pause = chart.pause && is_interactive();

    for (idx, page) in pages.iter().enumerate() {
        if total > 1 {
            println!("Page {}/{}", idx + 1, total);
        }
        print!("{page}");

        if pause && idx + 1 < total && wait_for_next_page()? == PageAction::Quit {
            break;
        }
    }
    Ok(())
}

fn write_exports(export: &ExportConfig, file: CandleFile) -> Result<(), AppError> {
    if let Some(path) = &export.csv {
        crate::io::write_candles_csv(path, &file.candlesticks)?;
    }
    if let Some(path) = &export.json {
        crate::io::write_candle_file(path, &file)?;
    }
    Ok(())
}

pub fn chart_config(args: &ChartArgs) -> ChartConfig {
    ChartConfig {
        height: args.height,
        pause: !args.no_pause,
    }
}

pub fn export_config(args: &ExportArgs) -> ExportConfig {
    ExportConfig {
        csv: args.export.clone(),
        json: args.export_json.clone(),
    }
}

/// Rewrite argv so bare flags default to `wx table`.
///
/// Rules:
/// - `wx`                      -> `wx table`
/// - `wx -c AT ...`            -> `wx table -c AT ...`
/// - `wx --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("table".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    // If the first token is a flag, treat it as "table flags".
    if arg1.starts_with('-') {
        argv.insert(1, "table".to_string());
    }

    argv
}
