//! Synthetic weather CSV generation.
//!
//! Produces a wide file in the same layout `io::ingest` reads
//! (`utc_timestamp,<CODE>_temperature,...`). Each country gets a random
//! climate profile, then every reading is:
//!
//! ```text
//! base + amplitude * seasonal(day_of_year) + trend * (year - start_year) + N(0, noise_sigma)
//! ```
//!
//! The same config (seed included) always yields the same file.

use std::collections::hash_map::DefaultHasher;
use std::f64::consts::TAU;
use std::hash::{Hash, Hasher};
use std::io::Write;

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;

use crate::error::AppError;

/// Day of year with the lowest seasonal temperature (mid-January).
const COLDEST_DAY: f64 = 15.0;
const DAYS_PER_YEAR: f64 = 365.25;

#[derive(Debug, Clone)]
pub struct SampleConfig {
    /// Country codes, e.g. `["AT", "DE"]`.
    pub countries: Vec<String>,
    pub start_year: i32,
    pub end_year: i32,
    pub seed: u64,
    /// Hours between readings.
    pub step_hours: u32,
    /// Std dev of the per-reading noise (°C).
    pub noise_sigma: f64,
}

/// Per-country climate parameters.
#[derive(Debug, Clone, Copy)]
struct Climate {
    base: f64,
    amplitude: f64,
    trend: f64,
}

/// What was written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleSummary {
    pub rows: usize,
    pub columns: Vec<String>,
}

/// Write a synthetic weather CSV to `out`.
pub fn generate_weather_csv<W: Write>(config: &SampleConfig, out: W) -> Result<SampleSummary, AppError> {
    validate(config)?;

    let mut rng = StdRng::seed_from_u64(sample_seed(config));
    let noise = Normal::new(0.0, config.noise_sigma)
        .map_err(|e| AppError::new(2, format!("Noise distribution error: {e}")))?;

    let climates: Vec<Climate> = config
        .countries
        .iter()
        .map(|_| Climate {
            base: rng.gen_range(2.0..16.0),
            amplitude: rng.gen_range(4.0..12.0),
            trend: rng.gen_range(0.01..0.06),
        })
        .collect();

    let columns: Vec<String> = config
        .countries
        .iter()
        .map(|code| format!("{}_temperature", code.trim().to_ascii_uppercase()))
        .collect();

    let mut writer = csv::Writer::from_writer(out);
    let mut header = vec!["utc_timestamp".to_string()];
    header.extend(columns.iter().cloned());
    writer
        .write_record(&header)
        .map_err(|e| AppError::new(4, format!("Failed to write sample header: {e}")))?;

    let start = year_start(config.start_year)?;
    let end = year_start(config.end_year + 1)?;
    let step = Duration::hours(i64::from(config.step_hours));

    let mut rows = 0usize;
    let mut ts = start;
    while ts < end {
        let years_in = f64::from(ts.year() - config.start_year);
        let seasonal = -(TAU * (f64::from(ts.ordinal()) - COLDEST_DAY) / DAYS_PER_YEAR).cos();

        let mut record = Vec::with_capacity(columns.len() + 1);
        record.push(ts.format("%Y-%m-%dT%H:%M:%SZ").to_string());
        for climate in &climates {
            let value = climate.base
                + climate.amplitude * seasonal
                + climate.trend * years_in
                + noise.sample(&mut rng);
            record.push(format!("{value:.3}"));
        }
        writer
            .write_record(&record)
            .map_err(|e| AppError::new(4, format!("Failed to write sample row: {e}")))?;

        rows += 1;
        ts += step;
    }

    writer
        .flush()
        .map_err(|e| AppError::new(4, format!("Failed to flush sample CSV: {e}")))?;

    Ok(SampleSummary { rows, columns })
}

fn validate(config: &SampleConfig) -> Result<(), AppError> {
    if config.countries.is_empty() {
        return Err(AppError::new(2, "At least one country code is required."));
    }
    if config.countries.iter().any(|c| c.trim().is_empty() || c.contains(',')) {
        return Err(AppError::new(2, "Country codes must be non-empty and comma-free."));
    }
    if config.start_year > config.end_year {
        return Err(AppError::new(2, "Sample start year must not be after end year."));
    }
    if config.step_hours == 0 {
        return Err(AppError::new(2, "Sample step must be at least one hour."));
    }
    if !(config.noise_sigma.is_finite() && config.noise_sigma >= 0.0) {
        return Err(AppError::new(2, "Noise sigma must be finite and >= 0."));
    }
    Ok(())
}

fn year_start(year: i32) -> Result<DateTime<Utc>, AppError> {
    NaiveDate::from_ymd_opt(year, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .ok_or_else(|| AppError::new(2, format!("Year {year} is out of range.")))
}

fn sample_seed(config: &SampleConfig) -> u64 {
    let mut hasher = DefaultHasher::new();
    config.seed.hash(&mut hasher);
    config.countries.hash(&mut hasher);
    config.start_year.hash(&mut hasher);
    config.end_year.hash(&mut hasher);
    config.step_hours.hash(&mut hasher);
    config.noise_sigma.to_bits().hash(&mut hasher);
    hasher.finish()
}
