//! Interactive country picker.
//!
//! This is intentionally kept separate from clap parsing:
//! - clap handles structured flags/subcommands
//! - the picker provides the "run `wx plot` and choose a country" UX

use std::io::{self, BufRead, Write};

use crate::domain::CountryNames;
use crate::error::AppError;
use crate::io::ingest::resolve_column;

/// Prompt the user to pick one of `columns` from stdin.
///
/// Accepts a number from the list or a country code; `q` cancels.
pub fn prompt_for_country(columns: &[String], names: &CountryNames) -> Result<String, AppError> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    pick_country(columns, names, &mut stdin.lock(), &mut stdout.lock())
}

/// Picker loop over arbitrary input/output streams.
pub fn pick_country<R: BufRead, W: Write>(
    columns: &[String],
    names: &CountryNames,
    input: &mut R,
    output: &mut W,
) -> Result<String, AppError> {
    if columns.is_empty() {
        return Err(AppError::new(2, "No country temperature columns available."));
    }

    let write_err = |e: io::Error| AppError::new(2, format!("Failed to write prompt: {e}"));

    writeln!(output, "Available countries:").map_err(write_err)?;
    for (idx, column) in columns.iter().enumerate() {
        writeln!(output, "{:>3}) {}", idx + 1, names.display_name(column)).map_err(write_err)?;
    }

    loop {
        write!(
            output,
            "Select a country by number (1-{}) or code (q to quit): ",
            columns.len()
        )
        .map_err(write_err)?;
        output.flush().map_err(write_err)?;

        let mut line = String::new();
        let bytes = input
            .read_line(&mut line)
            .map_err(|e| AppError::new(2, format!("Failed to read input: {e}")))?;

        if bytes == 0 {
            return Err(AppError::new(
                2,
                "No input received. Pass the country with `-c <CODE>`.",
            ));
        }

        let choice = line.trim();
        if choice.eq_ignore_ascii_case("q") {
            return Err(AppError::new(2, "Canceled."));
        }

        if let Ok(n) = choice.parse::<usize>() {
            if (1..=columns.len()).contains(&n) {
                return Ok(columns[n - 1].clone());
            }
            writeln!(output, "Invalid choice: {n}. Enter a number between 1 and {}.", columns.len())
                .map_err(write_err)?;
            continue;
        }

        match resolve_column(columns, choice) {
            Ok(column) => return Ok(column),
            Err(err) => writeln!(output, "{err}").map_err(write_err)?,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns() -> Vec<String> {
        vec!["AT_temperature".to_string(), "DE_temperature".to_string()]
    }

    fn run(input: &str) -> (Result<String, AppError>, String) {
        let mut out = Vec::new();
        let result = pick_country(&columns(), &CountryNames::default(), &mut input.as_bytes(), &mut out);
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn picks_by_number_after_invalid_attempts() {
        let (result, out) = run("7\nxx\n2\n");
        assert_eq!(result.unwrap(), "DE_temperature");
        assert!(out.contains("  1) Austria Temperature"));
        assert!(out.contains("Invalid choice: 7"));
        assert!(out.contains("Unknown country 'xx'"));
    }

    #[test]
    fn picks_by_code() {
        assert_eq!(run("at\n").0.unwrap(), "AT_temperature");
    }

    #[test]
    fn eof_and_quit_cancel() {
        assert!(run("").0.is_err());
        assert_eq!(run("q\n").0.unwrap_err().to_string(), "Canceled.");
    }
}
