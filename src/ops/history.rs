//! Listing of past entries.

use crate::constants;
use crate::errors::AppResult;
use crate::journal_core::{available_months, available_years, filter_entries, Entry, HistoryFilter};
use chrono::NaiveDate;
use std::io::Write;

fn month_name(year: i32, month: u32) -> String {
    NaiveDate::from_ymd_opt(year, month, 1)
        .map(|date| date.format("%B").to_string())
        .unwrap_or_else(|| month.to_string())
}

/// Prints the entries selected by `filter`, newest first.
///
/// Without a year the years that have entries are listed first; with a year
/// but no month, that year's months are.
pub fn show_history(
    entries: &[Entry],
    filter: HistoryFilter,
    out: &mut impl Write,
) -> AppResult<()> {
    match filter.year {
        None => {
            let years = available_years(entries);
            if !years.is_empty() {
                let years: Vec<String> = years.iter().map(|y| y.to_string()).collect();
                writeln!(out, "Years: {}", years.join(", "))?;
                writeln!(out)?;
            }
        }
        Some(year) if filter.month.is_none() => {
            let months = available_months(entries, year);
            if !months.is_empty() {
                let months: Vec<String> = months.iter().map(|&m| month_name(year, m)).collect();
                writeln!(out, "Months in {}: {}", year, months.join(", "))?;
                writeln!(out)?;
            }
        }
        Some(_) => {}
    }

    let selected = filter_entries(entries, filter);
    if selected.is_empty() {
        writeln!(out, "No entries found.")?;
        return Ok(());
    }

    for entry in selected {
        writeln!(
            out,
            "{}",
            entry.day.date().format(constants::HISTORY_DATE_FORMAT)
        )?;
        writeln!(out, "  Q: {}", entry.question)?;
        writeln!(out, "  A: {}", entry.answer)?;
        writeln!(out)?;
    }
    Ok(())
}
