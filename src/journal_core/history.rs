//! Year and month queries over past entries.
//!
//! These back the history listing: which years and months have entries, and
//! the entries matching a selection, newest first.

use super::Entry;

/// Selection applied by [`filter_entries`]. `None` matches everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HistoryFilter {
    pub year: Option<i32>,
    pub month: Option<u32>,
}

/// Distinct years that have at least one entry, ascending.
pub fn available_years(entries: &[Entry]) -> Vec<i32> {
    let mut years: Vec<i32> = entries.iter().map(|entry| entry.day.year()).collect();
    years.sort_unstable();
    years.dedup();
    years
}

/// Distinct months of `year` that have at least one entry, ascending.
pub fn available_months(entries: &[Entry], year: i32) -> Vec<u32> {
    let mut months: Vec<u32> = entries
        .iter()
        .filter(|entry| entry.day.year() == year)
        .map(|entry| entry.day.month())
        .collect();
    months.sort_unstable();
    months.dedup();
    months
}

/// Entries matching `filter`, newest day first.
///
/// # Examples
///
/// ```
/// use daybook::journal_core::{filter_entries, DayKey, Entry, HistoryFilter};
///
/// let entries = vec![
///     Entry::new(DayKey::from_ymd(2023, 5, 1).unwrap(), "Q", "a"),
///     Entry::new(DayKey::from_ymd(2024, 5, 2).unwrap(), "Q", "b"),
///     Entry::new(DayKey::from_ymd(2024, 6, 3).unwrap(), "Q", "c"),
/// ];
///
/// let filter = HistoryFilter { year: Some(2024), month: None };
/// let found = filter_entries(&entries, filter);
/// assert_eq!(found.len(), 2);
/// assert_eq!(found[0].answer, "c");
/// ```
pub fn filter_entries(entries: &[Entry], filter: HistoryFilter) -> Vec<&Entry> {
    let mut matching: Vec<&Entry> = entries
        .iter()
        .filter(|entry| filter.year.map_or(true, |year| entry.day.year() == year))
        .filter(|entry| filter.month.map_or(true, |month| entry.day.month() == month))
        .collect();
    matching.sort_by(|a, b| b.day.cmp(&a.day));
    matching
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::journal_core::DayKey;

    fn entry(y: i32, m: u32, d: u32) -> Entry {
        Entry::new(DayKey::from_ymd(y, m, d).unwrap(), "Q", format!("{}-{}-{}", y, m, d))
    }

    fn sample() -> Vec<Entry> {
        vec![
            entry(2024, 3, 10),
            entry(2023, 11, 2),
            entry(2024, 1, 5),
            entry(2024, 3, 1),
            entry(2022, 11, 30),
        ]
    }

    #[test]
    fn test_available_years_sorted_distinct() {
        assert_eq!(available_years(&sample()), vec![2022, 2023, 2024]);
        assert!(available_years(&[]).is_empty());
    }

    #[test]
    fn test_available_months_for_year() {
        assert_eq!(available_months(&sample(), 2024), vec![1, 3]);
        assert_eq!(available_months(&sample(), 2023), vec![11]);
        assert!(available_months(&sample(), 2019).is_empty());
    }

    #[test]
    fn test_filter_without_selection_returns_all_newest_first() {
        let entries = sample();
        let found = filter_entries(&entries, HistoryFilter::default());
        let days: Vec<String> = found.iter().map(|e| e.day.to_string()).collect();
        assert_eq!(
            days,
            vec!["2024-03-10", "2024-03-01", "2024-01-05", "2023-11-02", "2022-11-30"]
        );
    }

    #[test]
    fn test_filter_by_year_and_month() {
        let entries = sample();
        let found = filter_entries(
            &entries,
            HistoryFilter {
                year: Some(2024),
                month: Some(3),
            },
        );
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].answer, "2024-3-10");
        assert_eq!(found[1].answer, "2024-3-1");
    }

    #[test]
    fn test_filter_by_month_alone_spans_years() {
        let entries = sample();
        let found = filter_entries(
            &entries,
            HistoryFilter {
                year: None,
                month: Some(11),
            },
        );
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].day.year(), 2023);
    }
}
