//! Consecutive-day streak counting.

use super::{DayKey, Entry};
use std::collections::HashSet;

/// Counts consecutive answered days ending at the anchor day.
///
/// The anchor is `today` when `answered_today` is true and the day before
/// otherwise, so an unanswered today neither breaks nor extends yesterday's
/// run. Starting at the anchor the walk goes backward one day at a time and
/// stops at the first day without an answered entry. Entries are matched by
/// day key only; their order in `entries` is irrelevant.
///
/// # Examples
///
/// ```
/// use daybook::journal_core::{compute_streak, DayKey, Entry};
///
/// let today = DayKey::from_ymd(2024, 1, 15).unwrap();
/// let entries = vec![
///     Entry::new(today, "Q", "a"),
///     Entry::new(today.pred().unwrap(), "Q", "b"),
///     Entry::new(today.pred().unwrap().pred().unwrap(), "Q", "c"),
/// ];
///
/// assert_eq!(compute_streak(&entries, today, true), 3);
/// assert_eq!(compute_streak(&entries, today, false), 2);
/// ```
pub fn compute_streak(entries: &[Entry], today: DayKey, answered_today: bool) -> u32 {
    let answered: HashSet<DayKey> = entries
        .iter()
        .filter(|entry| entry.is_answered())
        .map(|entry| entry.day)
        .collect();

    if answered.is_empty() {
        return 0;
    }

    let anchor = if answered_today {
        Some(today)
    } else {
        today.pred()
    };

    let mut streak = 0;
    let mut cursor = anchor;
    while let Some(day) = cursor {
        if !answered.contains(&day) {
            break;
        }
        streak += 1;
        cursor = day.pred();
    }
    streak
}

/// Display tier for a streak length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreakTier {
    /// No current streak.
    Cold,
    /// One to three days.
    Kindling,
    /// Four to six days.
    Blazing,
    /// A week or more.
    Legendary,
}

impl StreakTier {
    pub fn for_count(count: u32) -> Self {
        match count {
            0 => StreakTier::Cold,
            1..=3 => StreakTier::Kindling,
            4..=6 => StreakTier::Blazing,
            _ => StreakTier::Legendary,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            StreakTier::Cold => "😞",
            StreakTier::Kindling => "🔥",
            StreakTier::Blazing => "🎉",
            StreakTier::Legendary => "🏆",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StreakTier::Cold => "cold",
            StreakTier::Kindling => "kindling",
            StreakTier::Blazing => "blazing",
            StreakTier::Legendary => "legendary",
        }
    }
}
