//! Core journal functionality without I/O operations.
//!
//! This module contains the pure logic of the entry lifecycle: the structured
//! day key, the `Entry` record, the same-day replace performed on every
//! submission, and the answer gate. Streak counting and history queries live in
//! the `streak` and `history` submodules.
//!
//! Nothing here touches the filesystem or the clock. Callers pass "today" in
//! explicitly, which keeps every function deterministic and easy to test.

pub mod history;
pub mod streak;

use crate::constants;
use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use uuid::Uuid;

pub use history::{available_months, available_years, filter_entries, HistoryFilter};
pub use streak::{compute_streak, StreakTier};

/// A local calendar day with no time component.
///
/// This is the natural key of an [`Entry`]: at most one entry exists per
/// `DayKey`. Internally it is a structured year/month/day value; the
/// `dd-MM-yyyy` string form only appears at the file boundary through the
/// serde implementation.
///
/// # Examples
///
/// ```
/// use daybook::journal_core::DayKey;
///
/// let day = DayKey::from_ymd(2024, 1, 15).unwrap();
/// assert_eq!(day.to_string(), "2024-01-15");
/// assert_eq!(day.pred().unwrap(), DayKey::from_ymd(2024, 1, 14).unwrap());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DayKey(NaiveDate);

impl DayKey {
    /// Builds a day key from its parts, or `None` for an impossible date.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(DayKey)
    }

    /// The underlying calendar date.
    pub fn date(&self) -> NaiveDate {
        self.0
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// The previous calendar day.
    pub fn pred(&self) -> Option<Self> {
        self.0.checked_sub_signed(Duration::days(1)).map(DayKey)
    }

    /// The next calendar day.
    pub fn succ(&self) -> Option<Self> {
        self.0.checked_add_signed(Duration::days(1)).map(DayKey)
    }

    /// The year-less key used to look up the day's question.
    pub fn month_day(&self) -> MonthDay {
        MonthDay {
            month: self.month(),
            day: self.day(),
        }
    }

    /// Parses a user-supplied date in YYYY-MM-DD or YYYYMMDD format.
    ///
    /// # Examples
    ///
    /// ```
    /// use daybook::journal_core::DayKey;
    ///
    /// let iso = DayKey::parse_user_input("2023-01-15").unwrap();
    /// let compact = DayKey::parse_user_input("20230115").unwrap();
    /// assert_eq!(iso, compact);
    /// assert!(DayKey::parse_user_input("not-a-date").is_err());
    /// ```
    pub fn parse_user_input(input: &str) -> Result<Self, chrono::ParseError> {
        NaiveDate::parse_from_str(input, constants::DATE_FORMAT_ISO)
            .or_else(|_| NaiveDate::parse_from_str(input, constants::DATE_FORMAT_COMPACT))
            .map(DayKey)
    }

    /// The `dd-MM-yyyy` form written to the entries file.
    pub fn to_storage_string(&self) -> String {
        self.0.format(constants::DAY_KEY_FORMAT).to_string()
    }

    /// Parses the `dd-MM-yyyy` form written to the entries file.
    pub fn parse_storage_string(input: &str) -> Result<Self, chrono::ParseError> {
        NaiveDate::parse_from_str(input, constants::DAY_KEY_FORMAT).map(DayKey)
    }
}

impl From<NaiveDate> for DayKey {
    fn from(date: NaiveDate) -> Self {
        DayKey(date)
    }
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(constants::DATE_FORMAT_ISO))
    }
}

impl Serialize for DayKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_storage_string())
    }
}

impl<'de> Deserialize<'de> for DayKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DayKey::parse_storage_string(&raw).map_err(|e| {
            serde::de::Error::custom(format!("invalid day key '{}': {}", raw, e))
        })
    }
}

/// A year-less month/day pair, the key of the question table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MonthDay {
    pub month: u32,
    pub day: u32,
}

impl MonthDay {
    /// Parses a `dd-MM` key. Any day that exists in a leap year is accepted.
    ///
    /// # Examples
    ///
    /// ```
    /// use daybook::journal_core::MonthDay;
    ///
    /// let key = MonthDay::parse_key("29-02").unwrap();
    /// assert_eq!((key.month, key.day), (2, 29));
    /// assert!(MonthDay::parse_key("31-04").is_none());
    /// ```
    pub fn parse_key(key: &str) -> Option<Self> {
        let (day, month) = key.split_once('-')?;
        if day.len() != 2 || month.len() != 2 {
            return None;
        }
        let day: u32 = day.parse().ok()?;
        let month: u32 = month.parse().ok()?;
        // 2000 is a leap year, so 29-02 validates
        NaiveDate::from_ymd_opt(2000, month, day)?;
        Some(MonthDay { month, day })
    }
}

impl fmt::Display for MonthDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}-{:02}", self.day, self.month)
    }
}

/// One day's question and answer.
///
/// `question` is captured when the entry is created and never re-resolved.
/// An entry whose `answer` is empty is stored like any other but does not
/// count as answered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub id: Uuid,
    pub day: DayKey,
    pub question: String,
    pub answer: String,
}

impl Entry {
    /// Creates a new entry with a fresh identifier.
    pub fn new(day: DayKey, question: impl Into<String>, answer: impl Into<String>) -> Self {
        Entry {
            id: Uuid::new_v4(),
            day,
            question: question.into(),
            answer: answer.into(),
        }
    }

    /// Whether this entry counts toward the gate and the streak.
    pub fn is_answered(&self) -> bool {
        !self.answer.is_empty()
    }
}

/// Replaces the entry for `day` with a new one built from `question` and `answer`.
///
/// Every existing entry for `day` is removed before the new entry is appended,
/// so the returned collection holds exactly one entry for that day. The caller
/// persists the result with [`EntryStore::save`](crate::journal_io::EntryStore::save).
///
/// # Examples
///
/// ```
/// use daybook::journal_core::{upsert_for_today, DayKey};
///
/// let today = DayKey::from_ymd(2024, 1, 15).unwrap();
/// let entries = upsert_for_today(Vec::new(), today, "Q?", "first");
/// let entries = upsert_for_today(entries, today, "Q?", "second");
///
/// assert_eq!(entries.len(), 1);
/// assert_eq!(entries[0].answer, "second");
/// ```
pub fn upsert_for_today(
    mut entries: Vec<Entry>,
    day: DayKey,
    question: &str,
    answer: &str,
) -> Vec<Entry> {
    entries.retain(|entry| entry.day != day);
    entries.push(Entry::new(day, question, answer));
    entries
}

/// True iff `entries` holds an answered entry for `today`.
pub fn has_answered_today(entries: &[Entry], today: DayKey) -> bool {
    entries
        .iter()
        .any(|entry| entry.day == today && entry.is_answered())
}
