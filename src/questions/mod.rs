//! Daily question lookup.
//!
//! Questions are keyed by month and day only, so the same prompt comes back
//! every year on the same date. The table is loaded lazily, at most once per
//! resolver, from one of three sources: the table bundled into the binary, a
//! JSON file on disk, or a JSON string held in memory.
//!
//! Resolution is total. Whatever goes wrong while loading (missing file, bad
//! JSON, unparseable keys) is logged and the resolver falls back to a fixed
//! prompt instead of surfacing an error.

use crate::constants;
use crate::journal_core::{DayKey, MonthDay};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::OnceLock;
use tracing::{debug, warn};

const BUNDLED_QUESTIONS: &str = include_str!("../../resources/questions.json");

/// Where a [`QuestionResolver`] reads its table from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionSource {
    /// The table compiled into the binary.
    Bundled,
    /// A JSON file on disk.
    File(PathBuf),
    /// A JSON document held in memory.
    Json(String),
}

/// A parsed question table.
#[derive(Debug, Clone, Default)]
pub struct QuestionTable {
    prompts: HashMap<MonthDay, String>,
}

impl QuestionTable {
    /// Parses a `{"dd-MM": "prompt", ...}` document.
    ///
    /// Keys that are not a real month/day are skipped with a warning. Only a
    /// document that is not a string-to-string object is an error.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        let raw_table: HashMap<String, String> = serde_json::from_str(raw)?;

        let mut prompts = HashMap::with_capacity(raw_table.len());
        for (key, prompt) in raw_table {
            match MonthDay::parse_key(&key) {
                Some(month_day) => {
                    prompts.insert(month_day, prompt);
                }
                None => warn!("Ignoring question with invalid day key '{}'", key),
            }
        }

        Ok(QuestionTable { prompts })
    }

    pub fn get(&self, key: MonthDay) -> Option<&str> {
        self.prompts.get(&key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.prompts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prompts.is_empty()
    }
}

/// Maps calendar days to prompt text.
///
/// # Examples
///
/// ```
/// use daybook::journal_core::DayKey;
/// use daybook::questions::{QuestionResolver, QuestionSource};
///
/// let resolver = QuestionResolver::new(QuestionSource::Json(
///     r#"{"15-01": "What made you smile?"}"#.to_string(),
/// ));
///
/// let day = DayKey::from_ymd(2024, 1, 15).unwrap();
/// assert_eq!(resolver.resolve_question(day), "What made you smile?");
///
/// let other = DayKey::from_ymd(2024, 1, 16).unwrap();
/// assert_eq!(resolver.resolve_question(other), "What's on your mind today?");
/// ```
#[derive(Debug)]
pub struct QuestionResolver {
    source: QuestionSource,
    table: OnceLock<QuestionTable>,
}

impl QuestionResolver {
    /// Creates a resolver. Nothing is read until the first lookup.
    pub fn new(source: QuestionSource) -> Self {
        QuestionResolver {
            source,
            table: OnceLock::new(),
        }
    }

    /// A resolver over the bundled table.
    pub fn bundled() -> Self {
        Self::new(QuestionSource::Bundled)
    }

    pub fn source(&self) -> &QuestionSource {
        &self.source
    }

    /// Whether the table has been loaded yet.
    pub fn is_loaded(&self) -> bool {
        self.table.get().is_some()
    }

    /// The prompt for `day`, or the fallback prompt when the table has none.
    pub fn resolve_question(&self, day: DayKey) -> &str {
        debug!(
            key = %day.date().format(constants::MONTH_DAY_KEY_FORMAT),
            "Resolving question"
        );
        self.table()
            .get(day.month_day())
            .unwrap_or(constants::FALLBACK_QUESTION)
    }

    fn table(&self) -> &QuestionTable {
        self.table.get_or_init(|| self.load())
    }

    fn load(&self) -> QuestionTable {
        let parsed = match &self.source {
            QuestionSource::Bundled => QuestionTable::from_json(BUNDLED_QUESTIONS),
            QuestionSource::Json(raw) => QuestionTable::from_json(raw),
            QuestionSource::File(path) => match fs::read_to_string(path) {
                Ok(raw) => QuestionTable::from_json(&raw),
                Err(e) => {
                    warn!(
                        "Question table {:?} is unavailable, using fallback prompt: {}",
                        path, e
                    );
                    return QuestionTable::default();
                }
            },
        };

        match parsed {
            Ok(table) => {
                debug!("Loaded {} questions", table.len());
                table
            }
            Err(e) => {
                warn!("Question table is malformed, using fallback prompt: {}", e);
                QuestionTable::default()
            }
        }
    }
}

impl Default for QuestionResolver {
    fn default() -> Self {
        Self::bundled()
    }
}
