use crate::constants;
use crate::journal_core::{DayKey, HistoryFilter};
use clap::{Parser, Subcommand};

/// One question a day, one answer, and a streak to keep
#[derive(Parser, Debug)]
#[clap(name = constants::APP_NAME, about = constants::APP_DESCRIPTION)]
#[clap(author, version, long_about = None)]
pub struct CliArgs {
    /// Print verbose output
    #[clap(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Log output format
    #[clap(
        long,
        value_name = "FORMAT",
        default_value = constants::LOG_FORMAT_TEXT,
        value_parser = [constants::LOG_FORMAT_TEXT, constants::LOG_FORMAT_JSON],
        global = true
    )]
    pub log_format: String,

    #[clap(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Shows today's question, whether it is answered, and the streak (default)
    Today,

    /// Answers today's question, replacing any earlier answer from today
    Answer {
        /// The answer. Opens the editor when omitted
        text: Option<String>,
    },

    /// Shows the question for a date
    Question {
        /// Date to look up (format: YYYY-MM-DD or YYYYMMDD). Defaults to today
        #[clap(short = 'd', long)]
        date: Option<String>,
    },

    /// Lists past entries, newest first
    History {
        /// Only entries from this year
        #[clap(short = 'y', long)]
        year: Option<i32>,

        /// Only entries from this month (1-12); needs --year
        #[clap(short = 'm', long, requires = "year", value_parser = clap::value_parser!(u32).range(1..=12))]
        month: Option<u32>,
    },

    /// Counts down to midnight, then shows the new question
    Countdown,
}

impl CliArgs {
    /// The command to run; `today` when none was given.
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Today)
    }
}

impl Command {
    /// Parses the `question --date` value, if any.
    pub fn parse_date(&self) -> Option<Result<DayKey, chrono::ParseError>> {
        match self {
            Command::Question { date: Some(date) } => Some(DayKey::parse_user_input(date)),
            _ => None,
        }
    }

    /// The `history` selection. Other commands select everything.
    pub fn history_filter(&self) -> HistoryFilter {
        match self {
            Command::History { year, month } => HistoryFilter {
                year: *year,
                month: *month,
            },
            _ => HistoryFilter::default(),
        }
    }
}
