/*!
# Daybook - One Question a Day

Daybook asks one question per calendar day, records one answer for it, and keeps
a streak of consecutive answered days. At midnight the next question unlocks.

This file contains the main application flow: logging setup, configuration,
and dispatch to the operation behind each command.

## Usage

```text
daybook [OPTIONS] [COMMAND]

Commands:
  today      Shows today's question, whether it is answered, and the streak (default)
  answer     Answers today's question, replacing any earlier answer from today
  question   Shows the question for a date
  history    Lists past entries, newest first
  countdown  Counts down to midnight, then shows the new question

Options:
  -v, --verbose              Print verbose output
      --log-format <FORMAT>  Log output format [default: text] [possible values: text, json]
```

## Configuration

- `DAYBOOK_EDITOR` or `EDITOR`: editor used by `daybook answer` without text (defaults to "vim")
- `DAYBOOK_DIR`: data directory (defaults to "~/Documents/daybook")
- `DAYBOOK_QUESTIONS`: optional alternative question table
- `RUST_LOG`: overrides the log filter
*/

use clap::Parser;
use daybook::cli::{CliArgs, Command};
use daybook::config::Config;
use daybook::constants;
use daybook::editor::SystemEditor;
use daybook::errors::{AppError, AppResult};
use daybook::journal_io::{self, EntryStore};
use daybook::ops;
use daybook::questions::QuestionResolver;
use daybook::scheduler::{Clock, SystemClock};
use daybook::session::DailySession;
use std::io;
use std::process;
use tracing::{debug, error, info, info_span};
use tracing_subscriber::fmt::time::ChronoLocal;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};
use uuid::Uuid;

fn main() {
    let args = CliArgs::parse();

    if let Err(e) = init_tracing(args.verbose, &args.log_format) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }

    let correlation_id = Uuid::new_v4();
    let root_span = info_span!(
        constants::TRACING_ROOT_SPAN_NAME,
        service_name = constants::TRACING_SERVICE_NAME,
        correlation_id = %correlation_id
    );
    let _guard = root_span.enter();

    if let Err(e) = run(args) {
        error!("Application error: {}", e);
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Installs the global subscriber writing to stderr.
///
/// `RUST_LOG` wins over the level chosen by `--verbose`.
fn init_tracing(verbose: bool, log_format: &str) -> AppResult<()> {
    let default_level = if verbose {
        constants::VERBOSE_LOG_LEVEL
    } else {
        constants::DEFAULT_LOG_LEVEL
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let registry = tracing_subscriber::registry().with(filter);
    let result = if log_format == constants::LOG_FORMAT_JSON {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_timer(ChronoLocal::rfc_3339())
                    .with_current_span(true)
                    .with_writer(io::stderr),
            )
            .try_init()
    } else {
        registry
            .with(
                fmt::layer()
                    .with_timer(ChronoLocal::rfc_3339())
                    .with_writer(io::stderr),
            )
            .try_init()
    };

    result.map_err(|e| AppError::Config(format!("Failed to initialize logging: {}", e)))
}

fn run(args: CliArgs) -> AppResult<()> {
    info!("Starting {}", constants::APP_NAME);
    debug!("CLI arguments: {:?}", args);

    let config = Config::load()?;
    config.validate()?;
    debug!("Configuration: {:?}", config);

    journal_io::ensure_data_directory_exists(&config.data_dir)?;

    let store = EntryStore::in_dir(&config.data_dir);
    let resolver = QuestionResolver::new(config.question_source());
    let clock = SystemClock;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let command = args.command();
    match &command {
        Command::Question { .. } => {
            let day = match command.parse_date() {
                Some(parsed) => parsed
                    .map_err(|e| AppError::Journal(format!("Invalid date format: {}", e)))?,
                None => clock.today(),
            };
            ops::show_question(&resolver, day, &mut out)
        }
        Command::History { .. } => {
            ops::show_history(&store.load(), command.history_filter(), &mut out)
        }
        Command::Today => {
            let session = DailySession::activate(store, resolver, clock);
            ops::show_today(&session, &mut out)
        }
        Command::Answer { text } => {
            let mut session = DailySession::activate(store, resolver, clock);
            let editor = SystemEditor {
                editor_cmd: config.editor.clone(),
            };
            ops::submit_answer(&mut session, text.as_deref(), &editor, &mut out)
        }
        Command::Countdown => {
            let mut session = DailySession::activate(store, resolver, clock);
            ops::run_countdown(&mut session, &mut out)
        }
    }
}
