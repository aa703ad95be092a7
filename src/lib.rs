/*!
# Daybook

Daybook is a daily journaling engine: each calendar day presents exactly one
question, accepts one answer, and records the result as a durable, date-keyed
entry. Answering on consecutive days builds a streak, and at local midnight the
next question unlocks.

## Architecture

- `journal_core`: pure entry logic (day keys, entries, same-day replace, the
  answer gate, streak counting and history queries)
- `journal_io`: the entries file, written atomically under a writer lock
- `questions`: month/day question lookup with a fallback prompt
- `scheduler`: the tick-driven countdown to the next local midnight
- `session`: the single owner tying the pieces together for a front end
- `ops`: the operations behind each command-line command
- `cli`, `config`, `editor`, `errors`: the command-line surface and ambient plumbing

## Usage Example

```rust,no_run
use daybook::journal_io::EntryStore;
use daybook::questions::QuestionResolver;
use daybook::scheduler::SystemClock;
use daybook::session::DailySession;
use daybook::Config;

fn main() -> daybook::AppResult<()> {
    let config = Config::load()?;
    let store = EntryStore::in_dir(&config.data_dir);
    let resolver = QuestionResolver::new(config.question_source());

    let mut session = DailySession::activate(store, resolver, SystemClock);
    println!("{}", session.question());

    session.submit("A long walk after dinner.")?;
    println!("Streak: {}", session.streak());
    Ok(())
}
```
*/

/// Command-line interface for parsing and handling user arguments
pub mod cli;
/// Configuration loading and management
pub mod config;
/// Application-wide constants
pub mod constants;
/// External editor integration for composing answers
pub mod editor;
/// Error types and utilities for error handling
pub mod errors;
/// Entry logic without I/O
pub mod journal_core;
/// Persistence of the entry collection
pub mod journal_io;
/// Operations behind each command
pub mod ops;
/// Daily question lookup
pub mod questions;
/// Countdown to the day boundary
pub mod scheduler;
/// The daily session
pub mod session;

// Re-export important types for convenience
pub use cli::CliArgs;
pub use config::Config;
pub use errors::{AppError, AppResult};
pub use journal_core::{DayKey, Entry};
pub use session::DailySession;
