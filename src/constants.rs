//! Constants used throughout the application.
//!
//! This module contains all constants used in the daybook application, organized
//! into logical groups. Having constants centralized makes them easier to find,
//! modify, and reference consistently.

// Application Metadata
/// The name of the application.
pub const APP_NAME: &str = "daybook";
/// The description of the application used in CLI help text.
pub const APP_DESCRIPTION: &str = "One question a day, one answer, and a streak to keep";

// CLI Arguments & Defaults
/// Default command for the editor if not specified otherwise.
pub const DEFAULT_EDITOR_COMMAND: &str = "vim";
/// Log format identifier for plain text.
pub const LOG_FORMAT_TEXT: &str = "text";
/// Log format identifier for JSON.
pub const LOG_FORMAT_JSON: &str = "json";
/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";
/// Log level used when `--verbose` is passed.
pub const VERBOSE_LOG_LEVEL: &str = "debug";

// Configuration Keys & Environment Variables
/// Environment variable for specifying the data directory.
pub const ENV_VAR_DAYBOOK_DIR: &str = "DAYBOOK_DIR";
/// Environment variable for specifying the preferred editor.
pub const ENV_VAR_DAYBOOK_EDITOR: &str = "DAYBOOK_EDITOR";
/// Environment variable pointing at an alternative question table.
pub const ENV_VAR_DAYBOOK_QUESTIONS: &str = "DAYBOOK_QUESTIONS";
/// Standard environment variable for specifying the default editor.
pub const ENV_VAR_EDITOR: &str = "EDITOR";
/// Standard environment variable for the user's home directory.
pub const ENV_VAR_HOME: &str = "HOME";
/// Default sub-directory for daybook data within the user's home directory.
pub const DEFAULT_DATA_SUBDIR: &str = "Documents/daybook";

// Validation
/// Characters forbidden in editor commands for security reasons.
pub const EDITOR_FORBIDDEN_CHARS: &[char] =
    &['|', '&', ';', '$', '(', ')', '`', '\\', '<', '>', '\'', '"'];
/// Placeholder string for redacted information in debug output.
pub const REDACTED_PLACEHOLDER: &str = "[REDACTED]";

// File System Parameters
/// Name of the file holding every entry.
pub const ENTRIES_FILE_NAME: &str = "entries.json";
/// Suffix appended to the entries file name for the writer lock.
pub const LOCK_FILE_SUFFIX: &str = ".lock";
/// Default POSIX permissions for newly created directories (owner read/write/execute).
#[cfg(unix)]
pub const DEFAULT_DIR_PERMISSIONS: u32 = 0o700;
/// Default POSIX permissions for newly created files (owner read/write).
#[cfg(unix)]
pub const DEFAULT_FILE_PERMISSIONS: u32 = 0o600;
/// Prefix marking comment lines in the editor scratch file.
pub const EDITOR_COMMENT_PREFIX: &str = "#";

// Date/Time Logic
/// Date format string for ISO date format (YYYY-MM-DD).
pub const DATE_FORMAT_ISO: &str = "%Y-%m-%d";
/// Date format string for compact date format (YYYYMMDD).
pub const DATE_FORMAT_COMPACT: &str = "%Y%m%d";
/// Format of the day key as written to the entries file.
pub const DAY_KEY_FORMAT: &str = "%d-%m-%Y";
/// Format of the month-day key used by the question table.
pub const MONTH_DAY_KEY_FORMAT: &str = "%d-%m";
/// Date format used when listing entries.
pub const HISTORY_DATE_FORMAT: &str = "%B %d, %Y: %A";
/// Interval between countdown ticks, in seconds.
pub const TICK_INTERVAL_SECS: i64 = 1;

// Questions
/// Prompt returned whenever the question table has nothing for a day.
pub const FALLBACK_QUESTION: &str = "What's on your mind today?";

// Logging Configuration
/// Service name used in tracing spans and structured logs.
pub const TRACING_SERVICE_NAME: &str = "daybook";
/// Name for the root tracing span covering an application invocation.
pub const TRACING_ROOT_SPAN_NAME: &str = "app_invocation";
