//! Configuration management for the daybook application.
//!
//! This module handles loading and validating configuration settings from environment
//! variables, with sensible defaults. It supports configuring the data directory,
//! the editor used to compose answers, and an alternative question table.
//!
//! # Environment Variables
//!
//! - `DAYBOOK_DIR`: Path to the data directory (defaults to ~/Documents/daybook)
//! - `DAYBOOK_EDITOR`: Editor to use for composing answers
//! - `EDITOR`: Fallback editor if DAYBOOK_EDITOR is not set (defaults to "vim")
//! - `DAYBOOK_QUESTIONS`: Optional path to a `{"dd-MM": "prompt"}` JSON file
//! - `HOME`: Used for expanding the default data directory path

use crate::constants;
use crate::errors::{AppError, AppResult};
use crate::questions::QuestionSource;
use std::env;
use std::fmt;
use std::path::PathBuf;

/// Configuration for the daybook application.
///
/// # Examples
///
/// Creating a configuration manually:
/// ```
/// use daybook::Config;
/// use std::path::PathBuf;
///
/// let config = Config {
///     editor: "nano".to_string(),
///     data_dir: PathBuf::from("/path/to/daybook"),
///     questions_path: None,
/// };
/// assert!(config.validate().is_ok());
/// ```
///
/// Loading configuration from environment variables:
/// ```no_run
/// use daybook::Config;
/// use std::env;
///
/// env::set_var("DAYBOOK_EDITOR", "code");
/// env::set_var("DAYBOOK_DIR", "/custom/daybook/path");
///
/// let config = Config::load().expect("Failed to load configuration");
/// assert_eq!(config.editor, "code");
/// ```
pub struct Config {
    /// Editor command used to compose answers.
    ///
    /// Loaded from `DAYBOOK_EDITOR`, then `EDITOR`, then defaults to "vim".
    pub editor: String,

    /// Directory holding the entries file.
    pub data_dir: PathBuf,

    /// Alternative question table. `None` uses the bundled table.
    pub questions_path: Option<PathBuf>,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("editor", &constants::REDACTED_PLACEHOLDER)
            .field("data_dir", &constants::REDACTED_PLACEHOLDER)
            .field(
                "questions_path",
                &self
                    .questions_path
                    .as_ref()
                    .map(|_| constants::REDACTED_PLACEHOLDER),
            )
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            editor: constants::DEFAULT_EDITOR_COMMAND.to_string(),
            data_dir: PathBuf::from(""),
            questions_path: None,
        }
    }
}

impl Config {
    /// Validates an editor command string for security.
    ///
    /// The command must be non-empty and contain no spaces or shell
    /// metacharacters. Editors that need arguments should be wrapped in a script.
    fn validate_editor_command(editor_cmd: &str) -> AppResult<&str> {
        if editor_cmd.is_empty() {
            return Err(AppError::Config(
                "Editor command cannot be empty".to_string(),
            ));
        }

        if editor_cmd.contains(' ') {
            return Err(AppError::Config(
                "Editor command cannot contain spaces. Use a wrapper script or shell alias for editors requiring arguments".to_string(),
            ));
        }

        for &ch in constants::EDITOR_FORBIDDEN_CHARS.iter() {
            if editor_cmd.contains(ch) {
                return Err(AppError::Config(format!(
                    "Editor command cannot contain shell metacharacters: '{}'. Use a wrapper script or shell alias instead",
                    ch
                )));
            }
        }

        Ok(editor_cmd)
    }

    fn expand_path(raw: &str) -> AppResult<PathBuf> {
        let expanded = shellexpand::full(raw)
            .map_err(|e| AppError::Config(format!("Failed to expand path: {}", e)))?;
        Ok(PathBuf::from(expanded.into_owned()))
    }

    /// Loads configuration from environment variables with sensible defaults.
    ///
    /// Paths are expanded with `shellexpand`, so `~` and `$VAR` references work.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if:
    /// - A path expansion fails
    /// - The editor command fails validation (empty, contains spaces or shell metacharacters)
    /// - The data directory path is empty
    pub fn load() -> AppResult<Self> {
        let editor_raw = env::var(constants::ENV_VAR_DAYBOOK_EDITOR)
            .or_else(|_| env::var(constants::ENV_VAR_EDITOR))
            .unwrap_or_else(|_| constants::DEFAULT_EDITOR_COMMAND.to_string());

        let editor = Config::validate_editor_command(&editor_raw)?;

        let data_dir_str = env::var(constants::ENV_VAR_DAYBOOK_DIR).unwrap_or_else(|_| {
            let home = env::var(constants::ENV_VAR_HOME).unwrap_or_default();
            format!("{}/{}", home, constants::DEFAULT_DATA_SUBDIR)
        });
        let data_dir = Config::expand_path(&data_dir_str)?;

        if data_dir.as_os_str().is_empty() {
            return Err(AppError::Config("Data directory path is empty".to_string()));
        }

        let questions_path = match env::var(constants::ENV_VAR_DAYBOOK_QUESTIONS) {
            Ok(raw) if !raw.trim().is_empty() => Some(Config::expand_path(&raw)?),
            _ => None,
        };

        Ok(Config {
            editor: editor.to_string(),
            data_dir,
            questions_path,
        })
    }

    /// Validates that the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` when the data directory is empty or relative,
    /// or the editor command is empty.
    pub fn validate(&self) -> AppResult<()> {
        if self.data_dir.as_os_str().is_empty() {
            return Err(AppError::Config("Data directory path is empty".to_string()));
        }

        if self.editor.is_empty() {
            return Err(AppError::Config("Editor command is empty".to_string()));
        }

        if !self.data_dir.is_absolute() {
            return Err(AppError::Config(
                "Data directory must be an absolute path".to_string(),
            ));
        }

        Ok(())
    }

    /// Where the question resolver should read its table from.
    pub fn question_source(&self) -> QuestionSource {
        match &self.questions_path {
            Some(path) => QuestionSource::File(path.clone()),
            None => QuestionSource::Bundled,
        }
    }
}
