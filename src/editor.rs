//! Editor abstraction for composing answers.
//!
//! This module provides an abstraction for opening a scratch file in an external
//! editor, allowing the application to work with different editors and to be
//! testable by substituting a scripted editor.

use crate::constants;
use crate::errors::{AppError, AppResult, EditorError};
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::process::Command;
use tracing::debug;

/// Trait defining the interface for an editor component.
///
/// # Examples
///
/// ```
/// use daybook::editor::Editor;
/// use daybook::errors::AppResult;
/// use std::path::Path;
///
/// struct AppendingEditor;
///
/// impl Editor for AppendingEditor {
///     fn open_file(&self, path: &Path) -> AppResult<()> {
///         let mut text = std::fs::read_to_string(path)?;
///         text.push_str("A quiet walk.\n");
///         std::fs::write(path, text)?;
///         Ok(())
///     }
/// }
///
/// let answer = daybook::editor::compose_answer(&AppendingEditor, "What made you smile?").unwrap();
/// assert_eq!(answer, "A quiet walk.");
/// ```
pub trait Editor {
    /// Opens `path` and returns once the user is done editing it.
    ///
    /// # Errors
    ///
    /// Implementations return `AppError::Editor` when the editor cannot be
    /// launched or reports failure.
    fn open_file(&self, path: &Path) -> AppResult<()>;
}

/// An [`Editor`] that runs an external command with the file path as its only argument.
///
/// ```no_run
/// use daybook::editor::{Editor, SystemEditor};
/// use std::path::Path;
///
/// let editor = SystemEditor {
///     editor_cmd: "vim".to_string(),
/// };
/// editor.open_file(Path::new("/tmp/answer.txt"))?;
/// # Ok::<(), daybook::AppError>(())
/// ```
pub struct SystemEditor {
    /// The command to run (e.g., "vim", "nano"). Validated by `Config`.
    pub editor_cmd: String,
}

impl Editor for SystemEditor {
    fn open_file(&self, path: &Path) -> AppResult<()> {
        debug!("Launching editor: {} {:?}", self.editor_cmd, path);

        let status = Command::new(&self.editor_cmd).arg(path).status();

        match status {
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(AppError::Editor(EditorError::CommandNotFound {
                    command: self.editor_cmd.clone(),
                    source: e,
                }))
            }
            Err(e) if e.kind() == io::ErrorKind::PermissionDenied => {
                Err(AppError::Editor(EditorError::PermissionDenied {
                    command: self.editor_cmd.clone(),
                    source: e,
                }))
            }
            Err(e) => Err(AppError::Editor(EditorError::ExecutionFailed {
                command: self.editor_cmd.clone(),
                source: e,
            })),
            Ok(status) if !status.success() => Err(AppError::Editor(EditorError::NonZeroExit {
                command: self.editor_cmd.clone(),
                status_code: status.code().unwrap_or(-1),
            })),
            Ok(_) => Ok(()),
        }
    }
}

/// Lets the user write an answer to `question` in `editor`.
///
/// The question is shown as a comment at the top of a temporary scratch file.
/// Comment lines are dropped from the result and the rest is trimmed. The
/// scratch file is removed when this returns.
///
/// # Errors
///
/// Returns `AppError::Io` if the scratch file cannot be created or read, and
/// whatever the editor returns if editing fails.
pub fn compose_answer(editor: &dyn Editor, question: &str) -> AppResult<String> {
    let mut scratch = tempfile::Builder::new()
        .prefix("daybook-answer-")
        .suffix(".txt")
        .tempfile()?;

    write!(
        scratch,
        "\n{prefix} {question}\n{prefix} Lines starting with '{prefix}' are ignored.\n",
        prefix = constants::EDITOR_COMMENT_PREFIX,
        question = question
    )?;
    scratch.as_file().sync_all()?;

    editor.open_file(scratch.path())?;

    // Editors may replace the file rather than write into it, so read by path
    let written = fs::read_to_string(scratch.path())?;
    Ok(strip_comments(&written))
}

/// Removes comment lines and surrounding whitespace from editor output.
pub fn strip_comments(text: &str) -> String {
    text.lines()
        .filter(|line| !line.trim_start().starts_with(constants::EDITOR_COMMENT_PREFIX))
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}
