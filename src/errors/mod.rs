//! Error handling utilities for the daybook application.
//!
//! This module provides the central error type `AppError` which represents all
//! possible error conditions that might occur in the application, as well as the
//! convenience type alias `AppResult` for functions that can return these errors.
//!
//! Only write-path failures travel through these types. Read-path problems
//! (a missing or corrupted entries file, a broken question table) are absorbed
//! where they happen and degrade to safe defaults.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Represents specific error cases that can occur when interacting with external editors.
///
/// This enum provides detailed, contextual error information for different failure modes
/// when launching the editor used to compose an answer. Each variant captures
/// relevant information such as the editor command and underlying IO errors.
///
/// # Examples
///
/// ```
/// use daybook::errors::EditorError;
/// use std::io::{self, ErrorKind};
///
/// let io_error = io::Error::new(ErrorKind::NotFound, "command not found");
/// let error = EditorError::CommandNotFound {
///     command: "vim".to_string(),
///     source: io_error,
/// };
///
/// assert!(format!("{}", error).contains("not found"));
/// assert!(format!("{}", error).contains("vim"));
/// ```
///
/// ```
/// use daybook::errors::EditorError;
///
/// let error = EditorError::NonZeroExit {
///     command: "vim".to_string(),
///     status_code: 1,
/// };
///
/// assert!(format!("{}", error).contains("non-zero status code"));
/// ```
#[derive(Debug, Error)]
pub enum EditorError {
    /// Error when the specified editor command cannot be found.
    #[error("Editor command '{command}' not found: {source}. Please check that the editor is installed and available in your PATH.")]
    CommandNotFound {
        /// The editor command that was not found
        command: String,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Error when permission is denied to execute the editor command.
    #[error("Permission denied when trying to execute editor '{command}': {source}. Please check file permissions or try running with appropriate access rights.")]
    PermissionDenied {
        /// The editor command that had permission denied
        command: String,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Error when the editor command fails to execute due to other I/O errors.
    #[error("Failed to execute editor '{command}': {source}. Please check system resources, disk space, or editor installation.")]
    ExecutionFailed {
        /// The editor command that failed to execute
        command: String,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Error when the editor exits with a non-zero status code.
    #[error("Editor '{command}' exited with non-zero status code: {status_code}. Your answer was not submitted.")]
    NonZeroExit {
        /// The editor command that exited with a non-zero status
        command: String,
        /// The exit status code
        status_code: i32,
    },
}

/// Represents errors that can occur when taking the entries file writer lock.
///
/// # Examples
///
/// ```
/// use daybook::errors::LockError;
/// use std::path::PathBuf;
///
/// let error = LockError::StoreBusy {
///     path: PathBuf::from("/path/to/entries.json.lock"),
/// };
///
/// assert!(format!("{}", error).contains("another daybook process"));
/// ```
#[derive(Debug, Error)]
pub enum LockError {
    /// Another process is currently writing the entries file.
    #[error("The entries file is being written by another daybook process: {path}. Please wait for it to finish and submit again.")]
    StoreBusy {
        /// The lock file that is held
        path: PathBuf,
    },

    /// Acquiring the lock failed for a technical reason.
    #[error("Failed to acquire the entries lock {path}: {source}. Please check that the data directory is accessible.")]
    AcquisitionFailed {
        /// The lock file that couldn't be taken
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },
}

/// Represents failures while persisting the entry collection.
///
/// Every variant means the submission that triggered the save is not complete:
/// the previously persisted file is still intact and the caller may retry.
///
/// # Examples
///
/// ```
/// use daybook::errors::StoreError;
/// use std::io::{self, ErrorKind};
/// use std::path::PathBuf;
///
/// let error = StoreError::Write {
///     path: PathBuf::from("/data/entries.json"),
///     source: io::Error::new(ErrorKind::Other, "disk full"),
/// };
///
/// assert!(format!("{}", error).contains("not saved"));
/// assert!(format!("{}", error).contains("disk full"));
/// ```
#[derive(Debug, Error)]
pub enum StoreError {
    /// The data directory could not be created or prepared.
    #[error("Failed to prepare data directory {path}: {source}")]
    Directory {
        /// The data directory
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// The entries could not be serialized.
    #[error("Failed to serialize entries: {0}")]
    Serialize(#[source] serde_json::Error),

    /// Writing the temporary file failed.
    #[error("Entries were not saved to {path}: {source}")]
    Write {
        /// The entries file that was being replaced
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Renaming the temporary file over the entries file failed.
    #[error("Entries were not saved: could not replace {path}: {source}")]
    Persist {
        /// The entries file that was being replaced
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },
}

/// Represents all possible errors that can occur in the daybook application.
///
/// This enum is the central error type used across the application, with variants
/// for different error categories. It uses `thiserror` for deriving the `Error` trait
/// implementation and formatted error messages.
///
/// Note: This type does not implement `Clone` to avoid losing error context when
/// cloning `std::io::Error` values.
///
/// # Examples
///
/// ```
/// use daybook::errors::AppError;
///
/// let error = AppError::Config("Missing data directory".to_string());
/// assert_eq!(format!("{}", error), "Configuration error: Missing data directory");
/// ```
#[derive(Debug, Error)]
pub enum AppError {
    /// Errors related to configuration loading or validation.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input/output errors from filesystem operations.
    ///
    /// This variant automatically converts from `std::io::Error` through the `From` trait.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Errors in journal logic (e.g., invalid date formats).
    #[error("Journal logic error: {0}")]
    Journal(String),

    /// An empty or whitespace-only answer was submitted.
    ///
    /// Raised before the store is touched.
    #[error("Answer cannot be empty")]
    EmptyAnswer,

    /// Errors when interacting with the text editor.
    #[error("Editor error: {0}")]
    Editor(#[from] EditorError),

    /// Errors related to the entries writer lock.
    #[error("File locking error: {0}")]
    Lock(#[from] LockError),

    /// Errors persisting entries.
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),
}

impl AppError {
    /// Whether this error left a submission unsaved.
    ///
    /// Front ends use this to keep the draft and offer a retry.
    pub fn is_write_failure(&self) -> bool {
        matches!(self, AppError::Store(_) | AppError::Lock(_))
    }
}

/// A type alias for `Result<T, AppError>` to simplify function signatures.
///
/// # Examples
///
/// ```
/// use daybook::errors::{AppResult, AppError};
///
/// fn might_fail() -> AppResult<String> {
///     if false {
///         return Err(AppError::Journal("Something went wrong".to_string()));
///     }
///     Ok("Operation succeeded".to_string())
/// }
/// ```
pub type AppResult<T> = Result<T, AppError>;
