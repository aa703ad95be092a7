//! Durable storage of the entry collection.
//!
//! This module owns every filesystem interaction with the entries file: the
//! tolerant read path, the atomic replace on write, the data directory and its
//! permissions, and the advisory writer lock.
//!
//! The read path never fails. A missing, empty, unreadable or malformed file
//! reads as an empty history so that journaling is never blocked. The write
//! path always reports failure, and a failed write leaves the previous file
//! untouched.

use crate::constants;
use crate::errors::{AppError, AppResult, LockError, StoreError};
use crate::journal_core::Entry;
use fs2::FileExt;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

/// Ensures the data directory exists, creating it if necessary.
///
/// # Errors
///
/// Returns:
/// - `AppError::Journal` if the provided path is not an absolute path
/// - `AppError::Io` if the directory creation fails due to permission issues,
///   invalid paths, or other filesystem errors
pub fn ensure_data_directory_exists(data_dir: &Path) -> AppResult<()> {
    // Validate that the path is absolute as a defense-in-depth measure
    if !data_dir.is_absolute() {
        return Err(AppError::Journal(format!(
            "Data directory path must be absolute: {}",
            data_dir.display()
        )));
    }

    create_private_dir(data_dir).map_err(|e| {
        AppError::Io(io::Error::new(
            e.kind(),
            format!("Failed to create data directory: {}", e),
        ))
    })
}

/// Creates `dir` (and parents) with owner-only permissions if it is missing.
fn create_private_dir(dir: &Path) -> io::Result<()> {
    if dir.exists() {
        return Ok(());
    }

    fs::create_dir_all(dir)?;

    #[cfg(unix)]
    {
        let permissions = fs::Permissions::from_mode(constants::DEFAULT_DIR_PERMISSIONS);
        fs::set_permissions(dir, permissions)?;
        debug!("Set 0o700 permissions on data directory");
    }

    Ok(())
}

/// The persisted entry collection.
///
/// One `EntryStore` is constructed per process and handed to whoever needs it;
/// there is no global instance.
///
/// # Examples
///
/// ```no_run
/// use daybook::journal_core::{upsert_for_today, DayKey};
/// use daybook::journal_io::EntryStore;
/// use std::path::Path;
///
/// let store = EntryStore::in_dir(Path::new("/home/me/Documents/daybook"));
/// let today = DayKey::from_ymd(2024, 1, 15).unwrap();
///
/// let entries = upsert_for_today(store.load(), today, "What made you smile?", "The sea.");
/// store.save(&entries)?;
/// # Ok::<(), daybook::AppError>(())
/// ```
#[derive(Debug, Clone)]
pub struct EntryStore {
    path: PathBuf,
}

impl EntryStore {
    /// A store backed by the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        EntryStore { path: path.into() }
    }

    /// A store backed by the standard entries file inside `data_dir`.
    pub fn in_dir(data_dir: &Path) -> Self {
        Self::new(data_dir.join(constants::ENTRIES_FILE_NAME))
    }

    /// Path of the entries file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_os_string();
        name.push(constants::LOCK_FILE_SUFFIX);
        PathBuf::from(name)
    }

    fn directory(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }

    /// Reads every persisted entry.
    ///
    /// Never fails: an absent file, an empty or whitespace-only file, an
    /// unreadable file, and a file that does not parse all yield an empty
    /// collection. A malformed file is treated as no history at all; there is
    /// no partial recovery.
    pub fn load(&self) -> Vec<Entry> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No entries file at {:?}, starting empty", self.path);
                return Vec::new();
            }
            Err(e) => {
                warn!("Could not read entries file {:?}: {}", self.path, e);
                return Vec::new();
            }
        };

        if raw.trim().is_empty() {
            debug!("Entries file {:?} is empty", self.path);
            return Vec::new();
        }

        match serde_json::from_str::<Vec<Entry>>(&raw) {
            Ok(entries) => {
                debug!("Loaded {} entries", entries.len());
                entries
            }
            Err(e) => {
                warn!(
                    "Entries file {:?} is malformed, treating history as empty: {}",
                    self.path, e
                );
                Vec::new()
            }
        }
    }

    /// Replaces the persisted collection with `entries`.
    ///
    /// The new content is written to a temporary file next to the entries file,
    /// synced, and renamed over it, so a later [`load`](Self::load) sees either
    /// the old collection or the new one in full.
    ///
    /// # Errors
    ///
    /// - `AppError::Lock` if another process holds the writer lock
    /// - `AppError::Store` if the directory, the temporary file or the final
    ///   rename fails
    ///
    /// Nothing is retried. The previous file is left intact on every error.
    pub fn save(&self, entries: &[Entry]) -> AppResult<()> {
        let dir = self.directory();
        create_private_dir(dir).map_err(|source| StoreError::Directory {
            path: dir.to_path_buf(),
            source,
        })?;

        let _lock = self.acquire_lock()?;

        let mut json = serde_json::to_vec_pretty(entries).map_err(StoreError::Serialize)?;
        json.push(b'\n');

        let write_error = |source: io::Error| StoreError::Write {
            path: self.path.clone(),
            source,
        };

        let mut temp = NamedTempFile::new_in(dir).map_err(write_error)?;
        #[cfg(unix)]
        temp.as_file()
            .set_permissions(fs::Permissions::from_mode(
                constants::DEFAULT_FILE_PERMISSIONS,
            ))
            .map_err(write_error)?;
        temp.write_all(&json).map_err(write_error)?;
        temp.as_file().sync_all().map_err(write_error)?;

        temp.persist(&self.path)
            .map_err(|e| StoreError::Persist {
                path: self.path.clone(),
                source: e.error,
            })?;

        info!("Saved {} entries", entries.len());
        Ok(())
    }

    /// Takes the exclusive writer lock. Released when the returned file is dropped.
    fn acquire_lock(&self) -> Result<File, LockError> {
        let lock_path = self.lock_path();
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&lock_path)
            .map_err(|source| LockError::AcquisitionFailed {
                path: lock_path.clone(),
                source,
            })?;

        match file.try_lock_exclusive() {
            Ok(()) => Ok(file),
            Err(e) if e.raw_os_error() == fs2::lock_contended_error().raw_os_error() => {
                Err(LockError::StoreBusy { path: lock_path })
            }
            Err(source) => Err(LockError::AcquisitionFailed {
                path: lock_path,
                source,
            }),
        }
    }
}
