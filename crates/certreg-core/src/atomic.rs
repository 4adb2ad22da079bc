//! Exclusive read-modify-write of a registry journal.
//!
//! A mutation holds `<journal>.lock` (created with `create_new`) while it
//! replays the journal, applies one registry operation and rewrites the
//! file. A rejected operation leaves the journal byte-for-byte unchanged.

use crate::error::{RegistryError, RegistryResult};
use crate::fee::RecordingFeeTransfer;
use crate::journal::{JournalError, load_registry, save_registry};
use crate::registry::Registry;
use chrono::Utc;
use std::ffi::OsString;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// `<journal>.lock`, next to the journal itself.
pub fn journal_lock_path(journal_path: &Path) -> PathBuf {
    let mut path: OsString = journal_path.as_os_str().to_os_string();
    path.push(".lock");
    PathBuf::from(path)
}

#[derive(Debug, thiserror::Error)]
pub enum JournalMutationError {
    #[error("registry journal lock busy: {0}")]
    LockBusy(String),

    #[error("failed to acquire registry journal lock {path}: {message}")]
    LockIo { path: String, message: String },

    #[error(transparent)]
    Journal(#[from] JournalError),

    #[error(transparent)]
    Rejected(#[from] RegistryError),
}

/// Apply `operation` to the registry stored at `path` and persist the result.
///
/// The journal is rewritten only when `operation` returns `Ok`.
pub fn mutate_journal<T>(
    path: impl AsRef<Path>,
    operation: impl FnOnce(&mut Registry<RecordingFeeTransfer>) -> RegistryResult<T>,
) -> Result<T, JournalMutationError> {
    let path = path.as_ref();
    let lock = JournalLock::acquire(path)?;

    let mut registry = load_registry(path)?;
    let value = operation(&mut registry)?;
    save_registry(path, &registry)?;
    debug!(journal = %path.display(), certs = registry.store().len(), "journal rewritten");

    drop(lock);
    Ok(value)
}

/// Held for the lifetime of one mutation; removes the lock file on drop.
struct JournalLock {
    path: PathBuf,
}

impl JournalLock {
    fn acquire(journal: &Path) -> Result<Self, JournalMutationError> {
        let path = journal_lock_path(journal);
        let io_err = |err: io::Error| JournalMutationError::LockIo {
            path: path.display().to_string(),
            message: err.to_string(),
        };

        if let Some(dir) = path.parent()
            && !dir.as_os_str().is_empty()
        {
            fs::create_dir_all(dir).map_err(io_err)?;
        }

        let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::AlreadyExists => {
                return Err(JournalMutationError::LockBusy(path.display().to_string()));
            }
            Err(err) => return Err(io_err(err)),
        };
        // Holder info is diagnostic only.
        let _ = writeln!(
            file,
            "pid={}\nacquired={}",
            std::process::id(),
            Utc::now().to_rfc3339()
        );
        Ok(Self { path })
    }
}

impl Drop for JournalLock {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.path);
    }
}
