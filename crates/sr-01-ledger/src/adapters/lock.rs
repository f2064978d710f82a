//! # Data Directory Locking
//!
//! Prevents two node processes from appending to the same data directory,
//! which would break gap-free height assignment.
//!
//! Uses `fs2` for cross-platform file locking (flock on Unix, LockFile on
//! Windows).

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;

/// Errors from data-directory locking
#[derive(Debug)]
pub enum LockError {
    /// Lock file could not be created
    CreateFailed(io::Error),
    /// Directory is already locked by another process
    AlreadyLocked { pid: Option<u32>, path: PathBuf },
    /// Failed to write PID to lock file
    WriteFailed(io::Error),
}

impl std::fmt::Display for LockError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LockError::CreateFailed(e) => write!(f, "Failed to create lock file: {}", e),
            LockError::AlreadyLocked { pid, path } => {
                if let Some(p) = pid {
                    write!(f, "Ledger already in use by process {} ({})", p, path.display())
                } else {
                    write!(f, "Ledger already in use ({})", path.display())
                }
            }
            LockError::WriteFailed(e) => write!(f, "Failed to write PID to lock file: {}", e),
        }
    }
}

impl std::error::Error for LockError {}

/// Exclusive lock on a ledger data directory.
///
/// Acquired on startup, released on drop.
///
/// ```ignore
/// let lock = DataDirLock::acquire(Path::new("./data"))?;
/// // Lock is held until `lock` goes out of scope
/// ```
pub struct DataDirLock {
    /// Kept open to maintain the lock
    file: File,
    path: PathBuf,
    pid: u32,
}

impl DataDirLock {
    const LOCK_FILE: &'static str = "LOCK";

    /// Acquire an exclusive lock on `data_dir`, creating the directory if
    /// needed.
    ///
    /// # Errors
    ///
    /// Returns `LockError::AlreadyLocked` if another process holds the lock.
    pub fn acquire(data_dir: &Path) -> Result<Self, LockError> {
        std::fs::create_dir_all(data_dir).map_err(LockError::CreateFailed)?;
        let lock_path = data_dir.join(Self::LOCK_FILE);

        // No truncate here: the holder's PID must survive a failed attempt.
        let mut file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&lock_path)
            .map_err(LockError::CreateFailed)?;

        if file.try_lock_exclusive().is_err() {
            return Err(LockError::AlreadyLocked {
                pid: Self::read_existing_pid(&lock_path),
                path: lock_path,
            });
        }

        let pid = std::process::id();
        file.set_len(0).map_err(LockError::WriteFailed)?;
        writeln!(file, "{}", pid).map_err(LockError::WriteFailed)?;
        file.sync_all().map_err(LockError::WriteFailed)?;

        Ok(Self {
            file,
            path: lock_path,
            pid,
        })
    }

    /// PID of the process holding the lock
    pub fn pid(&self) -> u32 {
        self.pid
    }

    /// Path to the lock file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_existing_pid(path: &Path) -> Option<u32> {
        std::fs::read_to_string(path)
            .ok()
            .and_then(|s| s.trim().parse().ok())
    }
}

impl Drop for DataDirLock {
    fn drop(&mut self) {
        #[allow(clippy::incompatible_msrv)]
        let _ = FileExt::unlock(&self.file);
        let _ = std::fs::remove_file(&self.path);
    }
}
