//! Marker-file lock handler.
//!
//! Maps a `LockId` to `<lock_dir>/~<id>.lock` and implements lock state as
//! the presence of that file.

use super::id::LockId;
use crate::config::Config;
use crate::error::{MarklockError, Result};
use crate::fs::{self, CreateOutcome};
use std::fmt::Debug;
use std::path::{Path, PathBuf};

/// The three primitive lock operations a coordinator routes to.
pub trait LockBackend: Debug + Send + Sync {
    /// Whether the lock is currently held by anyone.
    fn is_locked(&self, id: &LockId) -> Result<bool>;

    /// Take the lock once, without waiting.
    ///
    /// Returns `Ok(true)` on success and `Err(MarklockError::AlreadyLocked)`
    /// when someone else holds it.
    fn lock(&self, id: &LockId) -> Result<bool>;

    /// Release the lock. Returns `Ok(false)` when it was not held.
    fn unlock(&self, id: &LockId) -> Result<bool>;
}

/// Lock handler storing markers in one directory.
///
/// The directory is not checked at construction; a missing or unwritable
/// directory surfaces as `MarklockError::Filesystem` on the first operation
/// that needs it.
#[derive(Debug, Clone)]
pub struct LockHandler {
    lock_dir: PathBuf,
    create_lock_dir: bool,
}

impl LockHandler {
    /// Create a handler for the given lock directory.
    pub fn new(lock_dir: impl Into<PathBuf>) -> Self {
        Self {
            lock_dir: lock_dir.into(),
            create_lock_dir: false,
        }
    }

    /// Build a handler from config, resolving a relative `lock_dir` against `base`.
    pub fn from_config<P: AsRef<Path>>(config: &Config, base: P) -> Self {
        Self::new(config.resolve_lock_dir(base)).create_lock_dir(config.create_lock_dir)
    }

    /// Create the lock directory on the first `lock` if it is missing.
    pub fn create_lock_dir(mut self, create: bool) -> Self {
        self.create_lock_dir = create;
        self
    }

    /// The directory holding the markers.
    pub fn lock_dir(&self) -> &Path {
        &self.lock_dir
    }

    /// Path of the marker file for `id`.
    pub fn marker_path(&self, id: &LockId) -> PathBuf {
        self.lock_dir.join(marker_file_name(id))
    }

    fn ensure_lock_dir(&self) -> Result<()> {
        if self.create_lock_dir && !self.lock_dir.exists() {
            std::fs::create_dir_all(&self.lock_dir)
                .map_err(|e| MarklockError::filesystem(&self.lock_dir, e))?;
            tracing::debug!("Created lock directory: {}", self.lock_dir.display());
        }
        Ok(())
    }
}

impl LockBackend for LockHandler {
    fn is_locked(&self, id: &LockId) -> Result<bool> {
        fs::exists_as_file(self.marker_path(id))
    }

    fn lock(&self, id: &LockId) -> Result<bool> {
        self.ensure_lock_dir()?;

        let path = self.marker_path(id);
        match fs::create_exclusive(&path)? {
            CreateOutcome::Created => {
                tracing::debug!("Acquired lock '{}': {}", id, path.display());
                Ok(true)
            }
            CreateOutcome::AlreadyExists => Err(MarklockError::AlreadyLocked {
                id: id.to_string(),
                path,
            }),
        }
    }

    fn unlock(&self, id: &LockId) -> Result<bool> {
        let path = self.marker_path(id);
        let removed = fs::delete_file(&path)?;
        if removed {
            tracing::debug!("Released lock '{}': {}", id, path.display());
        }
        Ok(removed)
    }
}

/// File name of the marker for `id`: `~<id>.lock`.
pub(crate) fn marker_file_name(id: &LockId) -> String {
    format!("~{}.lock", id.as_str())
}

/// Recover the lock name from a marker file name, if it is one.
pub(crate) fn parse_marker_file_name(file_name: &str) -> Option<&str> {
    file_name
        .strip_prefix('~')
        .and_then(|rest| rest.strip_suffix(".lock"))
        .filter(|id| !id.trim().is_empty())
}
