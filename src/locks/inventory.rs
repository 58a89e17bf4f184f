//! Listing and force-clearing of lock markers.
//!
//! Markers carry no content, so the only thing known about a held lock is
//! its name and the marker's modification time.

use super::handler::{LockHandler, parse_marker_file_name};
use super::id::LockId;
use crate::error::{MarklockError, Result};
use crate::fs;
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Information about an active lock.
#[derive(Debug, Clone, Serialize)]
pub struct LockInfo {
    /// The lock name (e.g., "foo" for `~foo.lock`).
    pub id: String,

    /// The marker file path.
    pub path: PathBuf,

    /// When the marker was written.
    pub created_at: DateTime<Utc>,

    /// Whether the marker is older than the configured threshold.
    pub is_stale: bool,
}

impl LockInfo {
    fn from_marker(id: String, path: PathBuf, stale_minutes: u32) -> Result<Self> {
        let created_at = marker_time(&path)?;
        let mut info = Self {
            id,
            path,
            created_at,
            is_stale: false,
        };
        info.is_stale = info.age().num_minutes() > i64::from(stale_minutes);
        Ok(info)
    }

    /// Calculate the age of the lock.
    pub fn age(&self) -> Duration {
        Utc::now().signed_duration_since(self.created_at)
    }

    /// Format the age as a human-readable string.
    pub fn age_string(&self) -> String {
        format_age(self.age())
    }
}

impl std::fmt::Display for LockInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} (age: {}{})",
            self.id,
            self.age_string(),
            if self.is_stale { ", STALE" } else { "" }
        )
    }
}

fn format_age(age: Duration) -> String {
    let minutes = age.num_minutes().max(0);
    let hours = age.num_hours().max(0);
    let days = age.num_days().max(0);

    if days > 0 {
        format!("{}d {}h", days, hours % 24)
    } else if hours > 0 {
        format!("{}h {}m", hours, minutes % 60)
    } else {
        format!("{}m", minutes)
    }
}

fn marker_time(path: &Path) -> Result<DateTime<Utc>> {
    let modified = std::fs::metadata(path)
        .and_then(|meta| meta.modified())
        .map_err(|e| MarklockError::filesystem(path, e))?;
    Ok(DateTime::<Utc>::from(modified))
}

/// List all markers in the handler's lock directory.
///
/// A missing directory yields an empty list. Files that are not
/// `~<id>.lock` markers are skipped. Results are sorted by id.
pub fn list_locks(handler: &LockHandler, stale_minutes: u32) -> Result<Vec<LockInfo>> {
    let lock_dir = handler.lock_dir();
    let mut locks = Vec::new();

    if !lock_dir.exists() {
        return Ok(locks);
    }

    let entries =
        std::fs::read_dir(lock_dir).map_err(|e| MarklockError::filesystem(lock_dir, e))?;

    for entry in entries {
        let entry = entry.map_err(|e| MarklockError::filesystem(lock_dir, e))?;
        let path = entry.path();

        let file_name = entry.file_name();
        let Some(id) = file_name.to_str().and_then(parse_marker_file_name) else {
            continue;
        };
        let id = id.to_string();

        if !fs::exists_as_file(&path)? {
            continue;
        }

        // The marker may vanish between read_dir and stat
        match LockInfo::from_marker(id, path, stale_minutes) {
            Ok(info) => locks.push(info),
            Err(MarklockError::Filesystem { source, .. })
                if source.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(e),
        }
    }

    locks.sort_by(|a, b| a.id.cmp(&b.id));

    Ok(locks)
}

/// Remove a marker regardless of who holds it.
///
/// The caller is responsible for deciding that clearing is appropriate,
/// typically because the holder crashed and left the marker orphaned.
///
/// # Returns
///
/// * `Ok(LockInfo)` - Information about the cleared lock
/// * `Err(MarklockError::UserError)` - No marker exists for `id`
pub fn clear_lock(handler: &LockHandler, id: &LockId, stale_minutes: u32) -> Result<LockInfo> {
    let path = handler.marker_path(id);

    if !fs::exists_as_file(&path)? {
        return Err(MarklockError::UserError(format!(
            "lock '{}' does not exist at: {}",
            id,
            path.display()
        )));
    }

    let info = LockInfo::from_marker(id.to_string(), path.clone(), stale_minutes)?;

    if !fs::delete_file(&path)? {
        return Err(MarklockError::UserError(format!(
            "lock '{}' was released before it could be cleared",
            id
        )));
    }

    tracing::debug!("Cleared lock '{}': {}", id, path.display());
    Ok(info)
}
