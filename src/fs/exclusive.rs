//! Exclusive-create and delete primitives for marker files.
//!
//! Mutual exclusion in marklock rests on a single primitive: create a file
//! only if it does not exist, failing atomically otherwise. This module uses
//! `OpenOptions::create_new`, which maps to:
//!
//! - **POSIX (Linux, macOS)**: `open(2)` with `O_CREAT | O_EXCL`.
//! - **Windows**: `CreateFileW` with `CREATE_NEW`.
//!
//! Both fail with `AlreadyExists` when the path is taken, with no window
//! between the existence check and the create.
//!
//! # Important Notes
//!
//! - `O_EXCL` is atomic on local filesystems and on NFSv3+; older NFS
//!   clients emulate it non-atomically.
//! - Nothing here retries. Callers decide what contention means.

use crate::error::{MarklockError, Result};
use std::fs::{self, OpenOptions};
use std::io::ErrorKind;
use std::path::Path;

/// Outcome of an exclusive create.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateOutcome {
    /// The file did not exist and has been created.
    Created,
    /// Something already exists at the path; nothing was touched.
    AlreadyExists,
}

/// Check whether a regular file exists at `path`.
///
/// A missing file, or a missing parent directory, reads as `false`. Other
/// errors (permission denied on the directory, for instance) are returned.
pub fn exists_as_file<P: AsRef<Path>>(path: P) -> Result<bool> {
    let path = path.as_ref();

    match fs::metadata(path) {
        Ok(meta) => Ok(meta.is_file()),
        Err(e) if is_absent(e.kind()) => Ok(false),
        Err(e) => Err(MarklockError::filesystem(path, e)),
    }
}

/// Create an empty file at `path`, failing if anything already exists there.
///
/// # Returns
///
/// * `Ok(CreateOutcome::Created)` - The file was created by this call
/// * `Ok(CreateOutcome::AlreadyExists)` - The path was already taken
/// * `Err(MarklockError::Filesystem)` - Any other I/O failure
pub fn create_exclusive<P: AsRef<Path>>(path: P) -> Result<CreateOutcome> {
    let path = path.as_ref();

    let file = match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::AlreadyExists => {
            return Ok(CreateOutcome::AlreadyExists);
        }
        Err(e) => return Err(MarklockError::filesystem(path, e)),
    };

    // Flush the marker to disk before reporting success
    if let Err(e) = file.sync_all() {
        let _ = fs::remove_file(path);
        return Err(MarklockError::filesystem(path, e));
    }

    Ok(CreateOutcome::Created)
}

/// Delete the file at `path`.
///
/// # Returns
///
/// * `Ok(true)` - The file existed and was removed
/// * `Ok(false)` - Nothing was there to remove
/// * `Err(MarklockError::Filesystem)` - Removal failed for another reason
pub fn delete_file<P: AsRef<Path>>(path: P) -> Result<bool> {
    let path = path.as_ref();

    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if is_absent(e.kind()) => Ok(false),
        Err(e) => Err(MarklockError::filesystem(path, e)),
    }
}

fn is_absent(kind: ErrorKind) -> bool {
    matches!(kind, ErrorKind::NotFound | ErrorKind::NotADirectory)
}
