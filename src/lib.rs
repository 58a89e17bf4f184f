//! Marklock: advisory file locks backed by marker files.
//!
//! A lock named `foo` is held while `<lock_dir>/~foo.lock` exists. Markers
//! are created with an atomic exclusive create, so cooperating processes
//! sharing one lock directory get mutual exclusion without a lock server.
//!
//! ```no_run
//! use marklock::locks::{LockCoordinator, LockHandle, LockHandler};
//!
//! LockCoordinator::global().init(LockHandler::new("/var/lock/myapp"));
//!
//! let handle = LockHandle::new("nightly-import")?;
//! let guard = handle.acquire()?;
//! // ... exclusive work ...
//! guard.release()?;
//! # Ok::<(), marklock::error::MarklockError>(())
//! ```

pub mod config;
pub mod error;
pub mod exit_codes;
pub mod fs;
pub mod locks;

#[cfg(test)]
mod test_support;
