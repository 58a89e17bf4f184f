//! Advisory lock subsystem for marklock.
//!
//! # Lock Files
//!
//! A lock named `foo` is held while the marker file `<lock_dir>/~foo.lock`
//! exists. Markers are zero-byte files created with **create_new**
//! semantics (exclusive create), so only one process can create a given
//! marker at a time. There is no lock table beyond the directory itself.
//!
//! # Layers
//!
//! - `LockId`: validated lock name
//! - `LockHandler`: maps ids to markers and implements `LockBackend`
//! - `LockCoordinator`: binds callers to one backend, first `init` wins
//! - `LockHandle`: per-name handle routed through a coordinator
//!
//! # Limitations
//!
//! Locks never expire. A process that crashes while holding a lock leaves
//! an orphaned marker; `list_locks` and `clear_lock` exist to find and
//! remove those by hand.

mod coordinator;
mod guard;
mod handle;
mod handler;
mod id;
mod inventory;

#[cfg(test)]
mod tests;

// Re-export public API
pub use coordinator::LockCoordinator;
pub use guard::LockGuard;
pub use handle::LockHandle;
pub use handler::{LockBackend, LockHandler};
pub use id::LockId;
pub use inventory::{LockInfo, clear_lock, list_locks};
