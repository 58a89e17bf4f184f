//! Exit code constants for the marklock CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, invalid lock id, bad config)
//! - 2: Lock is already held
//! - 3: Lock coordinator used before initialization
//! - 4: Filesystem failure

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments, invalid lock identifier, or invalid config.
pub const USER_ERROR: i32 = 1;

/// Lock contention: the marker file already exists.
pub const LOCK_HELD: i32 = 2;

/// The lock coordinator was used before `init`.
pub const NOT_INITIALIZED: i32 = 3;

/// Filesystem failure: permission denied, missing directory, disk full.
pub const FILESYSTEM_FAILURE: i32 = 4;
