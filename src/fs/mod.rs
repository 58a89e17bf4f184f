//! Filesystem utilities for marklock.
//!
//! The lock subsystem only needs three primitives from the filesystem:
//! an existence check, an atomic exclusive create, and a delete that reports
//! whether anything was removed.

mod exclusive;

pub use exclusive::{CreateOutcome, create_exclusive, delete_file, exists_as_file};
