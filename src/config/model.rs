//! Config struct definition and default implementation.

use super::types::*;
use serde::{Deserialize, Serialize};

/// Configuration for marklock.
///
/// This struct represents the contents of `.marklock.yaml`.
/// Unknown fields in the YAML are ignored for forward compatibility.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding the `~<id>.lock` markers (default: ".locks").
    /// Relative paths resolve against the directory of the config file.
    #[serde(default = "default_lock_dir")]
    pub lock_dir: String,

    /// Create the lock directory on first lock if it does not exist.
    #[serde(default)]
    pub create_lock_dir: bool,

    /// Minutes after which `list` flags a marker as old.
    /// Informational only: markers never expire.
    #[serde(default = "default_lock_stale_minutes")]
    pub lock_stale_minutes: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            lock_dir: default_lock_dir(),
            create_lock_dir: false,
            lock_stale_minutes: default_lock_stale_minutes(),
        }
    }
}
