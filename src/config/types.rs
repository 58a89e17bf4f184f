//! Configuration constants and default value functions.

/// File name looked up by `Config::discover`.
pub const CONFIG_FILE_NAME: &str = ".marklock.yaml";

// Default value functions for serde
pub(crate) fn default_lock_dir() -> String {
    ".locks".to_string()
}
pub(crate) fn default_lock_stale_minutes() -> u32 {
    120
}
