//! Lock identity.

use crate::error::{MarklockError, Result};
use std::fmt;
use std::str::FromStr;

/// Validated logical name of a lock.
///
/// The name must contain at least one non-whitespace character. It is stored
/// exactly as given, so `" foo"` and `"foo"` are distinct locks with distinct
/// marker files.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LockId(String);

impl LockId {
    /// Validate and wrap a lock name.
    ///
    /// # Returns
    ///
    /// * `Ok(LockId)` - The name has a non-whitespace character
    /// * `Err(MarklockError::InvalidLockIdentifier)` - The name is empty or blank
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(MarklockError::InvalidLockIdentifier(name));
        }
        Ok(Self(name))
    }

    /// The name as it was given.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for LockId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for LockId {
    type Err = MarklockError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl TryFrom<&str> for LockId {
    type Error = MarklockError;

    fn try_from(value: &str) -> Result<Self> {
        Self::new(value)
    }
}

impl TryFrom<String> for LockId {
    type Error = MarklockError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}
