//! Per-name lock handle.

use super::coordinator::LockCoordinator;
use super::guard::LockGuard;
use super::id::LockId;
use crate::error::Result;

/// A capability to lock, unlock and check one named lock.
///
/// The handle holds no lock state itself; the marker file does. Two handles
/// with the same name contend for the same marker.
#[derive(Debug, Clone)]
pub struct LockHandle<'c> {
    id: LockId,
    coordinator: &'c LockCoordinator,
}

impl LockHandle<'static> {
    /// Create a handle bound to the process-wide coordinator.
    ///
    /// Fails with `InvalidLockIdentifier` for empty or whitespace-only names.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        Self::with_coordinator(LockCoordinator::global(), name)
    }
}

impl<'c> LockHandle<'c> {
    /// Create a handle bound to `coordinator`.
    pub fn with_coordinator(
        coordinator: &'c LockCoordinator,
        name: impl Into<String>,
    ) -> Result<Self> {
        Ok(Self {
            id: LockId::new(name)?,
            coordinator,
        })
    }

    /// The lock name as given at construction.
    pub fn lock_id(&self) -> &str {
        self.id.as_str()
    }

    /// The validated lock id.
    pub fn id(&self) -> &LockId {
        &self.id
    }

    /// Whether anyone currently holds this lock.
    pub fn is_locked(&self) -> Result<bool> {
        self.coordinator.is_locked(&self.id)
    }

    /// Take the lock once.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - The marker was created
    /// * `Err(MarklockError::AlreadyLocked)` - Someone holds it; the marker is untouched
    /// * `Err(MarklockError::NotInitialized)` - The coordinator has no backend
    pub fn lock(&self) -> Result<bool> {
        self.coordinator.lock(&self.id)
    }

    /// Release the lock. `Ok(false)` when it was not held.
    pub fn unlock(&self) -> Result<bool> {
        self.coordinator.unlock(&self.id)
    }

    /// Take the lock and return a guard that releases it on drop.
    pub fn acquire(&self) -> Result<LockGuard<'c>> {
        self.coordinator.lock(&self.id)?;
        Ok(LockGuard::new(self.id.clone(), self.coordinator))
    }
}
