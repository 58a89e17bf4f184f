//! RAII lock guard implementation.

use super::coordinator::LockCoordinator;
use super::id::LockId;
use crate::error::Result;

/// RAII guard for a held lock.
///
/// When dropped, the marker is released through the coordinator that
/// acquired it. If releasing fails, a warning is logged but no panic occurs.
#[derive(Debug)]
pub struct LockGuard<'c> {
    id: LockId,
    coordinator: &'c LockCoordinator,

    /// Whether the lock has been released manually.
    released: bool,
}

impl<'c> LockGuard<'c> {
    pub(super) fn new(id: LockId, coordinator: &'c LockCoordinator) -> Self {
        Self {
            id,
            coordinator,
            released: false,
        }
    }

    /// The id of the held lock.
    pub fn id(&self) -> &LockId {
        &self.id
    }

    /// Manually release the lock.
    ///
    /// Returns `Ok(false)` if the marker was already gone, e.g. because it
    /// was cleared by hand while held.
    pub fn release(mut self) -> Result<bool> {
        self.released = true;
        self.coordinator.unlock(&self.id)
    }
}

impl Drop for LockGuard<'_> {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        match self.coordinator.unlock(&self.id) {
            Ok(true) => {}
            Ok(false) => tracing::warn!("Lock '{}' was already released", self.id),
            Err(e) => tracing::warn!("Failed to release lock '{}': {}", self.id, e),
        }
    }
}
