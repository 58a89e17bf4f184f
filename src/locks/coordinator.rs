//! Lock coordinator.
//!
//! Binds every lock operation made through it to one backend. The backend
//! is set exactly once: the first `init` wins and later calls are ignored.
//! Re-initialization with a different directory therefore silently keeps
//! the old one; check `is_initialized` if that matters to the caller.

use super::handler::LockBackend;
use super::id::LockId;
use crate::error::{MarklockError, Result};
use std::sync::OnceLock;

static GLOBAL: LockCoordinator = LockCoordinator::new();

/// Single access point routing lock operations to one configured backend.
///
/// Construct one with `new` and share it (e.g. behind an `Arc`), or use the
/// process-wide instance from `global`.
#[derive(Debug, Default)]
pub struct LockCoordinator {
    backend: OnceLock<Box<dyn LockBackend>>,
}

impl LockCoordinator {
    /// An uninitialized coordinator. Every operation fails with
    /// `NotInitialized` until `init` is called.
    pub const fn new() -> Self {
        Self {
            backend: OnceLock::new(),
        }
    }

    /// The process-wide coordinator.
    pub fn global() -> &'static LockCoordinator {
        &GLOBAL
    }

    /// Install `backend` if no backend has been installed yet.
    ///
    /// Returns the backend in effect, which is the first one ever passed.
    /// Concurrent callers race safely; exactly one of them wins.
    pub fn init<B: LockBackend + 'static>(&self, backend: B) -> &dyn LockBackend {
        let mut installed = false;
        let current = self.backend.get_or_init(|| {
            installed = true;
            Box::new(backend) as Box<dyn LockBackend>
        });

        if installed {
            tracing::debug!("Lock coordinator initialized with {:?}", current);
        } else {
            tracing::debug!(
                "Lock coordinator already initialized; keeping {:?}",
                current
            );
        }

        current.as_ref()
    }

    /// Whether `init` has been called.
    pub fn is_initialized(&self) -> bool {
        self.backend.get().is_some()
    }

    /// Check whether `id` is locked.
    pub fn is_locked(&self, id: &LockId) -> Result<bool> {
        self.backend("is_locked")?.is_locked(id)
    }

    /// Take the lock for `id` once; `AlreadyLocked` on contention.
    pub fn lock(&self, id: &LockId) -> Result<bool> {
        self.backend("lock")?.lock(id)
    }

    /// Release the lock for `id`; `Ok(false)` when it was not held.
    pub fn unlock(&self, id: &LockId) -> Result<bool> {
        self.backend("unlock")?.unlock(id)
    }

    fn backend(&self, operation: &'static str) -> Result<&dyn LockBackend> {
        self.backend
            .get()
            .map(|b| b.as_ref())
            .ok_or(MarklockError::NotInitialized(operation))
    }
}
