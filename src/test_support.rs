use crate::locks::{LockCoordinator, LockHandler};
use std::fs::File;
use std::path::Path;
use std::time::{Duration, SystemTime};
use tempfile::TempDir;

/// A fresh lock directory and a coordinator initialized against it.
pub(crate) fn create_test_coordinator() -> (TempDir, LockCoordinator) {
    let temp_dir = TempDir::new().unwrap();
    let coordinator = LockCoordinator::new();
    coordinator.init(LockHandler::new(temp_dir.path()));
    (temp_dir, coordinator)
}

/// Move a file's modification time `age` into the past.
pub(crate) fn backdate(path: &Path, age: Duration) {
    let file = File::options()
        .write(true)
        .open(path)
        .unwrap_or_else(|e| panic!("failed to open {}: {}", path.display(), e));
    file.set_modified(SystemTime::now() - age)
        .unwrap_or_else(|e| panic!("failed to backdate {}: {}", path.display(), e));
}
