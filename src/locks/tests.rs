//! Tests for the locks subsystem.

use super::*;
use crate::error::MarklockError;
use crate::test_support::{backdate, create_test_coordinator};
use std::time::Duration;

#[test]
fn test_handle_keeps_name_verbatim() {
    let (_temp_dir, coordinator) = create_test_coordinator();

    for name in ["foo", " spaced ", "TASK-001", "a.b.c"] {
        let handle = LockHandle::with_coordinator(&coordinator, name).unwrap();
        assert_eq!(handle.lock_id(), name);
        assert_eq!(handle.id().as_str(), name);
    }
}

#[test]
fn test_handle_rejects_blank_names() {
    let (_temp_dir, coordinator) = create_test_coordinator();

    for name in ["", " ", "\t\n"] {
        let result = LockHandle::with_coordinator(&coordinator, name);
        assert!(matches!(
            result,
            Err(MarklockError::InvalidLockIdentifier(_))
        ));
    }
}

#[test]
fn test_lock_creates_marker_and_unlock_removes_it() {
    let (temp_dir, coordinator) = create_test_coordinator();
    let marker = temp_dir.path().join("~foo.lock");
    let handle = LockHandle::with_coordinator(&coordinator, "foo").unwrap();

    assert!(!handle.is_locked().unwrap());
    assert!(handle.lock().unwrap());
    assert!(marker.is_file());
    assert!(handle.is_locked().unwrap());

    assert!(handle.unlock().unwrap());
    assert!(!marker.exists());
}

#[test]
fn test_is_locked_is_idempotent() {
    let (temp_dir, coordinator) = create_test_coordinator();
    let handle = LockHandle::with_coordinator(&coordinator, "foo").unwrap();

    let first = handle.is_locked().unwrap();
    for _ in 0..5 {
        assert_eq!(handle.is_locked().unwrap(), first);
    }
    assert_eq!(std::fs::read_dir(temp_dir.path()).unwrap().count(), 0);
}

#[test]
fn test_mutual_exclusion_between_handles() {
    let (_temp_dir, coordinator) = create_test_coordinator();
    let h1 = LockHandle::with_coordinator(&coordinator, "foo").unwrap();
    let h2 = LockHandle::with_coordinator(&coordinator, "foo").unwrap();

    assert!(h1.lock().unwrap());

    // Contention is an error, repeatedly, until someone unlocks
    for _ in 0..3 {
        let err = h2.lock().unwrap_err();
        assert!(matches!(err, MarklockError::AlreadyLocked { ref id, .. } if id == "foo"));
    }

    assert!(h1.unlock().unwrap());
    assert!(h2.lock().unwrap());
    assert!(h2.unlock().unwrap());
}

#[test]
fn test_any_handle_can_unlock() {
    let (_temp_dir, coordinator) = create_test_coordinator();
    let h1 = LockHandle::with_coordinator(&coordinator, "foo").unwrap();
    let h2 = LockHandle::with_coordinator(&coordinator, "foo").unwrap();

    h1.lock().unwrap();
    // The marker, not the handle, is authoritative
    assert!(h2.unlock().unwrap());
    assert!(!h1.is_locked().unwrap());
}

#[test]
fn test_round_trip_allows_relock() {
    let (_temp_dir, coordinator) = create_test_coordinator();
    let handle = LockHandle::with_coordinator(&coordinator, "foo").unwrap();

    handle.lock().unwrap();
    handle.unlock().unwrap();
    assert!(!handle.is_locked().unwrap());
    assert!(handle.lock().unwrap());
}

#[test]
fn test_unlock_never_locked_returns_false() {
    let (_temp_dir, coordinator) = create_test_coordinator();
    let handle = LockHandle::with_coordinator(&coordinator, "never").unwrap();

    assert!(!handle.unlock().unwrap());
}

#[test]
fn test_handle_before_init_fails() {
    let coordinator = LockCoordinator::new();
    let handle = LockHandle::with_coordinator(&coordinator, "foo").unwrap();

    assert!(matches!(
        handle.is_locked(),
        Err(MarklockError::NotInitialized(_))
    ));
    assert!(matches!(handle.lock(), Err(MarklockError::NotInitialized(_))));
    assert!(matches!(
        handle.unlock(),
        Err(MarklockError::NotInitialized(_))
    ));
    assert!(matches!(
        handle.acquire(),
        Err(MarklockError::NotInitialized(_))
    ));
}

#[test]
fn test_guard_releases_on_drop() {
    let (temp_dir, coordinator) = create_test_coordinator();
    let marker = temp_dir.path().join("~job.lock");
    let handle = LockHandle::with_coordinator(&coordinator, "job").unwrap();

    {
        let guard = handle.acquire().unwrap();
        assert_eq!(guard.id().as_str(), "job");
        assert!(marker.is_file());

        // Held through the guard: others contend
        assert!(handle.acquire().unwrap_err().is_already_locked());
    }

    assert!(!marker.exists());
}

#[test]
fn test_guard_manual_release() {
    let (temp_dir, coordinator) = create_test_coordinator();
    let handle = LockHandle::with_coordinator(&coordinator, "job").unwrap();

    let guard = handle.acquire().unwrap();
    assert!(guard.release().unwrap());
    assert!(!temp_dir.path().join("~job.lock").exists());
}

#[test]
fn test_guard_release_after_manual_clear() {
    let (_temp_dir, coordinator) = create_test_coordinator();
    let handle = LockHandle::with_coordinator(&coordinator, "job").unwrap();

    let guard = handle.acquire().unwrap();
    handle.unlock().unwrap();
    assert!(!guard.release().unwrap());
}

#[test]
fn test_threads_racing_for_one_lock() {
    let (_temp_dir, coordinator) = create_test_coordinator();

    let results: Vec<_> = std::thread::scope(|scope| {
        let workers: Vec<_> = (0..12)
            .map(|_| {
                scope.spawn(|| {
                    LockHandle::with_coordinator(&coordinator, "race")
                        .unwrap()
                        .lock()
                })
            })
            .collect();
        workers.into_iter().map(|w| w.join().unwrap()).collect()
    });

    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    assert!(
        results
            .iter()
            .filter_map(|r| r.as_ref().err())
            .all(MarklockError::is_already_locked)
    );
}

#[test]
fn test_list_locks_empty() {
    let (temp_dir, _coordinator) = create_test_coordinator();
    let handler = LockHandler::new(temp_dir.path());

    assert!(list_locks(&handler, 120).unwrap().is_empty());
}

#[test]
fn test_list_locks_missing_dir() {
    let (temp_dir, _coordinator) = create_test_coordinator();
    let handler = LockHandler::new(temp_dir.path().join("missing"));

    assert!(list_locks(&handler, 120).unwrap().is_empty());
}

#[test]
fn test_list_locks_with_locks() {
    let (temp_dir, coordinator) = create_test_coordinator();
    let handler = LockHandler::new(temp_dir.path());

    for name in ["zeta", "alpha", "TASK-001"] {
        LockHandle::with_coordinator(&coordinator, name)
            .unwrap()
            .lock()
            .unwrap();
    }
    // Non-marker files are ignored
    std::fs::write(temp_dir.path().join("notes.txt"), "").unwrap();
    std::fs::write(temp_dir.path().join("plain.lock"), "").unwrap();
    std::fs::create_dir(temp_dir.path().join("~dir.lock")).unwrap();

    let locks = list_locks(&handler, 120).unwrap();
    let ids: Vec<&str> = locks.iter().map(|l| l.id.as_str()).collect();
    assert_eq!(ids, vec!["TASK-001", "alpha", "zeta"]);

    for lock in &locks {
        assert!(!lock.is_stale);
        assert_eq!(lock.path, temp_dir.path().join(format!("~{}.lock", lock.id)));
    }
}

#[test]
fn test_list_locks_detects_stale() {
    let (temp_dir, _coordinator) = create_test_coordinator();
    let handler = LockHandler::new(temp_dir.path());

    let marker = temp_dir.path().join("~old.lock");
    std::fs::write(&marker, "").unwrap();
    backdate(&marker, Duration::from_secs(200 * 60));

    let locks = list_locks(&handler, 120).unwrap();
    assert_eq!(locks.len(), 1);
    assert_eq!(locks[0].id, "old");
    assert!(locks[0].is_stale);
    assert!(locks[0].age().num_minutes() >= 199);
    assert!(locks[0].to_string().contains("STALE"));

    // A larger threshold keeps it fresh
    assert!(!list_locks(&handler, 300).unwrap()[0].is_stale);
}

#[test]
fn test_lock_info_serializes() {
    let (temp_dir, coordinator) = create_test_coordinator();
    let handler = LockHandler::new(temp_dir.path());
    LockHandle::with_coordinator(&coordinator, "foo")
        .unwrap()
        .lock()
        .unwrap();

    let locks = list_locks(&handler, 120).unwrap();
    let json = serde_json::to_value(&locks).unwrap();

    assert_eq!(json[0]["id"], "foo");
    assert_eq!(json[0]["is_stale"], false);
    assert!(json[0]["created_at"].is_string());
}

#[test]
fn test_clear_lock_success() {
    let (temp_dir, coordinator) = create_test_coordinator();
    let handler = LockHandler::new(temp_dir.path());
    let handle = LockHandle::with_coordinator(&coordinator, "orphan").unwrap();
    handle.lock().unwrap();

    let cleared = clear_lock(&handler, handle.id(), 120).unwrap();

    assert_eq!(cleared.id, "orphan");
    assert!(!cleared.path.exists());
    assert!(!handle.is_locked().unwrap());
    assert!(handle.lock().unwrap());
}

#[test]
fn test_clear_lock_nonexistent_fails() {
    let (temp_dir, _coordinator) = create_test_coordinator();
    let handler = LockHandler::new(temp_dir.path());

    let result = clear_lock(&handler, &LockId::new("missing").unwrap(), 120);
    let err = result.unwrap_err();
    assert!(matches!(err, MarklockError::UserError(_)));
    assert!(err.to_string().contains("does not exist"));
}
