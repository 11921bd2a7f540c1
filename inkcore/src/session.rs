//! Single-instance session lock — file-based coordination between launches.
//!
//! Opening the editor twice must raise the existing window instead of
//! spawning a second one. Each running instance owns a pid-stamped lock file
//! under the config directory; a later launch finds a live lock, drops a
//! raise-signal file next to it, and exits. The running instance polls for
//! that signal every frame and brings its window to the front.
//!
//! The lock is an explicit owner object: acquiring returns a guard, and
//! dropping the guard (normal shutdown) releases it. Locks left behind by a
//! crashed process are detected by pid liveness and reclaimed.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Contents of a lock file.
#[derive(Serialize, Deserialize, Debug, Clone)]
struct SessionInfo {
    app: String,
    pid: u32,
}

/// Guard owning this process's single-instance lock. Dropping it releases
/// the lock so the next launch can create a fresh instance.
#[derive(Debug)]
pub struct SessionLock {
    lock_path: PathBuf,
}

/// Directory for session lock and signal files.
fn sessions_dir() -> PathBuf {
    let dir = directories::ProjectDirs::from("", "", "inkpad")
        .map(|p| p.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("/tmp/inkpad"))
        .join("sessions");
    let _ = std::fs::create_dir_all(&dir);
    dir
}

fn lock_path(dir: &PathBuf, app_id: &str) -> PathBuf {
    dir.join(format!("{}.lock", app_id))
}

fn raise_path(dir: &PathBuf, app_id: &str) -> PathBuf {
    dir.join(format!("raise_{}", app_id))
}

impl SessionLock {
    /// Acquire the single-instance lock for `app_id`.
    ///
    /// Returns None when another live instance already holds it; in that
    /// case a raise signal is left for the running instance and the caller
    /// should exit.
    pub fn acquire(app_id: &str) -> Option<Self> {
        Self::acquire_in(sessions_dir(), app_id)
    }

    /// Like [`acquire`](Self::acquire) with an explicit directory.
    pub fn acquire_in(dir: PathBuf, app_id: &str) -> Option<Self> {
        let _ = std::fs::create_dir_all(&dir);
        let path = lock_path(&dir, app_id);

        if let Ok(json) = std::fs::read_to_string(&path) {
            if let Ok(info) = serde_json::from_str::<SessionInfo>(&json) {
                if is_process_alive(info.pid) {
                    // A live instance exists: ask it to raise itself.
                    let _ = std::fs::write(raise_path(&dir, app_id), "1");
                    return None;
                }
            }
            // Stale lock from a dead process.
            let _ = std::fs::remove_file(&path);
        }

        let info = SessionInfo {
            app: app_id.to_string(),
            pid: std::process::id(),
        };
        let json = serde_json::to_string(&info).ok()?;
        std::fs::write(&path, json).ok()?;
        Some(Self { lock_path: path })
    }

    /// Check whether a later launch asked this instance to raise its window,
    /// and clear the signal. Poll once per frame.
    pub fn check_raise_signal(app_id: &str) -> bool {
        Self::check_raise_signal_in(&sessions_dir(), app_id)
    }

    /// Like [`check_raise_signal`](Self::check_raise_signal) with an explicit
    /// directory.
    pub fn check_raise_signal_in(dir: &PathBuf, app_id: &str) -> bool {
        let path = raise_path(dir, app_id);
        if path.exists() {
            let _ = std::fs::remove_file(path);
            true
        } else {
            false
        }
    }
}

impl Drop for SessionLock {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.lock_path);
    }
}

/// Check if a process is still running (Linux: /proc/{pid}).
fn is_process_alive(pid: u32) -> bool {
    std::path::Path::new(&format!("/proc/{}", pid)).exists()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("inkcore-session-{}-{}", tag, std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn test_second_acquire_fails_and_raises_the_first() {
        let dir = scratch_dir("double");
        let first = SessionLock::acquire_in(dir.clone(), "editor");
        assert!(first.is_some());

        // Same pid counts as a live instance.
        let second = SessionLock::acquire_in(dir.clone(), "editor");
        assert!(second.is_none());
        assert!(SessionLock::check_raise_signal_in(&dir, "editor"));
        // The signal is consumed by the check.
        assert!(!SessionLock::check_raise_signal_in(&dir, "editor"));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_drop_releases_the_lock() {
        let dir = scratch_dir("drop");
        let lock = SessionLock::acquire_in(dir.clone(), "editor").unwrap();
        drop(lock);
        assert!(SessionLock::acquire_in(dir.clone(), "editor").is_some());
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_stale_lock_from_dead_process_is_reclaimed() {
        let dir = scratch_dir("stale");
        let _ = std::fs::create_dir_all(&dir);
        let stale = SessionInfo {
            app: "editor".to_string(),
            pid: u32::MAX, // no such process
        };
        std::fs::write(
            lock_path(&dir, "editor"),
            serde_json::to_string(&stale).unwrap(),
        )
        .unwrap();

        assert!(SessionLock::acquire_in(dir.clone(), "editor").is_some());
        // No raise signal was produced for a stale lock.
        assert!(!SessionLock::check_raise_signal_in(&dir, "editor"));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_independent_app_ids_do_not_collide() {
        let dir = scratch_dir("ids");
        let a = SessionLock::acquire_in(dir.clone(), "editor");
        let b = SessionLock::acquire_in(dir.clone(), "browser");
        assert!(a.is_some());
        assert!(b.is_some());
        let _ = std::fs::remove_dir_all(&dir);
    }
}
