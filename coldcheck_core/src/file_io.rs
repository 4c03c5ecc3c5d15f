//! # File I/O Module
//!
//! Shared plumbing for the setup store and the brand catalog:
//! - **Atomic saves**: write to .tmp, sync, rename to prevent corruption
//! - **Lenient reads**: a missing or unparseable file yields `None`, never
//!   an error (the caller substitutes its default)
//! - **File locking**: concurrent writers queue on a `.lock` sidecar so the
//!   last write wins intact
//!
//! Read failures are logged at WARN and swallowed; write failures are real
//! errors and propagate.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use fs2::FileExt;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::errors::{BalanceError, BalanceResult};

/// Read and parse a JSON file, swallowing every failure.
///
/// Returns `None` when the file is missing (silently), unreadable, or not
/// valid JSON for `T` (both logged at WARN). `what` names the file kind in
/// the log line.
pub fn read_json_lenient<T: DeserializeOwned>(path: &Path, what: &str) -> Option<T> {
    if !path.exists() {
        return None;
    }

    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "could not read {} file, using defaults",
                what
            );
            return None;
        }
    };

    match serde_json::from_str(&contents) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "could not parse {} file, using defaults",
                what
            );
            None
        }
    }
}

/// Write a value as pretty JSON with atomic semantics.
///
/// The write process:
/// 1. Serialize to JSON
/// 2. Write to a temporary file (.tmp)
/// 3. Sync to disk (fsync)
/// 4. Rename .tmp to the final path (atomic on most filesystems)
///
/// This prevents a half-written file if the process is interrupted.
pub fn atomic_write_json<T: Serialize>(value: &T, path: &Path) -> BalanceResult<()> {
    let json = serde_json::to_string_pretty(value).map_err(|e| BalanceError::SerializationError {
        reason: e.to_string(),
    })?;

    let tmp_path = sidecar_path(path, "tmp");

    let mut tmp_file = File::create(&tmp_path).map_err(|e| {
        BalanceError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.write_all(json.as_bytes()).map_err(|e| {
        BalanceError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.sync_all().map_err(|e| {
        BalanceError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    fs::rename(&tmp_path, path).map_err(|e| {
        // Clean up temp file if rename fails
        let _ = fs::remove_file(&tmp_path);
        BalanceError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    Ok(())
}

/// Exclusive write lock guard, released when dropped.
///
/// Locks a `.lock` sidecar next to the target file via OS-level file
/// locking (fs2). Acquisition blocks until the current holder releases, so
/// concurrent writers queue and the last write wins.
pub struct ExclusiveLock {
    lock_path: PathBuf,
    _lock_file: File,
}

impl ExclusiveLock {
    /// Block until the write lock for `path` is held.
    pub fn acquire(path: &Path) -> BalanceResult<Self> {
        let lock_path = sidecar_path(path, "lock");

        let lock_file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&lock_path)
            .map_err(|e| {
                BalanceError::file_error("create lock", lock_path.display().to_string(), e.to_string())
            })?;

        lock_file.lock_exclusive().map_err(|e| {
            BalanceError::file_error("acquire lock", lock_path.display().to_string(), e.to_string())
        })?;

        Ok(ExclusiveLock {
            lock_path,
            _lock_file: lock_file,
        })
    }
}

impl Drop for ExclusiveLock {
    fn drop(&mut self) {
        // Remove the lock file; the OS lock is released with _lock_file
        let _ = fs::remove_file(&self.lock_path);
    }
}

/// Build a sidecar path by extending the extension (x.json -> x.json.tmp)
fn sidecar_path(path: &Path, suffix: &str) -> PathBuf {
    let mut sidecar = path.to_path_buf();
    let extension = sidecar
        .extension()
        .map(|e| format!("{}.{}", e.to_string_lossy(), suffix))
        .unwrap_or_else(|| suffix.to_string());
    sidecar.set_extension(extension);
    sidecar
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use std::env::temp_dir;

    fn temp_json_path(name: &str) -> PathBuf {
        temp_dir().join(format!("coldcheck_test_{}.json", name))
    }

    #[test]
    fn test_sidecar_path_generation() {
        let path = Path::new("/data/saved_setups.json");
        assert_eq!(
            sidecar_path(path, "lock"),
            Path::new("/data/saved_setups.json.lock")
        );
        assert_eq!(
            sidecar_path(path, "tmp"),
            Path::new("/data/saved_setups.json.tmp")
        );
    }

    #[test]
    fn test_read_missing_file_is_none() {
        let path = temp_json_path("does_not_exist");
        let _ = fs::remove_file(&path);
        let value: Option<BTreeMap<String, f64>> = read_json_lenient(&path, "test");
        assert!(value.is_none());
    }

    #[test]
    fn test_read_corrupt_file_is_none() {
        let path = temp_json_path("corrupt");
        fs::write(&path, "{ not json").unwrap();

        let value: Option<BTreeMap<String, f64>> = read_json_lenient(&path, "test");
        assert!(value.is_none());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_write_read_roundtrip() {
        let path = temp_json_path("roundtrip");

        let mut value = BTreeMap::new();
        value.insert("r".to_string(), 5.7);
        atomic_write_json(&value, &path).unwrap();

        let loaded: BTreeMap<String, f64> = read_json_lenient(&path, "test").unwrap();
        assert_eq!(loaded.get("r"), Some(&5.7));

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_atomic_write_leaves_no_tmp_file() {
        let path = temp_json_path("atomic");
        let tmp_path = sidecar_path(&path, "tmp");

        atomic_write_json(&42.0_f64, &path).unwrap();

        assert!(!tmp_path.exists());
        assert!(path.exists());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_lock_acquire_and_release() {
        let path = temp_json_path("lock_test");
        let lock_path = sidecar_path(&path, "lock");

        let lock = ExclusiveLock::acquire(&path).unwrap();
        assert!(lock_path.exists());

        drop(lock);
        assert!(!lock_path.exists());
    }
}
