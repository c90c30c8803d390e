//! Filesystem utilities.
//!
//! Helper functions for file operations.

use std::io::{self, Write};
use std::path::Path;

use crate::error::Result;
use crate::utils::retry::{RetryPolicy, is_transient};

/// Ensure a directory exists, creating it if necessary.
pub fn ensure_dir(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}

/// Read a file, returning None if it doesn't exist.
pub fn read_optional(path: &Path, retry: &RetryPolicy) -> io::Result<Option<Vec<u8>>> {
    match retry.run("read file", || std::fs::read(path)) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err),
    }
}

/// Remove a file; a file that is already gone counts as removed.
pub fn remove_if_exists(path: &Path, retry: &RetryPolicy) -> io::Result<bool> {
    match retry.run("remove file", || std::fs::remove_file(path)) {
        Ok(()) => Ok(true),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(err) => Err(err),
    }
}

/// Replace `path` with `contents` without ever exposing a partial file.
///
/// The bytes go to a temporary file in the same directory, are synced, then
/// renamed over the target. On failure the temporary file is removed and the
/// previous contents of `path` are untouched.
pub fn atomic_write(path: &Path, contents: &[u8], retry: &RetryPolicy) -> io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;

    let mut temp = tempfile::NamedTempFile::new_in(dir)?;
    temp.write_all(contents)?;
    if let Ok(existing) = std::fs::metadata(path) {
        temp.as_file().set_permissions(existing.permissions())?;
    }
    temp.as_file().sync_all()?;

    let attempts = retry.attempts.max(1);
    let mut attempt = 1;
    loop {
        match temp.persist(path) {
            Ok(_) => return sync_dir(dir),
            Err(err) if attempt < attempts && is_transient(&err.error) => {
                attempt += 1;
                temp = err.file;
                std::thread::sleep(retry.backoff);
            }
            Err(err) => return Err(err.error),
        }
    }
}

/// Flush a directory entry so a completed rename survives a crash.
#[cfg(unix)]
fn sync_dir(dir: &Path) -> io::Result<()> {
    std::fs::File::open(dir)?.sync_all()
}

#[cfg(not(unix))]
fn sync_dir(_dir: &Path) -> io::Result<()> {
    Ok(())
}
