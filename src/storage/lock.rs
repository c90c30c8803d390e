//! Cross-process advisory lock guarding store rewrites.
//!
//! The store file is rewritten wholesale on every append, so two writers in
//! different processes must not interleave their read-modify-write cycles.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CvError, Result};

const POLL_INTERVAL: Duration = Duration::from_millis(25);

/// Exclusive lock on a `<store>.lock` file, released on drop.
pub struct StoreLock {
    file: File,
    path: PathBuf,
}

impl StoreLock {
    /// Try to acquire without blocking. `Ok(None)` means another holder has it.
    pub fn try_acquire(path: &Path) -> io::Result<Option<Self>> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)?;

        if let Err(err) = file.try_lock_exclusive() {
            if err.kind() == io::ErrorKind::WouldBlock
                || err.raw_os_error() == fs2::lock_contended_error().raw_os_error()
            {
                return Ok(None);
            }
            return Err(err);
        }

        write_lock_info(&file)?;
        Ok(Some(Self {
            file,
            path: path.to_path_buf(),
        }))
    }

    /// Poll until the lock is free or `timeout` elapses.
    pub fn acquire_timeout(path: &Path, timeout: Duration) -> Result<Self> {
        let start = Instant::now();
        loop {
            if let Some(lock) = Self::try_acquire(path)? {
                debug!(path = %path.display(), "store lock acquired");
                return Ok(lock);
            }
            if start.elapsed() >= timeout {
                let holder = Self::read_info(path).ok().flatten().map_or_else(
                    || "unknown holder".to_string(),
                    |info| format!("held by pid {} on {}", info.pid, info.hostname),
                );
                return Err(CvError::LockTimeout(format!(
                    "{} ({holder})",
                    path.display()
                )));
            }
            std::thread::sleep(POLL_INTERVAL);
        }
    }

    /// Holder info written by the current (or last) lock owner.
    pub fn read_info(path: &Path) -> io::Result<Option<LockInfo>> {
        match fs::read_to_string(path) {
            Ok(content) if content.trim().is_empty() => Ok(None),
            Ok(content) => Ok(serde_json::from_str(&content).ok()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for StoreLock {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.file);
    }
}

/// Who holds the lock.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LockInfo {
    pub pid: u32,
    pub acquired_at: DateTime<Utc>,
    pub hostname: String,
}

fn write_lock_info(file: &File) -> io::Result<()> {
    let info = LockInfo {
        pid: std::process::id(),
        acquired_at: Utc::now(),
        hostname: hostname::get()
            .ok()
            .and_then(|h| h.into_string().ok())
            .unwrap_or_else(|| "unknown".to_string()),
    };
    let json = serde_json::to_string(&info).map_err(io::Error::other)?;
    let mut file = file;
    file.set_len(0)?;
    file.write_all(json.as_bytes())?;
    file.sync_all()
}
