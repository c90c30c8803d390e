//! Durable record store backed by a single CSV file.

use std::path::{Path, PathBuf};
use std::time::Duration;

use parking_lot::Mutex;
use tracing::{debug, info, warn};

use crate::core::{Record, RecordDraft};
use crate::error::{CvError, Result};
use crate::storage::RecordStore;
use crate::storage::codec;
use crate::storage::collection::{Collection, LoadedRecord};
use crate::storage::lock::StoreLock;
use crate::utils::fs::{atomic_write, read_optional, remove_if_exists};
use crate::utils::retry::RetryPolicy;

/// CSV file store.
///
/// Reads see a consistent snapshot because writes replace the file by
/// rename. Appends and clears are serialized by an in-process mutex and a
/// `<file>.lock` advisory lock shared with other processes.
pub struct CsvRecordStore {
    path: PathBuf,
    lock_path: PathBuf,
    retry: RetryPolicy,
    lock_timeout: Duration,
    writer: Mutex<()>,
}

impl CsvRecordStore {
    pub fn open(path: impl Into<PathBuf>, retry: RetryPolicy, lock_timeout: Duration) -> Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            crate::utils::fs::ensure_dir(parent)?;
        }
        let mut lock_name = path.file_name().unwrap_or_default().to_os_string();
        lock_name.push(".lock");
        let lock_path = path.with_file_name(lock_name);
        Ok(Self {
            path,
            lock_path,
            retry,
            lock_timeout,
            writer: Mutex::new(()),
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_collection(&self) -> Result<Collection> {
        match read_optional(&self.path, &self.retry)? {
            Some(bytes) => codec::decode_collection(&bytes),
            None => Ok(Collection::default()),
        }
    }

    fn write_collection(&self, collection: &Collection) -> Result<()> {
        let bytes = codec::encode_collection(collection)?;
        atomic_write(&self.path, &bytes, &self.retry).map_err(|err| {
            CvError::PersistenceWrite(format!("{}: {err}", self.path.display()))
        })
    }
}

impl RecordStore for CsvRecordStore {
    fn append(&self, draft: RecordDraft) -> Result<Record> {
        let _writer = self.writer.lock();
        let _lock = StoreLock::acquire_timeout(&self.lock_path, self.lock_timeout)?;

        let mut collection = self.read_collection()?;
        let record = Record::from_draft(collection.next_id(), draft);
        collection.push(LoadedRecord::Valid(record.clone()));
        self.write_collection(&collection)?;

        info!(
            id = record.id(),
            name = record.display_name(),
            score = record.score(),
            total = collection.len(),
            "record appended"
        );
        Ok(record)
    }

    fn load_all(&self) -> Result<Collection> {
        let collection = self.read_collection()?;
        debug!(
            rows = collection.len(),
            corrupt = collection.corrupt().count(),
            "collection loaded"
        );
        Ok(collection)
    }

    fn clear(&self) -> Result<Option<usize>> {
        let _writer = self.writer.lock();
        let _lock = StoreLock::acquire_timeout(&self.lock_path, self.lock_timeout)?;

        let rows = match self.read_collection() {
            Ok(collection) => Some(collection.len()),
            Err(err @ CvError::PersistenceCorruption { .. }) => {
                warn!(error = %err, "clearing undecodable collection");
                None
            }
            Err(err) => return Err(err),
        };
        let existed = remove_if_exists(&self.path, &self.retry).map_err(|err| {
            CvError::PersistenceWrite(format!("remove {}: {err}", self.path.display()))
        })?;
        info!(existed, rows = ?rows, "collection cleared");
        Ok(rows)
    }
}
