//! Process-local record store.

use parking_lot::Mutex;

use crate::core::{Record, RecordDraft};
use crate::error::Result;
use crate::storage::RecordStore;
use crate::storage::collection::{Collection, LoadedRecord};

/// Non-durable store with the same id and ordering rules as the file store.
#[derive(Default)]
pub struct MemoryRecordStore {
    records: Mutex<Vec<Record>>,
}

impl MemoryRecordStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordStore for MemoryRecordStore {
    fn append(&self, draft: RecordDraft) -> Result<Record> {
        let mut records = self.records.lock();
        let id = records.last().map_or(1, |last| last.id() + 1);
        let record = Record::from_draft(id, draft);
        records.push(record.clone());
        Ok(record)
    }

    fn load_all(&self) -> Result<Collection> {
        let records = self.records.lock();
        Ok(Collection::from_entries(
            records.iter().cloned().map(LoadedRecord::Valid).collect(),
        ))
    }

    fn clear(&self) -> Result<Option<usize>> {
        let mut records = self.records.lock();
        let removed = records.len();
        records.clear();
        Ok(Some(removed))
    }
}
