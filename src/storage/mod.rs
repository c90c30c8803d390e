//! Storage layer for cvrank
//!
//! The collection is read and rewritten as a whole. Every implementation
//! must serialize `append` and `clear` so concurrent writers cannot lose
//! each other's records.

pub mod codec;
pub mod collection;
pub mod csv_store;
pub mod lock;
pub mod memory;

pub use collection::{Collection, CorruptRecord, LoadedRecord};
pub use csv_store::CsvRecordStore;
pub use lock::{LockInfo, StoreLock};
pub use memory::MemoryRecordStore;

use crate::core::{Record, RecordDraft};
use crate::error::Result;

/// Durable collection of scored records.
pub trait RecordStore: Send + Sync {
    /// Persist one record, assigning the next id. On failure the stored
    /// collection is unchanged.
    fn append(&self, draft: RecordDraft) -> Result<Record>;

    /// Every row in creation order; undecodable rows are flagged, not dropped.
    fn load_all(&self) -> Result<Collection>;

    /// Remove the whole collection and reset the id counter.
    ///
    /// Returns the number of rows removed, or `None` when the stored file
    /// could not be decoded and was removed anyway.
    fn clear(&self) -> Result<Option<usize>>;
}
