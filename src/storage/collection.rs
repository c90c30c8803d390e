//! In-memory view of a loaded record collection.

use crate::core::Record;

/// A stored row whose contents could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorruptRecord {
    /// 1-based data row number (the header is not counted).
    pub row: usize,
    /// Id cell, when it still parses.
    pub id: Option<u64>,
    /// Display name cell, when present.
    pub display_name: Option<String>,
    pub reason: String,
    /// Original cells, written back unchanged on the next rewrite.
    pub(crate) raw: csv::ByteRecord,
}

/// One row of the collection, in storage order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadedRecord {
    Valid(Record),
    Corrupt(CorruptRecord),
}

impl LoadedRecord {
    #[must_use]
    pub fn id(&self) -> Option<u64> {
        match self {
            Self::Valid(record) => Some(record.id()),
            Self::Corrupt(corrupt) => corrupt.id,
        }
    }
}

/// The full persisted collection, in creation order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Collection {
    entries: Vec<LoadedRecord>,
}

impl Collection {
    #[must_use]
    pub const fn from_entries(entries: Vec<LoadedRecord>) -> Self {
        Self { entries }
    }

    #[must_use]
    pub fn entries(&self) -> &[LoadedRecord] {
        &self.entries
    }

    pub(crate) fn push(&mut self, entry: LoadedRecord) {
        self.entries.push(entry);
    }

    /// Successfully decoded records.
    pub fn records(&self) -> impl Iterator<Item = &Record> {
        self.entries.iter().filter_map(|entry| match entry {
            LoadedRecord::Valid(record) => Some(record),
            LoadedRecord::Corrupt(_) => None,
        })
    }

    /// Rows flagged as invalid.
    pub fn corrupt(&self) -> impl Iterator<Item = &CorruptRecord> {
        self.entries.iter().filter_map(|entry| match entry {
            LoadedRecord::Valid(_) => None,
            LoadedRecord::Corrupt(corrupt) => Some(corrupt),
        })
    }

    /// Total rows, valid or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Id for the next appended record: one past the highest readable id.
    #[must_use]
    pub fn next_id(&self) -> u64 {
        self.entries
            .iter()
            .filter_map(LoadedRecord::id)
            .max()
            .map_or(1, |max| max.saturating_add(1))
    }

    /// Look up a row by id.
    #[must_use]
    pub fn find(&self, id: u64) -> Option<&LoadedRecord> {
        self.entries.iter().find(|entry| entry.id() == Some(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{NamingPolicy, RecordDraft};
    use crate::scoring::Scorer;

    fn record(id: u64) -> LoadedRecord {
        let draft =
            RecordDraft::analyze(&Scorer::default(), &NamingPolicy::default(), "Python", Vec::new());
        LoadedRecord::Valid(Record::from_draft(id, draft))
    }

    fn corrupt(row: usize, id: Option<u64>) -> LoadedRecord {
        LoadedRecord::Corrupt(CorruptRecord {
            row,
            id,
            display_name: None,
            reason: "bad spans".to_string(),
            raw: csv::ByteRecord::new(),
        })
    }

    #[test]
    fn empty_collection_starts_at_one() {
        assert_eq!(Collection::default().next_id(), 1);
    }

    #[test]
    fn next_id_counts_corrupt_rows_with_ids() {
        let collection = Collection::from_entries(vec![record(1), corrupt(2, Some(7)), record(3)]);
        assert_eq!(collection.next_id(), 8);
    }

    #[test]
    fn records_and_corrupt_partition_entries() {
        let collection = Collection::from_entries(vec![record(1), corrupt(2, None), record(3)]);
        assert_eq!(collection.len(), 3);
        assert_eq!(collection.records().map(Record::id).collect::<Vec<_>>(), [1, 3]);
        assert_eq!(collection.corrupt().count(), 1);
        assert_eq!(collection.next_id(), 4);
    }

    #[test]
    fn find_by_id() {
        let collection = Collection::from_entries(vec![record(1), record(2)]);
        assert!(matches!(collection.find(2), Some(LoadedRecord::Valid(r)) if r.id() == 2));
        assert!(collection.find(9).is_none());
    }
}
