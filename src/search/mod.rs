//! Entity search over stored records.
//!
//! Lookups are plain case-insensitive substring matches on span text. A
//! record with no spans yields [`SearchOutcome::EmptySearchTarget`] rather
//! than an empty hit list, so callers can tell "nothing to search" apart from
//! "nothing found".

pub mod entity;

pub use entity::{EntityIndex, SearchHits, SearchOutcome, SearchQuery, search};

use crate::core::Record;

/// Search one record's spans.
#[must_use]
pub fn search_record<'a>(record: &'a Record, query: &SearchQuery) -> SearchOutcome<'a> {
    search(Some(record.spans()), query)
}
