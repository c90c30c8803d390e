//! Core data model and ingestion.

pub mod ingest;
pub mod model;

pub use ingest::{Extraction, IngestOutcome, parse_spans};
pub use model::{LabeledSpan, NamingPolicy, Record, RecordDraft, TIMESTAMP_FORMAT, distinct_spans};
