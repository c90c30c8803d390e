//! CSV row layout and the versioned span-cell encoding.
//!
//! One row per record:
//!
//! ```text
//! id,display_name,source_name,uploaded_at,score,years_of_experience,matched_skills,spans
//! 1,Jane Doe,jane.pdf,2024-05-01 10:00:00,14,5,"[""Python"",""SQL""]","{""v"":1,""pairs"":[[""PERSON"",""Jane Doe""]]}"
//! ```
//!
//! The `spans` cell is `{"v":1,"pairs":[[label,text],...]}`. A bare
//! `[[label,text],...]` array is read as version 0.

use std::collections::BTreeSet;

use chrono::NaiveDateTime;
use csv::{ByteRecord, StringRecord};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::{LabeledSpan, Record, TIMESTAMP_FORMAT};
use crate::error::{CvError, Result};
use crate::scoring::ScoreEvidence;
use crate::storage::collection::{Collection, CorruptRecord, LoadedRecord};

/// Column names, in order.
pub const HEADER: [&str; 8] = [
    "id",
    "display_name",
    "source_name",
    "uploaded_at",
    "score",
    "years_of_experience",
    "matched_skills",
    "spans",
];

/// Version written into every `spans` cell.
pub const SPANS_FORMAT_VERSION: u32 = 1;

#[derive(Serialize)]
struct SpansEnvelope<'a> {
    v: u32,
    pairs: Vec<(&'a str, &'a str)>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SpansPayload {
    Versioned { v: u32, pairs: Vec<(String, String)> },
    Bare(Vec<(String, String)>),
}

/// Encode spans as an ordered list of `[label, text]` pairs.
pub fn encode_spans(spans: &[LabeledSpan]) -> Result<String> {
    let envelope = SpansEnvelope {
        v: SPANS_FORMAT_VERSION,
        pairs: spans
            .iter()
            .map(|span| (span.label.as_str(), span.text.as_str()))
            .collect(),
    };
    Ok(serde_json::to_string(&envelope)?)
}

/// Decode a `spans` cell back into the exact list that was encoded.
pub fn decode_spans(raw: &str) -> Result<Vec<LabeledSpan>> {
    let payload: SpansPayload = serde_json::from_str(raw).map_err(|_| {
        CvError::Serialization("spans cell is not a list of [label, text] pairs".to_string())
    })?;
    let pairs = match payload {
        SpansPayload::Versioned { v, pairs } if v == SPANS_FORMAT_VERSION => pairs,
        SpansPayload::Versioned { v, .. } => {
            return Err(CvError::Serialization(format!(
                "unsupported spans encoding version {v}"
            )));
        }
        SpansPayload::Bare(pairs) => pairs,
    };
    Ok(pairs
        .into_iter()
        .map(|(label, text)| LabeledSpan::new(label, text))
        .collect())
}

/// Cells for one record, in [`HEADER`] order.
pub fn encode_record(record: &Record) -> Result<Vec<String>> {
    Ok(vec![
        record.id().to_string(),
        record.display_name().to_string(),
        record.source_name().unwrap_or_default().to_string(),
        record.uploaded_at_display(),
        record.score().to_string(),
        record.evidence().years_of_experience.to_string(),
        serde_json::to_string(&record.evidence().matched_skills)?,
        encode_spans(record.spans())?,
    ])
}

/// Decode one data row. Never fails: bad rows come back as
/// [`LoadedRecord::Corrupt`].
pub(crate) fn decode_row(row: usize, raw: ByteRecord) -> LoadedRecord {
    let fields = match StringRecord::from_byte_record(raw.clone()) {
        Ok(fields) => fields,
        Err(_) => {
            return corrupt_row(row, None, None, "row is not valid UTF-8".to_string(), raw);
        }
    };
    match parse_fields(&fields) {
        Ok(record) => LoadedRecord::Valid(record),
        Err(reason) => {
            let id = fields
                .get(0)
                .and_then(|cell| cell.trim().parse::<u64>().ok())
                .filter(|id| *id > 0);
            let display_name = fields.get(1).map(str::to_string);
            corrupt_row(row, id, display_name, reason, raw)
        }
    }
}

fn corrupt_row(
    row: usize,
    id: Option<u64>,
    display_name: Option<String>,
    reason: String,
    raw: ByteRecord,
) -> LoadedRecord {
    warn!(row, ?id, %reason, "flagging corrupt record");
    LoadedRecord::Corrupt(CorruptRecord {
        row,
        id,
        display_name,
        reason,
        raw,
    })
}

fn parse_fields(fields: &StringRecord) -> std::result::Result<Record, String> {
    if fields.len() != HEADER.len() {
        return Err(format!(
            "expected {} cells, found {}",
            HEADER.len(),
            fields.len()
        ));
    }
    let cell = |idx: usize| fields.get(idx).unwrap_or_default();

    let id = cell(0)
        .trim()
        .parse::<u64>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| format!("invalid id {:?}", cell(0)))?;
    let display_name = cell(1).to_string();
    let source_name = Some(cell(2))
        .filter(|name| !name.is_empty())
        .map(str::to_string);
    let uploaded_at = NaiveDateTime::parse_from_str(cell(3), TIMESTAMP_FORMAT)
        .map_err(|err| format!("invalid uploaded_at {:?}: {err}", cell(3)))?;
    let score = cell(4)
        .trim()
        .parse::<u64>()
        .map_err(|err| format!("invalid score {:?}: {err}", cell(4)))?;
    let years_of_experience = cell(5)
        .trim()
        .parse::<u32>()
        .map_err(|err| format!("invalid years_of_experience {:?}: {err}", cell(5)))?;
    let matched_skills: BTreeSet<String> = serde_json::from_str(cell(6))
        .map_err(|err| format!("invalid matched_skills: {err}"))?;
    let spans = decode_spans(cell(7)).map_err(|err| err.to_string())?;

    let evidence = ScoreEvidence {
        years_of_experience,
        matched_skills,
    };
    if evidence.total() != score {
        return Err(format!(
            "score {score} does not match evidence total {}",
            evidence.total()
        ));
    }
    Ok(Record::restore(
        id,
        display_name,
        source_name,
        spans,
        evidence,
        score,
        uploaded_at,
    ))
}

/// Parse a whole store file.
///
/// Individual bad rows are flagged, not fatal. A wrong header is fatal
/// because no row can be trusted against it.
pub fn decode_collection(bytes: &[u8]) -> Result<Collection> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Collection::default());
    }
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);
    let headers = reader
        .byte_headers()
        .map_err(|err| CvError::PersistenceCorruption {
            row: 0,
            reason: format!("unreadable header: {err}"),
        })?
        .clone();
    if !headers.iter().eq(HEADER.iter().map(|h| h.as_bytes())) {
        let found: Vec<_> = headers.iter().map(String::from_utf8_lossy).collect();
        return Err(CvError::PersistenceCorruption {
            row: 0,
            reason: format!("unexpected header {found:?}"),
        });
    }

    let mut collection = Collection::default();
    for (idx, result) in reader.byte_records().enumerate() {
        let row = idx + 1;
        let entry = match result {
            Ok(raw) => decode_row(row, raw),
            Err(err) => corrupt_row(row, None, None, err.to_string(), ByteRecord::new()),
        };
        collection.push(entry);
    }
    Ok(collection)
}

/// Serialize a collection, carrying corrupt rows through unchanged.
pub fn encode_collection(collection: &Collection) -> Result<Vec<u8>> {
    let write_err = |err: csv::Error| CvError::Serialization(format!("encode store row: {err}"));
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(Vec::new());
    writer.write_record(HEADER).map_err(write_err)?;
    for entry in collection.entries() {
        match entry {
            LoadedRecord::Valid(record) => {
                writer.write_record(encode_record(record)?).map_err(write_err)?;
            }
            LoadedRecord::Corrupt(corrupt) if corrupt.raw.is_empty() => {
                warn!(row = corrupt.row, "dropping unreadable row with no cells");
            }
            LoadedRecord::Corrupt(corrupt) => {
                writer.write_byte_record(&corrupt.raw).map_err(write_err)?;
            }
        }
    }
    writer
        .into_inner()
        .map_err(|err| CvError::Serialization(format!("flush store rows: {err}")))
}
