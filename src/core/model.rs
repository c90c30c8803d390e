//! Record data model.

use std::collections::HashSet;

use chrono::{Local, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::scoring::{ScoreEvidence, ScoreResult, Scorer};

/// Persisted timestamp layout (second resolution, local time).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One recognized entity occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LabeledSpan {
    pub label: String,
    pub text: String,
}

impl LabeledSpan {
    pub fn new(label: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            text: text.into(),
        }
    }
}

/// How a record's display name is derived from its spans.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamingPolicy {
    /// Label the NER model uses for person names.
    pub person_label: String,
    /// Name used when no person span is present.
    pub fallback_name: String,
}

impl Default for NamingPolicy {
    fn default() -> Self {
        Self {
            person_label: "PERSON".to_string(),
            fallback_name: "Unknown".to_string(),
        }
    }
}

impl NamingPolicy {
    /// Text of the first person span, or the fallback name.
    #[must_use]
    pub fn display_name(&self, spans: &[LabeledSpan]) -> String {
        spans
            .iter()
            .find(|span| span.label == self.person_label && !span.text.trim().is_empty())
            .map_or_else(|| self.fallback_name.clone(), |span| span.text.clone())
    }
}

/// A scored document that has not been persisted yet.
///
/// The only way to build one is [`RecordDraft::analyze`], so score and
/// evidence always come from the scorer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordDraft {
    display_name: String,
    source_name: Option<String>,
    spans: Vec<LabeledSpan>,
    score: u64,
    evidence: ScoreEvidence,
    uploaded_at: NaiveDateTime,
}

impl RecordDraft {
    /// Score `text` and capture the spans, stamping the current time.
    #[must_use]
    pub fn analyze(
        scorer: &Scorer,
        naming: &NamingPolicy,
        text: &str,
        spans: Vec<LabeledSpan>,
    ) -> Self {
        let ScoreResult { score, evidence } = scorer.score(text);
        Self {
            display_name: naming.display_name(&spans),
            source_name: None,
            spans,
            score,
            evidence,
            uploaded_at: now_seconds(),
        }
    }

    /// Override the detected display name.
    #[must_use]
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = name.into();
        self
    }

    /// Remember the uploaded document's file name.
    #[must_use]
    pub fn with_source_name(mut self, name: impl Into<String>) -> Self {
        self.source_name = Some(name.into());
        self
    }

    /// Replace the upload timestamp (truncated to whole seconds).
    #[must_use]
    pub fn with_uploaded_at(mut self, at: NaiveDateTime) -> Self {
        self.uploaded_at = truncate_to_seconds(at);
        self
    }

    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    #[must_use]
    pub fn spans(&self) -> &[LabeledSpan] {
        &self.spans
    }

    #[must_use]
    pub const fn score(&self) -> u64 {
        self.score
    }

    #[must_use]
    pub const fn evidence(&self) -> &ScoreEvidence {
        &self.evidence
    }
}

/// One scored, persisted document analysis. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    id: u64,
    display_name: String,
    source_name: Option<String>,
    spans: Vec<LabeledSpan>,
    score: u64,
    evidence: ScoreEvidence,
    #[serde(serialize_with = "serialize_timestamp")]
    uploaded_at: NaiveDateTime,
}

impl Record {
    pub(crate) fn from_draft(id: u64, draft: RecordDraft) -> Self {
        Self {
            id,
            display_name: draft.display_name,
            source_name: draft.source_name,
            spans: draft.spans,
            score: draft.score,
            evidence: draft.evidence,
            uploaded_at: draft.uploaded_at,
        }
    }

    /// Rebuild a record read back from storage.
    pub(crate) fn restore(
        id: u64,
        display_name: String,
        source_name: Option<String>,
        spans: Vec<LabeledSpan>,
        evidence: ScoreEvidence,
        score: u64,
        uploaded_at: NaiveDateTime,
    ) -> Self {
        Self {
            id,
            display_name,
            source_name,
            spans,
            score,
            evidence,
            uploaded_at,
        }
    }

    #[must_use]
    pub const fn id(&self) -> u64 {
        self.id
    }

    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    #[must_use]
    pub fn source_name(&self) -> Option<&str> {
        self.source_name.as_deref()
    }

    #[must_use]
    pub fn spans(&self) -> &[LabeledSpan] {
        &self.spans
    }

    #[must_use]
    pub const fn score(&self) -> u64 {
        self.score
    }

    #[must_use]
    pub const fn evidence(&self) -> &ScoreEvidence {
        &self.evidence
    }

    #[must_use]
    pub const fn uploaded_at(&self) -> NaiveDateTime {
        self.uploaded_at
    }

    /// Upload time in the persisted `YYYY-MM-DD HH:MM:SS` layout.
    #[must_use]
    pub fn uploaded_at_display(&self) -> String {
        self.uploaded_at.format(TIMESTAMP_FORMAT).to_string()
    }

    /// Spans deduplicated by `(label, text)`, first occurrence first.
    #[must_use]
    pub fn distinct_spans(&self) -> Vec<&LabeledSpan> {
        distinct_spans(&self.spans)
    }
}

/// Deduplicate spans by `(label, text)` keeping first-occurrence order.
#[must_use]
pub fn distinct_spans(spans: &[LabeledSpan]) -> Vec<&LabeledSpan> {
    let mut seen = HashSet::new();
    spans.iter().filter(|span| seen.insert(*span)).collect()
}

fn now_seconds() -> NaiveDateTime {
    truncate_to_seconds(Local::now().naive_local())
}

fn truncate_to_seconds(at: NaiveDateTime) -> NaiveDateTime {
    at.with_nanosecond(0).unwrap_or(at)
}

fn serialize_timestamp<S>(at: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.collect_str(&at.format(TIMESTAMP_FORMAT))
}
