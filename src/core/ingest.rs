//! Ingestion of upstream extraction output.
//!
//! The NER collaborator hands over the document text and a list of
//! `(label, text)` spans. When it fails, nothing is scored: the outcome is
//! reported as a warning with a zero score instead of an error.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::core::model::{LabeledSpan, NamingPolicy, RecordDraft};
use crate::error::{CvError, Result};
use crate::scoring::{ScoreEvidence, Scorer, normalize_text};

/// Text and spans produced for one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub text: String,
    pub spans: Vec<LabeledSpan>,
}

/// Span as found in a spans file: `["LABEL", "text"]` or `{"label", "text"}`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SpanInput {
    Pair(String, String),
    Object { label: String, text: String },
}

impl From<SpanInput> for LabeledSpan {
    fn from(input: SpanInput) -> Self {
        match input {
            SpanInput::Pair(label, text) | SpanInput::Object { label, text } => {
                Self::new(label, text)
            }
        }
    }
}

impl Extraction {
    /// Build an extraction, normalizing whitespace in `raw_text`.
    pub fn new(raw_text: &str, spans: Vec<LabeledSpan>) -> Self {
        Self {
            text: normalize_text(raw_text),
            spans,
        }
    }

    /// Read the collaborator's output from a text file and a JSON spans file.
    ///
    /// Any failure is reported as [`CvError::ExtractionUnavailable`].
    pub fn from_files(text_path: &Path, spans_path: &Path) -> Result<Self> {
        let raw_text = fs::read_to_string(text_path).map_err(|err| {
            CvError::ExtractionUnavailable(format!("read text {}: {err}", text_path.display()))
        })?;
        let raw_spans = fs::read_to_string(spans_path).map_err(|err| {
            CvError::ExtractionUnavailable(format!("read spans {}: {err}", spans_path.display()))
        })?;
        let spans = parse_spans(&raw_spans).map_err(|err| {
            CvError::ExtractionUnavailable(format!("parse spans {}: {err}", spans_path.display()))
        })?;
        debug!(spans = spans.len(), "loaded extraction");
        Ok(Self::new(&raw_text, spans))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && self.spans.is_empty()
    }
}

/// Parse a JSON array of spans in either accepted shape.
pub fn parse_spans(raw: &str) -> Result<Vec<LabeledSpan>> {
    let inputs: Vec<SpanInput> = serde_json::from_str(raw)?;
    Ok(inputs.into_iter().map(LabeledSpan::from).collect())
}

/// Result of ingesting one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngestOutcome {
    Scored(RecordDraft),
    /// The scorer was never invoked; score is 0 and evidence empty.
    Unavailable { reason: String },
}

impl IngestOutcome {
    pub fn from_extraction(
        scorer: &Scorer,
        naming: &NamingPolicy,
        extraction: Result<Extraction>,
    ) -> Self {
        match extraction {
            Ok(extraction) if extraction.is_empty() => {
                let reason = "extraction produced no text or entities".to_string();
                warn!(%reason, "skipping scoring");
                Self::Unavailable { reason }
            }
            Ok(extraction) => Self::Scored(RecordDraft::analyze(
                scorer,
                naming,
                &extraction.text,
                extraction.spans,
            )),
            Err(err) => {
                let reason = match err {
                    CvError::ExtractionUnavailable(reason) => reason,
                    other => other.to_string(),
                };
                warn!(%reason, "extraction unavailable");
                Self::Unavailable { reason }
            }
        }
    }

    #[must_use]
    pub const fn score(&self) -> u64 {
        match self {
            Self::Scored(draft) => draft.score(),
            Self::Unavailable { .. } => 0,
        }
    }

    #[must_use]
    pub fn evidence(&self) -> ScoreEvidence {
        match self {
            Self::Scored(draft) => draft.evidence().clone(),
            Self::Unavailable { .. } => ScoreEvidence::default(),
        }
    }

    /// Caller-visible warning, if the extraction was unusable.
    #[must_use]
    pub fn warning(&self) -> Option<&str> {
        match self {
            Self::Scored(_) => None,
            Self::Unavailable { reason } => Some(reason),
        }
    }
}
